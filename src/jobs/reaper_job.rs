//! Purchase expiry background job.
//!
//! Checkout inserts purchase rows in `pending` state whose payment may
//! never complete. This job is the compensating step: it marks pending
//! rows whose checkout session has lapsed as `expired`, so abandoned
//! sessions stop gating anything and dashboards stay truthful.

use apalis::prelude::Data;
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::infra::{PurchaseRepository, PurchaseStore};

/// Reaper job payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseReaperJob {
    /// When the sweep was requested
    pub requested_at: DateTime<Utc>,
}

impl PurchaseReaperJob {
    pub fn now() -> Self {
        Self {
            requested_at: Utc::now(),
        }
    }
}

/// Reaper job handler - expires stale pending purchases
pub async fn purchase_reaper_handler(
    job: PurchaseReaperJob,
    db: Data<DatabaseConnection>,
) -> Result<(), AppError> {
    let purchases = PurchaseStore::new((*db).clone());
    let reaped = purchases.expire_stale(Utc::now()).await?;

    if reaped > 0 {
        tracing::info!(
            reaped,
            requested_at = %job.requested_at,
            "expired stale pending purchases"
        );
    } else {
        tracing::debug!(requested_at = %job.requested_at, "no stale pending purchases");
    }

    Ok(())
}
