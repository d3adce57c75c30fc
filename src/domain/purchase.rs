//! Course purchase records.
//!
//! One row per (user, course) purchase attempt. Rows are inserted in
//! `pending` state once a hosted checkout session exists; the provider's
//! webhook flips them to `completed`, and the reaper job marks rows whose
//! session expired without payment as `expired`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::course::CourseCard;

/// Lifecycle of a purchase attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseStatus {
    Pending,
    Completed,
    Failed,
    Expired,
}

impl PurchaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseStatus::Pending => "pending",
            PurchaseStatus::Completed => "completed",
            PurchaseStatus::Failed => "failed",
            PurchaseStatus::Expired => "expired",
        }
    }
}

impl From<&str> for PurchaseStatus {
    fn from(s: &str) -> Self {
        match s {
            "completed" => PurchaseStatus::Completed,
            "failed" => PurchaseStatus::Failed,
            "expired" => PurchaseStatus::Expired,
            _ => PurchaseStatus::Pending,
        }
    }
}

impl std::fmt::Display for PurchaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Purchase domain entity
#[derive(Debug, Clone)]
pub struct CoursePurchase {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    /// Amount in major currency units, as priced at checkout time
    pub amount: Decimal,
    pub status: PurchaseStatus,
    /// Provider checkout session id shared by every row of one checkout
    pub payment_id: String,
    pub session_expiry: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for the rows created by one checkout.
#[derive(Debug, Clone)]
pub struct NewPendingPurchase {
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub amount: Decimal,
    pub payment_id: String,
    pub session_expiry: DateTime<Utc>,
}

/// Purchase row with its course joined, as returned by GET /purchase.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchasedCourseView {
    pub id: Uuid,
    pub amount: Decimal,
    pub status: PurchaseStatus,
    pub payment_id: String,
    pub created_at: DateTime<Utc>,
    pub course: Option<CourseCard>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            PurchaseStatus::Pending,
            PurchaseStatus::Completed,
            PurchaseStatus::Failed,
            PurchaseStatus::Expired,
        ] {
            assert_eq!(PurchaseStatus::from(status.as_str()), status);
        }
        // Unknown provider states land in pending, never completed
        assert_eq!(PurchaseStatus::from("refunded"), PurchaseStatus::Pending);
    }
}
