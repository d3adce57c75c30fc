//! Payment provider boundary.
//!
//! The platform treats the provider as an injected collaborator with a
//! fixed capability set: create a hosted checkout session, list
//! transactions, count them, and read the account balance. Production
//! uses [`StripeGateway`]; tests inject [`MockPaymentProvider`].

mod stripe;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::AppResult;

pub use stripe::StripeGateway;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// One product line of a hosted checkout session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionLineItem {
    pub name: String,
    pub image: String,
    /// Unit amount in minor currency units (cents)
    pub unit_amount: i64,
    pub quantity: u32,
}

/// Everything needed to open a hosted checkout session.
#[derive(Debug, Clone)]
pub struct CheckoutSessionSpec {
    pub line_items: Vec<SessionLineItem>,
    pub success_url: String,
    pub cancel_url: String,
    /// Caller identity carried through provider metadata for the webhook
    pub user_id: Uuid,
    /// Course ids being purchased, carried through provider metadata
    pub course_ids: Vec<Uuid>,
    pub expires_at: DateTime<Utc>,
}

/// A provider-hosted checkout session.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    /// Provider session id, stamped onto every purchase row of the checkout
    pub id: String,
    /// Hosted payment page the client redirects to
    pub url: String,
    pub expires_at: DateTime<Utc>,
}

/// Funds bucket of the provider balance.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BalanceFunds {
    /// Amount in minor currency units
    pub amount: i64,
    pub currency: String,
}

/// Provider account balance.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProviderBalance {
    pub available: Vec<BalanceFunds>,
    pub pending: Vec<BalanceFunds>,
}

/// One provider-side transaction.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProviderTransaction {
    pub id: String,
    /// Amount in minor currency units
    pub amount: i64,
    pub currency: String,
    pub status: String,
    /// Unix timestamp of the transaction
    pub created: i64,
}

/// Payment provider capability set.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Open a hosted checkout session for the given line items.
    async fn create_checkout_session(
        &self,
        spec: CheckoutSessionSpec,
    ) -> AppResult<CheckoutSession>;

    /// List recent transactions, most recent first.
    async fn list_transactions(&self, limit: u8) -> AppResult<Vec<ProviderTransaction>>;

    /// Count of transactions visible to the account.
    async fn transaction_count(&self) -> AppResult<u64>;

    /// Current available/pending balance.
    async fn balance(&self) -> AppResult<ProviderBalance>;
}
