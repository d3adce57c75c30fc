//! Stripe REST client.
//!
//! Talks to the Stripe API directly over HTTPS with form-encoded bodies
//! and a Bearer secret key. Transient transport failures are retried up
//! to [`PROVIDER_MAX_NETWORK_RETRIES`] times; API-level errors are not.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{
    CheckoutSession, CheckoutSessionSpec, PaymentProvider, ProviderBalance, ProviderTransaction,
};
use crate::config::{Config, CHECKOUT_CURRENCY, PROVIDER_MAX_NETWORK_RETRIES,
    PROVIDER_TRANSACTION_PAGE_SIZE};
use crate::errors::{AppError, AppResult};

const STRIPE_API_BASE: &str = "https://api.stripe.com";

/// Stripe-backed implementation of [`PaymentProvider`].
pub struct StripeGateway {
    http: reqwest::Client,
    secret_key: String,
    base_url: String,
}

impl StripeGateway {
    /// Create a gateway from application config.
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            secret_key: config.stripe_secret().to_string(),
            base_url: STRIPE_API_BASE.to_string(),
        }
    }

    /// Create a gateway against a custom API base (stub servers in tests).
    pub fn with_base_url(secret_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            secret_key: secret_key.into(),
            base_url: base_url.into(),
        }
    }

    /// Send a request, retrying transient transport failures.
    async fn send_with_retry<F>(&self, build: F) -> AppResult<reqwest::Response>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        let mut attempt = 0;
        loop {
            match build().bearer_auth(&self.secret_key).send().await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    let transient = e.is_timeout() || e.is_connect();
                    if transient && attempt < PROVIDER_MAX_NETWORK_RETRIES {
                        attempt += 1;
                        tracing::warn!(attempt, error = %e, "transient provider error, retrying");
                        continue;
                    }
                    return Err(AppError::provider(format!("stripe request failed: {}", e)));
                }
            }
        }
    }

    /// Decode a response, surfacing Stripe's error message on non-2xx.
    async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> AppResult<T> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| AppError::provider(format!("stripe response decode failed: {}", e)));
        }

        let message = response
            .json::<StripeErrorEnvelope>()
            .await
            .map(|envelope| envelope.error.message)
            .unwrap_or_else(|_| format!("stripe returned HTTP {}", status));

        Err(AppError::provider(message))
    }
}

#[async_trait]
impl PaymentProvider for StripeGateway {
    async fn create_checkout_session(
        &self,
        spec: CheckoutSessionSpec,
    ) -> AppResult<CheckoutSession> {
        let params = session_form_params(&spec);
        let url = format!("{}/v1/checkout/sessions", self.base_url);

        let response = self
            .send_with_retry(|| self.http.post(&url).form(&params))
            .await?;
        let session: StripeSession = Self::decode(response).await?;

        let expires_at = DateTime::<Utc>::from_timestamp(session.expires_at, 0)
            .ok_or_else(|| AppError::provider("stripe returned an invalid session expiry"))?;

        Ok(CheckoutSession {
            id: session.id,
            url: session
                .url
                .ok_or_else(|| AppError::provider("stripe session has no hosted url"))?,
            expires_at,
        })
    }

    async fn list_transactions(&self, limit: u8) -> AppResult<Vec<ProviderTransaction>> {
        let url = format!("{}/v1/balance_transactions", self.base_url);
        let limit = limit.to_string();

        let response = self
            .send_with_retry(|| self.http.get(&url).query(&[("limit", limit.as_str())]))
            .await?;
        let page: StripeList<StripeBalanceTransaction> = Self::decode(response).await?;

        Ok(page
            .data
            .into_iter()
            .map(|txn| ProviderTransaction {
                id: txn.id,
                amount: txn.amount,
                currency: txn.currency,
                status: txn.status,
                created: txn.created,
            })
            .collect())
    }

    async fn transaction_count(&self) -> AppResult<u64> {
        // Stripe exposes no count endpoint; one full page is the
        // dashboard's working definition of "total".
        let transactions = self.list_transactions(PROVIDER_TRANSACTION_PAGE_SIZE).await?;
        Ok(transactions.len() as u64)
    }

    async fn balance(&self) -> AppResult<ProviderBalance> {
        let url = format!("{}/v1/balance", self.base_url);

        let response = self.send_with_retry(|| self.http.get(&url)).await?;
        let balance: StripeBalance = Self::decode(response).await?;

        Ok(ProviderBalance {
            available: balance
                .available
                .into_iter()
                .map(|f| super::BalanceFunds {
                    amount: f.amount,
                    currency: f.currency,
                })
                .collect(),
            pending: balance
                .pending
                .into_iter()
                .map(|f| super::BalanceFunds {
                    amount: f.amount,
                    currency: f.currency,
                })
                .collect(),
        })
    }
}

/// Flatten a session spec into Stripe's bracketed form encoding.
fn session_form_params(spec: &CheckoutSessionSpec) -> Vec<(String, String)> {
    let mut params = vec![
        ("mode".to_string(), "payment".to_string()),
        (
            "payment_method_types[0]".to_string(),
            "card".to_string(),
        ),
        ("success_url".to_string(), spec.success_url.clone()),
        ("cancel_url".to_string(), spec.cancel_url.clone()),
        (
            "expires_at".to_string(),
            spec.expires_at.timestamp().to_string(),
        ),
        ("metadata[userId]".to_string(), spec.user_id.to_string()),
        (
            "metadata[courseIds]".to_string(),
            serde_json::to_string(&spec.course_ids).unwrap_or_default(),
        ),
    ];

    for (i, item) in spec.line_items.iter().enumerate() {
        params.push((
            format!("line_items[{i}][price_data][currency]"),
            CHECKOUT_CURRENCY.to_string(),
        ));
        params.push((
            format!("line_items[{i}][price_data][product_data][name]"),
            item.name.clone(),
        ));
        params.push((
            format!("line_items[{i}][price_data][product_data][images][0]"),
            item.image.clone(),
        ));
        params.push((
            format!("line_items[{i}][price_data][unit_amount]"),
            item.unit_amount.to_string(),
        ));
        params.push((format!("line_items[{i}][quantity]"), item.quantity.to_string()));
    }

    params
}

// =============================================================================
// Stripe wire types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeSession {
    id: String,
    url: Option<String>,
    expires_at: i64,
}

#[derive(Debug, Deserialize)]
struct StripeList<T> {
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct StripeBalanceTransaction {
    id: String,
    amount: i64,
    currency: String,
    status: String,
    created: i64,
}

#[derive(Debug, Deserialize)]
struct StripeBalance {
    available: Vec<StripeFunds>,
    pending: Vec<StripeFunds>,
}

#[derive(Debug, Deserialize)]
struct StripeFunds {
    amount: i64,
    currency: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorEnvelope {
    error: StripeErrorBody,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::payments::SessionLineItem;
    use uuid::Uuid;

    #[test]
    fn test_session_form_params_layout() {
        let user_id = Uuid::new_v4();
        let course_id = Uuid::new_v4();
        let spec = CheckoutSessionSpec {
            line_items: vec![SessionLineItem {
                name: "Rust for Backend Engineers".into(),
                image: "https://cdn.example/rust.png".into(),
                unit_amount: 1999,
                quantity: 1,
            }],
            success_url: "https://app.example/purchase-success".into(),
            cancel_url: "https://app.example/cart".into(),
            user_id,
            course_ids: vec![course_id],
            expires_at: Utc::now(),
        };

        let params = session_form_params(&spec);
        let get = |key: &str| {
            params
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };

        assert_eq!(get("mode"), Some("payment"));
        assert_eq!(get("payment_method_types[0]"), Some("card"));
        assert_eq!(
            get("line_items[0][price_data][unit_amount]"),
            Some("1999")
        );
        assert_eq!(get("line_items[0][quantity]"), Some("1"));
        assert_eq!(
            get("metadata[userId]").unwrap(),
            user_id.to_string().as_str()
        );
        assert!(get("metadata[courseIds]")
            .unwrap()
            .contains(&course_id.to_string()));
    }

    #[test]
    fn test_session_form_params_one_block_per_item() {
        let spec = CheckoutSessionSpec {
            line_items: vec![
                SessionLineItem {
                    name: "A".into(),
                    image: "a.png".into(),
                    unit_amount: 1000,
                    quantity: 1,
                },
                SessionLineItem {
                    name: "B".into(),
                    image: "b.png".into(),
                    unit_amount: 500,
                    quantity: 1,
                },
            ],
            success_url: "s".into(),
            cancel_url: "c".into(),
            user_id: Uuid::new_v4(),
            course_ids: vec![],
            expires_at: Utc::now(),
        };

        let params = session_form_params(&spec);
        assert!(params
            .iter()
            .any(|(k, v)| k == "line_items[1][price_data][unit_amount]" && v == "500"));
    }
}
