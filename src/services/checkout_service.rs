//! Checkout service - converts a cart into a hosted payment session.
//!
//! Validation walks every cart line and collects problems instead of
//! failing fast, so one call reports everything wrong with the cart.
//! Pending purchase rows are only inserted once the provider session
//! exists; rows whose session lapses unpaid are reaped by the
//! background expiry job.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{CHECKOUT_SESSION_TTL_SECONDS, DEFAULT_COURSE_IMAGE_PATH};
use crate::domain::{Course, NewPendingPurchase};
use crate::errors::{AppError, AppResult};
use crate::infra::{CheckoutSessionSpec, PaymentProvider, SessionLineItem, UnitOfWork};

/// Redirect targets and branding the checkout session needs from config.
#[derive(Debug, Clone)]
pub struct CheckoutUrls {
    pub success_url: String,
    pub cancel_url: String,
    /// Origin used to absolutize the default course image
    pub client_url: String,
}

/// Checkout service trait for dependency injection.
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Validate the caller's cart and open a hosted checkout session.
    /// Returns the provider URL the client should redirect to.
    async fn create_checkout_session(&self, user_id: Uuid) -> AppResult<String>;
}

/// Concrete implementation of CheckoutService.
pub struct CheckoutManager<U: UnitOfWork> {
    uow: Arc<U>,
    provider: Arc<dyn PaymentProvider>,
    urls: CheckoutUrls,
}

impl<U: UnitOfWork> CheckoutManager<U> {
    /// Create new checkout service instance
    pub fn new(uow: Arc<U>, provider: Arc<dyn PaymentProvider>, urls: CheckoutUrls) -> Self {
        Self {
            uow,
            provider,
            urls,
        }
    }

    fn line_item(&self, course: &Course) -> AppResult<SessionLineItem> {
        Ok(SessionLineItem {
            name: course.title.clone(),
            image: course.thumbnail.clone().unwrap_or_else(|| {
                format!("{}{}", self.urls.client_url, DEFAULT_COURSE_IMAGE_PATH)
            }),
            unit_amount: course.price_minor_units()?,
            quantity: 1,
        })
    }
}

#[async_trait]
impl<U: UnitOfWork> CheckoutService for CheckoutManager<U> {
    async fn create_checkout_session(&self, user_id: Uuid) -> AppResult<String> {
        let lines = self.uow.carts().lines(user_id).await?;
        if lines.is_empty() {
            return Err(AppError::validation_list(vec!["Your cart is empty".into()]));
        }

        let mut valid_courses: Vec<Course> = Vec::new();
        let mut problems: Vec<String> = Vec::new();

        for line in lines {
            let Some(course) = line.course else {
                problems.push("Invalid course found in cart".to_string());
                continue;
            };

            if !course.is_published() {
                problems.push(format!("\"{}\" is no longer available", course.title));
                continue;
            }

            if self
                .uow
                .purchases()
                .find_completed(user_id, course.id)
                .await?
                .is_some()
            {
                problems.push(format!("\"{}\" is already purchased", course.title));
                continue;
            }

            valid_courses.push(course);
        }

        // A single bad line fails the whole checkout; no partial session
        if !problems.is_empty() {
            return Err(AppError::ValidationList(problems));
        }

        if valid_courses.is_empty() {
            return Err(AppError::validation_list(vec![
                "No valid courses available for purchase".into(),
            ]));
        }

        let line_items = valid_courses
            .iter()
            .map(|course| self.line_item(course))
            .collect::<AppResult<Vec<_>>>()?;

        let expires_at = Utc::now() + Duration::seconds(CHECKOUT_SESSION_TTL_SECONDS);
        let session = self
            .provider
            .create_checkout_session(CheckoutSessionSpec {
                line_items,
                success_url: self.urls.success_url.clone(),
                cancel_url: self.urls.cancel_url.clone(),
                user_id,
                course_ids: valid_courses.iter().map(|c| c.id).collect(),
                expires_at,
            })
            .await?;

        // Rows are inserted only now that a session exists; a crash before
        // this point leaves nothing to reconcile, a crash after leaves
        // pending rows the expiry job will reap.
        let pending = valid_courses
            .iter()
            .map(|course| NewPendingPurchase {
                user_id,
                course_id: course.id,
                amount: course.price,
                payment_id: session.id.clone(),
                session_expiry: session.expires_at,
            })
            .collect();
        self.uow.purchases().create_pending_many(pending).await?;

        tracing::info!(
            %user_id,
            session_id = %session.id,
            courses = valid_courses.len(),
            "checkout session created"
        );

        Ok(session.url)
    }
}
