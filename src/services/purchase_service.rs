//! Purchase query service - read-only projections over purchase rows
//! and the payment provider.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::PROVIDER_TRANSACTION_PAGE_SIZE;
use crate::domain::{CourseCard, PurchasedCourseView};
use crate::errors::AppResult;
use crate::infra::{PaymentProvider, ProviderBalance, ProviderTransaction, UnitOfWork};

/// Purchase query service trait for dependency injection.
#[async_trait]
pub trait PurchaseQueryService: Send + Sync {
    /// All purchases for the caller with course details joined.
    async fn purchased_courses(&self, user_id: Uuid) -> AppResult<Vec<PurchasedCourseView>>;

    /// Platform-wide count of completed purchases.
    async fn successful_count(&self) -> AppResult<u64>;

    /// Current provider balance.
    async fn balance(&self) -> AppResult<ProviderBalance>;

    /// Recent provider transactions.
    async fn transactions(&self) -> AppResult<Vec<ProviderTransaction>>;

    /// Provider transaction count.
    async fn transaction_count(&self) -> AppResult<u64>;
}

/// Concrete implementation of PurchaseQueryService.
pub struct PurchaseReporter<U: UnitOfWork> {
    uow: Arc<U>,
    provider: Arc<dyn PaymentProvider>,
}

impl<U: UnitOfWork> PurchaseReporter<U> {
    /// Create new purchase query service instance
    pub fn new(uow: Arc<U>, provider: Arc<dyn PaymentProvider>) -> Self {
        Self { uow, provider }
    }
}

#[async_trait]
impl<U: UnitOfWork> PurchaseQueryService for PurchaseReporter<U> {
    async fn purchased_courses(&self, user_id: Uuid) -> AppResult<Vec<PurchasedCourseView>> {
        let rows = self.uow.purchases().list_for_user(user_id).await?;

        Ok(rows
            .into_iter()
            .map(|(purchase, course)| PurchasedCourseView {
                id: purchase.id,
                amount: purchase.amount,
                status: purchase.status,
                payment_id: purchase.payment_id,
                created_at: purchase.created_at,
                course: course.as_ref().map(CourseCard::from),
            })
            .collect())
    }

    async fn successful_count(&self) -> AppResult<u64> {
        self.uow.purchases().completed_count().await
    }

    async fn balance(&self) -> AppResult<ProviderBalance> {
        self.provider.balance().await
    }

    async fn transactions(&self) -> AppResult<Vec<ProviderTransaction>> {
        self.provider
            .list_transactions(PROVIDER_TRANSACTION_PAGE_SIZE)
            .await
    }

    async fn transaction_count(&self) -> AppResult<u64> {
        self.provider.transaction_count().await
    }
}
