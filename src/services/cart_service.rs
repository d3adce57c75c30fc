//! Cart service - per-user course set pending purchase.
//!
//! Mutations validate against the catalog and purchase history, then
//! delegate to the store's atomic set operations. Every operation
//! returns the freshly resolved cart so the client can re-render
//! without a second round trip.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::CartView;
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Cart service trait for dependency injection.
#[async_trait]
pub trait CartService: Send + Sync {
    /// Resolved cart for the caller. An absent cart is the empty cart,
    /// not an error.
    async fn get_cart(&self, user_id: Uuid) -> AppResult<CartView>;

    /// Add a course to the caller's cart.
    ///
    /// Fails with NotFound when the course id does not resolve and with
    /// Conflict when the caller already holds a completed purchase for
    /// it. Duplicate adds converge to one line (set semantics).
    async fn add_to_cart(&self, user_id: Uuid, course_id: Uuid) -> AppResult<CartView>;

    /// Remove a course from the caller's cart. Removing a non-present
    /// item is a no-op.
    async fn remove_from_cart(&self, user_id: Uuid, course_id: Uuid) -> AppResult<CartView>;
}

/// Concrete implementation of CartService using Unit of Work.
pub struct CartManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CartManager<U> {
    /// Create new cart service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn resolved(&self, user_id: Uuid) -> AppResult<CartView> {
        let lines = self.uow.carts().lines(user_id).await?;
        Ok(CartView::from_lines(lines))
    }
}

#[async_trait]
impl<U: UnitOfWork> CartService for CartManager<U> {
    async fn get_cart(&self, user_id: Uuid) -> AppResult<CartView> {
        self.resolved(user_id).await
    }

    async fn add_to_cart(&self, user_id: Uuid, course_id: Uuid) -> AppResult<CartView> {
        if self.uow.courses().find_by_id(course_id).await?.is_none() {
            return Err(AppError::not_found("Course"));
        }

        if self
            .uow
            .purchases()
            .find_completed(user_id, course_id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Course is already purchased"));
        }

        self.uow.carts().add_item(user_id, course_id).await?;

        tracing::debug!(%user_id, %course_id, "course added to cart");
        self.resolved(user_id).await
    }

    async fn remove_from_cart(&self, user_id: Uuid, course_id: Uuid) -> AppResult<CartView> {
        self.uow.carts().remove_item(user_id, course_id).await?;
        self.resolved(user_id).await
    }
}
