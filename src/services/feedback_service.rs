//! Feedback service - student feedback posts.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Feedback, FeedbackView, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Feedback service trait for dependency injection.
#[async_trait]
pub trait FeedbackService: Send + Sync {
    /// List all feedback posts, newest first
    async fn list(&self) -> AppResult<Vec<FeedbackView>>;

    /// Create a feedback post for the caller
    async fn create(&self, user_id: Uuid, title: String, content: String) -> AppResult<Feedback>;

    /// Delete a post. Authors may delete their own; instructors any.
    async fn delete(&self, caller_id: Uuid, caller_role: UserRole, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of FeedbackService using Unit of Work.
pub struct FeedbackManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> FeedbackManager<U> {
    /// Create new feedback service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> FeedbackService for FeedbackManager<U> {
    async fn list(&self) -> AppResult<Vec<FeedbackView>> {
        self.uow.feedback().list().await
    }

    async fn create(&self, user_id: Uuid, title: String, content: String) -> AppResult<Feedback> {
        self.uow.feedback().create(user_id, title, content).await
    }

    async fn delete(&self, caller_id: Uuid, caller_role: UserRole, id: Uuid) -> AppResult<()> {
        let post = self
            .uow
            .feedback()
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Feedback"))?;

        if post.user_id != caller_id && !caller_role.is_instructor() {
            return Err(AppError::Forbidden);
        }

        self.uow.feedback().delete(id).await
    }
}
