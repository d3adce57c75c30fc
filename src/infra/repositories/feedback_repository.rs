//! Feedback repository implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use super::entities::{
    feedback::{self, ActiveModel, Entity as FeedbackEntity},
    user::Entity as UserEntity,
};
use crate::domain::{Feedback, FeedbackView};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Feedback repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Find feedback post by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Feedback>>;

    /// List all feedback with author names, newest first
    async fn list(&self) -> AppResult<Vec<FeedbackView>>;

    /// Create a feedback post
    async fn create(&self, user_id: Uuid, title: String, content: String) -> AppResult<Feedback>;

    /// Delete a feedback post
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of FeedbackRepository
pub struct FeedbackStore {
    db: DatabaseConnection,
}

impl FeedbackStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FeedbackRepository for FeedbackStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Feedback>> {
        let result = FeedbackEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Feedback::from))
    }

    async fn list(&self) -> AppResult<Vec<FeedbackView>> {
        let rows = FeedbackEntity::find()
            .find_also_related(UserEntity)
            .order_by_desc(feedback::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows
            .into_iter()
            .map(|(post, author)| FeedbackView {
                id: post.id,
                title: post.title,
                content: post.content,
                author: author.map(|u| u.name),
                created_at: post.created_at,
            })
            .collect())
    }

    async fn create(&self, user_id: Uuid, title: String, content: String) -> AppResult<Feedback> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            title: Set(title),
            content: Set(content),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Feedback::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = FeedbackEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Feedback"));
        }

        Ok(())
    }
}
