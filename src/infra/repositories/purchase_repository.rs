//! Course purchase repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set};
use uuid::Uuid;

use super::entities::{
    course::Entity as CourseEntity,
    course_purchase::{self, ActiveModel, Entity as PurchaseEntity},
};
use crate::domain::{Course, CoursePurchase, NewPendingPurchase, PurchaseStatus};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Purchase repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PurchaseRepository: Send + Sync {
    /// Find a completed purchase for (user, course), if any. This is the
    /// record that gates re-adding and re-purchasing a course.
    async fn find_completed(&self, user_id: Uuid, course_id: Uuid)
        -> AppResult<Option<CoursePurchase>>;

    /// Insert one pending row per course of a checkout, all sharing the
    /// session id and expiry, in a single multi-row insert.
    async fn create_pending_many(&self, purchases: Vec<NewPendingPurchase>) -> AppResult<()>;

    /// All purchases for a user with course details joined, newest first.
    async fn list_for_user(&self, user_id: Uuid)
        -> AppResult<Vec<(CoursePurchase, Option<Course>)>>;

    /// Platform-wide count of completed purchases.
    async fn completed_count(&self) -> AppResult<u64>;

    /// Mark pending rows whose session expired as expired. Returns the
    /// number of rows reaped.
    async fn expire_stale(&self, now: DateTime<Utc>) -> AppResult<u64>;
}

/// Concrete implementation of PurchaseRepository
pub struct PurchaseStore {
    db: DatabaseConnection,
}

impl PurchaseStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PurchaseRepository for PurchaseStore {
    async fn find_completed(
        &self,
        user_id: Uuid,
        course_id: Uuid,
    ) -> AppResult<Option<CoursePurchase>> {
        let result = PurchaseEntity::find()
            .filter(course_purchase::Column::UserId.eq(user_id))
            .filter(course_purchase::Column::CourseId.eq(course_id))
            .filter(course_purchase::Column::Status.eq(PurchaseStatus::Completed.as_str()))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(CoursePurchase::from))
    }

    async fn create_pending_many(&self, purchases: Vec<NewPendingPurchase>) -> AppResult<()> {
        if purchases.is_empty() {
            return Ok(());
        }

        let now = chrono::Utc::now();
        let rows: Vec<ActiveModel> = purchases
            .into_iter()
            .map(|p| ActiveModel {
                id: Set(Uuid::new_v4()),
                user_id: Set(p.user_id),
                course_id: Set(p.course_id),
                amount: Set(p.amount),
                status: Set(PurchaseStatus::Pending.as_str().to_string()),
                payment_id: Set(p.payment_id),
                session_expiry: Set(p.session_expiry),
                created_at: Set(now),
                updated_at: Set(now),
            })
            .collect();

        PurchaseEntity::insert_many(rows)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> AppResult<Vec<(CoursePurchase, Option<Course>)>> {
        let rows = PurchaseEntity::find()
            .filter(course_purchase::Column::UserId.eq(user_id))
            .find_also_related(CourseEntity)
            .order_by_desc(course_purchase::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows
            .into_iter()
            .map(|(purchase, course)| (CoursePurchase::from(purchase), course.map(Course::from)))
            .collect())
    }

    async fn completed_count(&self) -> AppResult<u64> {
        PurchaseEntity::find()
            .filter(course_purchase::Column::Status.eq(PurchaseStatus::Completed.as_str()))
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn expire_stale(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result = PurchaseEntity::update_many()
            .col_expr(
                course_purchase::Column::Status,
                sea_orm::sea_query::Expr::value(PurchaseStatus::Expired.as_str()),
            )
            .col_expr(
                course_purchase::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(now),
            )
            .filter(course_purchase::Column::Status.eq(PurchaseStatus::Pending.as_str()))
            .filter(course_purchase::Column::SessionExpiry.lt(now))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }
}
