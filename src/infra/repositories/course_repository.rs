//! Course repository implementation.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set};
use uuid::Uuid;

use super::entities::course::{self, ActiveModel, Entity as CourseEntity};
use crate::domain::{Course, CourseStatus};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Insert payload for a new course.
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub title: String,
    pub price: Decimal,
    pub thumbnail: Option<String>,
    pub instructor_id: Uuid,
}

/// Course repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Find course by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Course>>;

    /// List published courses, newest first
    async fn list_published(&self) -> AppResult<Vec<Course>>;

    /// Create a new course in draft status
    async fn create(&self, course: NewCourse) -> AppResult<Course>;

    /// Change publication status
    async fn set_status(&self, id: Uuid, status: CourseStatus) -> AppResult<Course>;
}

/// Concrete implementation of CourseRepository
pub struct CourseStore {
    db: DatabaseConnection,
}

impl CourseStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CourseRepository for CourseStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Course>> {
        let result = CourseEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Course::from))
    }

    async fn list_published(&self) -> AppResult<Vec<Course>> {
        let models = CourseEntity::find()
            .filter(course::Column::Status.eq(CourseStatus::Published.as_str()))
            .order_by_desc(course::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Course::from).collect())
    }

    async fn create(&self, new: NewCourse) -> AppResult<Course> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(new.title),
            price: Set(new.price),
            thumbnail: Set(new.thumbnail),
            status: Set(CourseStatus::Draft.as_str().to_string()),
            instructor_id: Set(new.instructor_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Course::from(model))
    }

    async fn set_status(&self, id: Uuid, status: CourseStatus) -> AppResult<Course> {
        let model = CourseEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Course"))?;

        let mut active: ActiveModel = model.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Course::from(model))
    }
}
