//! Catalog service - course listing and instructor course management.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Course, CourseStatus};
use crate::errors::{AppError, AppResult};
use crate::infra::{NewCourse, UnitOfWork};

/// Course detail paired with whether the caller already purchased it.
#[derive(Debug, Clone)]
pub struct CourseWithPurchaseStatus {
    pub course: Course,
    pub purchased: bool,
}

/// Catalog service trait for dependency injection.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Published courses, newest first
    async fn list_published(&self) -> AppResult<Vec<Course>>;

    /// Course detail plus the caller's purchase status
    async fn detail_with_status(
        &self,
        user_id: Uuid,
        course_id: Uuid,
    ) -> AppResult<CourseWithPurchaseStatus>;

    /// Create a draft course owned by the calling instructor
    async fn create_course(
        &self,
        instructor_id: Uuid,
        title: String,
        price: Decimal,
        thumbnail: Option<String>,
    ) -> AppResult<Course>;

    /// Publish or unpublish a course; only the owning instructor may.
    async fn set_status(
        &self,
        instructor_id: Uuid,
        course_id: Uuid,
        status: CourseStatus,
    ) -> AppResult<Course>;
}

/// Concrete implementation of CatalogService using Unit of Work.
pub struct CatalogManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CatalogManager<U> {
    /// Create new catalog service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> CatalogService for CatalogManager<U> {
    async fn list_published(&self) -> AppResult<Vec<Course>> {
        self.uow.courses().list_published().await
    }

    async fn detail_with_status(
        &self,
        user_id: Uuid,
        course_id: Uuid,
    ) -> AppResult<CourseWithPurchaseStatus> {
        let course = self
            .uow
            .courses()
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::not_found("Course"))?;

        let purchased = self
            .uow
            .purchases()
            .find_completed(user_id, course_id)
            .await?
            .is_some();

        Ok(CourseWithPurchaseStatus { course, purchased })
    }

    async fn create_course(
        &self,
        instructor_id: Uuid,
        title: String,
        price: Decimal,
        thumbnail: Option<String>,
    ) -> AppResult<Course> {
        if price.is_sign_negative() {
            return Err(AppError::validation("Course price cannot be negative"));
        }

        self.uow
            .courses()
            .create(NewCourse {
                title,
                price,
                thumbnail,
                instructor_id,
            })
            .await
    }

    async fn set_status(
        &self,
        instructor_id: Uuid,
        course_id: Uuid,
        status: CourseStatus,
    ) -> AppResult<Course> {
        let course = self
            .uow
            .courses()
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::not_found("Course"))?;

        if course.instructor_id != instructor_id {
            return Err(AppError::Forbidden);
        }

        self.uow.courses().set_status(course_id, status).await
    }
}
