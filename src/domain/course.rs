//! Course catalog entity.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::MINOR_UNITS_PER_MAJOR;
use crate::errors::{AppError, AppResult};

/// Publication status of a course. Only published courses are purchasable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatus {
    Draft,
    Published,
}

impl CourseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseStatus::Draft => "draft",
            CourseStatus::Published => "published",
        }
    }
}

impl From<&str> for CourseStatus {
    fn from(s: &str) -> Self {
        match s {
            "published" => CourseStatus::Published,
            _ => CourseStatus::Draft,
        }
    }
}

impl std::fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Course domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    /// Price in major currency units (e.g. 19.99 USD)
    pub price: Decimal,
    pub thumbnail: Option<String>,
    pub status: CourseStatus,
    pub instructor_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    pub fn is_published(&self) -> bool {
        self.status == CourseStatus::Published
    }

    /// Price converted to integer minor currency units (cents), as the
    /// payment provider requires. Rounds half-up on sub-cent values.
    pub fn price_minor_units(&self) -> AppResult<i64> {
        (self.price * Decimal::from(MINOR_UNITS_PER_MAJOR))
            .round()
            .to_i64()
            .ok_or_else(|| {
                AppError::internal(format!("course {} price out of range", self.id))
            })
    }
}

/// Course card as rendered in cart lines and purchase history
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseCard {
    pub id: Uuid,
    pub title: String,
    pub price: Decimal,
    pub thumbnail: Option<String>,
}

impl From<&Course> for CourseCard {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id,
            title: course.title.clone(),
            price: course.price,
            thumbnail: course.thumbnail.clone(),
        }
    }
}

/// Full course detail returned by catalog endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: Uuid,
    pub title: String,
    pub price: Decimal,
    pub thumbnail: Option<String>,
    pub status: CourseStatus,
    pub instructor_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            title: course.title,
            price: course.price,
            thumbnail: course.thumbnail,
            status: course.status,
            instructor_id: course.instructor_id,
            created_at: course.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course_with_price(price: Decimal) -> Course {
        Course {
            id: Uuid::new_v4(),
            title: "Rust for Backend Engineers".into(),
            price,
            thumbnail: None,
            status: CourseStatus::Published,
            instructor_id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_price_minor_units_whole() {
        let course = course_with_price(Decimal::from(10));
        assert_eq!(course.price_minor_units().unwrap(), 1000);
    }

    #[test]
    fn test_price_minor_units_fractional() {
        // 19.99 stored with two decimal places
        let course = course_with_price(Decimal::new(1999, 2));
        assert_eq!(course.price_minor_units().unwrap(), 1999);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!(CourseStatus::from("published"), CourseStatus::Published);
        assert_eq!(CourseStatus::from("draft"), CourseStatus::Draft);
        assert_eq!(CourseStatus::from("archived"), CourseStatus::Draft);
    }
}
