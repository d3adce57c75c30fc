//! Cart domain types.
//!
//! A cart is a per-user set of course references. Set semantics are
//! enforced at the storage layer (one atomic insert-if-absent per add),
//! so the domain layer only models resolved views.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::course::{Course, CourseCard};

/// One cart entry with its referenced course joined in.
///
/// `course` is `None` when the referenced course row no longer exists
/// (a dangling reference); checkout reports these rather than crashing.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub course_id: Uuid,
    pub added_at: DateTime<Utc>,
    pub course: Option<Course>,
}

/// Resolved cart as returned to the client.
///
/// An absent cart serializes as the empty-items shape; the client never
/// distinguishes "no cart row" from "empty cart".
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartLineView>,
}

impl CartView {
    pub fn empty() -> Self {
        Self { items: Vec::new() }
    }

    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        Self {
            items: lines.into_iter().map(CartLineView::from).collect(),
        }
    }
}

/// One resolved cart line on the wire.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub course_id: Uuid,
    pub added_at: DateTime<Utc>,
    pub course: Option<CourseCard>,
}

impl From<CartLine> for CartLineView {
    fn from(line: CartLine) -> Self {
        Self {
            course_id: line.course_id,
            added_at: line.added_at,
            course: line.course.as_ref().map(CourseCard::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::course::CourseStatus;
    use rust_decimal::Decimal;

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::empty();
        assert!(view.items.is_empty());
    }

    #[test]
    fn test_dangling_reference_survives_resolution() {
        let line = CartLine {
            course_id: Uuid::new_v4(),
            added_at: Utc::now(),
            course: None,
        };
        let view = CartView::from_lines(vec![line]);
        assert_eq!(view.items.len(), 1);
        assert!(view.items[0].course.is_none());
    }

    #[test]
    fn test_resolved_line_carries_course_card() {
        let course = Course {
            id: Uuid::new_v4(),
            title: "Intro to Type Systems".into(),
            price: Decimal::new(4999, 2),
            thumbnail: Some("https://cdn.example/t.png".into()),
            status: CourseStatus::Published,
            instructor_id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let line = CartLine {
            course_id: course.id,
            added_at: Utc::now(),
            course: Some(course.clone()),
        };
        let view = CartView::from_lines(vec![line]);
        let card = view.items[0].course.as_ref().unwrap();
        assert_eq!(card.title, course.title);
        assert_eq!(card.price, course.price);
    }
}
