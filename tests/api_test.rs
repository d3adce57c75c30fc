//! API wire-shape tests.
//!
//! The SPA consumes fixed JSON shapes; these tests pin the envelopes and
//! the error contract without requiring database or Redis connections.

use axum::body::to_bytes;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use uuid::Uuid;

use learnhub::domain::{
    CartLine, CartView, Course, CourseStatus, PurchaseStatus, PurchasedCourseView, UserRole,
};
use learnhub::errors::AppError;

async fn response_json(error: AppError) -> (StatusCode, Value) {
    let response = error.into_response();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// =============================================================================
// Error contract
// =============================================================================

#[tokio::test]
async fn test_not_found_error_shape() {
    let (status, body) = response_json(AppError::not_found("Course")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Course not found"));
    assert!(body.get("messages").is_none());
}

#[tokio::test]
async fn test_conflict_error_shape() {
    let (status, body) = response_json(AppError::conflict("Course is already purchased")).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], json!("Course is already purchased"));
}

#[tokio::test]
async fn test_validation_list_error_shape() {
    let (status, body) = response_json(AppError::validation_list(vec![
        "\"B\" is no longer available".to_string(),
        "Invalid course found in cart".to_string(),
    ]))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(
        body["messages"],
        json!(["\"B\" is no longer available", "Invalid course found in cart"])
    );
    assert!(body.get("message").is_none());
}

#[tokio::test]
async fn test_provider_error_is_generic_500_with_detail() {
    let (status, body) = response_json(AppError::provider("stripe: card_declined")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], json!("Payment processing failed"));
    assert_eq!(body["error"], json!("stripe: card_declined"));
}

#[tokio::test]
async fn test_unauthorized_error_status() {
    let (status, _) = response_json(AppError::Unauthorized).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Success envelopes
// =============================================================================

fn sample_course() -> Course {
    Course {
        id: Uuid::new_v4(),
        title: "Rust Basics".to_string(),
        price: Decimal::new(1099, 2),
        thumbnail: Some("https://cdn.example/rust.png".to_string()),
        status: CourseStatus::Published,
        instructor_id: Uuid::new_v4(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn test_cart_view_serializes_camel_case_items() {
    let course = sample_course();
    let view = CartView::from_lines(vec![CartLine {
        course_id: course.id,
        added_at: Utc::now(),
        course: Some(course.clone()),
    }]);

    let value = serde_json::to_value(&view).unwrap();
    let item = &value["items"][0];

    assert_eq!(item["courseId"], json!(course.id.to_string()));
    assert!(item.get("addedAt").is_some());
    assert_eq!(item["course"]["title"], json!("Rust Basics"));
    // Decimal serializes as a string, preserving the two decimal places
    assert_eq!(item["course"]["price"], json!("10.99"));
}

#[test]
fn test_empty_cart_view_shape() {
    let value = serde_json::to_value(CartView::empty()).unwrap();
    assert_eq!(value, json!({ "items": [] }));
}

#[test]
fn test_purchased_course_view_field_names() {
    let course = sample_course();
    let view = PurchasedCourseView {
        id: Uuid::new_v4(),
        amount: Decimal::from(30),
        status: PurchaseStatus::Pending,
        payment_id: "cs_test_1".to_string(),
        created_at: Utc::now(),
        course: Some((&course).into()),
    };

    let value = serde_json::to_value(&view).unwrap();
    assert_eq!(value["status"], json!("pending"));
    assert_eq!(value["paymentId"], json!("cs_test_1"));
    assert!(value.get("createdAt").is_some());
}

// =============================================================================
// Domain parsing
// =============================================================================

#[test]
fn test_role_and_status_parsing() {
    assert_eq!(UserRole::from("instructor"), UserRole::Instructor);
    assert_eq!(UserRole::from("anything-else"), UserRole::Student);
    assert_eq!(CourseStatus::from("published"), CourseStatus::Published);
    assert_eq!(PurchaseStatus::from("completed"), PurchaseStatus::Completed);
}
