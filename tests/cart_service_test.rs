//! Cart service unit tests.

use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::eq;
use rust_decimal::Decimal;
use uuid::Uuid;

use learnhub::domain::{CartLine, Course, CoursePurchase, CourseStatus, PurchaseStatus};
use learnhub::errors::AppError;
use learnhub::infra::{
    CartRepository, CourseRepository, FeedbackRepository, MockCartRepository,
    MockCourseRepository, MockFeedbackRepository, MockPurchaseRepository, MockUserRepository,
    PurchaseRepository, UnitOfWork, UserRepository,
};
use learnhub::services::{CartManager, CartService};

/// Test Unit of Work bundling mock repositories.
struct TestUnitOfWork {
    users: Arc<MockUserRepository>,
    courses: Arc<MockCourseRepository>,
    carts: Arc<MockCartRepository>,
    purchases: Arc<MockPurchaseRepository>,
    feedback: Arc<MockFeedbackRepository>,
}

impl TestUnitOfWork {
    fn new(
        courses: MockCourseRepository,
        carts: MockCartRepository,
        purchases: MockPurchaseRepository,
    ) -> Self {
        Self {
            users: Arc::new(MockUserRepository::new()),
            courses: Arc::new(courses),
            carts: Arc::new(carts),
            purchases: Arc::new(purchases),
            feedback: Arc::new(MockFeedbackRepository::new()),
        }
    }
}

impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn courses(&self) -> Arc<dyn CourseRepository> {
        self.courses.clone()
    }

    fn carts(&self) -> Arc<dyn CartRepository> {
        self.carts.clone()
    }

    fn purchases(&self) -> Arc<dyn PurchaseRepository> {
        self.purchases.clone()
    }

    fn feedback(&self) -> Arc<dyn FeedbackRepository> {
        self.feedback.clone()
    }
}

fn published_course(id: Uuid, title: &str, price: Decimal) -> Course {
    Course {
        id,
        title: title.to_string(),
        price,
        thumbnail: None,
        status: CourseStatus::Published,
        instructor_id: Uuid::new_v4(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn completed_purchase(user_id: Uuid, course_id: Uuid) -> CoursePurchase {
    CoursePurchase {
        id: Uuid::new_v4(),
        user_id,
        course_id,
        amount: Decimal::from(10),
        status: PurchaseStatus::Completed,
        payment_id: "cs_test_done".to_string(),
        session_expiry: Utc::now(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn line_for(course: &Course) -> CartLine {
    CartLine {
        course_id: course.id,
        added_at: Utc::now(),
        course: Some(course.clone()),
    }
}

#[tokio::test]
async fn test_get_cart_absent_is_empty_shape() {
    let user_id = Uuid::new_v4();

    let mut carts = MockCartRepository::new();
    carts.expect_lines().with(eq(user_id)).returning(|_| Ok(vec![]));

    let uow = TestUnitOfWork::new(
        MockCourseRepository::new(),
        carts,
        MockPurchaseRepository::new(),
    );
    let service = CartManager::new(Arc::new(uow));

    let cart = service.get_cart(user_id).await.unwrap();
    assert!(cart.items.is_empty());
}

#[tokio::test]
async fn test_add_to_cart_success() {
    let user_id = Uuid::new_v4();
    let course = published_course(Uuid::new_v4(), "Rust Basics", Decimal::from(10));
    let course_id = course.id;

    let mut courses = MockCourseRepository::new();
    let found = course.clone();
    courses
        .expect_find_by_id()
        .with(eq(course_id))
        .returning(move |_| Ok(Some(found.clone())));

    let mut purchases = MockPurchaseRepository::new();
    purchases
        .expect_find_completed()
        .with(eq(user_id), eq(course_id))
        .returning(|_, _| Ok(None));

    let mut carts = MockCartRepository::new();
    carts
        .expect_add_item()
        .with(eq(user_id), eq(course_id))
        .times(1)
        .returning(|_, _| Ok(()));
    let resolved = course.clone();
    carts
        .expect_lines()
        .with(eq(user_id))
        .returning(move |_| Ok(vec![line_for(&resolved)]));

    let uow = TestUnitOfWork::new(courses, carts, purchases);
    let service = CartManager::new(Arc::new(uow));

    let cart = service.add_to_cart(user_id, course_id).await.unwrap();
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].course_id, course_id);
}

#[tokio::test]
async fn test_add_same_course_twice_keeps_one_line() {
    let user_id = Uuid::new_v4();
    let course = published_course(Uuid::new_v4(), "Rust Basics", Decimal::from(10));
    let course_id = course.id;

    let mut courses = MockCourseRepository::new();
    let found = course.clone();
    courses
        .expect_find_by_id()
        .returning(move |_| Ok(Some(found.clone())));

    let mut purchases = MockPurchaseRepository::new();
    purchases.expect_find_completed().returning(|_, _| Ok(None));

    let mut carts = MockCartRepository::new();
    // Both adds hit the store; the second is an ON CONFLICT no-op there
    carts.expect_add_item().times(2).returning(|_, _| Ok(()));
    let resolved = course.clone();
    carts
        .expect_lines()
        .returning(move |_| Ok(vec![line_for(&resolved)]));

    let uow = TestUnitOfWork::new(courses, carts, purchases);
    let service = CartManager::new(Arc::new(uow));

    service.add_to_cart(user_id, course_id).await.unwrap();
    let cart = service.add_to_cart(user_id, course_id).await.unwrap();

    assert_eq!(cart.items.len(), 1);
}

#[tokio::test]
async fn test_add_unknown_course_is_not_found() {
    let user_id = Uuid::new_v4();
    let course_id = Uuid::new_v4();

    let mut courses = MockCourseRepository::new();
    courses.expect_find_by_id().returning(|_| Ok(None));

    // No cart or purchase expectations: validation fails before any
    // mutation is attempted
    let uow = TestUnitOfWork::new(
        courses,
        MockCartRepository::new(),
        MockPurchaseRepository::new(),
    );
    let service = CartManager::new(Arc::new(uow));

    let result = service.add_to_cart(user_id, course_id).await;
    assert!(matches!(result.unwrap_err(), AppError::NotFound(_)));
}

#[tokio::test]
async fn test_add_purchased_course_is_conflict_and_leaves_cart_alone() {
    let user_id = Uuid::new_v4();
    let course = published_course(Uuid::new_v4(), "Rust Basics", Decimal::from(10));
    let course_id = course.id;

    let mut courses = MockCourseRepository::new();
    let found = course.clone();
    courses
        .expect_find_by_id()
        .returning(move |_| Ok(Some(found.clone())));

    let mut purchases = MockPurchaseRepository::new();
    purchases
        .expect_find_completed()
        .returning(move |u, c| Ok(Some(completed_purchase(u, c))));

    // The cart repository gets no expectations: any call would panic,
    // proving the cart is untouched on conflict
    let uow = TestUnitOfWork::new(courses, MockCartRepository::new(), purchases);
    let service = CartManager::new(Arc::new(uow));

    let result = service.add_to_cart(user_id, course_id).await;
    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn test_remove_non_present_item_is_noop() {
    let user_id = Uuid::new_v4();
    let course_id = Uuid::new_v4();

    let mut carts = MockCartRepository::new();
    carts
        .expect_remove_item()
        .with(eq(user_id), eq(course_id))
        .returning(|_, _| Ok(()));
    carts.expect_lines().returning(|_| Ok(vec![]));

    let uow = TestUnitOfWork::new(
        MockCourseRepository::new(),
        carts,
        MockPurchaseRepository::new(),
    );
    let service = CartManager::new(Arc::new(uow));

    let cart = service.remove_from_cart(user_id, course_id).await.unwrap();
    assert!(cart.items.is_empty());
}
