//! Checkout service unit tests.
//!
//! Exercises the whole-cart validation (problems are collected, a single
//! bad line fails everything, nothing is created on failure) and the
//! session-first ordering of the happy path.

use std::sync::Arc;

use chrono::{Duration, Utc};
use mockall::predicate::eq;
use rust_decimal::Decimal;
use uuid::Uuid;

use learnhub::domain::{CartLine, Course, CoursePurchase, CourseStatus, PurchaseStatus};
use learnhub::errors::AppError;
use learnhub::infra::{
    CartRepository, CheckoutSession, CourseRepository, FeedbackRepository, MockCartRepository,
    MockCourseRepository, MockFeedbackRepository, MockPaymentProvider, MockPurchaseRepository,
    MockUserRepository, PurchaseRepository, UnitOfWork, UserRepository,
};
use learnhub::services::{CheckoutManager, CheckoutService, CheckoutUrls};

/// Test Unit of Work bundling mock repositories.
struct TestUnitOfWork {
    users: Arc<MockUserRepository>,
    courses: Arc<MockCourseRepository>,
    carts: Arc<MockCartRepository>,
    purchases: Arc<MockPurchaseRepository>,
    feedback: Arc<MockFeedbackRepository>,
}

impl TestUnitOfWork {
    fn new(carts: MockCartRepository, purchases: MockPurchaseRepository) -> Self {
        Self {
            users: Arc::new(MockUserRepository::new()),
            courses: Arc::new(MockCourseRepository::new()),
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

fn urls() -> CheckoutUrls {
    CheckoutUrls {
        success_url: "https://app.example/purchase-success?session_id={CHECKOUT_SESSION_ID}"
            .to_string(),
        cancel_url: "https://app.example/cart".to_string(),
        client_url: "https://app.example".to_string(),
    }
}

fn course(title: &str, price: Decimal, status: CourseStatus) -> Course {
    Course {
        id: Uuid::new_v4(),
        title: title.to_string(),
        price,
        thumbnail: None,
        status,
        instructor_id: Uuid::new_v4(),
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

fn hosted_session(id: &str) -> CheckoutSession {
    CheckoutSession {
        id: id.to_string(),
        url: format!("https://checkout.stripe.example/pay/{id}"),
        expires_at: Utc::now() + Duration::minutes(30),
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

fn expect_messages(err: AppError) -> Vec<String> {
    match err {
        AppError::ValidationList(messages) => messages,
        other => panic!("expected ValidationList, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_cart_fails_and_creates_nothing() {
    let user_id = Uuid::new_v4();

    let mut carts = MockCartRepository::new();
    carts.expect_lines().with(eq(user_id)).returning(|_| Ok(vec![]));

    // Provider and purchase mocks carry no expectations: any call panics
    let uow = TestUnitOfWork::new(carts, MockPurchaseRepository::new());
    let service = CheckoutManager::new(Arc::new(uow), Arc::new(MockPaymentProvider::new()), urls());

    let messages = expect_messages(service.create_checkout_session(user_id).await.unwrap_err());
    assert_eq!(messages, vec!["Your cart is empty".to_string()]);
}

#[tokio::test]
async fn test_one_unpublished_item_fails_whole_checkout_by_name() {
    let user_id = Uuid::new_v4();
    let a = course("A", Decimal::from(10), CourseStatus::Published);
    let b = course("B", Decimal::from(5), CourseStatus::Draft);

    let mut carts = MockCartRepository::new();
    let lines = vec![line_for(&a), line_for(&b)];
    carts.expect_lines().returning(move |_| Ok(lines.clone()));

    let mut purchases = MockPurchaseRepository::new();
    // Only the published course reaches the purchase check
    purchases
        .expect_find_completed()
        .with(eq(user_id), eq(a.id))
        .returning(|_, _| Ok(None));

    let uow = TestUnitOfWork::new(carts, purchases);
    let service = CheckoutManager::new(Arc::new(uow), Arc::new(MockPaymentProvider::new()), urls());

    let messages = expect_messages(service.create_checkout_session(user_id).await.unwrap_err());
    assert_eq!(messages, vec!["\"B\" is no longer available".to_string()]);
}

#[tokio::test]
async fn test_dangling_course_reference_is_reported() {
    let user_id = Uuid::new_v4();

    let mut carts = MockCartRepository::new();
    carts.expect_lines().returning(|_| {
        Ok(vec![CartLine {
            course_id: Uuid::new_v4(),
            added_at: Utc::now(),
            course: None,
        }])
    });

    let uow = TestUnitOfWork::new(carts, MockPurchaseRepository::new());
    let service = CheckoutManager::new(Arc::new(uow), Arc::new(MockPaymentProvider::new()), urls());

    let messages = expect_messages(service.create_checkout_session(user_id).await.unwrap_err());
    assert_eq!(messages, vec!["Invalid course found in cart".to_string()]);
}

#[tokio::test]
async fn test_already_purchased_item_is_reported_by_name() {
    let user_id = Uuid::new_v4();
    let a = course("Advanced Lifetimes", Decimal::from(20), CourseStatus::Published);

    let mut carts = MockCartRepository::new();
    let lines = vec![line_for(&a)];
    carts.expect_lines().returning(move |_| Ok(lines.clone()));

    let mut purchases = MockPurchaseRepository::new();
    purchases
        .expect_find_completed()
        .returning(move |u, c| Ok(Some(completed_purchase(u, c))));

    let uow = TestUnitOfWork::new(carts, purchases);
    let service = CheckoutManager::new(Arc::new(uow), Arc::new(MockPaymentProvider::new()), urls());

    let messages = expect_messages(service.create_checkout_session(user_id).await.unwrap_err());
    assert_eq!(
        messages,
        vec!["\"Advanced Lifetimes\" is already purchased".to_string()]
    );
}

#[tokio::test]
async fn test_multiple_problems_are_all_reported() {
    let user_id = Uuid::new_v4();
    let b = course("B", Decimal::from(5), CourseStatus::Draft);

    let mut carts = MockCartRepository::new();
    let lines = vec![
        CartLine {
            course_id: Uuid::new_v4(),
            added_at: Utc::now(),
            course: None,
        },
        line_for(&b),
    ];
    carts.expect_lines().returning(move |_| Ok(lines.clone()));

    let uow = TestUnitOfWork::new(carts, MockPurchaseRepository::new());
    let service = CheckoutManager::new(Arc::new(uow), Arc::new(MockPaymentProvider::new()), urls());

    let messages = expect_messages(service.create_checkout_session(user_id).await.unwrap_err());
    assert_eq!(
        messages,
        vec![
            "Invalid course found in cart".to_string(),
            "\"B\" is no longer available".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_two_valid_items_share_one_session() {
    let user_id = Uuid::new_v4();
    let a = course("A", Decimal::from(10), CourseStatus::Published);
    let b = course("B", Decimal::from(5), CourseStatus::Published);
    let (a_id, b_id) = (a.id, b.id);

    let mut carts = MockCartRepository::new();
    let lines = vec![line_for(&a), line_for(&b)];
    carts.expect_lines().returning(move |_| Ok(lines.clone()));

    let mut purchases = MockPurchaseRepository::new();
    purchases.expect_find_completed().returning(|_, _| Ok(None));

    let session = hosted_session("cs_test_123");
    let session_expiry = session.expires_at;
    purchases
        .expect_create_pending_many()
        .withf(move |rows| {
            rows.len() == 2
                && rows.iter().all(|r| r.payment_id == "cs_test_123")
                && rows.iter().all(|r| r.session_expiry == session_expiry)
                && rows.iter().any(|r| r.course_id == a_id && r.amount == Decimal::from(10))
                && rows.iter().any(|r| r.course_id == b_id && r.amount == Decimal::from(5))
        })
        .times(1)
        .returning(|_| Ok(()));

    let mut provider = MockPaymentProvider::new();
    let returned_session = session.clone();
    provider
        .expect_create_checkout_session()
        .withf(move |spec| {
            spec.user_id == user_id
                && spec.course_ids == vec![a_id, b_id]
                && spec.line_items.len() == 2
                && spec.line_items[0].unit_amount == 1000
                && spec.line_items[1].unit_amount == 500
                && spec.line_items.iter().all(|item| item.quantity == 1)
        })
        .times(1)
        .returning(move |_| Ok(returned_session.clone()));

    let uow = TestUnitOfWork::new(carts, purchases);
    let service = CheckoutManager::new(Arc::new(uow), Arc::new(provider), urls());

    let url = service.create_checkout_session(user_id).await.unwrap();
    assert_eq!(url, "https://checkout.stripe.example/pay/cs_test_123");
}

#[tokio::test]
async fn test_single_item_amount_and_unit_conversion() {
    let user_id = Uuid::new_v4();
    let a = course("A", Decimal::new(1999, 2), CourseStatus::Published);
    let a_id = a.id;

    let mut carts = MockCartRepository::new();
    let lines = vec![line_for(&a)];
    carts.expect_lines().returning(move |_| Ok(lines.clone()));

    let mut purchases = MockPurchaseRepository::new();
    purchases.expect_find_completed().returning(|_, _| Ok(None));
    purchases
        .expect_create_pending_many()
        .withf(move |rows| {
            rows.len() == 1
                && rows[0].course_id == a_id
                // Amount is stored in major units, cents only go to the provider
                && rows[0].amount == Decimal::new(1999, 2)
        })
        .returning(|_| Ok(()));

    let mut provider = MockPaymentProvider::new();
    provider
        .expect_create_checkout_session()
        .withf(|spec| spec.line_items[0].unit_amount == 1999)
        .returning(|_| Ok(hosted_session("cs_test_single")));

    let uow = TestUnitOfWork::new(carts, purchases);
    let service = CheckoutManager::new(Arc::new(uow), Arc::new(provider), urls());

    let url = service.create_checkout_session(user_id).await.unwrap();
    assert!(url.contains("cs_test_single"));
}

#[tokio::test]
async fn test_provider_failure_creates_no_rows() {
    let user_id = Uuid::new_v4();
    let a = course("A", Decimal::from(10), CourseStatus::Published);

    let mut carts = MockCartRepository::new();
    let lines = vec![line_for(&a)];
    carts.expect_lines().returning(move |_| Ok(lines.clone()));

    let mut purchases = MockPurchaseRepository::new();
    purchases.expect_find_completed().returning(|_, _| Ok(None));
    // No create_pending_many expectation: rows must not be inserted when
    // the session call fails

    let mut provider = MockPaymentProvider::new();
    provider
        .expect_create_checkout_session()
        .returning(|_| Err(learnhub::errors::AppError::provider("stripe is down")));

    let uow = TestUnitOfWork::new(carts, purchases);
    let service = CheckoutManager::new(Arc::new(uow), Arc::new(provider), urls());

    let result = service.create_checkout_session(user_id).await;
    assert!(matches!(result.unwrap_err(), AppError::Provider(_)));
}
