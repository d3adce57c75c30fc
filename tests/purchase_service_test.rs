//! Purchase query service unit tests.

use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::eq;
use rust_decimal::Decimal;
use uuid::Uuid;

use learnhub::domain::{Course, CoursePurchase, CourseStatus, PurchaseStatus};
use learnhub::infra::{
    BalanceFunds, CartRepository, CourseRepository, FeedbackRepository, MockCartRepository,
    MockCourseRepository, MockFeedbackRepository, MockPaymentProvider, MockPurchaseRepository,
    MockUserRepository, ProviderBalance, ProviderTransaction, PurchaseRepository, UnitOfWork,
    UserRepository,
};
use learnhub::services::{PurchaseQueryService, PurchaseReporter};

/// Test Unit of Work bundling mock repositories.
struct TestUnitOfWork {
    users: Arc<MockUserRepository>,
    courses: Arc<MockCourseRepository>,
    carts: Arc<MockCartRepository>,
    purchases: Arc<MockPurchaseRepository>,
    feedback: Arc<MockFeedbackRepository>,
}

impl TestUnitOfWork {
    fn new(purchases: MockPurchaseRepository) -> Self {
        Self {
            users: Arc::new(MockUserRepository::new()),
            courses: Arc::new(MockCourseRepository::new()),
            carts: Arc::new(MockCartRepository::new()),
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

fn purchase_with_course(user_id: Uuid) -> (CoursePurchase, Option<Course>) {
    let course = Course {
        id: Uuid::new_v4(),
        title: "Async Rust".to_string(),
        price: Decimal::from(30),
        thumbnail: Some("https://cdn.example/async.png".to_string()),
        status: CourseStatus::Published,
        instructor_id: Uuid::new_v4(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };
    let purchase = CoursePurchase {
        id: Uuid::new_v4(),
        user_id,
        course_id: course.id,
        amount: Decimal::from(30),
        status: PurchaseStatus::Completed,
        payment_id: "cs_test_hist".to_string(),
        session_expiry: Utc::now(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };
    (purchase, Some(course))
}

#[tokio::test]
async fn test_purchased_courses_joins_course_details() {
    let user_id = Uuid::new_v4();

    let mut purchases = MockPurchaseRepository::new();
    purchases
        .expect_list_for_user()
        .with(eq(user_id))
        .returning(move |u| Ok(vec![purchase_with_course(u)]));

    let uow = TestUnitOfWork::new(purchases);
    let service = PurchaseReporter::new(Arc::new(uow), Arc::new(MockPaymentProvider::new()));

    let views = service.purchased_courses(user_id).await.unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].status, PurchaseStatus::Completed);
    assert_eq!(views[0].course.as_ref().unwrap().title, "Async Rust");
}

#[tokio::test]
async fn test_purchased_courses_tolerates_missing_course() {
    let user_id = Uuid::new_v4();

    let mut purchases = MockPurchaseRepository::new();
    purchases.expect_list_for_user().returning(move |u| {
        let (purchase, _) = purchase_with_course(u);
        Ok(vec![(purchase, None)])
    });

    let uow = TestUnitOfWork::new(purchases);
    let service = PurchaseReporter::new(Arc::new(uow), Arc::new(MockPaymentProvider::new()));

    let views = service.purchased_courses(user_id).await.unwrap();
    assert_eq!(views.len(), 1);
    assert!(views[0].course.is_none());
}

#[tokio::test]
async fn test_successful_count_comes_from_store() {
    let mut purchases = MockPurchaseRepository::new();
    purchases.expect_completed_count().returning(|| Ok(42));

    let uow = TestUnitOfWork::new(purchases);
    let service = PurchaseReporter::new(Arc::new(uow), Arc::new(MockPaymentProvider::new()));

    assert_eq!(service.successful_count().await.unwrap(), 42);
}

#[tokio::test]
async fn test_balance_passes_through_provider() {
    let mut provider = MockPaymentProvider::new();
    provider.expect_balance().returning(|| {
        Ok(ProviderBalance {
            available: vec![BalanceFunds {
                amount: 123_400,
                currency: "usd".to_string(),
            }],
            pending: vec![],
        })
    });

    let uow = TestUnitOfWork::new(MockPurchaseRepository::new());
    let service = PurchaseReporter::new(Arc::new(uow), Arc::new(provider));

    let balance = service.balance().await.unwrap();
    assert_eq!(balance.available[0].amount, 123_400);
    assert!(balance.pending.is_empty());
}

#[tokio::test]
async fn test_transactions_pass_through_provider() {
    let mut provider = MockPaymentProvider::new();
    provider.expect_list_transactions().returning(|limit| {
        assert!(limit > 0);
        Ok(vec![ProviderTransaction {
            id: "txn_1".to_string(),
            amount: 1000,
            currency: "usd".to_string(),
            status: "available".to_string(),
            created: 1_700_000_000,
        }])
    });

    let uow = TestUnitOfWork::new(MockPurchaseRepository::new());
    let service = PurchaseReporter::new(Arc::new(uow), Arc::new(provider));

    let transactions = service.transactions().await.unwrap();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].id, "txn_1");
}
