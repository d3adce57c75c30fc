//! Unit of Work - centralized repository access.
//!
//! Bundles the per-table repositories behind one injection point so
//! services depend on a single abstraction. Cross-table consistency in
//! this system rides on single-statement atomic operations (upserts,
//! multi-row inserts), so no closure-based transaction machinery is
//! carried here.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::repositories::{
    CartRepository, CartStore, CourseRepository, CourseStore, FeedbackRepository, FeedbackStore,
    PurchaseRepository, PurchaseStore, UserRepository, UserStore,
};

/// Unit of Work trait for dependency injection.
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get course repository
    fn courses(&self) -> Arc<dyn CourseRepository>;

    /// Get cart repository
    fn carts(&self) -> Arc<dyn CartRepository>;

    /// Get purchase repository
    fn purchases(&self) -> Arc<dyn PurchaseRepository>;

    /// Get feedback repository
    fn feedback(&self) -> Arc<dyn FeedbackRepository>;
}

/// Concrete implementation of UnitOfWork backed by one database connection.
pub struct Persistence {
    user_repo: Arc<UserStore>,
    course_repo: Arc<CourseStore>,
    cart_repo: Arc<CartStore>,
    purchase_repo: Arc<PurchaseStore>,
    feedback_repo: Arc<FeedbackStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            course_repo: Arc::new(CourseStore::new(db.clone())),
            cart_repo: Arc::new(CartStore::new(db.clone())),
            purchase_repo: Arc::new(PurchaseStore::new(db.clone())),
            feedback_repo: Arc::new(FeedbackStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn courses(&self) -> Arc<dyn CourseRepository> {
        self.course_repo.clone()
    }

    fn carts(&self) -> Arc<dyn CartRepository> {
        self.cart_repo.clone()
    }

    fn purchases(&self) -> Arc<dyn PurchaseRepository> {
        self.purchase_repo.clone()
    }

    fn feedback(&self) -> Arc<dyn FeedbackRepository> {
        self.feedback_repo.clone()
    }
}
