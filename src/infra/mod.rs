//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and repositories
//! - Payment provider client
//! - Caching systems (Redis)
//! - Unit of Work for repository access

pub mod cache;
pub mod db;
pub mod payments;
pub mod repositories;
pub mod unit_of_work;

pub use cache::Cache;
pub use db::{Database, Migrator};
pub use payments::{
    BalanceFunds, CheckoutSession, CheckoutSessionSpec, PaymentProvider, ProviderBalance,
    ProviderTransaction, SessionLineItem, StripeGateway,
};
pub use repositories::{
    CartRepository, CartStore, CourseRepository, CourseStore, FeedbackRepository, FeedbackStore,
    NewCourse, PurchaseRepository, PurchaseStore, UserRepository, UserStore,
};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use payments::MockPaymentProvider;
#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockCartRepository, MockCourseRepository, MockFeedbackRepository, MockPurchaseRepository,
    MockUserRepository,
};
