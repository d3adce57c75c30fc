//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod cart_repository;
mod course_repository;
pub(crate) mod entities;
mod feedback_repository;
mod purchase_repository;
mod user_repository;

pub use cart_repository::{CartRepository, CartStore};
pub use course_repository::{CourseRepository, CourseStore, NewCourse};
pub use feedback_repository::{FeedbackRepository, FeedbackStore};
pub use purchase_repository::{PurchaseRepository, PurchaseStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use cart_repository::MockCartRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use course_repository::MockCourseRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use feedback_repository::MockFeedbackRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use purchase_repository::MockPurchaseRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
