//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion: repositories come through the Unit of Work,
//! the payment provider through its own trait.

mod auth_service;
mod cart_service;
mod catalog_service;
mod checkout_service;
pub mod container;
mod feedback_service;
mod purchase_service;
mod user_service;

// Service Container
pub use container::Services;

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use cart_service::{CartManager, CartService};
pub use catalog_service::{CatalogManager, CatalogService, CourseWithPurchaseStatus};
pub use checkout_service::{CheckoutManager, CheckoutService, CheckoutUrls};
pub use feedback_service::{FeedbackManager, FeedbackService};
pub use purchase_service::{PurchaseQueryService, PurchaseReporter};
pub use user_service::{UserManager, UserService};
