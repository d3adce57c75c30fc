//! HTTP request handlers.

pub mod auth_handler;
pub mod cart_handler;
pub mod course_handler;
pub mod feedback_handler;
pub mod purchase_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use cart_handler::cart_routes;
pub use course_handler::course_routes;
pub use feedback_handler::feedback_routes;
pub use purchase_handler::purchase_routes;
pub use user_handler::user_routes;
