//! Domain layer - Core business entities and logic
//!
//! Contains the business concepts of the platform independent of
//! infrastructure concerns: users, courses, carts, purchases, feedback.

pub mod cart;
pub mod course;
pub mod feedback;
pub mod password;
pub mod purchase;
pub mod user;

pub use cart::{CartLine, CartLineView, CartView};
pub use course::{Course, CourseCard, CourseResponse, CourseStatus};
pub use feedback::{Feedback, FeedbackView};
pub use password::Password;
pub use purchase::{CoursePurchase, NewPendingPurchase, PurchaseStatus, PurchasedCourseView};
pub use user::{User, UserResponse, UserRole};
