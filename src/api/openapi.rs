//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, cart_handler, course_handler, feedback_handler, purchase_handler, user_handler,
};
use crate::domain::{
    CartLineView, CartView, CourseCard, CourseResponse, CourseStatus, FeedbackView,
    PurchaseStatus, PurchasedCourseView, UserResponse, UserRole,
};
use crate::infra::{BalanceFunds, ProviderBalance, ProviderTransaction};
use crate::services::TokenResponse;

/// OpenAPI documentation for the LearnHub API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "LearnHub API",
        version = "0.1.0",
        description = "E-learning commerce platform: catalog, cart, Stripe checkout, purchases",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
        contact(name = "API Support", email = "dev@learnhub.example")
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server"),
        (url = "https://api.learnhub.example", description = "Production server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        // User endpoints
        user_handler::get_current_user,
        user_handler::update_profile,
        user_handler::list_users,
        // Catalog endpoints
        course_handler::list_courses,
        course_handler::detail_with_status,
        course_handler::create_course,
        course_handler::set_status,
        // Cart & checkout endpoints
        cart_handler::get_cart,
        cart_handler::add_to_cart,
        cart_handler::remove_from_cart,
        cart_handler::create_checkout_session,
        // Purchase endpoints
        purchase_handler::get_purchased_courses,
        purchase_handler::get_transactions,
        purchase_handler::get_transaction_count,
        purchase_handler::get_successful_count,
        purchase_handler::get_balance,
        // Feedback endpoints
        feedback_handler::list_feedback,
        feedback_handler::create_feedback,
        feedback_handler::delete_feedback,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            UserResponse,
            CourseStatus,
            CourseResponse,
            CourseCard,
            CartView,
            CartLineView,
            PurchaseStatus,
            PurchasedCourseView,
            FeedbackView,
            // Provider types
            ProviderBalance,
            BalanceFunds,
            ProviderTransaction,
            // Auth types
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            TokenResponse,
            // Handler types
            user_handler::UpdateProfileRequest,
            course_handler::CreateCourseRequest,
            course_handler::SetStatusRequest,
            course_handler::CoursesEnvelope,
            course_handler::CourseDetailEnvelope,
            cart_handler::AddToCartRequest,
            cart_handler::CartEnvelope,
            cart_handler::CheckoutEnvelope,
            purchase_handler::PurchasedCoursesEnvelope,
            purchase_handler::TransactionsEnvelope,
            purchase_handler::CountEnvelope,
            purchase_handler::BalanceEnvelope,
            feedback_handler::CreateFeedbackRequest,
            feedback_handler::FeedbackEnvelope,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "User registration and login"),
        (name = "Users", description = "Profile access and user listings"),
        (name = "Catalog", description = "Course catalog and instructor management"),
        (name = "Cart", description = "Shopping cart and checkout"),
        (name = "Purchases", description = "Purchase history and payment dashboards"),
        (name = "Feedback", description = "Student feedback posts")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/v1/auth/login"))
                        .build(),
                ),
            );
        }
    }
}
