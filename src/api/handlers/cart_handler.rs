//! Cart and checkout handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{delete, get, post},
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::CartView;
use crate::errors::AppResult;

/// Add-to-cart request body
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    /// Course to add
    #[serde(rename = "courseId")]
    pub course_id: Uuid,
}

/// Cart envelope: `{success, cart}`
#[derive(Debug, Serialize, ToSchema)]
pub struct CartEnvelope {
    pub success: bool,
    pub cart: CartView,
}

impl CartEnvelope {
    fn new(cart: CartView) -> Self {
        Self {
            success: true,
            cart,
        }
    }
}

/// Checkout envelope: `{success, url}`
#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutEnvelope {
    pub success: bool,
    /// Provider-hosted payment page to redirect to
    pub url: String,
}

/// Create cart routes
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_cart).post(add_to_cart))
        .route("/:course_id", delete(remove_from_cart))
        .route("/create-checkout-session", post(create_checkout_session))
}

/// Fetch the caller's cart
#[utoipa::path(
    get,
    path = "/api/v1/cart",
    tag = "Cart",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Resolved cart (empty items when absent)", body = CartEnvelope),
        (status = 401, description = "Authentication required")
    )
)]
pub async fn get_cart(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<CartEnvelope>> {
    let cart = state.cart_service.get_cart(user.id).await?;
    Ok(Json(CartEnvelope::new(cart)))
}

/// Add a course to the caller's cart
#[utoipa::path(
    post,
    path = "/api/v1/cart",
    tag = "Cart",
    security(("bearer_auth" = [])),
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Course added (or already present)", body = CartEnvelope),
        (status = 404, description = "Course not found"),
        (status = 409, description = "Course already purchased")
    )
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<AddToCartRequest>,
) -> AppResult<Json<CartEnvelope>> {
    let cart = state
        .cart_service
        .add_to_cart(user.id, payload.course_id)
        .await?;
    Ok(Json(CartEnvelope::new(cart)))
}

/// Remove a course from the caller's cart
#[utoipa::path(
    delete,
    path = "/api/v1/cart/{course_id}",
    tag = "Cart",
    security(("bearer_auth" = [])),
    params(("course_id" = Uuid, Path, description = "Course to remove")),
    responses(
        (status = 200, description = "Course removed (no-op when absent)", body = CartEnvelope)
    )
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(course_id): Path<Uuid>,
) -> AppResult<Json<CartEnvelope>> {
    let cart = state
        .cart_service
        .remove_from_cart(user.id, course_id)
        .await?;
    Ok(Json(CartEnvelope::new(cart)))
}

/// Start payment for the caller's cart
#[utoipa::path(
    post,
    path = "/api/v1/cart/create-checkout-session",
    tag = "Cart",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Hosted checkout session created", body = CheckoutEnvelope),
        (status = 400, description = "Cart empty or contains invalid items"),
        (status = 500, description = "Payment provider failure")
    )
)]
pub async fn create_checkout_session(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<CheckoutEnvelope>> {
    let url = state.checkout_service.create_checkout_session(user.id).await?;
    Ok(Json(CheckoutEnvelope { success: true, url }))
}
