//! Purchase history and payment dashboard handlers.
//!
//! The history endpoint serves the caller; the reporting endpoints
//! (transactions, counts, balance) back the instructor dashboard and
//! require the instructor role.

use axum::{extract::State, response::Json, routing::get, Extension, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::middleware::{require_instructor, CurrentUser};
use crate::api::AppState;
use crate::domain::PurchasedCourseView;
use crate::errors::AppResult;
use crate::infra::{ProviderBalance, ProviderTransaction};

/// `{purchasedCourse: [..]}`
#[derive(Debug, Serialize, ToSchema)]
pub struct PurchasedCoursesEnvelope {
    #[serde(rename = "purchasedCourse")]
    pub purchased_course: Vec<PurchasedCourseView>,
}

/// `{transactions: [..]}`
#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionsEnvelope {
    pub transactions: Vec<ProviderTransaction>,
}

/// `{count}`
#[derive(Debug, Serialize, ToSchema)]
pub struct CountEnvelope {
    pub count: u64,
}

/// `{balance: {available, pending}}`
#[derive(Debug, Serialize, ToSchema)]
pub struct BalanceEnvelope {
    pub balance: ProviderBalance,
}

/// Create purchase routes
pub fn purchase_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_purchased_courses))
        .route("/transactions", get(get_transactions))
        .route("/transaction-count", get(get_transaction_count))
        .route("/successful-count", get(get_successful_count))
        .route("/balance", get(get_balance))
}

/// List the caller's purchases with course details
#[utoipa::path(
    get,
    path = "/api/v1/purchase",
    tag = "Purchases",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Purchases with course details", body = PurchasedCoursesEnvelope)
    )
)]
pub async fn get_purchased_courses(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<PurchasedCoursesEnvelope>> {
    let purchased_course = state.purchase_service.purchased_courses(user.id).await?;
    Ok(Json(PurchasedCoursesEnvelope { purchased_course }))
}

/// List recent provider transactions
#[utoipa::path(
    get,
    path = "/api/v1/purchase/transactions",
    tag = "Purchases",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Recent provider transactions", body = TransactionsEnvelope),
        (status = 403, description = "Instructor role required")
    )
)]
pub async fn get_transactions(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<TransactionsEnvelope>> {
    require_instructor(&user)?;
    let transactions = state.purchase_service.transactions().await?;
    Ok(Json(TransactionsEnvelope { transactions }))
}

/// Provider transaction count
#[utoipa::path(
    get,
    path = "/api/v1/purchase/transaction-count",
    tag = "Purchases",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Provider transaction count", body = CountEnvelope),
        (status = 403, description = "Instructor role required")
    )
)]
pub async fn get_transaction_count(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<CountEnvelope>> {
    require_instructor(&user)?;
    let count = state.purchase_service.transaction_count().await?;
    Ok(Json(CountEnvelope { count }))
}

/// Count of completed purchases
#[utoipa::path(
    get,
    path = "/api/v1/purchase/successful-count",
    tag = "Purchases",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Completed purchase count", body = CountEnvelope),
        (status = 403, description = "Instructor role required")
    )
)]
pub async fn get_successful_count(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<CountEnvelope>> {
    require_instructor(&user)?;
    let count = state.purchase_service.successful_count().await?;
    Ok(Json(CountEnvelope { count }))
}

/// Current provider balance
#[utoipa::path(
    get,
    path = "/api/v1/purchase/balance",
    tag = "Purchases",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Available and pending balance", body = BalanceEnvelope),
        (status = 403, description = "Instructor role required")
    )
)]
pub async fn get_balance(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<BalanceEnvelope>> {
    require_instructor(&user)?;
    let balance = state.purchase_service.balance().await?;
    Ok(Json(BalanceEnvelope { balance }))
}
