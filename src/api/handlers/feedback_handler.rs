//! Feedback handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get},
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::FeedbackView;
use crate::errors::AppResult;
use crate::types::ApiResponse;

/// Feedback creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateFeedbackRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    #[schema(example = "Loved the ownership chapter")]
    pub title: String,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
}

/// `{success, feedback}` listing envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct FeedbackEnvelope {
    pub success: bool,
    pub feedback: Vec<FeedbackView>,
}

/// Create feedback routes
pub fn feedback_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_feedback).post(create_feedback))
        .route("/:id", delete(delete_feedback))
}

/// List all feedback posts
#[utoipa::path(
    get,
    path = "/api/v1/feedback",
    tag = "Feedback",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All feedback, newest first", body = FeedbackEnvelope)
    )
)]
pub async fn list_feedback(State(state): State<AppState>) -> AppResult<Json<FeedbackEnvelope>> {
    let feedback = state.feedback_service.list().await?;
    Ok(Json(FeedbackEnvelope {
        success: true,
        feedback,
    }))
}

/// Create a feedback post
#[utoipa::path(
    post,
    path = "/api/v1/feedback",
    tag = "Feedback",
    security(("bearer_auth" = [])),
    request_body = CreateFeedbackRequest,
    responses(
        (status = 201, description = "Feedback created"),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_feedback(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateFeedbackRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Uuid>>)> {
    let post = state
        .feedback_service
        .create(user.id, payload.title, payload.content)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(post.id))))
}

/// Delete a feedback post (author or instructor)
#[utoipa::path(
    delete,
    path = "/api/v1/feedback/{id}",
    tag = "Feedback",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Feedback post id")),
    responses(
        (status = 200, description = "Feedback deleted"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Feedback not found")
    )
)]
pub async fn delete_feedback(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .feedback_service
        .delete(user.id, user.role.clone(), id)
        .await?;

    Ok(Json(ApiResponse::message("Feedback deleted")))
}
