//! Course catalog handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch, post},
    Extension, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_instructor, CurrentUser};
use crate::api::AppState;
use crate::domain::{CourseResponse, CourseStatus};
use crate::errors::AppResult;
use validator::Validate;

/// Course creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    /// Course title
    #[validate(length(min = 1, message = "Title is required"))]
    #[schema(example = "Rust for Backend Engineers")]
    pub title: String,
    /// Price in major currency units
    #[schema(example = "49.99")]
    pub price: Decimal,
    /// Thumbnail URL
    pub thumbnail: Option<String>,
}

/// Course status change request
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetStatusRequest {
    pub status: CourseStatus,
}

/// Course detail with the caller's purchase status
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetailEnvelope {
    pub success: bool,
    pub course: CourseResponse,
    pub purchased: bool,
}

/// `{success, courses}` catalog listing
#[derive(Debug, Serialize, ToSchema)]
pub struct CoursesEnvelope {
    pub success: bool,
    pub courses: Vec<CourseResponse>,
}

/// Create course routes
pub fn course_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_courses).post(create_course))
        .route("/:course_id/detail-with-status", get(detail_with_status))
        .route("/:course_id/status", patch(set_status))
}

/// List published courses
#[utoipa::path(
    get,
    path = "/api/v1/course",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Published catalog", body = CoursesEnvelope)
    )
)]
pub async fn list_courses(State(state): State<AppState>) -> AppResult<Json<CoursesEnvelope>> {
    let courses = state.catalog_service.list_published().await?;
    Ok(Json(CoursesEnvelope {
        success: true,
        courses: courses.into_iter().map(CourseResponse::from).collect(),
    }))
}

/// Course detail with the caller's purchase status
#[utoipa::path(
    get,
    path = "/api/v1/course/{course_id}/detail-with-status",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(("course_id" = Uuid, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course detail and purchased flag", body = CourseDetailEnvelope),
        (status = 404, description = "Course not found")
    )
)]
pub async fn detail_with_status(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(course_id): Path<Uuid>,
) -> AppResult<Json<CourseDetailEnvelope>> {
    let detail = state
        .catalog_service
        .detail_with_status(user.id, course_id)
        .await?;

    Ok(Json(CourseDetailEnvelope {
        success: true,
        course: CourseResponse::from(detail.course),
        purchased: detail.purchased,
    }))
}

/// Create a draft course (instructor only)
#[utoipa::path(
    post,
    path = "/api/v1/course",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created in draft status", body = CourseResponse),
        (status = 403, description = "Instructor role required")
    )
)]
pub async fn create_course(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateCourseRequest>,
) -> AppResult<(StatusCode, Json<CourseResponse>)> {
    require_instructor(&user)?;

    let course = state
        .catalog_service
        .create_course(user.id, payload.title, payload.price, payload.thumbnail)
        .await?;

    Ok((StatusCode::CREATED, Json(CourseResponse::from(course))))
}

/// Publish or unpublish a course (owning instructor only)
#[utoipa::path(
    patch,
    path = "/api/v1/course/{course_id}/status",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(("course_id" = Uuid, Path, description = "Course id")),
    request_body = SetStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = CourseResponse),
        (status = 403, description = "Not the owning instructor"),
        (status = 404, description = "Course not found")
    )
)]
pub async fn set_status(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(course_id): Path<Uuid>,
    Json(payload): Json<SetStatusRequest>,
) -> AppResult<Json<CourseResponse>> {
    require_instructor(&user)?;

    let course = state
        .catalog_service
        .set_status(user.id, course_id, payload.status)
        .await?;

    Ok(Json(CourseResponse::from(course)))
}
