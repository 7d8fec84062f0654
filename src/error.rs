use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Plain-text body returned when a blog id matches no row
pub const BLOG_NOT_FOUND: &str = "Blog not found";

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// Error type for the blog endpoints
///
/// A missing row is answered with a plain-text 404. Any storage failure
/// becomes a JSON 500 for that request only; the server keeps serving.
#[derive(Debug)]
pub enum ApiError {
    /// No row has the requested id
    BlogNotFound(String),
    /// Database operation error
    DatabaseError(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BlogNotFound(id) => {
                tracing::info!("Blog not found with id: {}", id);
                (StatusCode::NOT_FOUND, BLOG_NOT_FOUND).into_response()
            }
            ApiError::DatabaseError(err) => {
                tracing::error!("Database error: {:#}", err);
                let body = Json(ErrorResponse {
                    error: format!("Database error: {:#}", err),
                });
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::DatabaseError(err)
    }
}
