use crate::error::{ApiError, ErrorResponse};
use crate::models::BlogPost;
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// GET /blogs handler - List every blog post
///
/// Rows come back in storage order. An empty table yields `[]`.
#[utoipa::path(
    get,
    path = routes::BLOGS,
    responses(
        (status = 200, description = "All blog posts", body = [BlogPost]),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "blogs"
)]
pub async fn list_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Vec<BlogPost>>), ApiError> {
    let blogs = state.store.list().await?;

    tracing::info!("Listed {} blogs", blogs.len());
    Ok((StatusCode::OK, Json(blogs)))
}
