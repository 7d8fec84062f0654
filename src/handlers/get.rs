use crate::error::{ApiError, ErrorResponse};
use crate::handlers::parse_blog_id;
use crate::models::BlogPost;
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, http::StatusCode, Json};

/// GET /blogs/:id handler - Retrieve one blog post
#[utoipa::path(
    get,
    path = routes::BLOG_ITEM,
    params(
        ("id" = String, Path, description = "Blog id")
    ),
    responses(
        (status = 200, description = "Blog found", body = BlogPost),
        (status = 404, description = "Blog not found", body = String, content_type = "text/plain"),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "blogs"
)]
pub async fn get_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<(StatusCode, Json<BlogPost>), ApiError> {
    let Some(id) = parse_blog_id(&id_str) else {
        return Err(ApiError::BlogNotFound(id_str));
    };

    match state.store.get(id).await? {
        Some(blog) => {
            tracing::info!("Successfully retrieved blog with id: {}", id);
            Ok((StatusCode::OK, Json(blog)))
        }
        None => Err(ApiError::BlogNotFound(id_str)),
    }
}
