use crate::error::{ApiError, ErrorResponse};
use crate::handlers::parse_blog_id;
use crate::models::DeleteResponse;
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, http::StatusCode, Json};

/// DELETE /blogs/:id handler - Remove a blog post
///
/// Answers with the same confirmation whether or not the row existed.
#[utoipa::path(
    delete,
    path = routes::BLOG_ITEM,
    params(
        ("id" = String, Path, description = "Blog id")
    ),
    responses(
        (status = 200, description = "Blog deleted (or never existed)", body = DeleteResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "blogs"
)]
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<(StatusCode, Json<DeleteResponse>), ApiError> {
    let rows = match parse_blog_id(&id_str) {
        Some(id) => state.store.delete(id).await?,
        None => 0,
    };

    tracing::info!("Deleted blog with id: {} ({} row(s) affected)", id_str, rows);
    Ok((StatusCode::OK, Json(DeleteResponse::success())))
}
