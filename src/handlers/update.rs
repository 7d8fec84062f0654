use crate::error::{ApiError, ErrorResponse};
use crate::handlers::parse_blog_id;
use crate::models::{BlogInput, BlogPost};
use crate::routes;
use crate::state::AppState;
use axum::{body::Bytes, extract::Path, extract::State, http::StatusCode, Json};

/// PUT /blogs/:id handler - Overwrite a blog post
///
/// All four fields are replaced; fields missing from the body become `""`.
/// The row is not checked for existence first, so updating an unknown id
/// succeeds without touching anything. The response echoes the path id.
#[utoipa::path(
    put,
    path = routes::BLOG_ITEM,
    params(
        ("id" = String, Path, description = "Blog id")
    ),
    request_body = BlogInput,
    responses(
        (status = 200, description = "Blog updated", body = BlogPost),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "blogs"
)]
pub async fn update_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<BlogPost>), ApiError> {
    let input = BlogInput::from_json_lenient(&body);

    let rows = match parse_blog_id(&id_str) {
        Some(id) => state.store.update(id, &input).await?,
        None => 0,
    };

    tracing::info!("Updated blog with id: {} ({} row(s) affected)", id_str, rows);
    Ok((StatusCode::OK, Json(BlogPost::from_input(id_str, input))))
}
