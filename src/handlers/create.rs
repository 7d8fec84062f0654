use crate::error::{ApiError, ErrorResponse};
use crate::models::{BlogInput, BlogPost};
use crate::routes;
use crate::state::AppState;
use axum::{body::Bytes, extract::State, http::StatusCode, Json};

/// POST /blogs handler - Create a blog post
///
/// The body is decoded leniently (see [`BlogInput`]); storage assigns the id.
#[utoipa::path(
    post,
    path = routes::BLOGS,
    request_body = BlogInput,
    responses(
        (status = 200, description = "Blog created", body = BlogPost),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "blogs"
)]
pub async fn create_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<BlogPost>), ApiError> {
    let input = BlogInput::from_json_lenient(&body);

    let blog = state.store.create(input).await?;

    tracing::info!("Successfully created blog with id: {}", blog.id);
    Ok((StatusCode::OK, Json(blog)))
}
