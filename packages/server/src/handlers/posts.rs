use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::Condition;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::post::*;
use crate::repository;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/posts",
    tag = "Posts",
    operation_id = "listPosts",
    summary = "List all blog posts",
    description = "Returns every stored post, oldest first, with the author resolved into a display name.",
    responses(
        (status = 200, description = "All posts", body = PostListResponse),
        (status = 500, description = "Storage failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<PostListResponse>, AppError> {
    let posts = repository::find_posts(&state.db, Condition::all()).await?;

    Ok(Json(PostListResponse {
        blogposts: posts.into_iter().map(PostResponse::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/posts/{id}",
    tag = "Posts",
    operation_id = "getPost",
    summary = "Get a blog post by ID",
    params(("id" = String, Path, description = "Post ID (UUID)")),
    responses(
        (status = 200, description = "Post details", body = PostResponse),
        (status = 404, description = "Post not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PostResponse>, AppError> {
    let id = parse_post_id(&id)?;

    let post = repository::find_post(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".into()))?;

    Ok(Json(post.into()))
}

#[utoipa::path(
    post,
    path = "/posts",
    tag = "Posts",
    operation_id = "createPost",
    summary = "Create a blog post",
    description = "Creates an author and a post referencing it, atomically. The author may be given as `{firstName, lastName, userName}` or as a single display name string.",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = PostResponse),
        (status = 400, description = "Malformed body (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Author user name already taken (USERNAME_TAKEN)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(title = %payload.title))]
pub async fn create_post(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreatePostRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_post(&payload)?;

    let post = repository::create_post(&state.db, payload.into()).await?;

    tracing::info!(post_id = %post.post().id, "Post created");
    Ok((StatusCode::CREATED, Json(PostResponse::from(post))))
}

#[utoipa::path(
    put,
    path = "/posts/{id}",
    tag = "Posts",
    operation_id = "updatePost",
    summary = "Update a blog post",
    description = "Overwrites the fields present in the body. Author fields update the referenced author in place. `comments`, when present, replaces the whole list.",
    params(("id" = String, Path, description = "Post ID (UUID)")),
    request_body = UpdatePostRequest,
    responses(
        (status = 204, description = "Post updated"),
        (status = 400, description = "Malformed body or id mismatch (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Post not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Author user name already taken (USERNAME_TAKEN)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdatePostRequest>,
) -> Result<StatusCode, AppError> {
    let id = parse_post_id(&id)?;
    validate_update_post(id, &payload)?;

    repository::update_post(&state.db, id, payload.into()).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/posts/{id}",
    tag = "Posts",
    operation_id = "deletePost",
    summary = "Delete a blog post",
    description = "Removes the post. Its author is left in place.",
    params(("id" = String, Path, description = "Post ID (UUID)")),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 404, description = "Post not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_post_id(&id)?;

    repository::delete_post(&state.db, id).await?;

    tracing::info!(post_id = %id, "Post deleted");
    Ok(StatusCode::NO_CONTENT)
}
