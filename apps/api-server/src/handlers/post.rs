//! Blog post handlers.

use actix_web::{HttpResponse, web};

use quill_core::domain::NewPost;
use quill_core::error::DomainError;
use quill_core::ports::BaseRepository;
use quill_shared::dto::CreatePostRequest;

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// Static post-creation form, served as-is.
const CREATE_FORM: &str = include_str!("../../templates/post_form.html");

/// GET /post/create - Public route
///
/// Renders the creation form for authenticated and unauthenticated
/// callers alike; only the write path is gated.
pub async fn create_form() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(CREATE_FORM)
}

/// POST /post/create - Protected route
///
/// The body supplies `user_id` directly; the authenticated identity
/// only gates access and is not injected into the record.
pub async fn store(
    _identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let post = state
        .post_service
        .add_new_post(NewPost {
            user_id: req.user_id,
            title: req.title,
            body: req.body,
        })
        .await?;

    tracing::debug!(post_id = post.id, user_id = post.user_id, "Post created");
    Ok(HttpResponse::Ok().finish())
}

/// DELETE /post/delete/{id} - Protected route
///
/// Route-model binding: `{id}` is resolved into a concrete post before
/// the delete runs; an unknown id is a 404. Any authenticated user may
/// delete any post.
pub async fn destroy(
    _identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound { entity: "post", id })?;

    let deleted = state.post_service.delete_post(&post).await?;
    if !deleted {
        // Lost a race with a concurrent delete; the store treats this
        // as a no-op.
        tracing::debug!(post_id = id, "Post already deleted");
    }

    Ok(HttpResponse::Ok().finish())
}
