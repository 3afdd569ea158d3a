//! Community board handlers: posts, likes, comments.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quest_core::domain::{Comment, CommunityPost};
use quest_shared::ApiResponse;
use quest_shared::dto::{
    AddCommentRequest, CommentResponse, CreatePostRequest, LikeResponse, PostResponse,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn to_comment_response(comment: &Comment) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        post_id: comment.post_id,
        user_id: comment.user_id,
        content: comment.content.clone(),
        created_at: comment.created_at,
    }
}

fn to_post_response(post: &CommunityPost) -> PostResponse {
    PostResponse {
        id: post.id,
        user_id: post.user_id,
        content: post.content.clone(),
        tags: post.tags.clone(),
        likes: post.likes,
        liked_by: post.liked_by.clone(),
        comments: post.comments.iter().map(to_comment_response).collect(),
        created_at: post.created_at,
    }
}

/// GET /api/community/posts
pub async fn list_posts(_identity: Identity, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list_recent().await?;
    let responses: Vec<PostResponse> = posts.iter().map(to_post_response).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(responses)))
}

/// POST /api/community/posts
pub async fn create_post(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.content.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Post content cannot be empty".to_string(),
        ));
    }

    let post = CommunityPost::new(identity.user_id, req.content, req.tags);
    let saved = state.posts.save(post).await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(to_post_response(&saved))))
}

/// GET /api/community/posts/{id}
pub async fn get_post(
    _identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_post_response(&post))))
}

/// DELETE /api/community/posts/{id}
pub async fn delete_post(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    if post.user_id != identity.user_id {
        return Err(AppError::Forbidden);
    }

    state.posts.delete(post_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message((), "Post deleted")))
}

/// POST /api/community/posts/{id}/likes
///
/// Flips the caller's like and returns the authoritative state for the
/// client's optimistic UI to reconcile against.
pub async fn toggle_like(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let like_state = state
        .posts
        .toggle_like(path.into_inner(), identity.user_id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(LikeResponse {
        liked: like_state.liked,
        likes: like_state.likes,
    })))
}

/// POST /api/community/posts/{id}/comments
pub async fn add_comment(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<AddCommentRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.content.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Comment content cannot be empty".to_string(),
        ));
    }

    let comment = Comment::new(path.into_inner(), identity.user_id, req.content);
    let saved = state.posts.add_comment(comment).await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(to_comment_response(&saved))))
}

/// DELETE /api/community/posts/{id}/comments/{comment_id}
pub async fn delete_comment(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();

    let comment = state
        .posts
        .find_comment(comment_id)
        .await?
        .filter(|c| c.post_id == post_id)
        .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;

    if comment.user_id != identity.user_id {
        return Err(AppError::Forbidden);
    }

    state.posts.delete_comment(comment_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message((), "Comment deleted")))
}
