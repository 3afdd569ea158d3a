//! Profile handlers.

use actix_web::{HttpResponse, web};
use chrono::Utc;

use quest_core::domain::{Rank, User};
use quest_shared::ApiResponse;
use quest_shared::dto::{UpdateProfileRequest, UserResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

pub(crate) fn to_user_response(user: &User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        rank: user.rank.as_str().to_string(),
        skills_to_teach: user.skills_to_teach.clone(),
        skills_to_learn: user.skills_to_learn.clone(),
        currently_learning: user.currently_learning.clone(),
        is_finding_match: user.is_finding_match,
        is_verified: user.is_verified,
        created_at: user.created_at,
    }
}

/// GET /api/users/profile
pub async fn get_profile(
    identity: Identity,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_user_response(&user))))
}

/// PATCH /api/users/profile
pub async fn update_profile(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<UpdateProfileRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let mut user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if let Some(username) = req.username {
        let username = username.trim().to_string();
        if username.is_empty() {
            return Err(AppError::BadRequest("Username cannot be empty".to_string()));
        }
        user.username = username;
    }
    if let Some(rank) = req.rank {
        user.rank = Rank::parse(&rank)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown rank: {rank}")))?;
    }
    if let Some(skills) = req.skills_to_teach {
        user.skills_to_teach = skills;
    }
    if let Some(skills) = req.skills_to_learn {
        user.skills_to_learn = skills;
    }
    if let Some(learning) = req.currently_learning {
        user.currently_learning = if learning.trim().is_empty() {
            None
        } else {
            Some(learning)
        };
    }
    if let Some(finding) = req.is_finding_match {
        user.is_finding_match = finding;
    }
    user.updated_at = Utc::now();

    let saved = state.users.save(user).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_user_response(&saved))))
}
