//! Auth lifecycle handlers: register, login, logout, email verification.

use actix_web::cookie::{Cookie, SameSite, time::Duration as CookieDuration};
use actix_web::{HttpResponse, web};
use chrono::Utc;
use std::sync::Arc;

use quest_core::domain::User;
use quest_core::ports::{Mailer, PasswordService, TokenService};
use quest_shared::ApiResponse;
use quest_shared::dto::{AuthResponse, LoginRequest, RegisterRequest, VerifyEmailRequest};

use crate::middleware::auth::AUTH_COOKIE;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn auth_cookie(token: &str, max_age_seconds: i64) -> Cookie<'static> {
    Cookie::build(AUTH_COOKIE, token.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::seconds(max_age_seconds))
        .finish()
}

/// POST /api/users/register
pub async fn register(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    mailer: web::Data<Arc<dyn Mailer>>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Validate input
    let username = req.username.trim();
    if username.is_empty() {
        return Err(AppError::BadRequest("Username is required".to_string()));
    }
    if req.email.is_empty() || !req.email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    if req.password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    if state.users.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password_hash = password_service
        .hash(&req.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let user = User::new(username.to_string(), req.email.clone(), password_hash);
    let saved_user = state.users.save(user).await?;

    // Single-attempt delivery; a failed mail does not fail registration.
    if let Some(verify_token) = saved_user.verify_token.as_deref() {
        if let Err(e) = mailer.send_verification(&saved_user.email, verify_token).await {
            tracing::warn!("Verification mail not sent: {}", e);
        }
    }

    let token = token_service
        .generate_token(saved_user.id, &saved_user.email)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let expires_in = token_service.expiration_seconds();

    Ok(HttpResponse::Created()
        .cookie(auth_cookie(&token, expires_in))
        .json(ApiResponse::ok(AuthResponse {
            access_token: token,
            token_type: "Bearer".to_string(),
            expires_in: expires_in as u64,
        })))
}

/// POST /api/users/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .users
        .find_by_email(&req.email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let valid = password_service
        .verify(&req.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        return Err(AppError::Unauthorized);
    }

    let token = token_service
        .generate_token(user.id, &user.email)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let expires_in = token_service.expiration_seconds();

    Ok(HttpResponse::Ok()
        .cookie(auth_cookie(&token, expires_in))
        .json(ApiResponse::ok(AuthResponse {
            access_token: token,
            token_type: "Bearer".to_string(),
            expires_in: expires_in as u64,
        })))
}

/// POST /api/users/logout
pub async fn logout() -> AppResult<HttpResponse> {
    // Stateless tokens: logout just clears the cookie.
    Ok(HttpResponse::Ok()
        .cookie(auth_cookie("", 0))
        .json(ApiResponse::ok_with_message((), "Logged out")))
}

/// POST /api/users/verifyemail
pub async fn verify_email(
    state: web::Data<AppState>,
    body: web::Json<VerifyEmailRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.token.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Verification token is required".to_string(),
        ));
    }

    let mut user = state
        .users
        .find_by_verify_token(&req.token)
        .await?
        .ok_or_else(|| AppError::BadRequest("Invalid verification token".to_string()))?;

    if !user.verification_token_valid(&req.token, Utc::now()) {
        return Err(AppError::BadRequest(
            "Verification token has expired".to_string(),
        ));
    }

    user.is_verified = true;
    user.verify_token = None;
    user.verify_token_expires = None;
    user.updated_at = Utc::now();
    state.users.save(user).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message((), "Email verified")))
}
