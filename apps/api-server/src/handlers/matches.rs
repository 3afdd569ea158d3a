//! Skill matching handler.

use actix_web::{HttpResponse, web};

use quest_shared::dto::MatchResponse;

use crate::handlers::profile::to_user_response;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn no_match() -> HttpResponse {
    HttpResponse::Ok().json(MatchResponse {
        success: false,
        matched: None,
        message: Some("No match found".to_string()),
    })
}

/// POST /api/matches
///
/// Finds one eligible user with complementary teach/learn skills and claims
/// the pairing by atomically clearing both eligibility flags. A lost claim
/// (concurrent caller got the candidate first) reports "no match"; the
/// client polls again.
pub async fn request_match(
    identity: Identity,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let caller = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if !caller.is_finding_match {
        return Err(AppError::BadRequest(
            "Matching is not enabled for this account".to_string(),
        ));
    }

    let Some(candidate) = state.users.find_match_candidate(&caller).await? else {
        return Ok(no_match());
    };

    if !state.users.claim_match(caller.id, candidate.id).await? {
        return Ok(no_match());
    }

    tracing::info!(
        caller = %caller.id,
        matched = %candidate.id,
        "Skill match claimed"
    );

    Ok(HttpResponse::Ok().json(MatchResponse {
        success: true,
        matched: Some(to_user_response(&candidate)),
        message: None,
    }))
}
