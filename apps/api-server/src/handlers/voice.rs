//! Voice interview handlers - proxy to the voice-call provider.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use quest_core::ports::VoiceGateway;
use quest_shared::ApiResponse;
use quest_shared::dto::{CallResponse, EndCallRequest, StartCallRequest, TranscriptionResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};

/// POST /api/vapi/start-interview
pub async fn start_interview(
    _identity: Identity,
    voice: web::Data<Arc<dyn VoiceGateway>>,
    body: web::Json<StartCallRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.role.trim().is_empty() {
        return Err(AppError::BadRequest("Role is required".to_string()));
    }

    let call = voice
        .start_call(&req.role, &req.interview_type, &req.level)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(CallResponse {
        call_id: call.call_id,
        status: call.status,
    })))
}

/// POST /api/vapi/end-interview
pub async fn end_interview(
    _identity: Identity,
    voice: web::Data<Arc<dyn VoiceGateway>>,
    body: web::Json<EndCallRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.call_id.trim().is_empty() {
        return Err(AppError::BadRequest("call_id is required".to_string()));
    }

    voice.end_call(&req.call_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message((), "Call ended")))
}

/// GET /api/vapi/transcription/{call_id}
pub async fn transcription(
    _identity: Identity,
    voice: web::Data<Arc<dyn VoiceGateway>>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let call_id = path.into_inner();

    let transcription = voice.transcription(&call_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(TranscriptionResponse {
        call_id: transcription.call_id,
        transcript: transcription.transcript,
    })))
}
