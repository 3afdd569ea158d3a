//! Code playground handler - proxies snippets to the execution sandbox.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use quest_core::ports::{CodeRunner, ExecutionRequest};
use quest_shared::ApiResponse;
use quest_shared::dto::{ExecuteRequest, ExecuteResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};

/// POST /api/playground/execute
pub async fn execute(
    _identity: Identity,
    code_runner: web::Data<Arc<dyn CodeRunner>>,
    body: web::Json<ExecuteRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.language.trim().is_empty() {
        return Err(AppError::BadRequest("Language is required".to_string()));
    }
    if req.code.trim().is_empty() {
        return Err(AppError::BadRequest("Code cannot be empty".to_string()));
    }

    let outcome = code_runner
        .execute(ExecutionRequest {
            language: req.language,
            code: req.code,
            stdin: req.stdin,
        })
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(ExecuteResponse {
        stdout: outcome.stdout,
        stderr: outcome.stderr,
        exit_code: outcome.exit_code,
    })))
}
