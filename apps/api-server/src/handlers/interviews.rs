//! Practice interview handlers.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use quest_core::domain::Interview;
use quest_core::ports::InterviewGrader;
use quest_shared::ApiResponse;
use quest_shared::dto::{
    AnalyzeResponse, AnswerFeedback, AnswerRequest, CreateInterviewRequest, InterviewResponse,
    UpdateInterviewRequest,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Questions generated when the client does not supply any.
const DEFAULT_QUESTION_COUNT: usize = 5;

fn to_interview_response(interview: &Interview) -> InterviewResponse {
    InterviewResponse {
        id: interview.id,
        user_id: interview.user_id,
        role: interview.role.clone(),
        interview_type: interview.interview_type.clone(),
        level: interview.level.clone(),
        questions: interview.questions.clone(),
        answers: interview.answers.clone(),
        feedback: interview.feedback.clone(),
        finalized: interview.finalized,
        created_at: interview.created_at,
    }
}

/// Load an interview and check the caller owns it.
async fn load_owned(
    state: &AppState,
    identity: &Identity,
    id: Uuid,
) -> AppResult<Interview> {
    let interview = state
        .interviews
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Interview not found".to_string()))?;

    if interview.user_id != identity.user_id {
        return Err(AppError::Forbidden);
    }
    Ok(interview)
}

/// GET /api/interviews
pub async fn list_interviews(
    identity: Identity,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let interviews = state.interviews.find_by_user_id(identity.user_id).await?;
    let responses: Vec<InterviewResponse> =
        interviews.iter().map(to_interview_response).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(responses)))
}

/// POST /api/interviews
pub async fn create_interview(
    identity: Identity,
    state: web::Data<AppState>,
    grader: web::Data<Arc<dyn InterviewGrader>>,
    body: web::Json<CreateInterviewRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    for (field, value) in [
        ("role", &req.role),
        ("interview_type", &req.interview_type),
        ("level", &req.level),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::BadRequest(format!("{field} is required")));
        }
    }

    let questions = match req.questions.filter(|q| !q.is_empty()) {
        Some(questions) => questions,
        None => {
            grader
                .generate_questions(
                    &req.role,
                    &req.interview_type,
                    &req.level,
                    DEFAULT_QUESTION_COUNT,
                )
                .await?
        }
    };

    let interview = Interview::new(
        identity.user_id,
        req.role,
        req.interview_type,
        req.level,
        questions,
    );
    let saved = state.interviews.save(interview).await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(to_interview_response(&saved))))
}

/// GET /api/interviews/{id}
pub async fn get_interview(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let interview = load_owned(&state, &identity, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_interview_response(&interview))))
}

/// PUT /api/interviews/{id}
pub async fn update_interview(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateInterviewRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let mut interview = load_owned(&state, &identity, path.into_inner()).await?;

    if let Some(role) = req.role {
        interview.role = role;
    }
    if let Some(interview_type) = req.interview_type {
        interview.interview_type = interview_type;
    }
    if let Some(level) = req.level {
        interview.level = level;
    }
    interview.updated_at = Utc::now();

    let saved = state.interviews.save(interview).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_interview_response(&saved))))
}

/// DELETE /api/interviews/{id}
pub async fn delete_interview(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let interview = load_owned(&state, &identity, path.into_inner()).await?;

    state.interviews.delete(interview.id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message((), "Interview deleted")))
}

/// POST /api/interviews/{id}/answer
pub async fn record_answer(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<AnswerRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.answer.trim().is_empty() {
        return Err(AppError::BadRequest("Answer cannot be empty".to_string()));
    }

    let mut interview = load_owned(&state, &identity, path.into_inner()).await?;
    interview.record_answer(req.index, req.answer)?;
    let saved = state.interviews.save(interview).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_interview_response(&saved))))
}

/// POST /api/interviews/{id}/analyze
///
/// Grades every answered question through the LLM provider. One attempt per
/// answer; a provider failure aborts the run and nothing is persisted.
pub async fn analyze_interview(
    identity: Identity,
    state: web::Data<AppState>,
    grader: web::Data<Arc<dyn InterviewGrader>>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let mut interview = load_owned(&state, &identity, path.into_inner()).await?;

    let answered = interview.answered_indices();
    if answered.is_empty() {
        return Err(AppError::BadRequest(
            "No answers to analyze yet".to_string(),
        ));
    }

    let mut graded = Vec::with_capacity(answered.len());
    for index in answered {
        let grade = grader
            .grade_answer(
                &interview.role,
                &interview.level,
                &interview.questions[index],
                &interview.answers[index],
            )
            .await?;

        interview.record_feedback(index, grade.feedback.clone());
        graded.push(AnswerFeedback {
            index,
            score: grade.score,
            feedback: grade.feedback,
        });
    }

    let average_score =
        graded.iter().map(|g| g.score as f32).sum::<f32>() / graded.len() as f32;

    state.interviews.save(interview).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(AnalyzeResponse {
        graded,
        average_score,
    })))
}

/// PATCH /api/interviews/{id}/finalize
pub async fn finalize_interview(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let mut interview = load_owned(&state, &identity, path.into_inner()).await?;

    interview.finalize();
    let saved = state.interviews.save(interview).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_interview_response(&saved))))
}
