//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request to verify an email address with a mailed token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyEmailRequest {
    pub token: String,
}

/// Response containing an authentication token. The same token is also set
/// as an HttpOnly cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

// ---------------------------------------------------------------------------
// Users & matching
// ---------------------------------------------------------------------------

/// A user's public profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub rank: String,
    pub skills_to_teach: Vec<String>,
    pub skills_to_learn: Vec<String>,
    pub currently_learning: Option<String>,
    pub is_finding_match: bool,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

/// Partial profile update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub rank: Option<String>,
    pub skills_to_teach: Option<Vec<String>>,
    pub skills_to_learn: Option<Vec<String>>,
    pub currently_learning: Option<String>,
    pub is_finding_match: Option<bool>,
}

/// Outcome of a pairing attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub success: bool,
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub matched: Option<UserResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// Community board
// ---------------------------------------------------------------------------

/// Request to create a community post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A community post with its derived like count and comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub tags: Vec<String>,
    pub likes: u64,
    pub liked_by: Vec<Uuid>,
    pub comments: Vec<CommentResponse>,
    pub created_at: DateTime<Utc>,
}

/// Request to append a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCommentRequest {
    pub content: String,
}

/// A single comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Result of a like toggle; the client reconciles its optimistic state
/// against this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeResponse {
    pub liked: bool,
    pub likes: u64,
}

// ---------------------------------------------------------------------------
// Interviews
// ---------------------------------------------------------------------------

/// Request to create a practice interview. When `questions` is omitted the
/// server asks the grader provider to write them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInterviewRequest {
    pub role: String,
    pub interview_type: String,
    pub level: String,
    #[serde(default)]
    pub questions: Option<Vec<String>>,
}

/// Request to update interview metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateInterviewRequest {
    pub role: Option<String>,
    pub interview_type: Option<String>,
    pub level: Option<String>,
}

/// Request to record an answer for a question index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRequest {
    pub index: usize,
    pub answer: String,
}

/// A practice interview with its parallel answer/feedback arrays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub role: String,
    pub interview_type: String,
    pub level: String,
    pub questions: Vec<String>,
    pub answers: Vec<String>,
    pub feedback: Vec<String>,
    pub finalized: bool,
    pub created_at: DateTime<Utc>,
}

/// Per-question grading result returned by the analyze endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerFeedback {
    pub index: usize,
    pub score: u8,
    pub feedback: String,
}

/// Full analyze report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub graded: Vec<AnswerFeedback>,
    pub average_score: f32,
}

// ---------------------------------------------------------------------------
// Playground & voice
// ---------------------------------------------------------------------------

/// Request to run a playground snippet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteRequest {
    pub language: String,
    pub code: String,
    #[serde(default)]
    pub stdin: Option<String>,
}

/// Captured sandbox output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteResponse {
    pub stdout: String,
    pub stderr: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
}

/// Request to start a voice interview call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartCallRequest {
    pub role: String,
    pub interview_type: String,
    pub level: String,
}

/// Request to end a voice interview call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndCallRequest {
    pub call_id: String,
}

/// A voice call created by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallResponse {
    pub call_id: String,
    pub status: String,
}

/// Transcript of a voice call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionResponse {
    pub call_id: String,
    pub transcript: String,
}
