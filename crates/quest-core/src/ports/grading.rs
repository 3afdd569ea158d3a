//! LLM answer-grading port.

use async_trait::async_trait;

/// Feedback for a single interview answer.
#[derive(Debug, Clone)]
pub struct AnswerGrade {
    /// Score on a 0-10 scale.
    pub score: u8,
    pub feedback: String,
}

/// Seam to the LLM provider that writes interview questions and grades
/// answers. Implementations make a single attempt per call.
#[async_trait]
pub trait InterviewGrader: Send + Sync {
    /// Generate `count` interview questions for a role/type/level.
    async fn generate_questions(
        &self,
        role: &str,
        interview_type: &str,
        level: &str,
        count: usize,
    ) -> Result<Vec<String>, GraderError>;

    /// Grade one answer against its question.
    async fn grade_answer(
        &self,
        role: &str,
        level: &str,
        question: &str,
        answer: &str,
    ) -> Result<AnswerGrade, GraderError>;
}

/// Grading provider errors.
#[derive(Debug, thiserror::Error)]
pub enum GraderError {
    #[error("Grader request failed: {0}")]
    Request(String),

    #[error("Grader returned an unusable response: {0}")]
    BadResponse(String),
}
