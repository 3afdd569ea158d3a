//! LLM-backed interview grader.
//!
//! Talks to an OpenAI-compatible chat-completions endpoint. The model is
//! instructed to answer with bare JSON; responses wrapped in markdown code
//! fences are tolerated.

use async_trait::async_trait;
use serde::Deserialize;

use quest_core::ports::{AnswerGrade, GraderError, InterviewGrader};

use super::{http_client, join_url};

/// Grader provider configuration.
#[derive(Debug, Clone)]
pub struct GraderConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
}

impl GraderConfig {
    /// Read provider settings from the environment. Returns None when no API
    /// key is configured; callers fall back to [`CannedGrader`].
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("GRADER_API_KEY").ok()?;
        Some(Self {
            api_url: std::env::var("GRADER_API_URL")
                .unwrap_or_else(|_| "https://api.openai.com".to_string()),
            api_key,
            model: std::env::var("GRADER_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
        })
    }
}

/// Chat-completions based grader.
pub struct HttpInterviewGrader {
    http: reqwest::Client,
    config: GraderConfig,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct GradePayload {
    score: u8,
    feedback: String,
}

impl HttpInterviewGrader {
    pub fn new(config: GraderConfig) -> Self {
        Self {
            http: http_client(),
            config,
        }
    }

    async fn chat(&self, system: &str, user: &str) -> Result<String, GraderError> {
        let body = serde_json::json!({
            "model": self.config.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user},
            ],
            "temperature": 0.2,
        });

        let response = self
            .http
            .post(join_url(&self.config.api_url, "/v1/chat/completions"))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GraderError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GraderError::Request(format!(
                "grader returned status {status}"
            )));
        }

        let payload: ChatResponse = response
            .json()
            .await
            .map_err(|e| GraderError::BadResponse(e.to_string()))?;

        payload
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| GraderError::BadResponse("no choices in response".to_string()))
    }
}

#[async_trait]
impl InterviewGrader for HttpInterviewGrader {
    async fn generate_questions(
        &self,
        role: &str,
        interview_type: &str,
        level: &str,
        count: usize,
    ) -> Result<Vec<String>, GraderError> {
        let system = "You write practice interview questions. \
                      Respond with a JSON array of question strings and nothing else.";
        let user = format!(
            "Write {count} {interview_type} interview questions for a {level} {role}."
        );

        let content = self.chat(system, &user).await?;
        let questions: Vec<String> = serde_json::from_str(strip_code_fence(&content))
            .map_err(|e| GraderError::BadResponse(e.to_string()))?;

        if questions.is_empty() {
            return Err(GraderError::BadResponse(
                "model returned no questions".to_string(),
            ));
        }
        Ok(questions)
    }

    async fn grade_answer(
        &self,
        role: &str,
        level: &str,
        question: &str,
        answer: &str,
    ) -> Result<AnswerGrade, GraderError> {
        let system = "You grade interview answers. \
                      Respond with JSON {\"score\": 0-10, \"feedback\": \"...\"} and nothing else.";
        let user = format!(
            "Role: {level} {role}\nQuestion: {question}\nCandidate answer: {answer}"
        );

        let content = self.chat(system, &user).await?;
        let payload: GradePayload = serde_json::from_str(strip_code_fence(&content))
            .map_err(|e| GraderError::BadResponse(e.to_string()))?;

        Ok(AnswerGrade {
            score: payload.score.min(10),
            feedback: payload.feedback,
        })
    }
}

/// Deterministic grader used when no provider is configured. Keeps the
/// interview flow usable in development and in tests.
pub struct CannedGrader;

impl CannedGrader {
    pub fn new() -> Self {
        tracing::warn!("GRADER_API_KEY not set - interview grading uses canned output");
        Self
    }
}

impl Default for CannedGrader {
    fn default() -> Self {
        Self
    }
}

#[async_trait]
impl InterviewGrader for CannedGrader {
    async fn generate_questions(
        &self,
        role: &str,
        interview_type: &str,
        level: &str,
        count: usize,
    ) -> Result<Vec<String>, GraderError> {
        Ok((1..=count)
            .map(|n| {
                format!(
                    "({n}/{count}) Describe a {interview_type} challenge a {level} {role} \
                     has faced and how you would approach it."
                )
            })
            .collect())
    }

    async fn grade_answer(
        &self,
        _role: &str,
        _level: &str,
        _question: &str,
        answer: &str,
    ) -> Result<AnswerGrade, GraderError> {
        // Length is a stand-in signal so the UI has something to render.
        let score = if answer.split_whitespace().count() >= 30 {
            6
        } else {
            4
        };
        Ok(AnswerGrade {
            score,
            feedback: "Automated grading is not configured; this is placeholder feedback. \
                       Consider expanding your answer with a concrete example."
                .to_string(),
        })
    }
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_json_code_fences() {
        assert_eq!(strip_code_fence("```json\n[\"q\"]\n```"), "[\"q\"]");
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("[1, 2]"), "[1, 2]");
    }

    #[tokio::test]
    async fn canned_grader_produces_requested_count() {
        let grader = CannedGrader::default();
        let questions = grader
            .generate_questions("Backend Engineer", "technical", "junior", 5)
            .await
            .unwrap();
        assert_eq!(questions.len(), 5);
    }
}
