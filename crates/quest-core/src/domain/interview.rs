use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Practice interview session. `answers` and `feedback` are parallel arrays
/// addressed by question index; unanswered slots hold empty strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interview {
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
    pub updated_at: DateTime<Utc>,
}

impl Interview {
    pub fn new(
        user_id: Uuid,
        role: String,
        interview_type: String,
        level: String,
        questions: Vec<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            role,
            interview_type,
            level,
            questions,
            answers: Vec::new(),
            feedback: Vec::new(),
            finalized: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record an answer at a question index. Pads the answer array with empty
    /// slots so later questions can be answered out of order.
    pub fn record_answer(&mut self, index: usize, answer: String) -> Result<(), DomainError> {
        if self.finalized {
            return Err(DomainError::Validation(
                "Interview is already finalized".to_string(),
            ));
        }
        if index >= self.questions.len() {
            return Err(DomainError::Validation(format!(
                "Question index {index} is out of range"
            )));
        }
        if self.answers.len() <= index {
            self.answers.resize(index + 1, String::new());
        }
        self.answers[index] = answer;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Store feedback for a question index, padding like `record_answer`.
    pub fn record_feedback(&mut self, index: usize, feedback: String) {
        if self.feedback.len() <= index {
            self.feedback.resize(index + 1, String::new());
        }
        self.feedback[index] = feedback;
        self.updated_at = Utc::now();
    }

    /// Indices of questions that have a non-empty answer.
    pub fn answered_indices(&self) -> Vec<usize> {
        self.answers
            .iter()
            .enumerate()
            .filter(|(_, a)| !a.trim().is_empty())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn finalize(&mut self) {
        self.finalized = true;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interview_with_questions(n: usize) -> Interview {
        Interview::new(
            Uuid::new_v4(),
            "Backend Engineer".to_string(),
            "technical".to_string(),
            "junior".to_string(),
            (0..n).map(|i| format!("Question {i}")).collect(),
        )
    }

    #[test]
    fn answers_can_arrive_out_of_order() {
        let mut interview = interview_with_questions(3);
        interview.record_answer(2, "third".to_string()).unwrap();
        interview.record_answer(0, "first".to_string()).unwrap();

        assert_eq!(interview.answers, vec!["first", "", "third"]);
        assert_eq!(interview.answered_indices(), vec![0, 2]);
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let mut interview = interview_with_questions(2);
        let err = interview.record_answer(2, "nope".to_string());

        assert!(matches!(err, Err(DomainError::Validation(_))));
        assert!(interview.answers.is_empty());
    }

    #[test]
    fn finalized_interview_rejects_answers() {
        let mut interview = interview_with_questions(1);
        interview.finalize();

        assert!(interview.record_answer(0, "late".to_string()).is_err());
    }
}
