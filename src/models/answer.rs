// src/models/answer.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::question::LIST_DELIMITER;

/// Represents the 'answers' table in the database.
/// The payload is stored as a delimiter-joined string: a single value for
/// TEXT/NUMBER questions, multiple for MC/ORDER.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Answer {
    pub id: i64,
    pub participant_id: i64,
    pub question_id: i64,
    pub answer: String,
    pub submission_time: chrono::DateTime<chrono::Utc>,

    /// Manual grade override set during answer review.
    pub correct_override: bool,

    /// Raised by the participant, cleared by the quiz runner.
    pub disputed: bool,
    pub checked: bool,
}

/// DTO for submitting an answer to the session's current question.
#[derive(Debug, Deserialize, Validate)]
pub struct AnswerInput {
    pub participant_id: i64,
    #[validate(custom(function = validate_answer_parts))]
    pub answer: Vec<String>,
}

fn validate_answer_parts(parts: &[String]) -> Result<(), validator::ValidationError> {
    if parts.is_empty() {
        return Err(validator::ValidationError::new("answer_cannot_be_empty"));
    }
    for part in parts {
        if part.len() > 500 {
            return Err(validator::ValidationError::new("answer_too_long"));
        }
        if part.contains(LIST_DELIMITER) {
            return Err(validator::ValidationError::new(
                "answer_contains_delimiter",
            ));
        }
    }
    Ok(())
}
