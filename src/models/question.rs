// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::scoring::QuestionType;

/// Storage delimiter for option lists and answer payloads. Individual
/// entries must never contain it; the validators below enforce that at the
/// API boundary.
pub const LIST_DELIMITER: char = '|';

/// Represents the 'questions' table in the database.
/// `options` and `correct_options` are stored as delimiter-joined strings.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub quiz_id: i64,

    /// Presentation grouping only; scoring is per-question regardless.
    pub round: String,

    /// One of 'TEXT', 'MC', 'ORDER', 'NUMBER'.
    pub question_type: String,

    pub question: String,
    pub options: String,
    pub correct_options: String,
}

impl Question {
    /// DTO view for clients, with options split and correct options
    /// withheld.
    pub fn view(&self) -> QuestionView {
        QuestionView {
            question_id: self.id,
            question: self.question.clone(),
            question_type: self.question_type.clone(),
            round: self.round.clone(),
            options: split_list(&self.options),
        }
    }
}

/// DTO for sending a question to clients (excludes correct options).
#[derive(Debug, Serialize)]
pub struct QuestionView {
    pub question_id: i64,
    pub question: String,
    pub question_type: String,
    pub round: String,
    pub options: Vec<String>,
}

/// DTO for creating a new question.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 1000))]
    pub question: String,
    #[validate(length(max = 100))]
    pub round: String,
    #[validate(custom(function = validate_question_type))]
    pub question_type: String,
    #[validate(custom(function = validate_options))]
    pub options: Vec<String>,
    #[validate(custom(function = validate_correct_options))]
    pub correct_options: Vec<String>,
}

fn validate_question_type(question_type: &str) -> Result<(), validator::ValidationError> {
    if QuestionType::parse(question_type).is_none() {
        return Err(validator::ValidationError::new("unknown_question_type"));
    }
    Ok(())
}

fn validate_options(options: &[String]) -> Result<(), validator::ValidationError> {
    for opt in options {
        if opt.len() > 500 {
            return Err(validator::ValidationError::new("option_too_long"));
        }
        if opt.contains(LIST_DELIMITER) {
            return Err(validator::ValidationError::new(
                "option_contains_delimiter",
            ));
        }
    }
    Ok(())
}

fn validate_correct_options(options: &[String]) -> Result<(), validator::ValidationError> {
    if options.is_empty() {
        return Err(validator::ValidationError::new(
            "correct_options_cannot_be_empty",
        ));
    }
    validate_options(options)
}

/// Splits a stored delimiter-joined string back into its entries. An empty
/// stored string means an empty list, not a single empty entry.
pub fn split_list(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(LIST_DELIMITER).map(str::to_string).collect()
}

/// Joins entries into the stored form. Callers must have validated that no
/// entry contains the delimiter.
pub fn join_list(parts: &[String]) -> String {
    parts.join(&LIST_DELIMITER.to_string())
}
