// src/scoring/mod.rs
//
// The scoring engine: a pure transform from fetched answer rows to derived
// score and leaderboard rows. Nothing in here touches the database or any
// other shared state; every query recomputes from scratch.

pub mod grader;
pub mod leaderboard;
pub mod numeric;
pub mod session;
pub mod speed;

pub use leaderboard::player_scores;
pub use session::score_session;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// The four recognized question kinds, with the wire strings the database
/// stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionType {
    Text,
    MultipleChoice,
    Order,
    Number,
}

impl QuestionType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "TEXT" => Some(Self::Text),
            "MC" => Some(Self::MultipleChoice),
            "ORDER" => Some(Self::Order),
            "NUMBER" => Some(Self::Number),
            _ => None,
        }
    }
}

/// One submitted answer joined with its question and participant, the unit
/// the engine grades. Option lists and the answer payload arrive already
/// split on the storage delimiter.
#[derive(Debug, Clone)]
pub struct AnswerRecord {
    pub answer_id: i64,
    pub participant_id: i64,
    pub participant_name: String,
    pub question_id: i64,
    pub question_type: String,
    pub options: Vec<String>,
    pub correct_options: Vec<String>,
    pub answer: Vec<String>,
    pub submission_time: DateTime<Utc>,
    /// Manual grade override. Carried for the review surface; the engine
    /// never branches on it.
    pub correct_override: bool,
}

/// One participant's graded result for one question.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoreRow {
    pub answer_id: i64,
    pub question_id: i64,
    pub participant_id: i64,
    pub participant_name: String,
    pub points: f64,
    pub first_points: f64,
    pub score: f64,
    /// Set when the answer payload did not match the question's shape; the
    /// row scores zero and the rest of the session is unaffected.
    pub grading_error: Option<String>,
}

/// Distinguishes "nobody has answered yet" from a populated all-zero sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionScores {
    NoData,
    Rows(Vec<ScoreRow>),
}

/// One participant's summed result across a whole session.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LeaderboardRow {
    pub participant_id: i64,
    pub participant_name: String,
    pub score: f64,
    pub first_points: f64,
    /// "yes" iff the participant has answered the furthest-advanced
    /// question in the session. A pacing metric, not an activity metric.
    pub answered: String,
}

/// A joined participant, as the leaderboard aggregator needs it.
#[derive(Debug, Clone)]
pub struct RosterEntry {
    pub participant_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GradeError {
    /// The answer payload's shape does not match its question type's
    /// expectation (unparsable NUMBER, ORDER length mismatch, ...).
    MalformedAnswer(String),
}

impl fmt::Display for GradeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradeError::MalformedAnswer(msg) => write!(f, "malformed answer: {}", msg),
        }
    }
}

impl std::error::Error for GradeError {}

/// Working row threaded through the resolver pipeline before the final
/// score sheet is emitted.
pub(crate) struct Graded {
    pub record: AnswerRecord,
    pub points: f64,
    pub first_points: f64,
    pub error: Option<GradeError>,
}
