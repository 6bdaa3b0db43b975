// src/models/session.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'live_sessions' table in the database.
/// One live run-through of a quiz by a group of joined participants.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct LiveSession {
    pub id: i64,
    pub quiz_id: i64,

    /// Index into the quiz's questions ordered by id.
    pub current_question_index: i64,

    pub is_active: bool,
    pub round_break: bool,
}
