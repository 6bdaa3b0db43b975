// src/models/participant.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'participants' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Participant {
    pub id: i64,
    pub name: String,
    pub session_id: i64,
}

/// DTO for joining a live session.
#[derive(Debug, Deserialize, Validate)]
pub struct JoinRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}
