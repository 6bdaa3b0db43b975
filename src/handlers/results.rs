// src/handlers/results.rs
//
// The bridge between persistence and the scoring engine: fetches the
// joined answer rows for a session, hands them to the engine, and serves
// the leaderboard and per-participant review endpoints.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::{
    error::AppError,
    models::{participant::Participant, question::split_list},
    scoring::{self, AnswerRecord, RosterEntry, ScoreRow, SessionScores},
};

/// Raw joined row as fetched; converted into the engine's record type by
/// splitting the stored delimiter-joined strings.
#[derive(sqlx::FromRow)]
struct SessionAnswerRow {
    answer_id: i64,
    participant_id: i64,
    participant_name: String,
    question_id: i64,
    question_type: String,
    options: String,
    correct_options: String,
    answer: String,
    submission_time: DateTime<Utc>,
    correct_override: bool,
}

impl SessionAnswerRow {
    fn into_record(self) -> AnswerRecord {
        AnswerRecord {
            answer_id: self.answer_id,
            participant_id: self.participant_id,
            participant_name: self.participant_name,
            question_id: self.question_id,
            question_type: self.question_type,
            options: split_list(&self.options),
            correct_options: split_list(&self.correct_options),
            answer: split_list(&self.answer),
            submission_time: self.submission_time,
            correct_override: self.correct_override,
        }
    }
}

/// Snapshot of every answer in a session joined with its question and
/// participant, in the shape the scoring engine consumes.
pub async fn fetch_session_records(
    pool: &PgPool,
    session_id: i64,
) -> Result<Vec<AnswerRecord>, AppError> {
    let rows = sqlx::query_as::<_, SessionAnswerRow>(
        r#"
        SELECT
            a.id AS answer_id,
            a.participant_id,
            p.name AS participant_name,
            a.question_id,
            q.question_type,
            q.options,
            q.correct_options,
            a.answer,
            a.submission_time,
            a.correct_override
        FROM answers a
        JOIN participants p ON a.participant_id = p.id
        JOIN questions q ON a.question_id = q.id
        WHERE p.session_id = $1
        "#,
    )
    .bind(session_id)
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch session answers: {:?}", e);
        AppError::from(e)
    })?;

    Ok(rows.into_iter().map(SessionAnswerRow::into_record).collect())
}

/// Returns the session leaderboard: one row per joined participant, ranked
/// by total score, recomputed from scratch on every call.
pub async fn get_results(
    State(pool): State<PgPool>,
    Path(session_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let records = fetch_session_records(&pool, session_id).await?;
    let scores = scoring::score_session(records);

    let roster = fetch_roster(&pool, session_id).await?;
    let board = scoring::player_scores(&scores, &roster);

    Ok(Json(serde_json::json!({ "results": board })))
}

/// One review line for a participant: their graded answer joined with
/// dispute/checked status and the question text.
#[derive(Debug, Serialize)]
struct AnswerReview {
    answer_id: i64,
    question_id: i64,
    question_text: String,
    answer: Vec<String>,
    points: f64,
    first_points: f64,
    score: f64,
    grading_error: Option<String>,
    disputed: bool,
    checked: bool,
}

#[derive(sqlx::FromRow)]
struct ReviewInfoRow {
    answer_id: i64,
    disputed: bool,
    checked: bool,
    answer: String,
    question_text: String,
}

/// Returns one participant's score sheet with review status, for the
/// answer-review screen. An unanswered session yields an empty list.
pub async fn my_answers(
    State(pool): State<PgPool>,
    Path((session_id, participant_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    let records = fetch_session_records(&pool, session_id).await?;
    let rows: Vec<ScoreRow> = match scoring::score_session(records) {
        SessionScores::NoData => Vec::new(),
        SessionScores::Rows(rows) => rows
            .into_iter()
            .filter(|row| row.participant_id == participant_id)
            .collect(),
    };

    if rows.is_empty() {
        return Ok(Json(serde_json::json!({ "answers": [] })));
    }

    let info = sqlx::query_as::<_, ReviewInfoRow>(
        r#"
        SELECT
            a.id AS answer_id,
            a.disputed,
            a.checked,
            a.answer,
            q.question AS question_text
        FROM answers a
        JOIN questions q ON a.question_id = q.id
        WHERE a.participant_id = $1
        "#,
    )
    .bind(participant_id)
    .fetch_all(&pool)
    .await?;

    let info: HashMap<i64, ReviewInfoRow> =
        info.into_iter().map(|row| (row.answer_id, row)).collect();

    let reviews: Vec<AnswerReview> = rows
        .into_iter()
        .filter_map(|row| {
            let detail = info.get(&row.answer_id)?;
            Some(AnswerReview {
                answer_id: row.answer_id,
                question_id: row.question_id,
                question_text: detail.question_text.clone(),
                answer: split_list(&detail.answer),
                points: row.points,
                first_points: row.first_points,
                score: row.score,
                grading_error: row.grading_error,
                disputed: detail.disputed,
                checked: detail.checked,
            })
        })
        .collect();

    Ok(Json(serde_json::json!({ "answers": reviews })))
}

async fn fetch_roster(pool: &PgPool, session_id: i64) -> Result<Vec<RosterEntry>, AppError> {
    let participants = sqlx::query_as::<_, Participant>(
        "SELECT id, name, session_id FROM participants WHERE session_id = $1 ORDER BY id",
    )
    .bind(session_id)
    .fetch_all(pool)
    .await?;

    Ok(participants
        .into_iter()
        .map(|p| RosterEntry {
            participant_id: p.id,
            name: p.name,
        })
        .collect())
}
