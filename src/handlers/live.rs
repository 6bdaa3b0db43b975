// src/handlers/live.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::PgPool;
use validator::Validate;

use crate::{
    error::AppError,
    handlers::quiz::fetch_quiz_questions,
    models::{
        answer::AnswerInput,
        participant::JoinRequest,
        question::{Question, QuestionView, join_list},
        quiz::Quiz,
        session::LiveSession,
    },
};

/// Opens a live session for a quiz.
pub async fn start_session(
    State(pool): State<PgPool>,
    Path(quiz_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let quiz_exists = sqlx::query_scalar::<_, i64>("SELECT id FROM quizzes WHERE id = $1")
        .bind(quiz_id)
        .fetch_optional(&pool)
        .await?;
    if quiz_exists.is_none() {
        return Err(AppError::NotFound("Quiz not found".to_string()));
    }

    let session_id: i64 =
        sqlx::query_scalar("INSERT INTO live_sessions (quiz_id) VALUES ($1) RETURNING id")
            .bind(quiz_id)
            .fetch_one(&pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to start live session: {:?}", e);
                AppError::from(e)
            })?;

    tracing::info!(session_id, quiz_id, "live session started");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "session_id": session_id })),
    ))
}

/// Joins a participant to an active live session.
pub async fn join_session(
    State(pool): State<PgPool>,
    Path(session_id): Path<i64>,
    Json(payload): Json<JoinRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    fetch_active_session(&pool, session_id).await?;

    let participant_id: i64 =
        sqlx::query_scalar("INSERT INTO participants (name, session_id) VALUES ($1, $2) RETURNING id")
            .bind(&payload.name)
            .bind(session_id)
            .fetch_one(&pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to join session: {:?}", e);
                AppError::from(e)
            })?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "participant_id": participant_id })),
    ))
}

/// Advances the session to the next question, ending it after the last
/// one. Any round break is cleared.
pub async fn advance_question(
    State(pool): State<PgPool>,
    Path(session_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let session = fetch_active_session(&pool, session_id).await?;

    let question_count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM questions WHERE quiz_id = $1",
    )
    .bind(session.quiz_id)
    .fetch_one(&pool)
    .await?;

    let (next_index, still_active) = if session.current_question_index + 1 >= question_count {
        (session.current_question_index, false)
    } else {
        (session.current_question_index + 1, true)
    };

    sqlx::query(
        r#"
        UPDATE live_sessions
        SET current_question_index = $1, is_active = $2, round_break = FALSE
        WHERE id = $3
        "#,
    )
    .bind(next_index)
    .bind(still_active)
    .bind(session_id)
    .execute(&pool)
    .await?;

    Ok(Json(serde_json::json!({
        "current_question_index": next_index,
        "active": still_active,
    })))
}

/// Pauses the session at a round boundary.
pub async fn round_break(
    State(pool): State<PgPool>,
    Path(session_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    fetch_active_session(&pool, session_id).await?;

    sqlx::query("UPDATE live_sessions SET round_break = TRUE WHERE id = $1")
        .bind(session_id)
        .execute(&pool)
        .await?;

    Ok(Json(serde_json::json!({ "msg": "paused" })))
}

/// Returns the session's current question (correct options withheld), or a
/// finished marker once the session has ended. Clients poll this.
pub async fn current_question(
    State(pool): State<PgPool>,
    Path(session_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let session = fetch_session(&pool, session_id).await?;

    if !session.is_active {
        return Ok(Json(serde_json::json!({ "message": "Quiz finished" })));
    }

    let question = fetch_current_question(&pool, &session).await?;
    let view = question.view();

    Ok(Json(serde_json::json!({
        "question_id": view.question_id,
        "question": view.question,
        "options": view.options,
        "question_type": view.question_type,
        "question_index": session.current_question_index,
        "on_round_break": session.round_break,
        "round": view.round,
    })))
}

/// Returns the full quiz view for a session (for the runner screen).
pub async fn get_session_quiz(
    State(pool): State<PgPool>,
    Path(session_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let session = fetch_session(&pool, session_id).await?;

    let quiz = sqlx::query_as::<_, Quiz>("SELECT id, title FROM quizzes WHERE id = $1")
        .bind(session.quiz_id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::NotFound("Quiz not found".to_string()))?;

    let questions = fetch_quiz_questions(&pool, session.quiz_id).await?;
    let questions: Vec<QuestionView> = questions.iter().map(Question::view).collect();

    Ok(Json(
        serde_json::json!({ "title": quiz.title, "questions": questions }),
    ))
}

/// Records a participant's answer to the session's current question.
///
/// The unique index on (participant_id, question_id) backs the
/// at-most-one-answer invariant; a second submission maps to 409.
pub async fn submit_answer(
    State(pool): State<PgPool>,
    Path(session_id): Path<i64>,
    Json(payload): Json<AnswerInput>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let session = fetch_active_session(&pool, session_id).await?;
    let question = fetch_current_question(&pool, &session).await?;

    sqlx::query(
        r#"
        INSERT INTO answers (participant_id, question_id, answer, submission_time)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(payload.participant_id)
    .bind(question.id)
    .bind(join_list(&payload.answer))
    .bind(chrono::Utc::now())
    .execute(&pool)
    .await
    .map_err(|e| {
        // Postgres error code for unique violation is 23505
        if e.to_string().contains("unique constraint") || e.to_string().contains("23505") {
            AppError::Conflict("Answer already submitted for this question".to_string())
        } else {
            tracing::error!("Failed to record answer: {:?}", e);
            AppError::from(e)
        }
    })?;

    Ok(Json(serde_json::json!({ "message": "Answer recorded" })))
}

/// Marks an answer disputed for later review.
pub async fn dispute_answer(
    State(pool): State<PgPool>,
    Path(answer_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("UPDATE answers SET disputed = TRUE WHERE id = $1")
        .bind(answer_id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Answer not found".to_string()));
    }

    Ok(Json(serde_json::json!({ "msg": "disputed" })))
}

async fn fetch_session(pool: &PgPool, session_id: i64) -> Result<LiveSession, AppError> {
    sqlx::query_as::<_, LiveSession>(
        r#"
        SELECT id, quiz_id, current_question_index, is_active, round_break
        FROM live_sessions
        WHERE id = $1
        "#,
    )
    .bind(session_id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound("Live session not found".to_string()))
}

async fn fetch_active_session(pool: &PgPool, session_id: i64) -> Result<LiveSession, AppError> {
    let session = fetch_session(pool, session_id).await?;
    if !session.is_active {
        return Err(AppError::BadRequest("Live session has ended".to_string()));
    }
    Ok(session)
}

/// The current question is the session's index into the quiz's questions
/// ordered by id.
async fn fetch_current_question(
    pool: &PgPool,
    session: &LiveSession,
) -> Result<Question, AppError> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, quiz_id, round, question_type, question, options, correct_options
        FROM questions
        WHERE quiz_id = $1
        ORDER BY id
        LIMIT 1 OFFSET $2
        "#,
    )
    .bind(session.quiz_id)
    .bind(session.current_question_index)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound("Current question not found".to_string()))
}
