// src/handlers/quiz.rs

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
    models::{
        question::{CreateQuestionRequest, Question, QuestionView, join_list},
        quiz::{CreateQuizRequest, Quiz},
    },
};

/// Creates a new quiz shell. Questions are added separately.
pub async fn create_quiz(
    State(pool): State<PgPool>,
    Json(payload): Json<CreateQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let quiz_id: i64 = sqlx::query_scalar("INSERT INTO quizzes (title) VALUES ($1) RETURNING id")
        .bind(&payload.title)
        .fetch_one(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create quiz: {:?}", e);
            AppError::from(e)
        })?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "quiz_id": quiz_id, "message": "Quiz created." })),
    ))
}

/// Lists all quizzes.
pub async fn list_quizzes(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let quizzes = sqlx::query_as::<_, Quiz>("SELECT id, title FROM quizzes ORDER BY id")
        .fetch_all(&pool)
        .await?;

    Ok(Json(serde_json::json!({ "quizzes": quizzes })))
}

/// Adds a question to a quiz.
///
/// Option lists are stored delimiter-joined; the request validators reject
/// entries containing the delimiter and unknown question types.
pub async fn add_question(
    State(pool): State<PgPool>,
    Path(quiz_id): Path<i64>,
    Json(payload): Json<CreateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let quiz_exists = sqlx::query_scalar::<_, i64>("SELECT id FROM quizzes WHERE id = $1")
        .bind(quiz_id)
        .fetch_optional(&pool)
        .await?;
    if quiz_exists.is_none() {
        return Err(AppError::NotFound("Quiz not found".to_string()));
    }

    sqlx::query(
        r#"
        INSERT INTO questions (quiz_id, round, question_type, question, options, correct_options)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(quiz_id)
    .bind(&payload.round)
    .bind(&payload.question_type)
    .bind(&payload.question)
    .bind(join_list(&payload.options))
    .bind(join_list(&payload.correct_options))
    .execute(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to add question: {:?}", e);
        AppError::from(e)
    })?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "message": "Question added." })),
    ))
}

/// Returns a quiz with its questions, correct options withheld.
pub async fn get_quiz(
    State(pool): State<PgPool>,
    Path(quiz_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = sqlx::query_as::<_, Quiz>("SELECT id, title FROM quizzes WHERE id = $1")
        .bind(quiz_id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::NotFound("Quiz not found".to_string()))?;

    let questions = fetch_quiz_questions(&pool, quiz_id).await?;
    let questions: Vec<QuestionView> = questions.iter().map(Question::view).collect();

    Ok(Json(
        serde_json::json!({ "title": quiz.title, "questions": questions }),
    ))
}

/// Fetches a quiz's questions in presentation order (ascending id).
pub async fn fetch_quiz_questions(
    pool: &PgPool,
    quiz_id: i64,
) -> Result<Vec<Question>, AppError> {
    let questions = sqlx::query_as::<_, Question>(
        r#"
        SELECT id, quiz_id, round, question_type, question, options, correct_options
        FROM questions
        WHERE quiz_id = $1
        ORDER BY id
        "#,
    )
    .bind(quiz_id)
    .fetch_all(pool)
    .await?;

    Ok(questions)
}
