// src/routes.rs

use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{live, quiz, results},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (quiz, live).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (Database Pool + Config).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let quiz_routes = Router::new()
        .route("/", post(quiz::create_quiz).get(quiz::list_quizzes))
        .route("/{quiz_id}", get(quiz::get_quiz))
        .route("/{quiz_id}/question", post(quiz::add_question))
        .route("/{quiz_id}/live/start", post(live::start_session));

    let live_routes = Router::new()
        .route("/{session_id}/join", post(live::join_session))
        .route("/{session_id}/next", post(live::advance_question))
        .route("/{session_id}/round_break", post(live::round_break))
        .route("/{session_id}/question", get(live::current_question))
        .route("/{session_id}/quiz", get(live::get_session_quiz))
        .route("/{session_id}/answer", post(live::submit_answer))
        .route("/dispute/{answer_id}", post(live::dispute_answer))
        .route(
            "/{session_id}/my_answers/{participant_id}",
            get(results::my_answers),
        )
        .route("/{session_id}/results", get(results::get_results));

    Router::new()
        .nest("/api/quiz", quiz_routes)
        .nest("/api/live", live_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
