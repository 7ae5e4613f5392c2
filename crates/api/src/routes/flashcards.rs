//! Route definitions for flashcard practice, mounted at `/system-design`.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::flashcards;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/journeys", post(flashcards::create_journey))
        .route("/journeys/{journey_id}", patch(flashcards::update_journey))
        .route(
            "/journeys/{journey_id}/sessions",
            post(flashcards::start_session),
        )
        .route(
            "/journeys/{journey_id}/progress",
            get(flashcards::get_progress),
        )
        .route("/journeys/{journey_id}/reset", post(flashcards::reset_bank))
        .route(
            "/sessions/{session_id}/next-question",
            get(flashcards::next_question),
        )
        .route(
            "/sessions/{session_id}/submit-answer",
            post(flashcards::submit_answer),
        )
        .route(
            "/sessions/{session_id}/questions/{question_id}/guided-answer",
            get(flashcards::get_guided_answer),
        )
        .route(
            "/sessions/{session_id}/questions/{question_id}/response",
            get(flashcards::get_user_response),
        )
        .route("/sessions/{session_id}/end", post(flashcards::end_session))
        .route(
            "/sessions/{session_id}/details",
            get(flashcards::session_details),
        )
        .route(
            "/user/{user_id}/journeys",
            get(flashcards::list_user_journeys),
        )
        .route(
            "/user/{user_id}/sessions",
            get(flashcards::list_user_sessions),
        )
}
