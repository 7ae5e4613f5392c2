pub mod flashcards;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /system-design/journeys                                   create (POST)
/// /system-design/journeys/{id}                              toggle active (PATCH)
/// /system-design/journeys/{id}/sessions                     start session (POST)
/// /system-design/journeys/{id}/progress                     progress (GET)
/// /system-design/journeys/{id}/reset                        reset bank (POST)
/// /system-design/sessions/{id}/next-question                draw (GET)
/// /system-design/sessions/{id}/submit-answer                submit (POST)
/// /system-design/sessions/{id}/questions/{qid}/guided-answer
/// /system-design/sessions/{id}/questions/{qid}/response
/// /system-design/sessions/{id}/end                          end (POST)
/// /system-design/sessions/{id}/details                      details (GET)
/// /system-design/user/{user_id}/journeys                    list (GET)
/// /system-design/user/{user_id}/sessions                    list active (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/system-design", flashcards::router())
}
