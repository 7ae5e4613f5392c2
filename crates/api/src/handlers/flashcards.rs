//! Handlers for system-design flashcard practice.
//!
//! Every endpoint requires a bearer token; the caller's user id scopes all
//! reads and writes.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use levelup_core::error::CoreError;
use levelup_core::types::DbId;
use serde::Deserialize;
use validator::Validate;

use crate::engine::NewJourney;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateJourneyRequest {
    #[validate(length(max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(length(max = 50))]
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateJourneyRequest {
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
pub struct SubmitAnswerRequest {
    pub question_id: DbId,
    pub answer: String,
}

#[derive(Debug, Deserialize)]
pub struct NextQuestionParams {
    pub journey_id: Option<DbId>,
}

fn validate_request<T: Validate>(input: &T) -> AppResult<()> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))
}

// ---------------------------------------------------------------------------
// Journeys
// ---------------------------------------------------------------------------

/// POST /api/v1/system-design/journeys
///
/// Create a practice journey. An empty body yields the default
/// system-design journey.
pub async fn create_journey(
    user: AuthUser,
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let input: CreateJourneyRequest = if body.iter().all(u8::is_ascii_whitespace) {
        CreateJourneyRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {e}")))?
    };
    validate_request(&input)?;

    let journey = state
        .flashcards
        .create_journey(
            user.user_id,
            NewJourney {
                title: input.title,
                description: input.description,
                category: input.category,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: journey })))
}

/// PATCH /api/v1/system-design/journeys/{journey_id}
pub async fn update_journey(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath(journey_id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateJourneyRequest>,
) -> AppResult<impl IntoResponse> {
    let journey = state
        .flashcards
        .set_journey_active(user.user_id, journey_id, input.is_active)
        .await?;

    Ok(Json(DataResponse { data: journey }))
}

/// GET /api/v1/system-design/journeys/{journey_id}/progress
pub async fn get_progress(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath(journey_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let progress = state
        .flashcards
        .get_progress(user.user_id, journey_id)
        .await?;

    Ok(Json(DataResponse { data: progress }))
}

/// POST /api/v1/system-design/journeys/{journey_id}/reset
///
/// Returns 204; responses are kept.
pub async fn reset_bank(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath(journey_id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    state.flashcards.reset_bank(user.user_id, journey_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

/// POST /api/v1/system-design/journeys/{journey_id}/sessions
pub async fn start_session(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath(journey_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let session = state
        .flashcards
        .start_session(user.user_id, journey_id)
        .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: session })))
}

/// GET /api/v1/system-design/sessions/{session_id}/next-question
///
/// Draw a random unanswered question. The guided answer is never part of
/// the payload. 404 only when the journey has no questions.
pub async fn next_question(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath(session_id): AppPath<DbId>,
    AppQuery(params): AppQuery<NextQuestionParams>,
) -> AppResult<impl IntoResponse> {
    let card = state
        .flashcards
        .next_question_in_session(user.user_id, session_id, params.journey_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Available question for session",
                id: session_id,
            })
        })?;

    Ok(Json(DataResponse { data: card }))
}

/// POST /api/v1/system-design/sessions/{session_id}/submit-answer
pub async fn submit_answer(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath(session_id): AppPath<DbId>,
    AppJson(input): AppJson<SubmitAnswerRequest>,
) -> AppResult<impl IntoResponse> {
    let response = state
        .flashcards
        .submit_answer(user.user_id, session_id, input.question_id, &input.answer)
        .await?;

    Ok(Json(DataResponse { data: response }))
}

/// GET /api/v1/system-design/sessions/{session_id}/questions/{question_id}/guided-answer
pub async fn get_guided_answer(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath((session_id, question_id)): AppPath<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let answer = state
        .flashcards
        .get_guided_answer(user.user_id, session_id, question_id)
        .await?;

    Ok(Json(DataResponse { data: answer }))
}

/// GET /api/v1/system-design/sessions/{session_id}/questions/{question_id}/response
///
/// `data` is `null` when nothing was submitted yet.
pub async fn get_user_response(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath((session_id, question_id)): AppPath<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let response = state
        .flashcards
        .get_user_response(user.user_id, session_id, question_id)
        .await?;

    Ok(Json(DataResponse { data: response }))
}

/// POST /api/v1/system-design/sessions/{session_id}/end
pub async fn end_session(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath(session_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let session = state
        .flashcards
        .end_session(user.user_id, session_id)
        .await?;

    Ok(Json(DataResponse { data: session }))
}

/// GET /api/v1/system-design/sessions/{session_id}/details
pub async fn session_details(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath(session_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let details = state
        .flashcards
        .session_details(user.user_id, session_id)
        .await?;

    Ok(Json(DataResponse { data: details }))
}

// ---------------------------------------------------------------------------
// Per-user listings
// ---------------------------------------------------------------------------

/// GET /api/v1/system-design/user/{user_id}/journeys
pub async fn list_user_journeys(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath(user_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    user.ensure_is(user_id)?;
    let journeys = state.flashcards.list_journeys(user_id).await?;

    Ok(Json(DataResponse { data: journeys }))
}

/// GET /api/v1/system-design/user/{user_id}/sessions
///
/// Active sessions only, newest first.
pub async fn list_user_sessions(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath(user_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    user.ensure_is(user_id)?;
    let sessions = state.flashcards.list_active_sessions(user_id).await?;

    Ok(Json(DataResponse { data: sessions }))
}
