//! Submitted flashcard answer models.

use levelup_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `flashcard_responses` table. Unique per
/// (session, question, user).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FlashcardResponse {
    pub id: DbId,
    pub user_id: DbId,
    pub question_id: DbId,
    pub session_id: DbId,
    pub user_answer: String,
    pub answered_at: Timestamp,
    pub viewed_guided_answer: bool,
    pub viewed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting or overwriting a response.
#[derive(Debug, Clone)]
pub struct UpsertResponse<'a> {
    pub user_id: DbId,
    pub session_id: DbId,
    pub question_id: DbId,
    pub user_answer: &'a str,
    pub answered_at: Timestamp,
}
