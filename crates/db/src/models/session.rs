//! Flashcard practice session models.

use levelup_core::flashcard::SESSION_STATUS_ACTIVE;
use levelup_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `flashcard_sessions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FlashcardSession {
    pub id: DbId,
    pub user_id: DbId,
    pub flashcard_journey_id: DbId,
    pub session_start: Timestamp,
    pub session_end: Option<Timestamp>,
    pub status: String,
}

impl FlashcardSession {
    pub fn is_active(&self) -> bool {
        self.status == SESSION_STATUS_ACTIVE
    }
}

/// A session joined with its journey title, for listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SessionSummary {
    pub id: DbId,
    pub user_id: DbId,
    pub flashcard_journey_id: DbId,
    pub session_start: Timestamp,
    pub session_end: Option<Timestamp>,
    pub status: String,
    pub journey_title: String,
}
