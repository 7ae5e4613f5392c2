//! Per-user question bank state models.

use levelup_core::flashcard::Progress;
use levelup_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `question_bank_state` table: one per
/// (user, journey, question).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BankEntry {
    pub id: DbId,
    pub user_id: DbId,
    pub flashcard_journey_id: DbId,
    pub question_id: DbId,
    pub is_answered: bool,
    pub answer_count: i64,
    pub first_answered_at: Option<Timestamp>,
    pub last_answered_at: Option<Timestamp>,
}

/// Aggregate counts over a user's bank for one journey.
#[derive(Debug, Clone, Copy, Default, FromRow)]
pub struct BankCounts {
    pub total: i64,
    pub answered: i64,
    pub attempted: i64,
}

impl From<BankCounts> for Progress {
    fn from(c: BankCounts) -> Self {
        Progress::from_counts(c.total, c.answered, c.attempted)
    }
}
