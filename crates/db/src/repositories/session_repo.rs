//! Repository for the `flashcard_sessions` table.

use levelup_core::flashcard::{SESSION_STATUS_ACTIVE, SESSION_STATUS_COMPLETED};
use levelup_core::types::{DbId, Timestamp};

use crate::models::session::{FlashcardSession, SessionSummary};
use crate::DbPool;

const COLUMNS: &str = "id, user_id, flashcard_journey_id, session_start, session_end, status";

/// Provides CRUD operations for practice sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new active session, returning the created row.
    pub async fn create(
        pool: &DbPool,
        user_id: DbId,
        journey_id: DbId,
        started_at: Timestamp,
    ) -> Result<FlashcardSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO flashcard_sessions (user_id, flashcard_journey_id, session_start, status)
             VALUES (?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FlashcardSession>(&query)
            .bind(user_id)
            .bind(journey_id)
            .bind(started_at)
            .bind(SESSION_STATUS_ACTIVE)
            .fetch_one(pool)
            .await
    }

    /// Find a session by id.
    pub async fn find_by_id(
        pool: &DbPool,
        id: DbId,
    ) -> Result<Option<FlashcardSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM flashcard_sessions WHERE id = ?");
        sqlx::query_as::<_, FlashcardSession>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Move an active session to `completed`.
    ///
    /// Returns `None` when the session does not exist or is already
    /// completed; completed sessions are never touched again.
    pub async fn complete(
        pool: &DbPool,
        id: DbId,
        ended_at: Timestamp,
    ) -> Result<Option<FlashcardSession>, sqlx::Error> {
        let query = format!(
            "UPDATE flashcard_sessions
             SET session_end = ?, status = ?
             WHERE id = ? AND status = ?
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FlashcardSession>(&query)
            .bind(ended_at)
            .bind(SESSION_STATUS_COMPLETED)
            .bind(id)
            .bind(SESSION_STATUS_ACTIVE)
            .fetch_optional(pool)
            .await
    }

    /// List a user's active sessions with their journey title, newest first.
    pub async fn list_active_for_user(
        pool: &DbPool,
        user_id: DbId,
    ) -> Result<Vec<SessionSummary>, sqlx::Error> {
        sqlx::query_as::<_, SessionSummary>(
            "SELECT s.id, s.user_id, s.flashcard_journey_id, s.session_start,
                    s.session_end, s.status, j.title AS journey_title
             FROM flashcard_sessions s
             JOIN flashcard_journeys j ON s.flashcard_journey_id = j.id
             WHERE s.user_id = ? AND s.status = ?
             ORDER BY s.session_start DESC, s.id DESC",
        )
        .bind(user_id)
        .bind(SESSION_STATUS_ACTIVE)
        .fetch_all(pool)
        .await
    }
}
