//! Repository for the `flashcard_responses` table.

use levelup_core::types::{DbId, Timestamp};

use super::NOW_SQL;
use crate::models::response::{FlashcardResponse, UpsertResponse};
use crate::DbPool;

const COLUMNS: &str = "id, user_id, question_id, session_id, user_answer, answered_at, \
                       viewed_guided_answer, viewed_at, created_at, updated_at";

/// Provides CRUD operations for submitted answers.
pub struct ResponseRepo;

impl ResponseRepo {
    /// Insert a response, or overwrite the answer text and answered-at time
    /// of the existing one for (session, question, user).
    ///
    /// Uses `ON CONFLICT ... DO UPDATE` and returns the stored row, so the id
    /// is the real row id on both paths.
    pub async fn upsert(
        pool: &DbPool,
        input: &UpsertResponse<'_>,
    ) -> Result<FlashcardResponse, sqlx::Error> {
        let query = format!(
            "INSERT INTO flashcard_responses
                 (user_id, question_id, session_id, user_answer, answered_at)
             VALUES (?, ?, ?, ?, ?)
             ON CONFLICT (session_id, question_id, user_id) DO UPDATE SET
                 user_answer = excluded.user_answer,
                 answered_at = excluded.answered_at,
                 updated_at = {NOW_SQL}
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FlashcardResponse>(&query)
            .bind(input.user_id)
            .bind(input.question_id)
            .bind(input.session_id)
            .bind(input.user_answer)
            .bind(input.answered_at)
            .fetch_one(pool)
            .await
    }

    /// Find the response for (user, session, question).
    pub async fn find(
        pool: &DbPool,
        user_id: DbId,
        session_id: DbId,
        question_id: DbId,
    ) -> Result<Option<FlashcardResponse>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM flashcard_responses
             WHERE user_id = ? AND session_id = ? AND question_id = ?"
        );
        sqlx::query_as::<_, FlashcardResponse>(&query)
            .bind(user_id)
            .bind(session_id)
            .bind(question_id)
            .fetch_optional(pool)
            .await
    }

    /// Flag the guided answer as viewed. The first view time is kept.
    ///
    /// Returns `false` when no response exists yet; that is not an error.
    pub async fn mark_viewed(
        pool: &DbPool,
        user_id: DbId,
        session_id: DbId,
        question_id: DbId,
        viewed_at: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE flashcard_responses
             SET viewed_guided_answer = 1,
                 viewed_at = COALESCE(viewed_at, ?),
                 updated_at = {NOW_SQL}
             WHERE user_id = ? AND session_id = ? AND question_id = ?"
        );
        let result = sqlx::query(&query)
            .bind(viewed_at)
            .bind(user_id)
            .bind(session_id)
            .bind(question_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
