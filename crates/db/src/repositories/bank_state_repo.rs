//! Repository for the `question_bank_state` table.
//!
//! One row per (user, journey, question). Rows are created in bulk when a
//! session starts and are never deleted; resets only clear the flags.

use levelup_core::types::{DbId, Timestamp};

use super::NOW_SQL;
use crate::models::bank_state::{BankCounts, BankEntry};
use crate::DbPool;

const COLUMNS: &str = "id, user_id, flashcard_journey_id, question_id, is_answered, answer_count, \
                       first_answered_at, last_answered_at";

/// Provides the bank-state transitions used by the flashcard engine.
pub struct BankStateRepo;

impl BankStateRepo {
    /// Create an unanswered entry for every question of `category` that the
    /// (user, journey) pair does not track yet.
    ///
    /// A single `INSERT OR IGNORE ... SELECT`, so repeated or concurrent calls
    /// never duplicate rows or reset progress. Returns the number of new rows.
    pub async fn ensure_initialized(
        pool: &DbPool,
        user_id: DbId,
        journey_id: DbId,
        category: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO question_bank_state
                 (user_id, flashcard_journey_id, question_id, is_answered, answer_count)
             SELECT ?, ?, id, 0, 0 FROM system_design_questions WHERE category = ?",
        )
        .bind(user_id)
        .bind(journey_id)
        .bind(category)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Ids of the questions in `category` not marked answered for the pair.
    ///
    /// Questions without an entry count as unanswered.
    pub async fn unanswered_question_ids(
        pool: &DbPool,
        user_id: DbId,
        journey_id: DbId,
        category: &str,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT q.id FROM system_design_questions q
             WHERE q.category = ?
               AND NOT EXISTS (
                   SELECT 1 FROM question_bank_state s
                   WHERE s.user_id = ?
                     AND s.flashcard_journey_id = ?
                     AND s.question_id = q.id
                     AND s.is_answered = 1
               )
             ORDER BY q.id",
        )
        .bind(category)
        .bind(user_id)
        .bind(journey_id)
        .fetch_all(pool)
        .await
    }

    /// Mark a question answered: flag set, count incremented, first-answered
    /// kept if already set, last-answered refreshed.
    ///
    /// One upsert statement, so the increment cannot interleave with another
    /// writer's read. Inserts the entry if it was missing.
    pub async fn record_answer(
        pool: &DbPool,
        user_id: DbId,
        journey_id: DbId,
        question_id: DbId,
        answered_at: Timestamp,
    ) -> Result<BankEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO question_bank_state
                 (user_id, flashcard_journey_id, question_id, is_answered, answer_count,
                  first_answered_at, last_answered_at)
             VALUES (?, ?, ?, 1, 1, ?, ?)
             ON CONFLICT (user_id, flashcard_journey_id, question_id) DO UPDATE SET
                 is_answered = 1,
                 answer_count = answer_count + 1,
                 first_answered_at = COALESCE(first_answered_at, excluded.first_answered_at),
                 last_answered_at = excluded.last_answered_at,
                 updated_at = {NOW_SQL}
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BankEntry>(&query)
            .bind(user_id)
            .bind(journey_id)
            .bind(question_id)
            .bind(answered_at)
            .bind(answered_at)
            .fetch_one(pool)
            .await
    }

    /// Clear every entry of the pair back to unanswered with a zero count.
    ///
    /// Rows and timestamps are kept. Returns the number of rows touched.
    pub async fn reset(pool: &DbPool, user_id: DbId, journey_id: DbId) -> Result<u64, sqlx::Error> {
        let query = format!(
            "UPDATE question_bank_state
             SET is_answered = 0, answer_count = 0, updated_at = {NOW_SQL}
             WHERE user_id = ? AND flashcard_journey_id = ?"
        );
        let result = sqlx::query(&query)
            .bind(user_id)
            .bind(journey_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Aggregate counts for the pair.
    pub async fn counts(
        pool: &DbPool,
        user_id: DbId,
        journey_id: DbId,
    ) -> Result<BankCounts, sqlx::Error> {
        sqlx::query_as::<_, BankCounts>(
            "SELECT COUNT(*) AS total,
                    COALESCE(SUM(CASE WHEN is_answered = 1 THEN 1 ELSE 0 END), 0) AS answered,
                    COALESCE(SUM(CASE WHEN answer_count > 0 THEN 1 ELSE 0 END), 0) AS attempted
             FROM question_bank_state
             WHERE user_id = ? AND flashcard_journey_id = ?",
        )
        .bind(user_id)
        .bind(journey_id)
        .fetch_one(pool)
        .await
    }
}
