//! Repository for the `flashcard_journeys` table.

use levelup_core::types::DbId;

use crate::models::journey::{CreateFlashcardJourney, FlashcardJourney};
use crate::DbPool;

const COLUMNS: &str = "id, title, description, question_category, is_active, created_by, created_at";

/// Provides CRUD operations for flashcard journeys.
pub struct JourneyRepo;

impl JourneyRepo {
    /// Insert a new journey, returning the created row.
    pub async fn create(
        pool: &DbPool,
        input: &CreateFlashcardJourney,
    ) -> Result<FlashcardJourney, sqlx::Error> {
        let query = format!(
            "INSERT INTO flashcard_journeys (title, description, question_category, created_by)
             VALUES (?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FlashcardJourney>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.question_category)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a journey by id.
    pub async fn find_by_id(
        pool: &DbPool,
        id: DbId,
    ) -> Result<Option<FlashcardJourney>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM flashcard_journeys WHERE id = ?");
        sqlx::query_as::<_, FlashcardJourney>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List journeys created by a user, newest first.
    pub async fn list_for_user(
        pool: &DbPool,
        user_id: DbId,
    ) -> Result<Vec<FlashcardJourney>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM flashcard_journeys
             WHERE created_by = ?
             ORDER BY id DESC"
        );
        sqlx::query_as::<_, FlashcardJourney>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Toggle the soft `is_active` flag. Returns `true` if a row changed.
    pub async fn set_active(pool: &DbPool, id: DbId, is_active: bool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE flashcard_journeys SET is_active = ? WHERE id = ?")
            .bind(is_active)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
