//! Repository for the `system_design_questions` table.

use levelup_core::question_bank::QuestionSeed;
use levelup_core::types::DbId;

use super::NOW_SQL;
use crate::models::question::{Question, QuestionCard};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, question_key, title, prompt, guided_answer, category, difficulty, \
                       created_at, updated_at";

/// Card columns: everything except the guided answer.
const CARD_COLUMNS: &str = "id, question_key, title, prompt, category, difficulty";

/// Provides queries over the question bank.
pub struct QuestionRepo;

impl QuestionRepo {
    /// Insert or update every seed by `question_key` in one transaction.
    ///
    /// Existing rows keep their id, so bank state and responses that
    /// reference them survive a reseed. Returns the number of seeds written.
    pub async fn upsert_many(pool: &DbPool, seeds: &[QuestionSeed]) -> Result<u64, sqlx::Error> {
        let query = format!(
            "INSERT INTO system_design_questions
                 (question_key, title, prompt, guided_answer, category, difficulty)
             VALUES (?, ?, ?, ?, ?, ?)
             ON CONFLICT (question_key) DO UPDATE SET
                 title = excluded.title,
                 prompt = excluded.prompt,
                 guided_answer = excluded.guided_answer,
                 category = excluded.category,
                 difficulty = excluded.difficulty,
                 updated_at = {NOW_SQL}"
        );

        let mut tx = pool.begin().await?;
        let mut written = 0;
        for seed in seeds {
            sqlx::query(&query)
                .bind(&seed.question_key)
                .bind(&seed.title)
                .bind(&seed.prompt)
                .bind(&seed.guided_answer)
                .bind(&seed.category)
                .bind(&seed.difficulty)
                .execute(&mut *tx)
                .await?;
            written += 1;
        }
        tx.commit().await?;

        Ok(written)
    }

    /// Find a full question (including the guided answer) by id.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Question>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM system_design_questions WHERE id = ?");
        sqlx::query_as::<_, Question>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a question card (no guided answer) by id.
    pub async fn find_card_by_id(
        pool: &DbPool,
        id: DbId,
    ) -> Result<Option<QuestionCard>, sqlx::Error> {
        let query = format!("SELECT {CARD_COLUMNS} FROM system_design_questions WHERE id = ?");
        sqlx::query_as::<_, QuestionCard>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Number of questions registered in a category.
    pub async fn count_by_category(pool: &DbPool, category: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM system_design_questions WHERE category = ?",
        )
        .bind(category)
        .fetch_one(pool)
        .await
    }
}
