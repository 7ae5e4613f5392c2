//! Storage seam for the flashcard engine.
//!
//! [`FlashcardStore`] lists the primitives the engine needs. Every method
//! is a single-statement (or single-transaction) operation, so the engine
//! never performs read-then-write pairs against one row.
//! [`SqlxFlashcardStore`] implements it over the repositories.

use async_trait::async_trait;
use levelup_core::question_bank::QuestionSeed;
use levelup_core::types::{DbId, Timestamp};

use crate::models::bank_state::{BankCounts, BankEntry};
use crate::models::journey::{CreateFlashcardJourney, FlashcardJourney};
use crate::models::question::{Question, QuestionCard};
use crate::models::response::{FlashcardResponse, UpsertResponse};
use crate::models::session::{FlashcardSession, SessionSummary};
use crate::repositories::{BankStateRepo, JourneyRepo, QuestionRepo, ResponseRepo, SessionRepo};
use crate::DbPool;

#[async_trait]
pub trait FlashcardStore: Send + Sync {
    // -- Question bank --

    async fn upsert_questions(&self, seeds: &[QuestionSeed]) -> Result<u64, sqlx::Error>;

    async fn find_question(&self, id: DbId) -> Result<Option<Question>, sqlx::Error>;

    async fn find_question_card(&self, id: DbId) -> Result<Option<QuestionCard>, sqlx::Error>;

    async fn count_questions(&self, category: &str) -> Result<i64, sqlx::Error>;

    // -- Journeys --

    async fn create_journey(
        &self,
        input: &CreateFlashcardJourney,
    ) -> Result<FlashcardJourney, sqlx::Error>;

    async fn find_journey(&self, id: DbId) -> Result<Option<FlashcardJourney>, sqlx::Error>;

    async fn list_journeys(&self, user_id: DbId) -> Result<Vec<FlashcardJourney>, sqlx::Error>;

    async fn set_journey_active(&self, id: DbId, is_active: bool) -> Result<bool, sqlx::Error>;

    // -- Sessions --

    async fn create_session(
        &self,
        user_id: DbId,
        journey_id: DbId,
        started_at: Timestamp,
    ) -> Result<FlashcardSession, sqlx::Error>;

    async fn find_session(&self, id: DbId) -> Result<Option<FlashcardSession>, sqlx::Error>;

    /// `None` when the session is missing or no longer active.
    async fn complete_session(
        &self,
        id: DbId,
        ended_at: Timestamp,
    ) -> Result<Option<FlashcardSession>, sqlx::Error>;

    async fn list_active_sessions(&self, user_id: DbId)
        -> Result<Vec<SessionSummary>, sqlx::Error>;

    // -- Bank state --

    /// Insert-if-absent an unanswered entry per question of `category`.
    async fn ensure_bank_initialized(
        &self,
        user_id: DbId,
        journey_id: DbId,
        category: &str,
    ) -> Result<u64, sqlx::Error>;

    async fn unanswered_question_ids(
        &self,
        user_id: DbId,
        journey_id: DbId,
        category: &str,
    ) -> Result<Vec<DbId>, sqlx::Error>;

    /// Atomic upsert: answered, count + 1, timestamps.
    async fn record_answer(
        &self,
        user_id: DbId,
        journey_id: DbId,
        question_id: DbId,
        answered_at: Timestamp,
    ) -> Result<BankEntry, sqlx::Error>;

    async fn reset_bank(&self, user_id: DbId, journey_id: DbId) -> Result<u64, sqlx::Error>;

    async fn bank_counts(&self, user_id: DbId, journey_id: DbId)
        -> Result<BankCounts, sqlx::Error>;

    // -- Responses --

    async fn upsert_response(
        &self,
        input: &UpsertResponse<'_>,
    ) -> Result<FlashcardResponse, sqlx::Error>;

    async fn find_response(
        &self,
        user_id: DbId,
        session_id: DbId,
        question_id: DbId,
    ) -> Result<Option<FlashcardResponse>, sqlx::Error>;

    /// `false` when there is no response to flag.
    async fn mark_response_viewed(
        &self,
        user_id: DbId,
        session_id: DbId,
        question_id: DbId,
        viewed_at: Timestamp,
    ) -> Result<bool, sqlx::Error>;
}

/// [`FlashcardStore`] backed by the SQLite pool.
#[derive(Clone)]
pub struct SqlxFlashcardStore {
    pool: DbPool,
}

impl SqlxFlashcardStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl FlashcardStore for SqlxFlashcardStore {
    async fn upsert_questions(&self, seeds: &[QuestionSeed]) -> Result<u64, sqlx::Error> {
        QuestionRepo::upsert_many(&self.pool, seeds).await
    }

    async fn find_question(&self, id: DbId) -> Result<Option<Question>, sqlx::Error> {
        QuestionRepo::find_by_id(&self.pool, id).await
    }

    async fn find_question_card(&self, id: DbId) -> Result<Option<QuestionCard>, sqlx::Error> {
        QuestionRepo::find_card_by_id(&self.pool, id).await
    }

    async fn count_questions(&self, category: &str) -> Result<i64, sqlx::Error> {
        QuestionRepo::count_by_category(&self.pool, category).await
    }

    async fn create_journey(
        &self,
        input: &CreateFlashcardJourney,
    ) -> Result<FlashcardJourney, sqlx::Error> {
        JourneyRepo::create(&self.pool, input).await
    }

    async fn find_journey(&self, id: DbId) -> Result<Option<FlashcardJourney>, sqlx::Error> {
        JourneyRepo::find_by_id(&self.pool, id).await
    }

    async fn list_journeys(&self, user_id: DbId) -> Result<Vec<FlashcardJourney>, sqlx::Error> {
        JourneyRepo::list_for_user(&self.pool, user_id).await
    }

    async fn set_journey_active(&self, id: DbId, is_active: bool) -> Result<bool, sqlx::Error> {
        JourneyRepo::set_active(&self.pool, id, is_active).await
    }

    async fn create_session(
        &self,
        user_id: DbId,
        journey_id: DbId,
        started_at: Timestamp,
    ) -> Result<FlashcardSession, sqlx::Error> {
        SessionRepo::create(&self.pool, user_id, journey_id, started_at).await
    }

    async fn find_session(&self, id: DbId) -> Result<Option<FlashcardSession>, sqlx::Error> {
        SessionRepo::find_by_id(&self.pool, id).await
    }

    async fn complete_session(
        &self,
        id: DbId,
        ended_at: Timestamp,
    ) -> Result<Option<FlashcardSession>, sqlx::Error> {
        SessionRepo::complete(&self.pool, id, ended_at).await
    }

    async fn list_active_sessions(
        &self,
        user_id: DbId,
    ) -> Result<Vec<SessionSummary>, sqlx::Error> {
        SessionRepo::list_active_for_user(&self.pool, user_id).await
    }

    async fn ensure_bank_initialized(
        &self,
        user_id: DbId,
        journey_id: DbId,
        category: &str,
    ) -> Result<u64, sqlx::Error> {
        BankStateRepo::ensure_initialized(&self.pool, user_id, journey_id, category).await
    }

    async fn unanswered_question_ids(
        &self,
        user_id: DbId,
        journey_id: DbId,
        category: &str,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        BankStateRepo::unanswered_question_ids(&self.pool, user_id, journey_id, category).await
    }

    async fn record_answer(
        &self,
        user_id: DbId,
        journey_id: DbId,
        question_id: DbId,
        answered_at: Timestamp,
    ) -> Result<BankEntry, sqlx::Error> {
        BankStateRepo::record_answer(&self.pool, user_id, journey_id, question_id, answered_at)
            .await
    }

    async fn reset_bank(&self, user_id: DbId, journey_id: DbId) -> Result<u64, sqlx::Error> {
        BankStateRepo::reset(&self.pool, user_id, journey_id).await
    }

    async fn bank_counts(
        &self,
        user_id: DbId,
        journey_id: DbId,
    ) -> Result<BankCounts, sqlx::Error> {
        BankStateRepo::counts(&self.pool, user_id, journey_id).await
    }

    async fn upsert_response(
        &self,
        input: &UpsertResponse<'_>,
    ) -> Result<FlashcardResponse, sqlx::Error> {
        ResponseRepo::upsert(&self.pool, input).await
    }

    async fn find_response(
        &self,
        user_id: DbId,
        session_id: DbId,
        question_id: DbId,
    ) -> Result<Option<FlashcardResponse>, sqlx::Error> {
        ResponseRepo::find(&self.pool, user_id, session_id, question_id).await
    }

    async fn mark_response_viewed(
        &self,
        user_id: DbId,
        session_id: DbId,
        question_id: DbId,
        viewed_at: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        ResponseRepo::mark_viewed(&self.pool, user_id, session_id, question_id, viewed_at).await
    }
}
