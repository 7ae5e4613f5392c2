//! The endless flashcard loop.
//!
//! A user practices a journey through sessions. Each draw picks a random
//! question the user has not answered in the current cycle; when every
//! question is answered the bank is reset and the cycle starts over, so a
//! non-empty journey never runs out of cards.

use std::sync::Arc;

use chrono::Utc;
use levelup_core::error::CoreError;
use levelup_core::flashcard::{
    pick_random, validate_answer, validate_category, Progress, CATEGORY_SYSTEM_DESIGN,
    DEFAULT_JOURNEY_DESCRIPTION, DEFAULT_JOURNEY_TITLE,
};
use levelup_core::question_bank::QuestionSeed;
use levelup_core::types::DbId;
use levelup_db::models::journey::{CreateFlashcardJourney, FlashcardJourney};
use levelup_db::models::question::{GuidedAnswer, QuestionCard};
use levelup_db::models::response::{FlashcardResponse, UpsertResponse};
use levelup_db::models::session::{FlashcardSession, SessionSummary};
use levelup_db::store::FlashcardStore;
use levelup_events::{event_types, EventBus, PlatformEvent};
use serde::Serialize;
use serde_json::json;

use super::EngineResult;

/// Caller input for a new journey. Missing fields fall back to the
/// system-design defaults.
#[derive(Debug, Clone, Default)]
pub struct NewJourney {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

/// A session with its journey and the user's progress on that journey.
#[derive(Debug, Clone, Serialize)]
pub struct SessionDetails {
    #[serde(flatten)]
    pub session: FlashcardSession,
    pub journey_title: String,
    pub journey_description: Option<String>,
    pub question_category: String,
    pub progress: Progress,
}

pub struct FlashcardEngine<S> {
    store: Arc<S>,
    events: Arc<EventBus>,
}

impl<S> Clone for FlashcardEngine<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            events: Arc::clone(&self.events),
        }
    }
}

impl<S: FlashcardStore> FlashcardEngine<S> {
    pub fn new(store: Arc<S>, events: Arc<EventBus>) -> Self {
        Self { store, events }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // -----------------------------------------------------------------------
    // Question bank
    // -----------------------------------------------------------------------

    /// Validate and upsert a question bank. Returns the number of questions
    /// written.
    pub async fn seed_questions(&self, seeds: &[QuestionSeed]) -> EngineResult<u64> {
        for seed in seeds {
            seed.check()?;
        }
        let written = self.store.upsert_questions(seeds).await?;

        tracing::info!(count = written, "Question bank seeded");
        self.events.publish(
            PlatformEvent::new(event_types::QUESTIONS_SEEDED)
                .with_payload(json!({ "count": written })),
        );
        Ok(written)
    }

    // -----------------------------------------------------------------------
    // Journeys
    // -----------------------------------------------------------------------

    pub async fn create_journey(
        &self,
        user_id: DbId,
        input: NewJourney,
    ) -> EngineResult<FlashcardJourney> {
        let category = non_blank(input.category)
            .unwrap_or_else(|| CATEGORY_SYSTEM_DESIGN.to_string());
        validate_category(&category)?;

        let create = CreateFlashcardJourney {
            title: non_blank(input.title).unwrap_or_else(|| DEFAULT_JOURNEY_TITLE.to_string()),
            description: Some(
                non_blank(input.description)
                    .unwrap_or_else(|| DEFAULT_JOURNEY_DESCRIPTION.to_string()),
            ),
            question_category: category,
            created_by: Some(user_id),
        };
        let journey = self.store.create_journey(&create).await?;

        tracing::info!(user_id, journey_id = journey.id, "Flashcard journey created");
        self.events.publish(
            PlatformEvent::new(event_types::JOURNEY_CREATED)
                .with_aggregate(event_types::ENTITY_JOURNEY, journey.id)
                .with_actor(user_id)
                .with_payload(json!({ "question_category": journey.question_category })),
        );
        Ok(journey)
    }

    /// Activate or deactivate a journey. Only its creator may do this.
    pub async fn set_journey_active(
        &self,
        user_id: DbId,
        journey_id: DbId,
        is_active: bool,
    ) -> EngineResult<FlashcardJourney> {
        let mut journey = self.visible_journey(user_id, journey_id).await?;
        if journey.created_by != Some(user_id) {
            return Err(CoreError::Forbidden(
                "Only the creator of a journey can change its status".into(),
            )
            .into());
        }

        if !self.store.set_journey_active(journey_id, is_active).await? {
            return Err(not_found("FlashcardJourney", journey_id));
        }
        journey.is_active = is_active;

        tracing::info!(user_id, journey_id, is_active, "Flashcard journey status changed");
        self.events.publish(
            PlatformEvent::new(event_types::JOURNEY_ACTIVE_CHANGED)
                .with_aggregate(event_types::ENTITY_JOURNEY, journey_id)
                .with_actor(user_id)
                .with_payload(json!({ "is_active": is_active })),
        );
        Ok(journey)
    }

    pub async fn list_journeys(&self, user_id: DbId) -> EngineResult<Vec<FlashcardJourney>> {
        Ok(self.store.list_journeys(user_id).await?)
    }

    // -----------------------------------------------------------------------
    // Sessions
    // -----------------------------------------------------------------------

    /// Open a practice session and make sure the user's bank for the
    /// journey tracks every question of its category.
    pub async fn start_session(
        &self,
        user_id: DbId,
        journey_id: DbId,
    ) -> EngineResult<FlashcardSession> {
        let journey = self.visible_journey(user_id, journey_id).await?;
        if !journey.is_active {
            return Err(CoreError::Validation(format!(
                "Journey {journey_id} is not active"
            ))
            .into());
        }

        let session = self
            .store
            .create_session(user_id, journey_id, Utc::now())
            .await?;
        let added = self
            .store
            .ensure_bank_initialized(user_id, journey_id, &journey.question_category)
            .await?;

        tracing::info!(
            user_id,
            journey_id,
            session_id = session.id,
            new_entries = added,
            "Flashcard session started"
        );
        self.events.publish(
            PlatformEvent::new(event_types::SESSION_STARTED)
                .with_aggregate(event_types::ENTITY_SESSION, session.id)
                .with_actor(user_id)
                .with_payload(json!({ "journey_id": journey_id })),
        );
        Ok(session)
    }

    /// Close a session. Ending a completed session returns it unchanged.
    pub async fn end_session(
        &self,
        user_id: DbId,
        session_id: DbId,
    ) -> EngineResult<FlashcardSession> {
        let session = self.owned_session(user_id, session_id).await?;
        if !session.is_active() {
            return Ok(session);
        }

        let Some(ended) = self.store.complete_session(session_id, Utc::now()).await? else {
            // Completed concurrently; report the stored row.
            return self.owned_session(user_id, session_id).await;
        };

        tracing::info!(user_id, session_id, "Flashcard session ended");
        self.events.publish(
            PlatformEvent::new(event_types::SESSION_ENDED)
                .with_aggregate(event_types::ENTITY_SESSION, session_id)
                .with_actor(user_id)
                .with_payload(json!({ "journey_id": ended.flashcard_journey_id })),
        );
        Ok(ended)
    }

    /// Active sessions of the user, newest first.
    pub async fn list_active_sessions(&self, user_id: DbId) -> EngineResult<Vec<SessionSummary>> {
        Ok(self.store.list_active_sessions(user_id).await?)
    }

    pub async fn session_details(
        &self,
        user_id: DbId,
        session_id: DbId,
    ) -> EngineResult<SessionDetails> {
        let session = self.owned_session(user_id, session_id).await?;
        let journey = self
            .store
            .find_journey(session.flashcard_journey_id)
            .await?
            .ok_or_else(|| not_found("FlashcardJourney", session.flashcard_journey_id))?;
        let counts = self.store.bank_counts(user_id, journey.id).await?;

        Ok(SessionDetails {
            session,
            journey_title: journey.title,
            journey_description: journey.description,
            question_category: journey.question_category,
            progress: counts.into(),
        })
    }

    // -----------------------------------------------------------------------
    // Practice loop
    // -----------------------------------------------------------------------

    /// Draw a random unanswered question of the journey.
    ///
    /// When every question has been answered the bank is reset and the draw
    /// retried once. `None` only when the journey's category has no
    /// questions at all.
    pub async fn next_question(
        &self,
        user_id: DbId,
        journey_id: DbId,
    ) -> EngineResult<Option<QuestionCard>> {
        let journey = self.visible_journey(user_id, journey_id).await?;
        let category = journey.question_category.as_str();

        let mut candidates = self
            .store
            .unanswered_question_ids(user_id, journey_id, category)
            .await?;

        if candidates.is_empty() {
            if self.store.count_questions(category).await? == 0 {
                tracing::debug!(journey_id, category, "Question bank is empty");
                return Ok(None);
            }

            let cleared = self.store.reset_bank(user_id, journey_id).await?;
            tracing::info!(
                user_id,
                journey_id,
                entries = cleared,
                "All questions answered, question bank auto-reset"
            );
            self.events.publish(
                PlatformEvent::new(event_types::BANK_AUTO_RESET)
                    .with_aggregate(event_types::ENTITY_QUESTION_BANK, journey_id)
                    .with_actor(user_id)
                    .with_payload(json!({ "entries": cleared })),
            );

            candidates = self
                .store
                .unanswered_question_ids(user_id, journey_id, category)
                .await?;
        }

        match pick_random(&candidates) {
            Some(question_id) => Ok(self.store.find_question_card(question_id).await?),
            None => Ok(None),
        }
    }

    /// [`Self::next_question`] for the journey of an owned session.
    ///
    /// `journey_id`, when given, must match the session's journey.
    pub async fn next_question_in_session(
        &self,
        user_id: DbId,
        session_id: DbId,
        journey_id: Option<DbId>,
    ) -> EngineResult<Option<QuestionCard>> {
        let session = self.owned_session(user_id, session_id).await?;
        if let Some(requested) = journey_id {
            if requested != session.flashcard_journey_id {
                return Err(CoreError::Validation(format!(
                    "Session {session_id} does not belong to journey {requested}"
                ))
                .into());
            }
        }
        self.next_question(user_id, session.flashcard_journey_id).await
    }

    /// Store (or overwrite) the user's answer and mark the question answered.
    pub async fn submit_answer(
        &self,
        user_id: DbId,
        session_id: DbId,
        question_id: DbId,
        answer: &str,
    ) -> EngineResult<FlashcardResponse> {
        validate_answer(answer)?;
        let session = self.owned_session(user_id, session_id).await?;
        let journey_id = session.flashcard_journey_id;

        let journey = self
            .store
            .find_journey(journey_id)
            .await?
            .ok_or_else(|| not_found("FlashcardJourney", journey_id))?;
        let question = self
            .store
            .find_question(question_id)
            .await?
            .ok_or_else(|| not_found("Question", question_id))?;
        if question.category != journey.question_category {
            return Err(CoreError::Validation(format!(
                "Question {question_id} is not part of journey {journey_id}"
            ))
            .into());
        }

        let now = Utc::now();
        let response = self
            .store
            .upsert_response(&UpsertResponse {
                user_id,
                session_id,
                question_id,
                user_answer: answer,
                answered_at: now,
            })
            .await?;
        let entry = self
            .store
            .record_answer(user_id, journey_id, question_id, now)
            .await?;

        tracing::info!(
            user_id,
            session_id,
            question_id,
            answer_count = entry.answer_count,
            "Flashcard answer submitted"
        );
        self.events.publish(
            PlatformEvent::new(event_types::ANSWER_SUBMITTED)
                .with_aggregate(event_types::ENTITY_SESSION, session_id)
                .with_actor(user_id)
                .with_payload(json!({
                    "question_id": question_id,
                    "response_id": response.id,
                    "answer_count": entry.answer_count,
                })),
        );
        Ok(response)
    }

    /// Reveal the guided answer and flag the user's response as viewed.
    ///
    /// Revealing before submitting is allowed; there is then nothing to flag.
    pub async fn get_guided_answer(
        &self,
        user_id: DbId,
        session_id: DbId,
        question_id: DbId,
    ) -> EngineResult<GuidedAnswer> {
        self.owned_session(user_id, session_id).await?;
        let question = self
            .store
            .find_question(question_id)
            .await?
            .ok_or_else(|| not_found("Question", question_id))?;

        let flagged = self
            .store
            .mark_response_viewed(user_id, session_id, question_id, Utc::now())
            .await?;
        if flagged {
            self.events.publish(
                PlatformEvent::new(event_types::GUIDED_ANSWER_VIEWED)
                    .with_aggregate(event_types::ENTITY_SESSION, session_id)
                    .with_actor(user_id)
                    .with_payload(json!({ "question_id": question_id })),
            );
        } else {
            tracing::debug!(user_id, session_id, question_id, "Guided answer viewed before submit");
        }

        Ok(GuidedAnswer {
            question_id: question.id,
            title: question.title,
            guided_answer: question.guided_answer,
        })
    }

    pub async fn get_user_response(
        &self,
        user_id: DbId,
        session_id: DbId,
        question_id: DbId,
    ) -> EngineResult<Option<FlashcardResponse>> {
        self.owned_session(user_id, session_id).await?;
        Ok(self
            .store
            .find_response(user_id, session_id, question_id)
            .await?)
    }

    pub async fn get_progress(&self, user_id: DbId, journey_id: DbId) -> EngineResult<Progress> {
        let journey = self.visible_journey(user_id, journey_id).await?;
        // Questions seeded after the session started are picked up here.
        self.store
            .ensure_bank_initialized(user_id, journey_id, &journey.question_category)
            .await?;
        Ok(self.store.bank_counts(user_id, journey_id).await?.into())
    }

    /// Mark every question of the journey unanswered again. Responses are
    /// kept.
    pub async fn reset_bank(&self, user_id: DbId, journey_id: DbId) -> EngineResult<()> {
        self.visible_journey(user_id, journey_id).await?;
        let cleared = self.store.reset_bank(user_id, journey_id).await?;

        tracing::info!(user_id, journey_id, entries = cleared, "Question bank reset");
        self.events.publish(
            PlatformEvent::new(event_types::BANK_RESET)
                .with_aggregate(event_types::ENTITY_QUESTION_BANK, journey_id)
                .with_actor(user_id)
                .with_payload(json!({ "entries": cleared })),
        );
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    async fn visible_journey(
        &self,
        user_id: DbId,
        journey_id: DbId,
    ) -> EngineResult<FlashcardJourney> {
        match self.store.find_journey(journey_id).await? {
            Some(journey) if journey.is_visible_to(user_id) => Ok(journey),
            _ => Err(not_found("FlashcardJourney", journey_id)),
        }
    }

    /// Another user's session is reported as missing.
    async fn owned_session(
        &self,
        user_id: DbId,
        session_id: DbId,
    ) -> EngineResult<FlashcardSession> {
        match self.store.find_session(session_id).await? {
            Some(session) if session.user_id == user_id => Ok(session),
            _ => Err(not_found("FlashcardSession", session_id)),
        }
    }
}

fn not_found(entity: &'static str, id: DbId) -> super::EngineError {
    CoreError::NotFound { entity, id }.into()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
