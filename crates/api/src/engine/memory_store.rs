//! In-memory [`FlashcardStore`] for engine unit tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use levelup_core::flashcard::{SESSION_STATUS_ACTIVE, SESSION_STATUS_COMPLETED};
use levelup_core::question_bank::QuestionSeed;
use levelup_core::types::{DbId, Timestamp};
use levelup_db::models::bank_state::{BankCounts, BankEntry};
use levelup_db::models::journey::{CreateFlashcardJourney, FlashcardJourney};
use levelup_db::models::question::{Question, QuestionCard};
use levelup_db::models::response::{FlashcardResponse, UpsertResponse};
use levelup_db::models::session::{FlashcardSession, SessionSummary};
use levelup_db::store::FlashcardStore;

#[derive(Default)]
struct Tables {
    next_id: DbId,
    questions: Vec<Question>,
    journeys: Vec<FlashcardJourney>,
    sessions: Vec<FlashcardSession>,
    bank: Vec<BankEntry>,
    responses: Vec<FlashcardResponse>,
}

impl Tables {
    fn id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    failing: AtomicBool,
}

impl MemoryStore {
    /// Make every subsequent call fail with a storage error.
    pub fn fail_all(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn response_count(&self) -> usize {
        self.tables.lock().unwrap().responses.len()
    }

    pub fn bank_entries(&self, user_id: DbId, journey_id: DbId) -> Vec<BankEntry> {
        self.tables
            .lock()
            .unwrap()
            .bank
            .iter()
            .filter(|e| e.user_id == user_id && e.flashcard_journey_id == journey_id)
            .cloned()
            .collect()
    }

    fn check(&self) -> Result<(), sqlx::Error> {
        if self.failing.load(Ordering::SeqCst) {
            Err(sqlx::Error::PoolTimedOut)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl FlashcardStore for MemoryStore {
    async fn upsert_questions(&self, seeds: &[QuestionSeed]) -> Result<u64, sqlx::Error> {
        self.check()?;
        let mut t = self.tables.lock().unwrap();
        let now = Utc::now();
        for seed in seeds {
            if let Some(q) = t
                .questions
                .iter_mut()
                .find(|q| q.question_key == seed.question_key)
            {
                q.title = seed.title.clone();
                q.prompt = seed.prompt.clone();
                q.guided_answer = seed.guided_answer.clone();
                q.category = seed.category.clone();
                q.difficulty = seed.difficulty.clone();
                q.updated_at = now;
                continue;
            }
            let id = t.id();
            t.questions.push(Question {
                id,
                question_key: seed.question_key.clone(),
                title: seed.title.clone(),
                prompt: seed.prompt.clone(),
                guided_answer: seed.guided_answer.clone(),
                category: seed.category.clone(),
                difficulty: seed.difficulty.clone(),
                created_at: now,
                updated_at: now,
            });
        }
        Ok(seeds.len() as u64)
    }

    async fn find_question(&self, id: DbId) -> Result<Option<Question>, sqlx::Error> {
        self.check()?;
        let t = self.tables.lock().unwrap();
        Ok(t.questions.iter().find(|q| q.id == id).cloned())
    }

    async fn find_question_card(&self, id: DbId) -> Result<Option<QuestionCard>, sqlx::Error> {
        Ok(self.find_question(id).await?.map(QuestionCard::from))
    }

    async fn count_questions(&self, category: &str) -> Result<i64, sqlx::Error> {
        self.check()?;
        let t = self.tables.lock().unwrap();
        Ok(t.questions.iter().filter(|q| q.category == category).count() as i64)
    }

    async fn create_journey(
        &self,
        input: &CreateFlashcardJourney,
    ) -> Result<FlashcardJourney, sqlx::Error> {
        self.check()?;
        let mut t = self.tables.lock().unwrap();
        let journey = FlashcardJourney {
            id: t.id(),
            title: input.title.clone(),
            description: input.description.clone(),
            question_category: input.question_category.clone(),
            is_active: true,
            created_by: input.created_by,
            created_at: Utc::now(),
        };
        t.journeys.push(journey.clone());
        Ok(journey)
    }

    async fn find_journey(&self, id: DbId) -> Result<Option<FlashcardJourney>, sqlx::Error> {
        self.check()?;
        let t = self.tables.lock().unwrap();
        Ok(t.journeys.iter().find(|j| j.id == id).cloned())
    }

    async fn list_journeys(&self, user_id: DbId) -> Result<Vec<FlashcardJourney>, sqlx::Error> {
        self.check()?;
        let t = self.tables.lock().unwrap();
        let mut journeys: Vec<_> = t
            .journeys
            .iter()
            .filter(|j| j.created_by == Some(user_id))
            .cloned()
            .collect();
        journeys.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(journeys)
    }

    async fn set_journey_active(&self, id: DbId, is_active: bool) -> Result<bool, sqlx::Error> {
        self.check()?;
        let mut t = self.tables.lock().unwrap();
        Ok(match t.journeys.iter_mut().find(|j| j.id == id) {
            Some(journey) => {
                journey.is_active = is_active;
                true
            }
            None => false,
        })
    }

    async fn create_session(
        &self,
        user_id: DbId,
        journey_id: DbId,
        started_at: Timestamp,
    ) -> Result<FlashcardSession, sqlx::Error> {
        self.check()?;
        let mut t = self.tables.lock().unwrap();
        let session = FlashcardSession {
            id: t.id(),
            user_id,
            flashcard_journey_id: journey_id,
            session_start: started_at,
            session_end: None,
            status: SESSION_STATUS_ACTIVE.to_string(),
        };
        t.sessions.push(session.clone());
        Ok(session)
    }

    async fn find_session(&self, id: DbId) -> Result<Option<FlashcardSession>, sqlx::Error> {
        self.check()?;
        let t = self.tables.lock().unwrap();
        Ok(t.sessions.iter().find(|s| s.id == id).cloned())
    }

    async fn complete_session(
        &self,
        id: DbId,
        ended_at: Timestamp,
    ) -> Result<Option<FlashcardSession>, sqlx::Error> {
        self.check()?;
        let mut t = self.tables.lock().unwrap();
        Ok(t
            .sessions
            .iter_mut()
            .find(|s| s.id == id && s.is_active())
            .map(|s| {
                s.status = SESSION_STATUS_COMPLETED.to_string();
                s.session_end = Some(ended_at);
                s.clone()
            }))
    }

    async fn list_active_sessions(
        &self,
        user_id: DbId,
    ) -> Result<Vec<SessionSummary>, sqlx::Error> {
        self.check()?;
        let t = self.tables.lock().unwrap();
        let mut sessions: Vec<_> = t
            .sessions
            .iter()
            .filter(|s| s.user_id == user_id && s.is_active())
            .filter_map(|s| {
                let journey = t.journeys.iter().find(|j| j.id == s.flashcard_journey_id)?;
                Some(SessionSummary {
                    id: s.id,
                    user_id: s.user_id,
                    flashcard_journey_id: s.flashcard_journey_id,
                    session_start: s.session_start,
                    session_end: s.session_end,
                    status: s.status.clone(),
                    journey_title: journey.title.clone(),
                })
            })
            .collect();
        sessions.sort_by(|a, b| {
            b.session_start
                .cmp(&a.session_start)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(sessions)
    }

    async fn ensure_bank_initialized(
        &self,
        user_id: DbId,
        journey_id: DbId,
        category: &str,
    ) -> Result<u64, sqlx::Error> {
        self.check()?;
        let mut t = self.tables.lock().unwrap();
        let missing: Vec<DbId> = t
            .questions
            .iter()
            .filter(|q| q.category == category)
            .map(|q| q.id)
            .filter(|qid| {
                !t.bank.iter().any(|e| {
                    e.user_id == user_id
                        && e.flashcard_journey_id == journey_id
                        && e.question_id == *qid
                })
            })
            .collect();
        for question_id in &missing {
            let id = t.id();
            t.bank.push(BankEntry {
                id,
                user_id,
                flashcard_journey_id: journey_id,
                question_id: *question_id,
                is_answered: false,
                answer_count: 0,
                first_answered_at: None,
                last_answered_at: None,
            });
        }
        Ok(missing.len() as u64)
    }

    async fn unanswered_question_ids(
        &self,
        user_id: DbId,
        journey_id: DbId,
        category: &str,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        self.check()?;
        let t = self.tables.lock().unwrap();
        Ok(t.questions
            .iter()
            .filter(|q| q.category == category)
            .filter(|q| {
                !t.bank.iter().any(|e| {
                    e.user_id == user_id
                        && e.flashcard_journey_id == journey_id
                        && e.question_id == q.id
                        && e.is_answered
                })
            })
            .map(|q| q.id)
            .collect())
    }

    async fn record_answer(
        &self,
        user_id: DbId,
        journey_id: DbId,
        question_id: DbId,
        answered_at: Timestamp,
    ) -> Result<BankEntry, sqlx::Error> {
        self.check()?;
        let mut t = self.tables.lock().unwrap();
        let pos = t.bank.iter().position(|e| {
            e.user_id == user_id
                && e.flashcard_journey_id == journey_id
                && e.question_id == question_id
        });
        let pos = match pos {
            Some(pos) => pos,
            None => {
                let id = t.id();
                t.bank.push(BankEntry {
                    id,
                    user_id,
                    flashcard_journey_id: journey_id,
                    question_id,
                    is_answered: false,
                    answer_count: 0,
                    first_answered_at: None,
                    last_answered_at: None,
                });
                t.bank.len() - 1
            }
        };
        let entry = &mut t.bank[pos];
        entry.is_answered = true;
        entry.answer_count += 1;
        entry.first_answered_at.get_or_insert(answered_at);
        entry.last_answered_at = Some(answered_at);
        Ok(entry.clone())
    }

    async fn reset_bank(&self, user_id: DbId, journey_id: DbId) -> Result<u64, sqlx::Error> {
        self.check()?;
        let mut t = self.tables.lock().unwrap();
        let mut touched = 0;
        for entry in t
            .bank
            .iter_mut()
            .filter(|e| e.user_id == user_id && e.flashcard_journey_id == journey_id)
        {
            entry.is_answered = false;
            entry.answer_count = 0;
            touched += 1;
        }
        Ok(touched)
    }

    async fn bank_counts(
        &self,
        user_id: DbId,
        journey_id: DbId,
    ) -> Result<BankCounts, sqlx::Error> {
        self.check()?;
        let entries = self.bank_entries(user_id, journey_id);
        Ok(BankCounts {
            total: entries.len() as i64,
            answered: entries.iter().filter(|e| e.is_answered).count() as i64,
            attempted: entries.iter().filter(|e| e.answer_count > 0).count() as i64,
        })
    }

    async fn upsert_response(
        &self,
        input: &UpsertResponse<'_>,
    ) -> Result<FlashcardResponse, sqlx::Error> {
        self.check()?;
        let mut t = self.tables.lock().unwrap();
        let now = Utc::now();
        if let Some(existing) = t.responses.iter_mut().find(|r| {
            r.session_id == input.session_id
                && r.question_id == input.question_id
                && r.user_id == input.user_id
        }) {
            existing.user_answer = input.user_answer.to_string();
            existing.answered_at = input.answered_at;
            existing.updated_at = now;
            return Ok(existing.clone());
        }
        let response = FlashcardResponse {
            id: t.id(),
            user_id: input.user_id,
            question_id: input.question_id,
            session_id: input.session_id,
            user_answer: input.user_answer.to_string(),
            answered_at: input.answered_at,
            viewed_guided_answer: false,
            viewed_at: None,
            created_at: now,
            updated_at: now,
        };
        t.responses.push(response.clone());
        Ok(response)
    }

    async fn find_response(
        &self,
        user_id: DbId,
        session_id: DbId,
        question_id: DbId,
    ) -> Result<Option<FlashcardResponse>, sqlx::Error> {
        self.check()?;
        let t = self.tables.lock().unwrap();
        Ok(t.responses
            .iter()
            .find(|r| {
                r.user_id == user_id && r.session_id == session_id && r.question_id == question_id
            })
            .cloned())
    }

    async fn mark_response_viewed(
        &self,
        user_id: DbId,
        session_id: DbId,
        question_id: DbId,
        viewed_at: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        self.check()?;
        let mut t = self.tables.lock().unwrap();
        Ok(match t.responses.iter_mut().find(|r| {
            r.user_id == user_id && r.session_id == session_id && r.question_id == question_id
        }) {
            Some(response) => {
                response.viewed_guided_answer = true;
                response.viewed_at.get_or_insert(viewed_at);
                true
            }
            None => false,
        })
    }
}
