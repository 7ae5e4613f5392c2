//! Dot-separated event names published by the flashcard engine.

pub const JOURNEY_CREATED: &str = "flashcard.journey_created";
pub const JOURNEY_ACTIVE_CHANGED: &str = "flashcard.journey_active_changed";
pub const SESSION_STARTED: &str = "flashcard.session_started";
pub const SESSION_ENDED: &str = "flashcard.session_ended";
pub const ANSWER_SUBMITTED: &str = "flashcard.answer_submitted";
pub const GUIDED_ANSWER_VIEWED: &str = "flashcard.guided_answer_viewed";
pub const BANK_RESET: &str = "flashcard.bank_reset";
/// Emitted when a draw finds every question answered and clears the bank.
pub const BANK_AUTO_RESET: &str = "flashcard.bank_auto_reset";
pub const QUESTIONS_SEEDED: &str = "flashcard.questions_seeded";

/// Aggregate kinds used as `source_entity_type`.
pub const ENTITY_JOURNEY: &str = "flashcard_journey";
pub const ENTITY_SESSION: &str = "flashcard_session";
pub const ENTITY_QUESTION_BANK: &str = "question_bank";
