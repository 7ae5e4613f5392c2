//! System-design question models.

use levelup_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A full row from the `system_design_questions` table.
///
/// Carries the guided answer, so it is never returned by the draw endpoint.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Question {
    pub id: DbId,
    pub question_key: String,
    pub title: String,
    pub prompt: String,
    pub guided_answer: String,
    pub category: String,
    pub difficulty: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The caller-facing view of a question before it has been answered.
///
/// Has no guided-answer field at all, so it cannot leak through
/// serialization.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct QuestionCard {
    pub id: DbId,
    pub question_key: String,
    pub title: String,
    pub prompt: String,
    pub category: String,
    pub difficulty: String,
}

impl From<Question> for QuestionCard {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            question_key: q.question_key,
            title: q.title,
            prompt: q.prompt,
            category: q.category,
            difficulty: q.difficulty,
        }
    }
}

/// A revealed guided answer.
#[derive(Debug, Clone, Serialize)]
pub struct GuidedAnswer {
    pub question_id: DbId,
    pub title: String,
    pub guided_answer: String,
}
