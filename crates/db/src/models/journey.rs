//! Flashcard journey (practice deck) models and DTOs.

use levelup_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `flashcard_journeys` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FlashcardJourney {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub question_category: String,
    pub is_active: bool,
    /// `None` for shared decks visible to every user.
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
}

impl FlashcardJourney {
    /// Whether `user_id` may practice on this journey.
    pub fn is_visible_to(&self, user_id: DbId) -> bool {
        self.created_by.is_none_or(|owner| owner == user_id)
    }
}

/// DTO for creating a new journey.
#[derive(Debug, Clone)]
pub struct CreateFlashcardJourney {
    pub title: String,
    pub description: Option<String>,
    pub question_category: String,
    pub created_by: Option<DbId>,
}
