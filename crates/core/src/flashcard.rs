//! Flashcard practice constants, validation and progress arithmetic.
//!
//! Shared by the DB layer (status strings written to rows), the engine
//! (selection and progress) and the API layer (request validation).

use rand::seq::IndexedRandom;
use serde::Serialize;

use crate::error::CoreError;

/// Category of the built-in system-design question bank.
pub const CATEGORY_SYSTEM_DESIGN: &str = "system-design";

/// Title given to a journey when the caller does not supply one.
pub const DEFAULT_JOURNEY_TITLE: &str = "System Design Practice";

/// Description given to a journey when the caller does not supply one.
pub const DEFAULT_JOURNEY_DESCRIPTION: &str = "Endless system design practice with guided answers";

/// Session is in progress and accepts draws and submissions.
pub const SESSION_STATUS_ACTIVE: &str = "active";

/// Session was explicitly ended. Terminal.
pub const SESSION_STATUS_COMPLETED: &str = "completed";

pub const DIFFICULTY_EASY: &str = "easy";
pub const DIFFICULTY_MEDIUM: &str = "medium";
pub const DIFFICULTY_HARD: &str = "hard";

/// All valid difficulty tags.
pub const VALID_DIFFICULTIES: &[&str] = &[DIFFICULTY_EASY, DIFFICULTY_MEDIUM, DIFFICULTY_HARD];

/// Upper bound on a submitted answer, in characters.
pub const MAX_ANSWER_CHARS: usize = 20_000;

/// Validate that a difficulty string is one of the accepted tags.
pub fn validate_difficulty(difficulty: &str) -> Result<(), String> {
    if VALID_DIFFICULTIES.contains(&difficulty) {
        Ok(())
    } else {
        Err(format!(
            "Invalid difficulty '{difficulty}'. Must be one of: {}",
            VALID_DIFFICULTIES.join(", ")
        ))
    }
}

/// Validate a submitted answer: non-blank and within [`MAX_ANSWER_CHARS`].
pub fn validate_answer(answer: &str) -> Result<(), CoreError> {
    if answer.trim().is_empty() {
        return Err(CoreError::Validation("answer must not be empty".into()));
    }
    if answer.chars().count() > MAX_ANSWER_CHARS {
        return Err(CoreError::Validation(format!(
            "answer must be at most {MAX_ANSWER_CHARS} characters"
        )));
    }
    Ok(())
}

/// Validate a journey category tag (non-blank, lowercase slug).
pub fn validate_category(category: &str) -> Result<(), CoreError> {
    let valid = !category.is_empty()
        && category
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if valid {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid category '{category}'. Use lowercase letters, digits and '-'"
        )))
    }
}

/// Pick one candidate uniformly at random. `None` only for an empty slice.
pub fn pick_random<T: Copy>(candidates: &[T]) -> Option<T> {
    candidates.choose(&mut rand::rng()).copied()
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Per-(user, journey) progress through the question bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub total: i64,
    pub answered: i64,
    pub unanswered: i64,
    /// Entries with `answer_count > 0`. Equal to `answered` under the
    /// current policy, where the count only moves together with the flag.
    pub attempted: i64,
}

impl Progress {
    /// Build progress from raw aggregate counts.
    ///
    /// `unanswered` is always derived, so `unanswered == total - answered`
    /// holds by construction. Counts are clamped into `0..=total`.
    pub fn from_counts(total: i64, answered: i64, attempted: i64) -> Self {
        let total = total.max(0);
        let answered = answered.clamp(0, total);
        let attempted = attempted.clamp(0, total);
        Self {
            total,
            answered,
            unanswered: total - answered,
            attempted,
        }
    }
}
