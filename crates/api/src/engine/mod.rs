//! Flashcard orchestration.
//!
//! [`flashcards::FlashcardEngine`] owns the practice loop (draw, submit,
//! reveal, progress, reset) on top of a [`levelup_db::store::FlashcardStore`].

pub mod flashcards;

#[cfg(test)]
mod memory_store;

use levelup_core::error::CoreError;

/// Failure of an engine operation.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Domain rule violation (not found, validation, forbidden).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The storage collaborator failed.
    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;

pub use flashcards::{FlashcardEngine, NewJourney, SessionDetails};
