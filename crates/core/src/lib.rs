//! Shared domain types for the Level Up Journal flashcard service.
//!
//! - [`types`] -- id and timestamp aliases used by every crate.
//! - [`error`] -- the domain error taxonomy.
//! - [`flashcard`] -- constants, validation and progress arithmetic for
//!   the system-design flashcard loop.
//! - [`question_bank`] -- loading and validating question-bank seed files.

pub mod error;
pub mod flashcard;
pub mod question_bank;
pub mod types;
