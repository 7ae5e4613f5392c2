//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async queries that
//! accept `&DbPool` as the first argument.

pub mod bank_state_repo;
pub mod event_repo;
pub mod journey_repo;
pub mod question_repo;
pub mod response_repo;
pub mod session_repo;

pub use bank_state_repo::BankStateRepo;
pub use event_repo::EventRepo;
pub use journey_repo::JourneyRepo;
pub use question_repo::QuestionRepo;
pub use response_repo::ResponseRepo;
pub use session_repo::SessionRepo;

/// SQLite expression producing the current UTC time in RFC 3339 form.
pub(crate) const NOW_SQL: &str = "strftime('%Y-%m-%dT%H:%M:%fZ', 'now')";
