//! Level Up event bus.
//!
//! - [`EventBus`] -- in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PlatformEvent`] -- the domain event envelope.
//! - [`EventPersistence`] -- background service that durably writes every
//!   event to the `domain_events` table.
//! - [`event_types`] -- names of the events the flashcard engine publishes.

pub mod bus;
pub mod event_types;
pub mod persistence;

pub use bus::{EventBus, PlatformEvent};
pub use persistence::EventPersistence;
