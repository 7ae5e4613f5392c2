use std::sync::Arc;

use levelup_db::store::SqlxFlashcardStore;

use crate::config::ServerConfig;
use crate::engine::FlashcardEngine;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: levelup_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Flashcard engine over the SQLite store.
    pub flashcards: FlashcardEngine<SqlxFlashcardStore>,
    /// Centralized event bus for publishing domain events.
    pub event_bus: Arc<levelup_events::EventBus>,
}

impl AppState {
    /// Wire the engine and event bus around a pool.
    pub fn new(
        pool: levelup_db::DbPool,
        config: ServerConfig,
        event_bus: Arc<levelup_events::EventBus>,
    ) -> Self {
        let store = Arc::new(SqlxFlashcardStore::new(pool.clone()));
        Self {
            flashcards: FlashcardEngine::new(store, Arc::clone(&event_bus)),
            pool,
            config: Arc::new(config),
            event_bus,
        }
    }
}
