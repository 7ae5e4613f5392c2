//! Domain event audit rows.

use levelup_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `domain_events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DomainEvent {
    pub id: DbId,
    pub event_type: String,
    /// JSON payload stored as text.
    pub event_data: String,
    pub aggregate_type: Option<String>,
    pub aggregate_id: Option<DbId>,
    pub actor_user_id: Option<DbId>,
    pub published_at: Timestamp,
}
