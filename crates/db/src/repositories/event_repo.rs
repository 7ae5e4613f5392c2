//! Repository for the `domain_events` audit table.

use levelup_core::types::{DbId, Timestamp};

use crate::models::event::DomainEvent;
use crate::DbPool;

const COLUMNS: &str =
    "id, event_type, event_data, aggregate_type, aggregate_id, actor_user_id, published_at";

/// Provides append and read access to persisted domain events.
pub struct EventRepo;

impl EventRepo {
    /// Append one event, returning its id.
    pub async fn insert(
        pool: &DbPool,
        event_type: &str,
        event_data: &serde_json::Value,
        aggregate_type: Option<&str>,
        aggregate_id: Option<DbId>,
        actor_user_id: Option<DbId>,
        published_at: Timestamp,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO domain_events
                 (event_type, event_data, aggregate_type, aggregate_id, actor_user_id, published_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING id",
        )
        .bind(event_type)
        .bind(event_data.to_string())
        .bind(aggregate_type)
        .bind(aggregate_id)
        .bind(actor_user_id)
        .bind(published_at)
        .fetch_one(pool)
        .await
    }

    /// List the events recorded for one aggregate, oldest first.
    pub async fn list_for_aggregate(
        pool: &DbPool,
        aggregate_type: &str,
        aggregate_id: DbId,
    ) -> Result<Vec<DomainEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM domain_events
             WHERE aggregate_type = ? AND aggregate_id = ?
             ORDER BY id"
        );
        sqlx::query_as::<_, DomainEvent>(&query)
            .bind(aggregate_type)
            .bind(aggregate_id)
            .fetch_all(pool)
            .await
    }
}
