//! Durable event persistence service.
//!
//! [`EventPersistence`] drains an [`EventBus`](crate::bus::EventBus)
//! subscription into the `domain_events` table until the bus is dropped.

use levelup_core::types::DbId;
use levelup_db::repositories::EventRepo;
use levelup_db::DbPool;
use tokio::sync::broadcast;

use crate::bus::PlatformEvent;

/// Background service that persists domain events to the database.
pub struct EventPersistence;

impl EventPersistence {
    /// Run the persistence loop. Exits when the channel closes.
    ///
    /// A failed insert is logged and skipped; it never stops the loop.
    pub async fn run(pool: DbPool, mut receiver: broadcast::Receiver<PlatformEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = Self::persist(&pool, &event).await {
                        tracing::error!(
                            error = %e,
                            event_type = %event.event_type,
                            "Failed to persist event"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(
                        skipped = n,
                        "Event persistence lagged, some events were not persisted"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, persistence shutting down");
                    break;
                }
            }
        }
    }

    /// Write a single event row.
    pub async fn persist(pool: &DbPool, event: &PlatformEvent) -> Result<DbId, sqlx::Error> {
        EventRepo::insert(
            pool,
            &event.event_type,
            &event.payload,
            event.aggregate_type.as_deref(),
            event.aggregate_id,
            event.actor_user_id,
            event.timestamp,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::bus::EventBus;

    #[tokio::test]
    async fn persists_published_events_until_bus_closes() {
        let pool = levelup_db::create_memory_pool().await.unwrap();
        let bus = EventBus::default();
        let handle = tokio::spawn(EventPersistence::run(pool.clone(), bus.subscribe()));

        bus.publish(
            PlatformEvent::new("flashcard.session_started")
                .with_aggregate("flashcard_session", 11)
                .with_actor(3),
        );
        bus.publish(
            PlatformEvent::new("flashcard.session_ended").with_aggregate("flashcard_session", 11),
        );
        drop(bus);

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("persistence should stop once the bus is dropped")
            .unwrap();

        let rows = EventRepo::list_for_aggregate(&pool, "flashcard_session", 11)
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].event_type, "flashcard.session_started");
        assert_eq!(rows[0].actor_user_id, Some(3));
        assert_eq!(rows[1].event_type, "flashcard.session_ended");
        assert_eq!(rows[1].event_data, "{}");
    }
}
