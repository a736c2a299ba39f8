//! In-process bus for written events.
//!
//! Repositories publish after a successful write; subscribers (cache warmers,
//! search indexers, the log subscriber spawned by the binary) receive every
//! event published after they subscribed. A slow subscriber that falls more
//! than [`EVENT_BUS_CAPACITY`] events behind skips the oldest ones.

use emporium_core::events::{WrittenEvent, WrittenEventEnvelope};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Buffered events per subscriber.
pub const EVENT_BUS_CAPACITY: usize = 256;

/// Broadcast bus for [`WrittenEventEnvelope`]s. Cheap to clone.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<WrittenEventEnvelope>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_BUS_CAPACITY);
        Self { sender }
    }

    /// Publish an event. Having no subscribers is not an error.
    pub fn publish<E: WrittenEvent>(&self, event: &E) {
        let envelope = event.to_envelope();
        match self.sender.send(envelope) {
            Ok(receivers) => debug!(event = E::NAME, receivers, "Published written event"),
            Err(_) => debug!(event = E::NAME, "No subscribers for written event"),
        }
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<WrittenEventEnvelope> {
        self.sender.subscribe()
    }

    /// Spawn a task that logs every event until the bus is dropped.
    pub fn spawn_log_subscriber(&self) -> tokio::task::JoinHandle<()> {
        let mut receiver = self.subscribe();
        tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(event) => info!(
                        event = %event.name,
                        entity = %event.entity_name,
                        count = event.uuids.len(),
                        errors = event.errors.len(),
                        "Entity written"
                    ),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Event log subscriber lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use emporium_core::events::AreaCountryStateTranslationWrittenEvent;
    use uuid::Uuid;

    use super::*;

    #[tokio::test]
    async fn test_subscriber_receives_envelope() {
        let bus = EventBus::new();
        let mut receiver = bus.subscribe();

        let uuid = Uuid::from_u128(11);
        bus.publish(&AreaCountryStateTranslationWrittenEvent::new(vec![uuid]));

        let event = receiver.recv().await.unwrap();
        assert_eq!(event.name, "area_country_state_translation.written");
        assert_eq!(event.uuids, vec![uuid]);
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_silent() {
        let bus = EventBus::new();
        bus.publish(&AreaCountryStateTranslationWrittenEvent::default());
    }
}
