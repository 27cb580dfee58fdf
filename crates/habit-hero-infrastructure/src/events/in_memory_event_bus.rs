use async_trait::async_trait;
use log::{debug, error};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use habit_hero_domain::events::{DynamicEventHandler, EventBus};
use habit_hero_domain::{DomainError, DomainEvent};

/// Dispatches events to subscribed handlers in-process, in subscription order
pub struct InMemoryEventBus {
    handlers: Arc<RwLock<HashMap<&'static str, Vec<Arc<dyn DynamicEventHandler>>>>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Subscribe a handler under its own event type
    pub async fn subscribe(&self, handler: Arc<dyn DynamicEventHandler>) {
        let event_type_name = handler.event_type_name();
        let mut handlers = self.handlers.write().await;
        handlers.entry(event_type_name).or_default().push(handler);

        debug!("[events] subscribed handler for {}", event_type_name);
    }

    pub async fn handler_count<E: DomainEvent>(&self) -> usize {
        let handlers = self.handlers.read().await;
        handlers
            .get(std::any::type_name::<E>())
            .map_or(0, |h| h.len())
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventBus for InMemoryEventBus {
    async fn publish(&self, event: Box<dyn DomainEvent>) -> Result<(), DomainError> {
        let event_type_name = event.event_type_name();
        let handlers = self.handlers.read().await;

        let Some(event_handlers) = handlers.get(event_type_name) else {
            debug!("[events] no handlers for {}", event_type_name);
            return Ok(());
        };

        for handler in event_handlers {
            // A failing handler does not stop the others
            if let Err(e) = handler.handle_dynamic(event.as_any()).await {
                error!("[events] handler failed for {}: {}", event_type_name, e);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use habit_hero_domain::events::progress_events::{LeveledUp, XpGained};
    use habit_hero_domain::events::{EventHandler, TypedEventHandlerWrapper};

    struct RecordingHandler {
        levels: Arc<RwLock<Vec<u32>>>,
    }

    #[async_trait]
    impl EventHandler<LeveledUp> for RecordingHandler {
        async fn handle(&self, event: &LeveledUp) -> Result<(), DomainError> {
            self.levels.write().await.push(event.new_level);
            Ok(())
        }
    }

    struct FailingHandler;

    #[async_trait]
    impl EventHandler<LeveledUp> for FailingHandler {
        async fn handle(&self, _event: &LeveledUp) -> Result<(), DomainError> {
            Err(DomainError::Infrastructure("boom".to_string()))
        }
    }

    fn leveled_up(new_level: u32) -> Box<LeveledUp> {
        Box::new(LeveledUp {
            previous_level: new_level - 1,
            new_level,
            levels_gained: 1,
            occurred_at: Utc::now(),
        })
    }

    #[tokio::test]
    async fn test_event_bus_publishes_to_handlers() {
        let bus = InMemoryEventBus::new();
        let levels = Arc::new(RwLock::new(Vec::new()));

        bus.subscribe(Arc::new(TypedEventHandlerWrapper::new(RecordingHandler {
            levels: levels.clone(),
        })))
        .await;
        assert_eq!(bus.handler_count::<LeveledUp>().await, 1);
        assert_eq!(bus.handler_count::<XpGained>().await, 0);

        bus.publish(leveled_up(2)).await.unwrap();
        bus.publish(leveled_up(3)).await.unwrap();

        assert_eq!(*levels.read().await, vec![2, 3]);
    }

    #[tokio::test]
    async fn test_failing_handler_does_not_block_others() {
        let bus = InMemoryEventBus::new();
        let levels = Arc::new(RwLock::new(Vec::new()));

        bus.subscribe(Arc::new(TypedEventHandlerWrapper::new(FailingHandler)))
            .await;
        bus.subscribe(Arc::new(TypedEventHandlerWrapper::new(RecordingHandler {
            levels: levels.clone(),
        })))
        .await;

        assert!(bus.publish(leveled_up(5)).await.is_ok());
        assert_eq!(*levels.read().await, vec![5]);
    }

    #[tokio::test]
    async fn test_publish_without_handlers_is_ok() {
        let bus = InMemoryEventBus::default();
        assert!(bus.publish(leveled_up(2)).await.is_ok());
    }
}
