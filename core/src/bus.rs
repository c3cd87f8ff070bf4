//! Process-wide event bus for cross-component notification.
//!
//! Replaces ad-hoc broadcast topics with one typed channel: publishers
//! fire and forget, subscribers hold a receiver whose lifetime is tied to
//! their own (dropping the receiver unsubscribes, so no teardown hook is
//! needed).

use tokio::sync::broadcast;
use uuid::Uuid;

use crate::model::ProcessInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

/// One line for the status display. Only the most recent message is
/// shown; messages overwrite, they do not queue.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        StatusMessage {
            level: StatusLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        StatusMessage {
            level: StatusLevel::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    Status(StatusMessage),
    ProcessChanged(ProcessInfo),
    TriggersChanged { task_id: Uuid },
    TasksChanged,
}

#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<AppEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(256);
        EventBus { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.tx.subscribe()
    }

    /// Fire and forget; an event with no live subscriber is dropped.
    pub fn publish(&self, event: AppEvent) {
        let _ = self.tx.send(event);
    }

    pub fn info(&self, text: impl Into<String>) {
        self.publish(AppEvent::Status(StatusMessage::info(text)));
    }

    pub fn error(&self, text: impl Into<String>) {
        self.publish(AppEvent::Status(StatusMessage::error(text)));
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        bus.info("loaded");
        match rx.recv().await.unwrap() {
            AppEvent::Status(msg) => {
                assert_eq!(msg.level, StatusLevel::Info);
                assert_eq!(msg.text, "loaded");
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_silent() {
        let bus = EventBus::new();
        bus.error("nobody listening");
    }

    #[tokio::test]
    async fn dropped_receiver_unsubscribes() {
        let bus = EventBus::new();
        let rx = bus.subscribe();
        drop(rx);
        bus.publish(AppEvent::TasksChanged);
        let mut rx2 = bus.subscribe();
        bus.publish(AppEvent::TasksChanged);
        assert!(matches!(rx2.recv().await.unwrap(), AppEvent::TasksChanged));
    }
}
