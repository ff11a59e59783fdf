use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tracing::warn;

use crate::errors::BridgeError;
use crate::message::HostMessage;

/// Outbound side of a recorder host.
#[async_trait]
pub trait EventBus<E>: Send + Sync
where
    E: Clone + Send + Sync + 'static,
{
    async fn publish(&self, event: E) -> Result<(), BridgeError>;
    fn subscribe(&self) -> broadcast::Receiver<E>;
}

/// Broadcast-backed bus. Publishing with no live subscriber is an error, so
/// hosts subscribe their [`Outbox`] before announcing readiness.
pub struct InMemoryBus<E> {
    sender: broadcast::Sender<E>,
}

impl<E> InMemoryBus<E>
where
    E: Clone + Send + Sync + 'static,
{
    pub fn new(capacity: usize) -> Arc<Self> {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Arc::new(Self { sender })
    }
}

#[async_trait]
impl<E> EventBus<E> for InMemoryBus<E>
where
    E: Clone + Send + Sync + 'static,
{
    async fn publish(&self, event: E) -> Result<(), BridgeError> {
        self.sender
            .send(event)
            .map(|_| ())
            .map_err(|err| BridgeError::Publish(err.to_string()))
    }

    fn subscribe(&self) -> broadcast::Receiver<E> {
        self.sender.subscribe()
    }
}

/// The host's view of what a recorder published.
///
/// A slow reader that falls behind the bus capacity loses the oldest
/// messages; the loss is logged and reading carries on from the oldest one
/// still buffered.
pub struct Outbox {
    rx: broadcast::Receiver<HostMessage>,
    skipped: u64,
}

impl Outbox {
    pub fn subscribe(bus: &dyn EventBus<HostMessage>) -> Self {
        Self {
            rx: bus.subscribe(),
            skipped: 0,
        }
    }

    /// Messages lost to lag so far.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Wait for the next message. `None` once every publisher is gone.
    pub async fn recv(&mut self) -> Option<HostMessage> {
        loop {
            match self.rx.recv().await {
                Ok(message) => return Some(message),
                Err(RecvError::Lagged(count)) => self.note_lag(count),
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Next message if one is already buffered.
    pub fn try_next(&mut self) -> Option<HostMessage> {
        loop {
            match self.rx.try_recv() {
                Ok(message) => return Some(message),
                Err(TryRecvError::Lagged(count)) => self.note_lag(count),
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
            }
        }
    }

    /// Everything buffered right now, oldest first.
    pub fn drain(&mut self) -> Vec<HostMessage> {
        std::iter::from_fn(|| self.try_next()).collect()
    }

    fn note_lag(&mut self, count: u64) {
        self.skipped += count;
        warn!(skipped = count, "outbox lagged behind the bus; messages dropped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lagging_outbox_keeps_reading() {
        let bus = InMemoryBus::<HostMessage>::new(2);
        let mut outbox = Outbox::subscribe(&*bus);
        for _ in 0..3 {
            bus.publish(HostMessage::Start).await.unwrap();
        }
        bus.publish(HostMessage::Stop).await.unwrap();

        let kinds: Vec<_> = outbox.drain().iter().map(HostMessage::kind).collect();
        assert_eq!(kinds, vec!["recorder-start", "recorder-stop"]);
        assert_eq!(outbox.skipped(), 2);
    }

    #[tokio::test]
    async fn recv_ends_when_the_bus_is_gone() {
        let bus = InMemoryBus::<HostMessage>::new(4);
        let mut outbox = Outbox::subscribe(&*bus);
        bus.publish(HostMessage::ready()).await.unwrap();
        drop(bus);
        assert_eq!(outbox.recv().await, Some(HostMessage::ready()));
        assert_eq!(outbox.recv().await, None);
    }

    #[tokio::test]
    async fn publishing_without_a_reader_fails() {
        let bus = InMemoryBus::<HostMessage>::new(4);
        assert!(bus.publish(HostMessage::Stop).await.is_err());
    }
}
