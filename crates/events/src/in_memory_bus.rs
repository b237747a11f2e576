//! In-memory [`EventBus`] over std channels.
//!
//! Suitable for a single process: unit tests, the demo wiring, or any
//! deployment where all listeners live in the publishing process.

use std::sync::Mutex;
use std::sync::mpsc::{Sender, channel};

use crate::bus::{EventBus, Subscription};

/// Errors from the in-memory bus.
#[derive(Debug, thiserror::Error)]
pub enum InMemoryBusError {
    /// The subscriber registry lock was poisoned by a panicking thread.
    #[error("event bus lock poisoned")]
    Poisoned,
}

/// Broadcast bus holding one channel sender per subscriber.
///
/// `publish` clones the message to every live subscriber and prunes
/// subscribers whose receiving end has been dropped. Publishing with no
/// subscribers is a no-op, not an error.
#[derive(Debug, Default)]
pub struct InMemoryEventBus<M> {
    subscribers: Mutex<Vec<Sender<M>>>,
}

impl<M> InMemoryEventBus<M> {
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Number of currently registered subscribers (includes ones whose
    /// receiver may have been dropped since the last publish).
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().map(|s| s.len()).unwrap_or(0)
    }
}

impl<M> EventBus<M> for InMemoryEventBus<M>
where
    M: Clone + Send + Sync + 'static,
{
    type Error = InMemoryBusError;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        let mut subscribers = self
            .subscribers
            .lock()
            .map_err(|_| InMemoryBusError::Poisoned)?;
        // Deliver to live subscribers; drop the ones that have gone away.
        subscribers.retain(|tx| tx.send(message.clone()).is_ok());
        Ok(())
    }

    fn subscribe(&self) -> Subscription<M> {
        let (tx, rx) = channel();
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.push(tx);
        }
        Subscription::new(rx)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;

    #[test]
    fn publish_reaches_all_subscribers() {
        let bus: InMemoryEventBus<String> = InMemoryEventBus::new();
        let first = bus.subscribe();
        let second = bus.subscribe();

        bus.publish("variant-created".to_string()).unwrap();

        assert_eq!(first.recv().unwrap(), "variant-created");
        assert_eq!(second.recv().unwrap(), "variant-created");
    }

    #[test]
    fn publish_without_subscribers_is_noop() {
        let bus: InMemoryEventBus<u32> = InMemoryEventBus::new();
        bus.publish(7).unwrap();
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn dropped_subscriber_is_pruned_on_publish() {
        let bus: InMemoryEventBus<u32> = InMemoryEventBus::new();
        let keep = bus.subscribe();
        let dropped = bus.subscribe();
        drop(dropped);
        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(1).unwrap();

        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(keep.recv().unwrap(), 1);
    }

    #[test]
    fn messages_arrive_in_publish_order() {
        let bus: InMemoryEventBus<u32> = InMemoryEventBus::new();
        let sub = bus.subscribe();
        for n in 0..5 {
            bus.publish(n).unwrap();
        }
        assert_eq!(sub.drain(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn arc_bus_is_shareable_across_threads() {
        let bus = Arc::new(InMemoryEventBus::<u32>::new());
        let sub = bus.subscribe();

        let publisher = Arc::clone(&bus);
        let handle = std::thread::spawn(move || {
            publisher.publish(42).unwrap();
        });
        handle.join().unwrap();

        assert_eq!(sub.recv_timeout(Duration::from_secs(1)).unwrap(), 42);
    }

    #[test]
    fn try_recv_on_empty_subscription() {
        let bus: InMemoryEventBus<u32> = InMemoryEventBus::new();
        let sub = bus.subscribe();
        assert!(sub.try_recv().is_err());
    }
}
