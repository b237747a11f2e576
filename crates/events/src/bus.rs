//! Event publishing/subscription abstraction (mechanics only).
//!
//! This is the seam the mutation layer uses instead of reaching for an
//! ambient plugin manager: listeners subscribe, the orchestrator gets the bus
//! handed to it and publishes. Keeping the contract small means the transport
//! can be swapped (in-memory channels for tests, a broker in production)
//! without touching mutation code.
//!
//! Delivery is **best-effort broadcast**: every live subscriber gets a copy
//! of every published message, there is no persistence and no replay. Events
//! are published only after the state they describe has been committed, so a
//! lost message never implies lost state.

use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Duration;

/// A subscription to an event stream.
///
/// Each subscription receives a copy of every message published after it was
/// created (broadcast semantics). Subscriptions are single-consumer: use one
/// per listener.
///
/// ```ignore
/// let subscription = bus.subscribe();
/// while let Ok(event) = subscription.recv_timeout(Duration::from_secs(1)) {
///     handle(event)?;
/// }
/// ```
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, std::sync::mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Drain everything currently buffered without blocking.
    pub fn drain(&self) -> Vec<M> {
        let mut out = Vec::new();
        while let Ok(m) = self.receiver.try_recv() {
            out.push(m);
        }
        out
    }
}

/// Domain-agnostic event bus (pub/sub abstraction).
///
/// `publish()` can fail (transport down, bus full). Callers that publish
/// after a committed write treat failures as best-effort: the write stands,
/// the failure is logged, and listeners catch up through other means.
///
/// Implementations must be safe to share across threads (`Send + Sync`);
/// multiple threads may publish concurrently.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
