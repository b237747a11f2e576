use chrono::{DateTime, Utc};

/// A domain-agnostic event.
///
/// Events are facts: immutable once emitted, versioned so payloads can
/// evolve, and published only after the state they describe has been
/// committed.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier (e.g. "catalog.variant.created").
    fn event_type(&self) -> &'static str;

    /// Schema version for this event type.
    fn version(&self) -> u32;

    /// When the event occurred (business time).
    fn occurred_at(&self) -> DateTime<Utc>;
}
