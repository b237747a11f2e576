//! Domain event abstractions.
//!
//! Catalog mutations announce what happened (`variant created`, `variant
//! updated`) to whoever subscribed, such as a webhook dispatcher or a search
//! reindexer. The bus here is the seam those listeners hang off; the
//! listeners themselves live elsewhere.

pub mod bus;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use event::Event;
pub use in_memory_bus::InMemoryEventBus;
