//! Background job queue for post-save work.
//!
//! ## Design
//!
//! - Jobs are typed, carry a JSON payload, and are claimed FIFO
//! - Enqueueing is best-effort from the caller's point of view: a variant
//!   save that cannot schedule its follow-up work still stands
//! - Consumers live outside this workspace; the queue only hands jobs out
//!
//! ## Components
//!
//! - `Job`: payload plus status and timestamps
//! - `JobQueue`: persistence boundary (enqueue/claim/complete/fail)
//! - `InMemoryJobQueue`: single-process queue for tests/dev

pub mod queue;
pub mod types;

pub use queue::{InMemoryJobQueue, JobQueue, QueueError};
pub use types::{Job, JobId, JobKind, JobStatus, PriceRecalculationPayload};
