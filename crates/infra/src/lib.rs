//! Infrastructure layer: the catalog persistence seam and background jobs.
//!
//! Everything here is storage-shaped but storage-agnostic: traits describe
//! what the mutation layer needs from a transactional store and a job queue,
//! and in-memory implementations back tests and single-process deployments.

pub mod catalog_store;
pub mod jobs;

pub use catalog_store::{CatalogStore, InMemoryCatalogStore, StoreError, VariantWriteBatch};
pub use jobs::{
    InMemoryJobQueue, Job, JobId, JobKind, JobQueue, JobStatus, PriceRecalculationPayload,
    QueueError,
};
