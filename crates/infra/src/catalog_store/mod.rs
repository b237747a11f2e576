//! Catalog persistence boundary.
//!
//! This module defines the read and commit surface the variant mutation needs
//! from a relational catalog store, without making storage assumptions. The
//! single write operation, [`CatalogStore::commit_variant`], applies a whole
//! [`VariantWriteBatch`] atomically; reads are the lookups the clean phase
//! performs before any write.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryCatalogStore;
pub use r#trait::{CatalogStore, StoreError, VariantWriteBatch};
