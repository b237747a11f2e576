//! Create/update mutation for product variants.
//!
//! The entry point is [`VariantMutation`], which wires a catalog store, an
//! event bus and a job queue together and runs the full pipeline: resolve
//! the target variant, clean and validate the input, persist everything in
//! one atomic batch, then publish a domain event and schedule follow-up
//! work. Validation failures are collected per field and reported together
//! rather than one at a time.

pub mod attributes;
pub mod cleaner;
pub mod error;
pub mod input;
pub mod stocks;
pub mod variant;

pub use attributes::AttributeContext;
pub use error::MutationError;
pub use input::{AttributeValueInput, PreorderSettingsInput, ProductVariantInput, StockInput};
pub use variant::{SaveTarget, VariantMutation};
