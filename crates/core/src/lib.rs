//! `shopforge-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{FieldError, ProductErrorCode, ValidationErrors};
pub use id::{
    AttributeId, AttributeValueId, ChannelId, ProductId, ProductTypeId, ReferenceId, VariantId,
    WarehouseId,
};
pub use value_object::ValueObject;
