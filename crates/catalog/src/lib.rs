//! Catalog domain model.
//!
//! Plain rows and value objects for products, variants, attributes, stock,
//! warehouses, and channels, plus the events emitted after a variant save and
//! the derived-name routine. Pure domain logic: no IO, no HTTP, no storage.

pub mod attribute;
pub mod channel;
pub mod events;
pub mod metadata;
pub mod product;
pub mod product_type;
pub mod settings;
pub mod stock;
pub mod variant;
pub mod weight;

pub use attribute::{Attribute, AttributeInputType, AttributeSelection, AttributeValue};
pub use channel::{Channel, ChannelContext};
pub use events::{CatalogEvent, VariantCreated, VariantUpdated};
pub use metadata::{Metadata, MetadataItem};
pub use product::Product;
pub use product_type::ProductType;
pub use settings::ShopSettings;
pub use stock::{Stock, Warehouse};
pub use variant::{PreorderSettings, ProductVariant, generate_variant_name};
pub use weight::{Weight, WeightUnit};
