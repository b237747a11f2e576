use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shopforge_catalog::{
    Attribute, AttributeSelection, Product, ProductType, ProductVariant, ShopSettings, Stock,
    Warehouse,
};
use shopforge_core::{
    ChannelId, ProductId, ProductTypeId, ReferenceId, VariantId, WarehouseId,
};

/// Everything one variant save writes, applied as a unit.
///
/// The orchestrator assembles the batch after the clean phase: the variant
/// row is fully populated (name already derived, metadata already merged),
/// so the store only has to apply it. `commit_variant` either lands the
/// whole batch or nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantWriteBatch {
    /// The row to upsert. Create and update both go through here.
    pub variant: ProductVariant,
    /// Claim the product's default-variant slot when it is empty.
    pub set_default_if_missing: bool,
    /// Stock rows to write, one per warehouse, already resolved.
    pub stocks: Vec<Stock>,
    /// Attribute links to apply per attribute key; `None` leaves the
    /// variant's existing links untouched.
    pub attribute_updates: Option<AttributeSelection>,
    /// Clock value stamped on the parent product's `updated_at`.
    pub committed_at: DateTime<Utc>,
}

/// Catalog store operation error.
///
/// Infrastructure failures only; input validation never reaches the store.
/// `UniqueViolation` is the one case the mutation layer translates back into
/// a field-scoped validation error (sku and external-reference uniqueness
/// are enforced at commit, where the store can see every row).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
    #[error("unique constraint violated on {field}: {value}")]
    UniqueViolation { field: &'static str, value: String },
    #[error("storage error: {0}")]
    Storage(String),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn unique_violation(field: &'static str, value: impl Into<String>) -> Self {
        Self::UniqueViolation {
            field,
            value: value.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }
}

/// Transactional catalog store boundary.
///
/// Reads cover the lookups the clean phase performs; the single write,
/// [`commit_variant`](CatalogStore::commit_variant), applies a
/// [`VariantWriteBatch`] atomically. A relational backend maps it to one
/// transaction; the in-memory store holds one write lock for the duration.
///
/// Lookup methods return `Ok(None)` (or the found subset) for absent rows;
/// `Err` is reserved for storage faults.
pub trait CatalogStore: Send + Sync {
    fn product(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    fn product_type(&self, id: ProductTypeId) -> Result<Option<ProductType>, StoreError>;

    fn variant(&self, id: VariantId) -> Result<Option<ProductVariant>, StoreError>;

    /// Variant attributes of a product type, in the type's display order.
    fn variant_attributes(
        &self,
        product_type_id: ProductTypeId,
    ) -> Result<Vec<Attribute>, StoreError>;

    /// Attribute selections of the product's existing variants, for
    /// duplicate-variant detection. `exclude` drops the variant being
    /// updated so it does not collide with itself.
    fn used_variant_attribute_values(
        &self,
        product_id: ProductId,
        exclude: Option<VariantId>,
    ) -> Result<Vec<AttributeSelection>, StoreError>;

    /// The subset of `ids` that resolve to warehouses. Callers diff the
    /// result against the request to report the missing ones.
    fn warehouses(&self, ids: &[WarehouseId]) -> Result<Vec<Warehouse>, StoreError>;

    /// The subset of `ids` that resolve to referencable entities.
    fn references(&self, ids: &[ReferenceId]) -> Result<BTreeSet<ReferenceId>, StoreError>;

    /// Channels the product is listed in; drives post-save price
    /// recalculation scheduling.
    fn channel_ids_for_product(&self, product_id: ProductId) -> Result<Vec<ChannelId>, StoreError>;

    fn stocks(&self, variant_id: VariantId) -> Result<Vec<Stock>, StoreError>;

    /// The variant's stored attribute links (empty selection when none).
    fn attribute_selection(&self, variant_id: VariantId)
    -> Result<AttributeSelection, StoreError>;

    fn shop_settings(&self) -> Result<ShopSettings, StoreError>;

    /// Apply the batch atomically and return the stored row.
    ///
    /// Uniqueness of `sku` and `external_reference` across variants is
    /// checked here, before any write lands; a violation leaves the store
    /// untouched.
    fn commit_variant(&self, batch: VariantWriteBatch) -> Result<ProductVariant, StoreError>;
}

impl<S> CatalogStore for Arc<S>
where
    S: CatalogStore + ?Sized,
{
    fn product(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        (**self).product(id)
    }

    fn product_type(&self, id: ProductTypeId) -> Result<Option<ProductType>, StoreError> {
        (**self).product_type(id)
    }

    fn variant(&self, id: VariantId) -> Result<Option<ProductVariant>, StoreError> {
        (**self).variant(id)
    }

    fn variant_attributes(
        &self,
        product_type_id: ProductTypeId,
    ) -> Result<Vec<Attribute>, StoreError> {
        (**self).variant_attributes(product_type_id)
    }

    fn used_variant_attribute_values(
        &self,
        product_id: ProductId,
        exclude: Option<VariantId>,
    ) -> Result<Vec<AttributeSelection>, StoreError> {
        (**self).used_variant_attribute_values(product_id, exclude)
    }

    fn warehouses(&self, ids: &[WarehouseId]) -> Result<Vec<Warehouse>, StoreError> {
        (**self).warehouses(ids)
    }

    fn references(&self, ids: &[ReferenceId]) -> Result<BTreeSet<ReferenceId>, StoreError> {
        (**self).references(ids)
    }

    fn channel_ids_for_product(&self, product_id: ProductId) -> Result<Vec<ChannelId>, StoreError> {
        (**self).channel_ids_for_product(product_id)
    }

    fn stocks(&self, variant_id: VariantId) -> Result<Vec<Stock>, StoreError> {
        (**self).stocks(variant_id)
    }

    fn attribute_selection(
        &self,
        variant_id: VariantId,
    ) -> Result<AttributeSelection, StoreError> {
        (**self).attribute_selection(variant_id)
    }

    fn shop_settings(&self) -> Result<ShopSettings, StoreError> {
        (**self).shop_settings()
    }

    fn commit_variant(&self, batch: VariantWriteBatch) -> Result<ProductVariant, StoreError> {
        (**self).commit_variant(batch)
    }
}
