//! In-memory [`CatalogStore`] for tests and single-process deployments.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use shopforge_catalog::{
    Attribute, AttributeSelection, Channel, Product, ProductType, ProductVariant, ShopSettings,
    Stock, Warehouse,
};
use shopforge_core::{
    AttributeId, ChannelId, ProductId, ProductTypeId, ReferenceId, VariantId, WarehouseId,
};

use super::r#trait::{CatalogStore, StoreError, VariantWriteBatch};

#[derive(Debug, Default)]
struct CatalogState {
    products: HashMap<ProductId, Product>,
    product_types: HashMap<ProductTypeId, ProductType>,
    attributes: HashMap<AttributeId, Attribute>,
    variants: HashMap<VariantId, ProductVariant>,
    selections: HashMap<VariantId, AttributeSelection>,
    stocks: HashMap<VariantId, BTreeMap<WarehouseId, i32>>,
    warehouses: HashMap<WarehouseId, Warehouse>,
    channels: HashMap<ChannelId, Channel>,
    product_channels: HashMap<ProductId, Vec<ChannelId>>,
    references: BTreeSet<ReferenceId>,
    settings: ShopSettings,
}

/// Catalog rows behind one `RwLock`.
///
/// The single lock is what makes [`CatalogStore::commit_variant`] atomic
/// here: the whole batch is validated and applied under one write guard, so
/// readers never observe a half-applied save and a failed batch leaves no
/// trace. Concurrent committers serialize; the last one wins.
///
/// Seeding goes through the `&mut self` `insert_*` helpers before the store
/// is shared.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    state: RwLock<CatalogState>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, CatalogState>, StoreError> {
        self.state
            .read()
            .map_err(|_| StoreError::storage("catalog store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, CatalogState>, StoreError> {
        self.state
            .write()
            .map_err(|_| StoreError::storage("catalog store lock poisoned"))
    }

    fn seed(&mut self) -> &mut CatalogState {
        self.state.get_mut().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn insert_product(&mut self, product: Product) {
        self.seed().products.insert(product.id, product);
    }

    pub fn insert_product_type(&mut self, product_type: ProductType) {
        self.seed()
            .product_types
            .insert(product_type.id, product_type);
    }

    pub fn insert_attribute(&mut self, attribute: Attribute) {
        self.seed().attributes.insert(attribute.id, attribute);
    }

    /// Seed an existing variant together with its attribute links.
    pub fn insert_variant(&mut self, variant: ProductVariant, selection: AttributeSelection) {
        let state = self.seed();
        state.selections.insert(variant.id, selection);
        state.variants.insert(variant.id, variant);
    }

    pub fn insert_warehouse(&mut self, warehouse: Warehouse) {
        self.seed().warehouses.insert(warehouse.id, warehouse);
    }

    pub fn insert_channel(&mut self, channel: Channel) {
        self.seed().channels.insert(channel.id, channel);
    }

    /// List a product in a channel (a channel listing row).
    pub fn insert_product_channel_listing(&mut self, product_id: ProductId, channel_id: ChannelId) {
        self.seed()
            .product_channels
            .entry(product_id)
            .or_default()
            .push(channel_id);
    }

    pub fn insert_reference(&mut self, reference: ReferenceId) {
        self.seed().references.insert(reference);
    }

    pub fn set_shop_settings(&mut self, settings: ShopSettings) {
        self.seed().settings = settings;
    }
}

impl CatalogStore for InMemoryCatalogStore {
    fn product(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        Ok(self.read()?.products.get(&id).cloned())
    }

    fn product_type(&self, id: ProductTypeId) -> Result<Option<ProductType>, StoreError> {
        Ok(self.read()?.product_types.get(&id).cloned())
    }

    fn variant(&self, id: VariantId) -> Result<Option<ProductVariant>, StoreError> {
        Ok(self.read()?.variants.get(&id).cloned())
    }

    fn variant_attributes(
        &self,
        product_type_id: ProductTypeId,
    ) -> Result<Vec<Attribute>, StoreError> {
        let state = self.read()?;
        let Some(product_type) = state.product_types.get(&product_type_id) else {
            return Ok(Vec::new());
        };
        // Inner-join semantics: ids without a configured attribute row drop out.
        Ok(product_type
            .variant_attribute_ids
            .iter()
            .filter_map(|id| state.attributes.get(id).cloned())
            .collect())
    }

    fn used_variant_attribute_values(
        &self,
        product_id: ProductId,
        exclude: Option<VariantId>,
    ) -> Result<Vec<AttributeSelection>, StoreError> {
        let state = self.read()?;
        let mut siblings: Vec<&ProductVariant> = state
            .variants
            .values()
            .filter(|v| v.product_id == product_id && Some(v.id) != exclude)
            .collect();
        siblings.sort_by_key(|v| v.id);
        Ok(siblings
            .into_iter()
            .filter_map(|v| state.selections.get(&v.id).cloned())
            .collect())
    }

    fn warehouses(&self, ids: &[WarehouseId]) -> Result<Vec<Warehouse>, StoreError> {
        let state = self.read()?;
        Ok(ids
            .iter()
            .filter_map(|id| state.warehouses.get(id).cloned())
            .collect())
    }

    fn references(&self, ids: &[ReferenceId]) -> Result<BTreeSet<ReferenceId>, StoreError> {
        let state = self.read()?;
        Ok(ids
            .iter()
            .filter(|id| state.references.contains(id))
            .copied()
            .collect())
    }

    fn channel_ids_for_product(&self, product_id: ProductId) -> Result<Vec<ChannelId>, StoreError> {
        let state = self.read()?;
        // Listing rows join against the channel rows; a listing whose
        // channel is gone drops out.
        Ok(state
            .product_channels
            .get(&product_id)
            .map(|ids| {
                ids.iter()
                    .filter(|id| state.channels.contains_key(id))
                    .copied()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn stocks(&self, variant_id: VariantId) -> Result<Vec<Stock>, StoreError> {
        let state = self.read()?;
        Ok(state
            .stocks
            .get(&variant_id)
            .map(|rows| {
                rows.iter()
                    .map(|(warehouse_id, quantity)| Stock::new(*warehouse_id, *quantity))
                    .collect()
            })
            .unwrap_or_default())
    }

    fn attribute_selection(
        &self,
        variant_id: VariantId,
    ) -> Result<AttributeSelection, StoreError> {
        Ok(self
            .read()?
            .selections
            .get(&variant_id)
            .cloned()
            .unwrap_or_default())
    }

    fn shop_settings(&self) -> Result<ShopSettings, StoreError> {
        Ok(self.read()?.settings)
    }

    fn commit_variant(&self, batch: VariantWriteBatch) -> Result<ProductVariant, StoreError> {
        let mut state = self.write()?;
        let variant_id = batch.variant.id;
        let product_id = batch.variant.product_id;

        // Validate everything before the first write so a failed batch
        // leaves no trace.
        if !state.products.contains_key(&product_id) {
            return Err(StoreError::not_found("product", product_id));
        }
        if let Some(sku) = &batch.variant.sku {
            let taken = state
                .variants
                .values()
                .any(|v| v.id != variant_id && v.sku.as_deref() == Some(sku.as_str()));
            if taken {
                return Err(StoreError::unique_violation("sku", sku.clone()));
            }
        }
        if let Some(reference) = &batch.variant.external_reference {
            let taken = state.variants.values().any(|v| {
                v.id != variant_id && v.external_reference.as_deref() == Some(reference.as_str())
            });
            if taken {
                return Err(StoreError::unique_violation(
                    "external_reference",
                    reference.clone(),
                ));
            }
        }

        if let Some(updates) = &batch.attribute_updates {
            state.selections.entry(variant_id).or_default().apply(updates);
        }
        for stock in &batch.stocks {
            state
                .stocks
                .entry(variant_id)
                .or_default()
                .insert(stock.warehouse_id, stock.quantity);
        }
        state.variants.insert(variant_id, batch.variant.clone());

        // Presence checked above.
        if let Some(product) = state.products.get_mut(&product_id) {
            if batch.set_default_if_missing && product.default_variant.is_none() {
                product.default_variant = Some(variant_id);
            }
            product.search_index_dirty = true;
            product.updated_at = batch.committed_at;
        }

        tracing::debug!(variant_id = %variant_id, product_id = %product_id, "variant batch committed");
        Ok(batch.variant)
    }
}
