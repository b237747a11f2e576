//! Variant mutation orchestrator.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use shopforge_catalog::{
    AttributeSelection, CatalogEvent, ChannelContext, PreorderSettings, Product, ProductType,
    ProductVariant, VariantCreated, VariantUpdated, generate_variant_name,
};
use shopforge_core::{FieldError, ProductId, ReferenceId, ValidationErrors, VariantId};
use shopforge_events::{Event, EventBus};
use shopforge_infra::{
    CatalogStore, Job, JobKind, JobQueue, PriceRecalculationPayload, StoreError, VariantWriteBatch,
};

use crate::attributes::{self, AttributeContext};
use crate::cleaner;
use crate::error::MutationError;
use crate::input::ProductVariantInput;
use crate::stocks;

/// What the mutation is about to save, resolved before validation starts.
#[derive(Debug, Clone)]
pub enum SaveTarget {
    /// The input carried no id: a fresh variant with a pre-allocated id.
    New { id: VariantId },
    /// The input named an existing variant; this is its stored row.
    Existing(ProductVariant),
}

impl SaveTarget {
    pub fn is_new(&self) -> bool {
        matches!(self, SaveTarget::New { .. })
    }

    /// The id the save will write to.
    pub fn id(&self) -> VariantId {
        match self {
            SaveTarget::New { id } => *id,
            SaveTarget::Existing(variant) => variant.id,
        }
    }

    /// The stored variant's id, for sibling queries that must exclude it.
    pub fn existing_id(&self) -> Option<VariantId> {
        match self {
            SaveTarget::New { .. } => None,
            SaveTarget::Existing(variant) => Some(variant.id),
        }
    }
}

/// Create/update mutation for product variants.
///
/// One instance handles both operations: an input without an id creates,
/// an input with an id updates. Collaborators come in through the
/// constructor so callers decide where writes go, who hears about saves
/// and where follow-up work queues up.
///
/// ## Pipeline
///
/// 1. **Resolve** - find the target variant (or allocate a fresh id) and
///    its parent product. An unresolvable target or product fails here.
/// 2. **Clean** - run every field cleaner plus attribute and warehouse
///    validation, collecting all field errors into one result. No side
///    effects happen while errors exist.
/// 3. **Persist** - assemble a [`VariantWriteBatch`] (row, stock rows,
///    attribute link updates, default-variant claim) and commit it
///    atomically. Uniqueness violations come back as field errors.
/// 4. **Follow up** - publish exactly one `catalog.variant.created` or
///    `catalog.variant.updated` event and schedule price recalculation
///    for the product's channels. Failures here are logged, never
///    surfaced; the save already committed.
pub struct VariantMutation<S, B, Q> {
    store: S,
    bus: B,
    jobs: Q,
    now: fn() -> DateTime<Utc>,
}

impl<S, B, Q> VariantMutation<S, B, Q>
where
    S: CatalogStore,
    B: EventBus<CatalogEvent>,
    Q: JobQueue,
{
    pub fn new(store: S, bus: B, jobs: Q) -> Self {
        Self::with_clock(store, bus, jobs, Utc::now)
    }

    /// Like [`new`](Self::new) with an injected clock, for deterministic
    /// timestamps in tests.
    pub fn with_clock(store: S, bus: B, jobs: Q, now: fn() -> DateTime<Utc>) -> Self {
        Self {
            store,
            bus,
            jobs,
            now,
        }
    }

    /// Run the mutation and return the saved variant, channel-agnostic.
    pub fn execute(
        &self,
        input: ProductVariantInput,
    ) -> Result<ChannelContext<ProductVariant>, MutationError> {
        let now = (self.now)();

        let target = self.resolve_target(&input)?;
        let product = self.resolve_product(&input, &target)?;
        let product_type = self
            .store
            .product_type(product.product_type_id)?
            .ok_or_else(|| StoreError::not_found("product type", product.product_type_id))?;

        // clean phase: collect every violation before touching anything
        let mut errors = ValidationErrors::new();
        cleaner::clean_weight(input.weight, &mut errors);
        cleaner::clean_quantity_limit(input.quantity_limit_per_checkout, &mut errors);

        let stock_inputs = input.stocks.as_deref().unwrap_or_default();
        cleaner::check_duplicate_stocks(stock_inputs, &mut errors);
        let requested = stocks::requested_warehouse_ids(stock_inputs);
        let resolved_warehouses = self.store.warehouses(&requested)?;
        stocks::check_warehouses_exist(stock_inputs, &resolved_warehouses, &mut errors);

        let ctx = self.attribute_context(&product, &product_type, &target, &input)?;
        let attribute_updates =
            match attributes::clean(input.attributes.as_deref(), target.is_new(), &ctx) {
                Ok(updates) => updates,
                Err(attribute_errors) => {
                    errors.extend(attribute_errors);
                    None
                }
            };

        cleaner::clean_preorder(input.preorder, now, &mut errors);
        cleaner::clean_metadata(input.metadata.as_deref(), "metadata", &mut errors);
        cleaner::clean_metadata(input.private_metadata.as_deref(), "private_metadata", &mut errors);

        errors.into_result().map_err(MutationError::Validation)?;
        debug!(variant_id = %target.id(), new = target.is_new(), "variant input cleaned");

        // build phase: apply the input onto the target row
        let is_new = target.is_new();
        let mut variant = match target {
            SaveTarget::New { id } => ProductVariant::new(id, product.id, now),
            SaveTarget::Existing(existing) => existing,
        };
        if let Some(sku) = input.sku.as_deref() {
            variant.sku = cleaner::clean_sku(sku);
        }
        if let Some(name) = input.name {
            variant.name = name;
        }
        if let Some(weight) = input.weight {
            variant.weight = Some(weight);
        }
        if let Some(limit) = input.quantity_limit_per_checkout {
            variant.quantity_limit_per_checkout = Some(limit);
        }
        if let Some(preorder) = input.preorder {
            variant.preorder = Some(PreorderSettings {
                global_threshold: preorder.global_threshold,
                end_date: preorder.end_date,
            });
        }
        if let Some(reference) = input.external_reference {
            variant.external_reference = Some(reference);
        }
        if let Some(items) = &input.metadata {
            variant.metadata.upsert(items);
        }
        if let Some(items) = &input.private_metadata {
            variant.private_metadata.upsert(items);
        }
        variant.updated_at = now;

        let settings = self.store.shop_settings()?;
        variant.track_inventory = match (input.track_inventory, settings.track_inventory_by_default)
        {
            (Some(explicit), _) => explicit,
            (None, Some(shop_default)) => shop_default,
            (None, None) => variant.track_inventory,
        };

        if variant.name.is_empty() {
            let mut resulting = ctx.current_selection.clone();
            if let Some(updates) = &attribute_updates {
                resulting.apply(updates);
            }
            variant.name = generate_variant_name(&ctx.attributes, &resulting, variant.sku.as_deref());
        }

        // persist phase
        let batch = VariantWriteBatch {
            variant,
            set_default_if_missing: true,
            stocks: stocks::build_stocks(stock_inputs),
            attribute_updates,
            committed_at: now,
        };
        let stored = self.store.commit_variant(batch).map_err(|error| match error {
            StoreError::UniqueViolation { field, value } => {
                MutationError::from(unique_violation_error(field, &value))
            }
            other => MutationError::Store(other),
        })?;
        info!(
            variant_id = %stored.id,
            product_id = %stored.product_id,
            created = is_new,
            "product variant saved"
        );

        // follow-up phase: best effort, the save already committed
        let event = if is_new {
            CatalogEvent::VariantCreated(VariantCreated {
                variant_id: stored.id,
                product_id: stored.product_id,
                occurred_at: now,
            })
        } else {
            CatalogEvent::VariantUpdated(VariantUpdated {
                variant_id: stored.id,
                product_id: stored.product_id,
                occurred_at: now,
            })
        };
        let event_type = event.event_type();
        if let Err(error) = self.bus.publish(event) {
            warn!(event_type, error = ?error, "failed to publish variant event");
        }

        self.schedule_price_recalculation(stored.product_id, now);

        Ok(ChannelContext::channel_agnostic(stored))
    }

    fn resolve_target(&self, input: &ProductVariantInput) -> Result<SaveTarget, MutationError> {
        match input.id {
            Some(id) => match self.store.variant(id)? {
                Some(variant) => Ok(SaveTarget::Existing(variant)),
                None => Err(FieldError::not_found(
                    "id",
                    format!("Could not resolve to a product variant: {id}."),
                )
                .into()),
            },
            None => Ok(SaveTarget::New {
                id: VariantId::new(),
            }),
        }
    }

    /// The parent product the save runs against. Creates take it from the
    /// input; updates keep the stored parent and refuse to move the variant.
    fn resolve_product(
        &self,
        input: &ProductVariantInput,
        target: &SaveTarget,
    ) -> Result<Product, MutationError> {
        match target {
            SaveTarget::New { .. } => {
                let Some(product_id) = input.product else {
                    return Err(
                        FieldError::invalid("product", "Product cannot be set empty.").into()
                    );
                };
                match self.store.product(product_id)? {
                    Some(product) => Ok(product),
                    None => Err(FieldError::not_found(
                        "product",
                        format!("Could not resolve to a product: {product_id}."),
                    )
                    .into()),
                }
            }
            SaveTarget::Existing(variant) => {
                if let Some(explicit) = input.product {
                    if explicit != variant.product_id {
                        return Err(FieldError::invalid(
                            "product",
                            "Product of an existing variant cannot be changed.",
                        )
                        .into());
                    }
                }
                // an existing variant without its product is a store fault
                self.store
                    .product(variant.product_id)?
                    .ok_or_else(|| StoreError::not_found("product", variant.product_id).into())
            }
        }
    }

    fn attribute_context(
        &self,
        product: &Product,
        product_type: &ProductType,
        target: &SaveTarget,
        input: &ProductVariantInput,
    ) -> Result<AttributeContext, MutationError> {
        let attributes = self.store.variant_attributes(product_type.id)?;
        let current_selection = match target {
            SaveTarget::Existing(variant) => self.store.attribute_selection(variant.id)?,
            SaveTarget::New { .. } => AttributeSelection::new(),
        };
        let used_selections = self
            .store
            .used_variant_attribute_values(product.id, target.existing_id())?;
        let reference_ids: Vec<ReferenceId> = input
            .attributes
            .iter()
            .flatten()
            .flat_map(|a| a.references.iter().copied())
            .collect();
        let known_references = if reference_ids.is_empty() {
            BTreeSet::new()
        } else {
            self.store.references(&reference_ids)?
        };
        Ok(AttributeContext {
            attributes,
            has_variants: product_type.has_variants,
            current_selection,
            used_selections,
            known_references,
        })
    }

    /// Queue a price recalculation job for the product's channels. Never
    /// fails the mutation; problems are logged and the save stands.
    fn schedule_price_recalculation(&self, product_id: ProductId, now: DateTime<Utc>) {
        let channel_ids = match self.store.channel_ids_for_product(product_id) {
            Ok(ids) => ids,
            Err(error) => {
                warn!(%product_id, %error, "skipping price recalculation: channel lookup failed");
                return;
            }
        };
        if channel_ids.is_empty() {
            return;
        }
        let payload = match serde_json::to_value(PriceRecalculationPayload { channel_ids }) {
            Ok(payload) => payload,
            Err(error) => {
                warn!(%product_id, %error, "skipping price recalculation: bad payload");
                return;
            }
        };
        match self
            .jobs
            .enqueue(Job::new(JobKind::PriceRecalculation, payload, now))
        {
            Ok(job_id) => debug!(%job_id, %product_id, "price recalculation scheduled"),
            Err(error) => warn!(%product_id, %error, "failed to schedule price recalculation"),
        }
    }
}

/// Translate a commit-time uniqueness violation back into the field error
/// the caller would have gotten from validation.
fn unique_violation_error(field: &'static str, value: &str) -> FieldError {
    let message = match field {
        "sku" => "Product variant with this SKU already exists.".to_string(),
        "external_reference" => {
            "Product variant with this external reference already exists.".to_string()
        }
        other => format!("Duplicate value for {other}: {value}."),
    };
    FieldError::unique(field, message)
}
