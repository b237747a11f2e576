use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopforge_core::{Entity, ProductId, VariantId};

use crate::attribute::{Attribute, AttributeSelection};
use crate::metadata::Metadata;
use crate::weight::Weight;

/// Preorder configuration on a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreorderSettings {
    /// Upper bound on preordered units across all channels; `None` is unbounded.
    pub global_threshold: Option<i32>,
    /// When the preorder window closes; must lie in the future when submitted.
    pub end_date: Option<DateTime<Utc>>,
}

impl shopforge_core::ValueObject for PreorderSettings {}

/// Sellable variant row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: VariantId,
    pub product_id: ProductId,
    /// Unique when present; whitespace-only input is stored as `None`.
    pub sku: Option<String>,
    /// Empty string means "derive from selected attribute values on save".
    pub name: String,
    pub track_inventory: bool,
    pub weight: Option<Weight>,
    pub quantity_limit_per_checkout: Option<i32>,
    pub preorder: Option<PreorderSettings>,
    /// Unique when present; an id in an external system.
    pub external_reference: Option<String>,
    pub metadata: Metadata,
    pub private_metadata: Metadata,
    pub updated_at: DateTime<Utc>,
}

impl ProductVariant {
    /// Fresh row with model defaults; the save pipeline fills the rest in.
    pub fn new(id: VariantId, product_id: ProductId, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            product_id,
            sku: None,
            name: String::new(),
            track_inventory: true,
            weight: None,
            quantity_limit_per_checkout: None,
            preorder: None,
            external_reference: None,
            metadata: Metadata::new(),
            private_metadata: Metadata::new(),
            updated_at,
        }
    }
}

impl Entity for ProductVariant {
    type Id = VariantId;

    fn id(&self) -> &VariantId {
        &self.id
    }
}

/// Derive the display name for a variant from its selected attribute values.
///
/// Selected value names are joined with `" / "` following the product type's
/// attribute order (`attributes` must already be in that order); within one
/// attribute the canonical selection order is used. Slugs that do not resolve
/// to a choice (free-form input types store the raw value) appear verbatim.
/// An empty result falls back to the trimmed sku, else the empty string.
pub fn generate_variant_name(
    attributes: &[Attribute],
    selection: &AttributeSelection,
    sku: Option<&str>,
) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for attribute in attributes {
        if let Some(values) = selection.values(&attribute.id) {
            for value in values {
                match attribute.choice(value) {
                    Some(choice) => parts.push(&choice.name),
                    None => parts.push(value),
                }
            }
        }
    }

    if parts.is_empty() {
        sku.map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .unwrap_or_default()
    } else {
        parts.join(" / ")
    }
}
