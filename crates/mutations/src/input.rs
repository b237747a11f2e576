//! Input payloads accepted by the variant mutation.
//!
//! Every field follows patch semantics: `None` leaves the stored value
//! untouched on update, `Some` sets it. On create the absent fields fall
//! back to the model defaults.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shopforge_catalog::{MetadataItem, Weight};
use shopforge_core::{AttributeId, ProductId, ReferenceId, VariantId, WarehouseId};

/// Raw input for creating or updating a product variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductVariantInput {
    /// Target variant. Present means update, absent means create.
    pub id: Option<VariantId>,
    /// Parent product. Required on create, immutable on update.
    pub product: Option<ProductId>,
    /// Attribute values to assign. On update only the listed attributes
    /// are touched.
    pub attributes: Option<Vec<AttributeValueInput>>,
    pub sku: Option<String>,
    pub name: Option<String>,
    pub track_inventory: Option<bool>,
    pub weight: Option<Weight>,
    pub preorder: Option<PreorderSettingsInput>,
    pub quantity_limit_per_checkout: Option<i32>,
    pub metadata: Option<Vec<MetadataItem>>,
    pub private_metadata: Option<Vec<MetadataItem>>,
    pub external_reference: Option<String>,
    /// Initial or additional stock rows, at most one per warehouse.
    pub stocks: Option<Vec<StockInput>>,
}

/// One attribute paired with the submitted value payload.
///
/// Which payload field applies depends on the attribute's input type:
/// `values` carries dropdown and multiselect choices (by name or slug),
/// the remaining fields carry exactly what their name says. Payload
/// fields for other input types are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeValueInput {
    pub id: AttributeId,
    #[serde(default)]
    pub values: Vec<String>,
    pub numeric: Option<String>,
    pub boolean: Option<bool>,
    pub date: Option<NaiveDate>,
    pub date_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub references: Vec<ReferenceId>,
    pub plain_text: Option<String>,
}

impl AttributeValueInput {
    /// An input for `id` with an empty payload.
    pub fn new(id: AttributeId) -> Self {
        Self {
            id,
            values: Vec::new(),
            numeric: None,
            boolean: None,
            date: None,
            date_time: None,
            references: Vec::new(),
            plain_text: None,
        }
    }

    pub fn with_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_numeric(mut self, numeric: impl Into<String>) -> Self {
        self.numeric = Some(numeric.into());
        self
    }

    pub fn with_boolean(mut self, boolean: bool) -> Self {
        self.boolean = Some(boolean);
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_date_time(mut self, date_time: DateTime<Utc>) -> Self {
        self.date_time = Some(date_time);
        self
    }

    pub fn with_references<I>(mut self, references: I) -> Self
    where
        I: IntoIterator<Item = ReferenceId>,
    {
        self.references = references.into_iter().collect();
        self
    }

    pub fn with_plain_text(mut self, plain_text: impl Into<String>) -> Self {
        self.plain_text = Some(plain_text.into());
        self
    }
}

/// Requested stock level in one warehouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockInput {
    pub warehouse: WarehouseId,
    pub quantity: i32,
}

impl StockInput {
    pub fn new(warehouse: WarehouseId, quantity: i32) -> Self {
        Self {
            warehouse,
            quantity,
        }
    }
}

/// Preorder settings to put on the variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreorderSettingsInput {
    pub global_threshold: Option<i32>,
    pub end_date: Option<DateTime<Utc>>,
}
