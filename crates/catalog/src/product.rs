use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopforge_core::{Entity, ProductId, ProductTypeId, VariantId};

/// Parent product row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub product_type_id: ProductTypeId,
    pub name: String,
    /// The variant shown by default; the first saved variant claims this slot.
    pub default_variant: Option<VariantId>,
    /// Set on every variant save so background indexing picks the product up.
    pub search_index_dirty: bool,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(
        product_type_id: ProductTypeId,
        name: impl Into<String>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ProductId::new(),
            product_type_id,
            name: name.into(),
            default_variant: None,
            search_index_dirty: false,
            updated_at,
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &ProductId {
        &self.id
    }
}
