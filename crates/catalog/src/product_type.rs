use serde::{Deserialize, Serialize};

use shopforge_core::{AttributeId, Entity, ProductTypeId};

/// Product type configuration governing what its variants may carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductType {
    pub id: ProductTypeId,
    pub name: String,
    /// `false` marks a simple type whose single variant takes no attributes.
    pub has_variants: bool,
    /// Variant attributes in display order; this order drives derived names.
    pub variant_attribute_ids: Vec<AttributeId>,
}

impl ProductType {
    pub fn new(name: impl Into<String>, has_variants: bool) -> Self {
        Self {
            id: ProductTypeId::new(),
            name: name.into(),
            has_variants,
            variant_attribute_ids: Vec::new(),
        }
    }

    pub fn with_variant_attributes(mut self, ids: Vec<AttributeId>) -> Self {
        self.variant_attribute_ids = ids;
        self
    }
}

impl Entity for ProductType {
    type Id = ProductTypeId;

    fn id(&self) -> &ProductTypeId {
        &self.id
    }
}
