use serde::{Deserialize, Serialize};

use shopforge_core::{Entity, WarehouseId};

/// Physical location stock is held at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: WarehouseId,
    pub name: String,
    pub slug: String,
}

impl Warehouse {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: WarehouseId::new(),
            name: name.into(),
            slug: slug.into(),
        }
    }
}

impl Entity for Warehouse {
    type Id = WarehouseId;

    fn id(&self) -> &WarehouseId {
        &self.id
    }
}

/// Quantity of one variant held at one warehouse.
///
/// Keyed per (variant, warehouse); a variant never carries two rows for the
/// same warehouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub warehouse_id: WarehouseId,
    pub quantity: i32,
}

impl Stock {
    pub fn new(warehouse_id: WarehouseId, quantity: i32) -> Self {
        Self {
            warehouse_id,
            quantity,
        }
    }
}
