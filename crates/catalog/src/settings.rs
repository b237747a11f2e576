use serde::{Deserialize, Serialize};

/// Shop-level configuration consulted during variant saves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopSettings {
    /// Default for `track_inventory` when the input leaves it unset.
    /// `None` falls through to the variant model default.
    pub track_inventory_by_default: Option<bool>,
}

impl ShopSettings {
    pub fn new(track_inventory_by_default: Option<bool>) -> Self {
        Self {
            track_inventory_by_default,
        }
    }
}
