use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopforge_core::{ProductId, VariantId};
use shopforge_events::Event;

/// Event: a new variant row was committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantCreated {
    pub variant_id: VariantId,
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: an existing variant row was committed with changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantUpdated {
    pub variant_id: VariantId,
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Events published after a variant save commits. Exactly one per save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogEvent {
    VariantCreated(VariantCreated),
    VariantUpdated(VariantUpdated),
}

impl CatalogEvent {
    pub fn variant_id(&self) -> VariantId {
        match self {
            CatalogEvent::VariantCreated(e) => e.variant_id,
            CatalogEvent::VariantUpdated(e) => e.variant_id,
        }
    }

    pub fn product_id(&self) -> ProductId {
        match self {
            CatalogEvent::VariantCreated(e) => e.product_id,
            CatalogEvent::VariantUpdated(e) => e.product_id,
        }
    }
}

impl Event for CatalogEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CatalogEvent::VariantCreated(_) => "catalog.variant.created",
            CatalogEvent::VariantUpdated(_) => "catalog.variant.updated",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CatalogEvent::VariantCreated(e) => e.occurred_at,
            CatalogEvent::VariantUpdated(e) => e.occurred_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_distinguishes_create_from_update() {
        let occurred_at = Utc::now();
        let created = CatalogEvent::VariantCreated(VariantCreated {
            variant_id: VariantId::new(),
            product_id: ProductId::new(),
            occurred_at,
        });
        let updated = CatalogEvent::VariantUpdated(VariantUpdated {
            variant_id: VariantId::new(),
            product_id: ProductId::new(),
            occurred_at,
        });

        assert_eq!(created.event_type(), "catalog.variant.created");
        assert_eq!(updated.event_type(), "catalog.variant.updated");
        assert_eq!(created.version(), 1);
        assert_eq!(created.occurred_at(), occurred_at);
    }
}
