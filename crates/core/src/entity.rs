//! Entity trait: identity that survives state changes.

/// Minimal interface for domain entities.
///
/// Two entities are the same thing when their ids match, whatever their other
/// fields say. A `ProductVariant` keeps its identity while its name, sku and
/// stock rows change underneath it.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
