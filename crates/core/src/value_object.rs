//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: two instances
/// with the same attributes are the same value. To "modify" one, build a new
/// one. `Weight { 500.0, G }` is a value object; a `ProductVariant` with an id
/// is an entity.
///
/// The bounds keep value objects cheap to copy, comparable, and debuggable:
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct Weight {
///     value: f64,
///     unit: WeightUnit,
/// }
///
/// impl ValueObject for Weight {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
