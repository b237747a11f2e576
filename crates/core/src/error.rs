//! Catalog error model.
//!
//! Mutation failures are **field-scoped**: each carries the input field it
//! refers to, a machine-readable code, and a human-readable message. They are
//! also **aggregated**, meaning a mutation collects every violation it finds
//! and returns them together, never just the first one encountered.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::id::{AttributeId, WarehouseId};

/// Machine-readable error codes for catalog mutations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductErrorCode {
    /// Structurally wrong input value.
    Invalid,
    /// A mandatory value is missing.
    Required,
    /// Duplicate within a collection or against existing records.
    Unique,
    /// The attribute is not permitted for this product type.
    AttributeCannotBeAssigned,
    /// A referenced entity is absent.
    NotFound,
    /// The same logical item was submitted more than once.
    DuplicatedInputItem,
}

impl ProductErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductErrorCode::Invalid => "INVALID",
            ProductErrorCode::Required => "REQUIRED",
            ProductErrorCode::Unique => "UNIQUE",
            ProductErrorCode::AttributeCannotBeAssigned => "ATTRIBUTE_CANNOT_BE_ASSIGNED",
            ProductErrorCode::NotFound => "NOT_FOUND",
            ProductErrorCode::DuplicatedInputItem => "DUPLICATED_INPUT_ITEM",
        }
    }
}

impl core::fmt::Display for ProductErrorCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Machine-readable ids attached to a field error (the entities it refers to).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorParams {
    pub attributes: Vec<AttributeId>,
    pub warehouses: Vec<WarehouseId>,
}

impl ErrorParams {
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.warehouses.is_empty()
    }
}

/// A single field-scoped validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{field}: {message} [{code}]")]
pub struct FieldError {
    /// Input field the failure is scoped to (e.g. `"stocks"`, `"attributes"`).
    pub field: String,
    pub code: ProductErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "ErrorParams::is_empty")]
    pub params: ErrorParams,
}

impl FieldError {
    pub fn new(
        field: impl Into<String>,
        code: ProductErrorCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            code,
            message: message.into(),
            params: ErrorParams::default(),
        }
    }

    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, ProductErrorCode::Invalid, message)
    }

    pub fn required(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, ProductErrorCode::Required, message)
    }

    pub fn unique(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, ProductErrorCode::Unique, message)
    }

    pub fn not_found(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, ProductErrorCode::NotFound, message)
    }

    /// Attach the offending attribute ids.
    pub fn with_attributes(mut self, ids: impl IntoIterator<Item = AttributeId>) -> Self {
        self.params.attributes = ids.into_iter().collect();
        self
    }

    /// Attach the offending warehouse ids.
    pub fn with_warehouses(mut self, ids: impl IntoIterator<Item = WarehouseId>) -> Self {
        self.params.warehouses = ids.into_iter().collect();
        self
    }
}

/// Ordered collection of field-scoped failures.
///
/// Insertion order is preserved so callers see violations in the order the
/// mutation checked them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    pub fn extend(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn into_vec(self) -> Vec<FieldError> {
        self.errors
    }

    /// Iterate the failures scoped to one field.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldError> {
        self.errors.iter().filter(move |e| e.field == field)
    }

    /// `Ok(())` when nothing was collected, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl core::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "validation failed")?;
        for (i, e) in self.errors.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// An identifier failed to parse (not a valid UUID).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid identifier: {0}")]
pub struct IdParseError(String);

impl IdParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}
