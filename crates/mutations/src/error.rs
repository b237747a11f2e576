//! Error type returned by variant mutations.

use shopforge_core::{FieldError, ValidationErrors};
use shopforge_infra::StoreError;
use thiserror::Error;

/// Why a variant mutation did not produce a variant.
///
/// `Validation` carries every field-scoped problem found in the input;
/// nothing was persisted. `Store` means the input was fine but the catalog
/// store failed while applying the write batch, which leaves the catalog
/// unchanged as well.
#[derive(Debug, Error)]
pub enum MutationError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("catalog store failure: {0}")]
    Store(#[from] StoreError),
}

impl MutationError {
    /// The field errors, when this is a validation failure.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            Self::Store(_) => None,
        }
    }
}

impl From<FieldError> for MutationError {
    fn from(error: FieldError) -> Self {
        Self::Validation(error.into())
    }
}
