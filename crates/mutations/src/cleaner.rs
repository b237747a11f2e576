//! Field cleaners for the variant input.
//!
//! Each cleaner inspects one field and appends any problems to a shared
//! [`ValidationErrors`] accumulator, so one request reports every bad
//! field at once instead of failing on the first.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use shopforge_catalog::{MetadataItem, Weight};
use shopforge_core::{FieldError, ValidationErrors, WarehouseId};

use crate::input::{PreorderSettingsInput, StockInput};

/// Rejects negative weights.
pub fn clean_weight(weight: Option<Weight>, errors: &mut ValidationErrors) {
    if let Some(weight) = weight {
        if weight.is_negative() {
            errors.push(FieldError::invalid(
                "weight",
                "Product variant can't have negative weight.",
            ));
        }
    }
}

/// Rejects per-checkout quantity limits below one.
pub fn clean_quantity_limit(limit: Option<i32>, errors: &mut ValidationErrors) {
    if let Some(limit) = limit {
        if limit < 1 {
            errors.push(FieldError::invalid(
                "quantity_limit_per_checkout",
                "Product variant can't have quantity limit per checkout lower than 1.",
            ));
        }
    }
}

/// Normalizes a submitted SKU: surrounding whitespace is stripped and a
/// blank value clears the field.
pub fn clean_sku(sku: &str) -> Option<String> {
    let trimmed = sku.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Validates preorder settings against the request clock.
pub fn clean_preorder(
    preorder: Option<PreorderSettingsInput>,
    now: DateTime<Utc>,
    errors: &mut ValidationErrors,
) {
    let Some(preorder) = preorder else {
        return;
    };
    if let Some(end_date) = preorder.end_date {
        if end_date <= now {
            errors.push(FieldError::invalid(
                "preorder",
                "Preorder end date must be in future.",
            ));
        }
    }
    if let Some(threshold) = preorder.global_threshold {
        if threshold < 0 {
            errors.push(FieldError::invalid(
                "preorder",
                "Preorder global threshold can't be negative.",
            ));
        }
    }
}

/// Rejects stock rows that name the same warehouse more than once.
///
/// Every duplicated warehouse is listed once, in the order it first
/// appeared in the input.
pub fn check_duplicate_stocks(stocks: &[StockInput], errors: &mut ValidationErrors) {
    let mut seen = HashSet::new();
    let mut duplicated: Vec<WarehouseId> = Vec::new();
    for stock in stocks {
        if !seen.insert(stock.warehouse) && !duplicated.contains(&stock.warehouse) {
            duplicated.push(stock.warehouse);
        }
    }
    if duplicated.is_empty() {
        return;
    }
    let listed = duplicated
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    errors.push(
        FieldError::unique("stocks", format!("Duplicated warehouse ID: {listed}"))
            .with_warehouses(duplicated),
    );
}

/// Metadata entries must carry a non-blank key.
pub fn clean_metadata(
    items: Option<&[MetadataItem]>,
    field: &'static str,
    errors: &mut ValidationErrors,
) {
    let Some(items) = items else {
        return;
    };
    if items.iter().any(|item| item.key.trim().is_empty()) {
        errors.push(FieldError::required(field, "Metadata key cannot be empty."));
    }
}
