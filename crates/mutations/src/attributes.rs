//! Attribute assignment for variant mutations.
//!
//! This module owns everything about the `attributes` input field: checking
//! that the submitted attributes belong to the product type, validating each
//! value against its attribute's input type, canonicalizing the values into
//! an [`AttributeSelection`] and guarding against a second variant carrying
//! the same value combination as an existing one.
//!
//! The orchestrator assembles an [`AttributeContext`] from the store and
//! calls [`clean`]; no storage access happens in here.

use std::collections::BTreeSet;

use shopforge_catalog::{Attribute, AttributeInputType, AttributeSelection};
use shopforge_core::{AttributeId, FieldError, ProductErrorCode, ReferenceId, ValidationErrors};

use crate::input::AttributeValueInput;

/// Longest accepted plain-text attribute value.
const MAX_PLAIN_TEXT_LENGTH: usize = 250;

/// Everything attribute validation needs to know about the target variant's
/// surroundings.
#[derive(Debug, Clone, Default)]
pub struct AttributeContext {
    /// Variant attributes of the parent product type, in display order.
    pub attributes: Vec<Attribute>,
    /// Whether the product type supports variant attributes at all.
    pub has_variants: bool,
    /// The target variant's stored links; empty when creating.
    pub current_selection: AttributeSelection,
    /// Selections of the product's other variants. On update the target's
    /// own selection must not be in here.
    pub used_selections: Vec<AttributeSelection>,
    /// Reference targets that exist; anything else fails validation.
    pub known_references: BTreeSet<ReferenceId>,
}

impl AttributeContext {
    pub fn attribute(&self, id: AttributeId) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.id == id)
    }

    pub fn has_required_attributes(&self) -> bool {
        self.attributes.iter().any(|a| a.value_required)
    }
}

/// Validate the submitted attribute inputs and build the selection update.
///
/// Returns `Ok(None)` when the input leaves the stored links untouched,
/// `Ok(Some(updates))` with the canonical per-attribute value sets to merge
/// in, or every violation found.
pub fn clean(
    inputs: Option<&[AttributeValueInput]>,
    is_new: bool,
    ctx: &AttributeContext,
) -> Result<Option<AttributeSelection>, ValidationErrors> {
    let submitted = inputs.unwrap_or_default();

    // a non-configurable type takes no attribute input at all, so that
    // check comes before the per-attribute ones
    if !ctx.has_variants {
        if submitted.is_empty() {
            return Ok(None);
        }
        return Err(FieldError::invalid(
            "attributes",
            "Cannot assign attributes for product type without variants",
        )
        .into());
    }

    let unknown = unknown_attribute_ids(submitted, ctx);
    if !unknown.is_empty() {
        return Err(FieldError::new(
            "attributes",
            ProductErrorCode::AttributeCannotBeAssigned,
            "Given attributes are not a variant attributes.",
        )
        .with_attributes(unknown)
        .into());
    }

    if submitted.is_empty() {
        if is_new && ctx.has_required_attributes() {
            return Err(FieldError::required(
                "attributes",
                "All required attributes must take a value.",
            )
            .into());
        }
        return Ok(None);
    }

    let mut errors = ValidationErrors::new();
    let mut updates = AttributeSelection::new();
    for input in submitted {
        // unknown ids were rejected above
        let Some(attribute) = ctx.attribute(input.id) else {
            continue;
        };
        if let Some(values) = clean_value(attribute, input, ctx, &mut errors) {
            updates.insert(attribute.id, values);
        }
    }
    // A newly created variant must give every required attribute a value,
    // whether or not other attributes were submitted alongside.
    if is_new && missing_required_attribute(submitted, ctx) {
        errors.push(FieldError::required(
            "attributes",
            "All required attributes must take a value.",
        ));
    }
    errors.into_result()?;

    // A variant is a duplicate when the selection it would end up with
    // matches a sibling's, so merge the update into the stored links first.
    let mut resulting = ctx.current_selection.clone();
    resulting.apply(&updates);
    if ctx.used_selections.iter().any(|used| *used == resulting) {
        return Err(FieldError::new(
            "attributes",
            ProductErrorCode::DuplicatedInputItem,
            "Duplicated attribute values for product variant.",
        )
        .into());
    }

    Ok(Some(updates))
}

fn unknown_attribute_ids(submitted: &[AttributeValueInput], ctx: &AttributeContext) -> Vec<AttributeId> {
    let mut unknown = Vec::new();
    for input in submitted {
        if ctx.attribute(input.id).is_none() && !unknown.contains(&input.id) {
            unknown.push(input.id);
        }
    }
    unknown
}

fn missing_required_attribute(submitted: &[AttributeValueInput], ctx: &AttributeContext) -> bool {
    ctx.attributes
        .iter()
        .any(|a| a.value_required && !submitted.iter().any(|input| input.id == a.id))
}

/// Validate one input against its attribute's input type.
///
/// Returns the canonical value list on success: choice slugs for selectable
/// types, the verbatim text for plain text, and string renderings for the
/// rest. An empty list means the attribute gets cleared. `None` means the
/// value was bad and an error was recorded.
fn clean_value(
    attribute: &Attribute,
    input: &AttributeValueInput,
    ctx: &AttributeContext,
    errors: &mut ValidationErrors,
) -> Option<Vec<String>> {
    match attribute.input_type {
        AttributeInputType::Dropdown => clean_dropdown(attribute, input, errors),
        AttributeInputType::Multiselect => clean_multiselect(attribute, input, errors),
        AttributeInputType::PlainText => clean_plain_text(attribute, input, errors),
        AttributeInputType::Numeric => clean_numeric(attribute, input, errors),
        AttributeInputType::Boolean => clean_boolean(attribute, input, errors),
        AttributeInputType::Date => clean_date(attribute, input, errors),
        AttributeInputType::DateTime => clean_date_time(attribute, input, errors),
        AttributeInputType::Reference => clean_references(attribute, input, ctx, errors),
    }
}

/// An empty payload clears an optional attribute and is an error on a
/// required one.
fn cleared_or_required(attribute: &Attribute, errors: &mut ValidationErrors) -> Option<Vec<String>> {
    if attribute.value_required {
        errors.push(
            FieldError::required("attributes", "Attribute expects a value but none were given.")
                .with_attributes([attribute.id]),
        );
        return None;
    }
    Some(Vec::new())
}

fn resolve_choice(
    attribute: &Attribute,
    value: &str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(
            FieldError::required("attributes", "Attribute values cannot be blank.")
                .with_attributes([attribute.id]),
        );
        return None;
    }
    match attribute.choice(trimmed) {
        Some(choice) => Some(choice.slug.clone()),
        None => {
            errors.push(
                FieldError::invalid(
                    "attributes",
                    format!(
                        "Value \"{trimmed}\" is not a valid choice for attribute: {}.",
                        attribute.slug
                    ),
                )
                .with_attributes([attribute.id]),
            );
            None
        }
    }
}

fn clean_dropdown(
    attribute: &Attribute,
    input: &AttributeValueInput,
    errors: &mut ValidationErrors,
) -> Option<Vec<String>> {
    match input.values.as_slice() {
        [] => cleared_or_required(attribute, errors),
        [value] => resolve_choice(attribute, value, errors).map(|slug| vec![slug]),
        _ => {
            errors.push(
                FieldError::invalid("attributes", "Attribute must take only one value.")
                    .with_attributes([attribute.id]),
            );
            None
        }
    }
}

fn clean_multiselect(
    attribute: &Attribute,
    input: &AttributeValueInput,
    errors: &mut ValidationErrors,
) -> Option<Vec<String>> {
    if input.values.is_empty() {
        return cleared_or_required(attribute, errors);
    }
    let mut slugs: Vec<String> = Vec::new();
    let mut failed = false;
    let mut duplicated = false;
    for value in &input.values {
        let Some(slug) = resolve_choice(attribute, value, errors) else {
            failed = true;
            continue;
        };
        if slugs.contains(&slug) {
            duplicated = true;
        } else {
            slugs.push(slug);
        }
    }
    if duplicated {
        errors.push(
            FieldError::new(
                "attributes",
                ProductErrorCode::DuplicatedInputItem,
                format!("Duplicated attribute values for attribute: {}.", attribute.slug),
            )
            .with_attributes([attribute.id]),
        );
        failed = true;
    }
    if failed { None } else { Some(slugs) }
}

fn clean_plain_text(
    attribute: &Attribute,
    input: &AttributeValueInput,
    errors: &mut ValidationErrors,
) -> Option<Vec<String>> {
    let Some(text) = input.plain_text.as_deref() else {
        return cleared_or_required(attribute, errors);
    };
    if text.trim().is_empty() {
        errors.push(
            FieldError::required("attributes", "Attribute values cannot be blank.")
                .with_attributes([attribute.id]),
        );
        return None;
    }
    if text.chars().count() > MAX_PLAIN_TEXT_LENGTH {
        errors.push(
            FieldError::invalid(
                "attributes",
                format!("Attribute value length must be at most {MAX_PLAIN_TEXT_LENGTH} characters."),
            )
            .with_attributes([attribute.id]),
        );
        return None;
    }
    Some(vec![text.to_string()])
}

fn clean_numeric(
    attribute: &Attribute,
    input: &AttributeValueInput,
    errors: &mut ValidationErrors,
) -> Option<Vec<String>> {
    let Some(raw) = input.numeric.as_deref() else {
        return cleared_or_required(attribute, errors);
    };
    let trimmed = raw.trim();
    if trimmed.parse::<f64>().is_err() {
        errors.push(
            FieldError::invalid("attributes", "Value of numeric attribute must be numeric.")
                .with_attributes([attribute.id]),
        );
        return None;
    }
    Some(vec![trimmed.to_string()])
}

fn clean_boolean(
    attribute: &Attribute,
    input: &AttributeValueInput,
    errors: &mut ValidationErrors,
) -> Option<Vec<String>> {
    let Some(flag) = input.boolean else {
        return cleared_or_required(attribute, errors);
    };
    Some(vec![flag.to_string()])
}

fn clean_date(
    attribute: &Attribute,
    input: &AttributeValueInput,
    errors: &mut ValidationErrors,
) -> Option<Vec<String>> {
    let Some(date) = input.date else {
        return cleared_or_required(attribute, errors);
    };
    Some(vec![date.to_string()])
}

fn clean_date_time(
    attribute: &Attribute,
    input: &AttributeValueInput,
    errors: &mut ValidationErrors,
) -> Option<Vec<String>> {
    let Some(date_time) = input.date_time else {
        return cleared_or_required(attribute, errors);
    };
    Some(vec![date_time.to_rfc3339()])
}

fn clean_references(
    attribute: &Attribute,
    input: &AttributeValueInput,
    ctx: &AttributeContext,
    errors: &mut ValidationErrors,
) -> Option<Vec<String>> {
    if input.references.is_empty() {
        return cleared_or_required(attribute, errors);
    }
    let mut missing: Vec<ReferenceId> = Vec::new();
    for reference in &input.references {
        if !ctx.known_references.contains(reference) && !missing.contains(reference) {
            missing.push(*reference);
        }
    }
    if !missing.is_empty() {
        let listed = missing
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        errors.push(
            FieldError::not_found("attributes", format!("Could not resolve references: {listed}."))
                .with_attributes([attribute.id]),
        );
        return None;
    }
    Some(input.references.iter().map(ToString::to_string).collect())
}
