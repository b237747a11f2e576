use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use shopforge_core::{AttributeId, AttributeValueId, Entity, ValueObject};

/// How values for an attribute are supplied and validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttributeInputType {
    Dropdown,
    Multiselect,
    PlainText,
    Numeric,
    Boolean,
    Date,
    DateTime,
    Reference,
}

impl AttributeInputType {
    /// Input types whose values come from a fixed choice list.
    pub fn has_choices(self) -> bool {
        matches!(self, AttributeInputType::Dropdown | AttributeInputType::Multiselect)
    }
}

/// A selectable choice of a dropdown/multiselect attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub id: AttributeValueId,
    pub name: String,
    pub slug: String,
}

impl AttributeValue {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: AttributeValueId::new(),
            name: name.into(),
            slug: slug.into(),
        }
    }
}

/// A variant attribute as configured on a product type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub id: AttributeId,
    pub name: String,
    pub slug: String,
    pub input_type: AttributeInputType,
    /// Whether every variant of the product type must carry a value.
    pub value_required: bool,
    /// Choice list for dropdown/multiselect; empty for free-form input types.
    pub choices: Vec<AttributeValue>,
}

impl Attribute {
    pub fn new(
        name: impl Into<String>,
        slug: impl Into<String>,
        input_type: AttributeInputType,
    ) -> Self {
        Self {
            id: AttributeId::new(),
            name: name.into(),
            slug: slug.into(),
            input_type,
            value_required: false,
            choices: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.value_required = true;
        self
    }

    pub fn with_choices(mut self, choices: Vec<AttributeValue>) -> Self {
        self.choices = choices;
        self
    }

    /// Look a choice up by slug, falling back to its display name.
    pub fn choice(&self, value: &str) -> Option<&AttributeValue> {
        self.choices
            .iter()
            .find(|c| c.slug == value)
            .or_else(|| self.choices.iter().find(|c| c.name == value))
    }
}

impl Entity for Attribute {
    type Id = AttributeId;

    fn id(&self) -> &AttributeId {
        &self.id
    }
}

/// Canonical mapping of attribute id to the chosen value slugs.
///
/// Both the map and the per-attribute sets are ordered, so two selections
/// built in different input orders compare equal. This is what gets persisted
/// as the variant's attribute links and what duplicate-variant detection
/// compares across a product's variants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeSelection(BTreeMap<AttributeId, BTreeSet<String>>);

impl AttributeSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value set for one attribute, replacing whatever was there.
    pub fn insert<I>(&mut self, attribute: AttributeId, values: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.0
            .insert(attribute, values.into_iter().map(Into::into).collect());
    }

    pub fn values(&self, attribute: &AttributeId) -> Option<&BTreeSet<String>> {
        self.0.get(attribute)
    }

    pub fn contains(&self, attribute: &AttributeId) -> bool {
        self.0.contains_key(attribute)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AttributeId, &BTreeSet<String>)> {
        self.0.iter()
    }

    pub fn attribute_ids(&self) -> impl Iterator<Item = &AttributeId> {
        self.0.keys()
    }

    /// Merge `updates` in, replacing links per attribute key and leaving
    /// attributes absent from `updates` untouched. An empty value set clears
    /// the attribute: the key is removed, so a cleared selection compares
    /// equal to one that never carried it.
    pub fn apply(&mut self, updates: &AttributeSelection) {
        for (attribute, values) in updates.iter() {
            if values.is_empty() {
                self.0.remove(attribute);
            } else {
                self.0.insert(*attribute, values.clone());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl ValueObject for AttributeSelection {}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_attribute_with_choices() -> Attribute {
        Attribute::new("Size", "size", AttributeInputType::Dropdown).with_choices(vec![
            AttributeValue::new("Small", "small"),
            AttributeValue::new("Big", "big"),
        ])
    }

    #[test]
    fn choice_lookup_matches_slug_then_name() {
        let attribute = test_attribute_with_choices();
        assert_eq!(attribute.choice("big").unwrap().name, "Big");
        assert_eq!(attribute.choice("Big").unwrap().slug, "big");
        assert!(attribute.choice("medium").is_none());
    }

    #[test]
    fn selections_compare_equal_regardless_of_insertion_order() {
        let color = AttributeId::new();
        let size = AttributeId::new();

        let mut first = AttributeSelection::new();
        first.insert(color, ["red", "blue"]);
        first.insert(size, ["small"]);

        let mut second = AttributeSelection::new();
        second.insert(size, ["small"]);
        second.insert(color, ["blue", "red"]);

        assert_eq!(first, second);
    }

    #[test]
    fn insert_replaces_the_value_set_for_a_key() {
        let color = AttributeId::new();
        let mut selection = AttributeSelection::new();
        selection.insert(color, ["red"]);
        selection.insert(color, ["blue"]);

        let values = selection.values(&color).unwrap();
        assert_eq!(values.len(), 1);
        assert!(values.contains("blue"));
    }

    #[test]
    fn apply_replaces_per_key_and_keeps_the_rest() {
        let color = AttributeId::new();
        let size = AttributeId::new();

        let mut stored = AttributeSelection::new();
        stored.insert(color, ["red"]);
        stored.insert(size, ["small"]);

        let mut update = AttributeSelection::new();
        update.insert(color, ["green"]);

        stored.apply(&update);

        assert!(stored.values(&color).unwrap().contains("green"));
        assert!(stored.values(&size).unwrap().contains("small"));
        assert_eq!(stored.len(), 2);
    }

    #[test]
    fn apply_removes_a_key_cleared_by_the_update() {
        let color = AttributeId::new();
        let size = AttributeId::new();

        let mut stored = AttributeSelection::new();
        stored.insert(color, ["red"]);
        stored.insert(size, ["small"]);

        let mut update = AttributeSelection::new();
        update.insert(size, Vec::<String>::new());

        stored.apply(&update);

        let mut bare = AttributeSelection::new();
        bare.insert(color, ["red"]);
        assert!(!stored.contains(&size));
        assert_eq!(stored, bare);
    }
}
