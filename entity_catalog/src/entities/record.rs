//! Entity records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{AttributeKind, AttributeValue, Category};

/// One entity the engine can guess.
///
/// Every record exposes all five categories. Keys missing from storage default to an
/// empty string (or an empty list for `powers`); unrecognised keys are kept in `extra`
/// so the record re-saves unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub name: String,

    #[serde(default)]
    pub gender: AttributeValue,

    #[serde(default)]
    pub hair: AttributeValue,

    #[serde(default = "AttributeValue::empty_list")]
    pub powers: AttributeValue,

    #[serde(default)]
    pub affiliation: AttributeValue,

    #[serde(default)]
    pub nationality: AttributeValue,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl EntityRecord {
    /// Create a record with the given name and every attribute unknown.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            gender: AttributeValue::default(),
            hair: AttributeValue::default(),
            powers: AttributeValue::empty_list(),
            affiliation: AttributeValue::default(),
            nationality: AttributeValue::default(),
            extra: BTreeMap::new(),
        }
    }

    /// Set a category to a single string.
    pub fn with_text(mut self, category: Category, value: impl Into<String>) -> Self {
        *self.attribute_mut(category) = AttributeValue::Text(value.into());
        self
    }

    /// Set a category to a list of strings.
    pub fn with_list<I, S>(mut self, category: Category, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.attribute_mut(category) =
            AttributeValue::List(values.into_iter().map(Into::into).collect());
        self
    }

    /// The stored value of a category.
    pub fn attribute(&self, category: Category) -> &AttributeValue {
        match category {
            Category::Gender => &self.gender,
            Category::Hair => &self.hair,
            Category::Affiliation => &self.affiliation,
            Category::Powers => &self.powers,
            Category::Nationality => &self.nationality,
        }
    }

    /// Mutable access to the stored value of a category.
    pub fn attribute_mut(&mut self, category: Category) -> &mut AttributeValue {
        match category {
            Category::Gender => &mut self.gender,
            Category::Hair => &mut self.hair,
            Category::Affiliation => &mut self.affiliation,
            Category::Powers => &mut self.powers,
            Category::Nationality => &mut self.nationality,
        }
    }

    /// The known values of a category, read according to its schema kind.
    ///
    /// Empty strings mean "unknown" and are never returned. A list stored under a
    /// scalar category contributes only its first non-empty element.
    pub fn values(&self, category: Category) -> Vec<&str> {
        let attribute = self.attribute(category);
        if attribute.is_unknown() {
            return Vec::new();
        }

        let items = match attribute {
            AttributeValue::Text(value) => std::slice::from_ref(value),
            AttributeValue::List(items) => items.as_slice(),
        };
        let mut known = items.iter().map(String::as_str).filter(|v| !v.is_empty());
        match category.kind() {
            AttributeKind::List => known.collect(),
            AttributeKind::Scalar => known.next().into_iter().collect(),
        }
    }

    /// Check if the entity exhibits a value in a category.
    pub fn has_value(&self, category: Category, value: &str) -> bool {
        self.values(category).contains(&value)
    }

    /// Case-insensitive name comparison.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }

    /// Filesystem-safe slug of the name, used to look up an image.
    pub fn image_slug(&self) -> String {
        self.name
            .trim()
            .to_lowercase()
            .chars()
            .filter_map(|c| match c {
                c if c.is_whitespace() => Some('_'),
                c if c.is_alphanumeric() || c == '-' || c == '_' => Some(c),
                _ => None,
            })
            .collect()
    }

    /// Multi-line `key: value` summary, one line per field.
    pub fn summary(&self) -> String {
        let mut lines = vec![format!("name: {}", self.name)];
        for category in Category::ALL {
            lines.push(format!("{}: {}", category, self.attribute(category).display()));
        }
        lines.join("\n")
    }
}
