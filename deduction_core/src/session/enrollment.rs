//! The new-entity form: an ordered queue of fields plus an open-ended list of powers.

use entity_catalog::{AttributeValue, Catalog, Category, EntityRecord};
use std::collections::VecDeque;

use crate::events::FieldRequest;

/// Fixed fields, in the order they are collected. Powers follow until an empty entry.
const FIELDS: [FieldRequest; 5] = [
    FieldRequest::Name,
    FieldRequest::Attribute(Category::Gender),
    FieldRequest::Attribute(Category::Hair),
    FieldRequest::Attribute(Category::Affiliation),
    FieldRequest::Attribute(Category::Nationality),
];

/// Result of submitting one field.
#[derive(Debug, Clone, PartialEq)]
pub enum FormStep {
    /// Ask for the next field.
    Next(FieldRequest),
    /// The name was left empty.
    Cancelled,
    /// The name is already taken.
    Duplicate(String),
    /// Every field has been collected.
    Complete(EntityRecord),
}

/// A new entity being collected one field at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntityForm {
    record: EntityRecord,
    powers: Vec<String>,
    pending: VecDeque<FieldRequest>,
}

impl Default for NewEntityForm {
    fn default() -> Self {
        Self {
            record: EntityRecord::new(""),
            powers: Vec::new(),
            pending: FIELDS.into_iter().collect(),
        }
    }
}

impl NewEntityForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// The field currently awaited.
    pub fn current(&self) -> FieldRequest {
        self.pending.front().copied().unwrap_or(FieldRequest::Power)
    }

    /// Prompt text for the current field.
    pub fn current_text(&self) -> String {
        let name = &self.record.name;
        match self.current() {
            FieldRequest::Name => {
                "Please enter the name of the character you were thinking of:".to_string()
            }
            FieldRequest::Attribute(category) => {
                format!("Enter the {category} of {name} (leave empty to skip):")
            }
            FieldRequest::Power => format!("Enter a power of {name} (leave empty to finish):"),
        }
    }

    /// Submit the current field. Input is trimmed; empty input skips an attribute,
    /// ends the power list, or cancels at the name.
    pub fn submit(&mut self, input: &str, catalog: &Catalog) -> FormStep {
        let value = input.trim();
        match self.current() {
            FieldRequest::Name => {
                if value.is_empty() {
                    return FormStep::Cancelled;
                }
                if catalog.contains(value) {
                    return FormStep::Duplicate(value.to_string());
                }
                self.record.name = value.to_string();
                self.pending.pop_front();
            }
            FieldRequest::Attribute(category) => {
                if !value.is_empty() {
                    *self.record.attribute_mut(category) = AttributeValue::from(value);
                }
                self.pending.pop_front();
            }
            FieldRequest::Power => {
                if value.is_empty() {
                    let mut record = self.record.clone();
                    record.powers = AttributeValue::List(self.powers.clone());
                    return FormStep::Complete(record);
                }
                self.powers.push(value.to_string());
            }
        }
        FormStep::Next(self.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_records(vec![EntityRecord::new("Storm")])
    }

    #[test]
    fn test_fields_in_order() {
        let catalog = catalog();
        let mut form = NewEntityForm::new();

        assert_eq!(form.current(), FieldRequest::Name);
        assert_eq!(
            form.submit("Gambit", &catalog),
            FormStep::Next(FieldRequest::Attribute(Category::Gender))
        );
        assert_eq!(
            form.submit("male", &catalog),
            FormStep::Next(FieldRequest::Attribute(Category::Hair))
        );
        assert_eq!(
            form.submit("brown", &catalog),
            FormStep::Next(FieldRequest::Attribute(Category::Affiliation))
        );
        assert_eq!(
            form.submit("X-Men", &catalog),
            FormStep::Next(FieldRequest::Attribute(Category::Nationality))
        );
        assert_eq!(form.submit("", &catalog), FormStep::Next(FieldRequest::Power));
        assert_eq!(form.submit("kinetic charge", &catalog), FormStep::Next(FieldRequest::Power));
        assert_eq!(form.submit(" staff ", &catalog), FormStep::Next(FieldRequest::Power));

        let FormStep::Complete(record) = form.submit("", &catalog) else {
            panic!("form should be complete");
        };
        assert_eq!(record.name, "Gambit");
        assert_eq!(record.gender, AttributeValue::from("male"));
        assert_eq!(record.hair, AttributeValue::from("brown"));
        assert_eq!(record.nationality, AttributeValue::default());
        assert_eq!(
            record.powers,
            AttributeValue::List(vec!["kinetic charge".to_string(), "staff".to_string()])
        );
    }

    #[test]
    fn test_empty_name_cancels() {
        let mut form = NewEntityForm::new();
        assert_eq!(form.submit("  ", &catalog()), FormStep::Cancelled);
    }

    #[test]
    fn test_duplicate_name_is_rejected() {
        let mut form = NewEntityForm::new();
        assert_eq!(
            form.submit("storm", &catalog()),
            FormStep::Duplicate("storm".to_string())
        );
        assert_eq!(form.current(), FieldRequest::Name);
    }

    #[test]
    fn test_no_powers() {
        let catalog = catalog();
        let mut form = NewEntityForm::new();
        form.submit("Cypher", &catalog);
        for _ in 0..4 {
            form.submit("", &catalog);
        }

        let FormStep::Complete(record) = form.submit("", &catalog) else {
            panic!("form should be complete");
        };
        assert_eq!(record.powers, AttributeValue::empty_list());
    }

    #[test]
    fn test_prompt_text_mentions_name() {
        let mut form = NewEntityForm::new();
        form.submit("Gambit", &catalog());
        assert!(form.current_text().contains("gender of Gambit"));
    }
}
