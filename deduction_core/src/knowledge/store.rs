//! The constraint store - accepted and rejected facts per category.

use entity_catalog::Category;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::{Answer, Question};

/// Values per category. Categories are only present while they hold a value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactSet {
    facts: BTreeMap<Category, BTreeSet<String>>,
}

impl FactSet {
    /// Create a new empty fact set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value. Returns false if it was already present.
    pub fn insert(&mut self, category: Category, value: impl Into<String>) -> bool {
        self.facts.entry(category).or_default().insert(value.into())
    }

    /// Remove a value, dropping the category once it is empty.
    pub fn remove(&mut self, category: Category, value: &str) -> bool {
        let Some(values) = self.facts.get_mut(&category) else {
            return false;
        };
        let removed = values.remove(value);
        if values.is_empty() {
            self.facts.remove(&category);
        }
        removed
    }

    pub fn contains(&self, category: Category, value: &str) -> bool {
        self.facts
            .get(&category)
            .is_some_and(|values| values.contains(value))
    }

    /// Values recorded for a category.
    pub fn get(&self, category: Category) -> Option<&BTreeSet<String>> {
        self.facts.get(&category)
    }

    /// Iterate over categories and their values.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &BTreeSet<String>)> {
        self.facts.iter().map(|(category, values)| (*category, values))
    }

    /// Categories holding at least one value.
    pub fn categories(&self) -> Vec<Category> {
        self.facts.keys().copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Total number of values across categories.
    pub fn len(&self) -> usize {
        self.facts.values().map(BTreeSet::len).sum()
    }

    pub fn clear(&mut self) {
        self.facts.clear();
    }
}

/// Accepted ("yes") and rejected ("no") facts.
///
/// A value is never accepted and rejected at the same time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintStore {
    yes: FactSet,
    no: FactSet,
}

impl ConstraintStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the answer to a question. Returns whether a fact was stored.
    pub fn record(&mut self, question: &Question, answer: Answer) -> bool {
        let (into, from) = match answer {
            Answer::Yes => (&mut self.yes, &mut self.no),
            Answer::No => (&mut self.no, &mut self.yes),
            Answer::Unknown => return false,
        };
        from.remove(question.category, &question.value);
        into.insert(question.category, question.value.clone());
        true
    }

    /// Accepted facts.
    pub fn accepted(&self) -> &FactSet {
        &self.yes
    }

    /// Rejected facts.
    pub fn rejected(&self) -> &FactSet {
        &self.no
    }

    /// Drop every rejected fact, keeping accepted ones.
    ///
    /// Returns the categories that held rejected facts.
    pub fn relax(&mut self) -> Vec<Category> {
        let categories = self.no.categories();
        self.no.clear();
        categories
    }

    pub fn is_empty(&self) -> bool {
        self.yes.is_empty() && self.no.is_empty()
    }

    pub fn clear(&mut self) {
        self.yes.clear();
        self.no.clear();
    }
}
