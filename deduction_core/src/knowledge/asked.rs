//! Bookkeeping of what has already been asked.

use entity_catalog::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{FactSet, Question};

/// Every (category, value) pair presented in the session. Only grows until restart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskedQuestions {
    asked: FactSet,
}

impl AskedQuestions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a question as asked. Returns false if it already was.
    pub fn insert(&mut self, question: &Question) -> bool {
        self.asked.insert(question.category, question.value.clone())
    }

    pub fn contains(&self, category: Category, value: &str) -> bool {
        self.asked.contains(category, value)
    }

    pub fn len(&self) -> usize {
        self.asked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.asked.is_empty()
    }

    /// Iterate over asked questions, grouped by category.
    pub fn iter(&self) -> impl Iterator<Item = Question> + '_ {
        self.asked.iter().flat_map(|(category, values)| {
            values.iter().map(move |value| Question::new(category, value.clone()))
        })
    }

    pub fn clear(&mut self) {
        self.asked.clear();
    }
}

/// Categories with at least one answered question.
///
/// The selector skips these; relaxation removes categories again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskedCategories {
    categories: BTreeSet<Category>,
}

impl AskedCategories {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: Category) -> bool {
        self.categories.insert(category)
    }

    pub fn remove(&mut self, category: Category) -> bool {
        self.categories.remove(&category)
    }

    pub fn contains(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn clear(&mut self) {
        self.categories.clear();
    }
}
