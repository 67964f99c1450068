//! Questions and answers.

use entity_catalog::Category;
use serde::{Deserialize, Serialize};

/// A yes/no question about one attribute value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Question {
    pub category: Category,
    pub value: String,
}

impl Question {
    /// Create a new question.
    pub fn new(category: Category, value: impl Into<String>) -> Self {
        Self {
            category,
            value: value.into(),
        }
    }

    /// The question as it is put to the user.
    pub fn phrase(&self) -> String {
        let value = &self.value;
        match self.category {
            Category::Gender => format!("Is your character's gender '{value}'?"),
            Category::Hair => format!("Does your character have '{value}' hair?"),
            Category::Affiliation => format!("Does your character belong to '{value}'?"),
            Category::Powers => format!("Does your character have the power of '{value}'?"),
            Category::Nationality => format!("Is your character's nationality '{value}'?"),
        }
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.category, self.value)
    }
}

/// The user's answer to a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Answer {
    Yes,
    No,
    /// Records nothing, but the question is still never repeated.
    Unknown,
}

impl Answer {
    /// Parse a typed answer. Returns `None` for anything unrecognised.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "y" | "yes" | "s" | "si" | "sí" => Some(Answer::Yes),
            "n" | "no" => Some(Answer::No),
            "?" | "u" | "unknown" | "dk" | "dunno" | "idk" | "don't know" | "no sé" => {
                Some(Answer::Unknown)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrase_per_category() {
        assert_eq!(
            Question::new(Category::Gender, "male").phrase(),
            "Is your character's gender 'male'?"
        );
        assert!(Question::new(Category::Powers, "flight")
            .phrase()
            .contains("power of 'flight'"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Question::new(Category::Hair, "red").to_string(), "hair=red");
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(Question::new(Category::Affiliation, "X-Men")).unwrap();
        assert_eq!(json, serde_json::json!({"category": "affiliation", "value": "X-Men"}));
    }

    #[test]
    fn test_answer_parse() {
        assert_eq!(Answer::parse("Y"), Some(Answer::Yes));
        assert_eq!(Answer::parse(" yes "), Some(Answer::Yes));
        assert_eq!(Answer::parse("no"), Some(Answer::No));
        assert_eq!(Answer::parse("?"), Some(Answer::Unknown));
        assert_eq!(Answer::parse("maybe"), None);
    }
}
