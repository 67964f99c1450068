//! Question selection.

use entity_catalog::{Category, EntityRecord};
use tracing::debug;

use super::ValueTally;
use crate::knowledge::{AskedCategories, AskedQuestions, Question};

/// Picks the next question: the most common unasked value of the first category,
/// in priority order, that still has one.
#[derive(Debug, Clone)]
pub struct QuestionSelector {
    order: Vec<Category>,
}

impl Default for QuestionSelector {
    fn default() -> Self {
        Self {
            order: Category::QUESTION_ORDER.to_vec(),
        }
    }
}

impl QuestionSelector {
    /// Create a selector using the standard category priority.
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose the next question, or `None` when nothing is left to ask.
    ///
    /// Categories in `asked_categories` are skipped. A category whose values have all
    /// been asked is passed over without being marked.
    pub fn select(
        &self,
        candidates: &[&EntityRecord],
        asked_categories: &AskedCategories,
        asked_questions: &AskedQuestions,
    ) -> Option<Question> {
        for &category in &self.order {
            if asked_categories.contains(category) {
                continue;
            }

            let tally = self.tally(candidates, category, asked_questions);
            if let Some((value, count)) = tally.hottest() {
                debug!(%category, value, count, options = tally.len(), "selected question");
                return Some(Question::new(category, value));
            }
        }
        None
    }

    /// Frequencies of the unasked values of a category among the candidates.
    pub fn tally(
        &self,
        candidates: &[&EntityRecord],
        category: Category,
        asked_questions: &AskedQuestions,
    ) -> ValueTally {
        let mut tally = ValueTally::new();
        for candidate in candidates {
            tally.add_candidate(
                candidate
                    .values(category)
                    .into_iter()
                    .filter(|value| !asked_questions.contains(category, value)),
            );
        }
        tally
    }
}
