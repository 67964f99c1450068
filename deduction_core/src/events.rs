//! Prompts and outcomes - what a session asks of the presentation layer.

use entity_catalog::{Category, EntityRecord};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::knowledge::Question;

/// What the presentation layer should do next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Prompt {
    /// Ask a yes/no/unknown question.
    Question(Question),

    /// Present a guess and ask for confirmation.
    Guess { name: String, image: ImageHint },

    /// Ask the user to pick one of the remaining candidates by name.
    Choose {
        options: Vec<String>,
        /// The previous input, when it matched none of the options.
        rejected: Option<String>,
    },

    /// Ask whether the user wants to teach the engine a new entity.
    OfferEnrollment(OfferReason),

    /// Collect one field of a new entity.
    Field { field: FieldRequest, text: String },

    /// Show the new entity and ask whether to add it.
    ConfirmEnrollment(EntityRecord),

    /// The play-through is over until restart.
    Finished(Outcome),
}

/// Why enrollment is being offered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OfferReason {
    /// The user rejected a guess.
    WrongGuess(String),
    /// No entity matches the answers, even after relaxing.
    NoMatch,
}

impl OfferReason {
    /// The offer as it is put to the user.
    pub fn phrase(&self) -> String {
        match self {
            OfferReason::WrongGuess(name) => format!(
                "I guessed {name} and got it wrong. Do you want to add the character you were thinking of?"
            ),
            OfferReason::NoMatch => {
                "I could not find your character. Do you want to add it?".to_string()
            }
        }
    }
}

/// One field of the new-entity form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldRequest {
    Name,
    Attribute(Category),
    /// One more power; an empty answer ends the list.
    Power,
}

/// How a play-through ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The guess was confirmed.
    Solved(String),
    /// Questions ran out with several candidates left.
    InsufficientClues { candidates: Vec<String> },
    /// The user gave no name when asked to pick between candidates.
    SelectionAborted,
    /// The user declined to add an entity.
    NotAdded,
    /// The user gave no name for the new entity.
    EnrollmentCancelled,
    /// The new entity's name is already taken.
    Duplicate(String),
    /// The new entity was added and saved.
    Added(String),
    /// The new entity was added for this run only; saving failed.
    AddedNotDurable { name: String, reason: String },
}

impl Outcome {
    /// The outcome as it is reported to the user.
    pub fn message(&self) -> String {
        match self {
            Outcome::Solved(name) => format!("Great! I guessed right: {name}."),
            Outcome::InsufficientClues { candidates } if candidates.is_empty() => {
                "I don't have enough clues to guess correctly.".to_string()
            }
            Outcome::InsufficientClues { candidates } => format!(
                "I don't have enough clues to guess correctly. It might be one of: {}",
                candidates.join(", ")
            ),
            Outcome::SelectionAborted => {
                "No character selected. You can restart the game.".to_string()
            }
            Outcome::NotAdded => {
                "No new character was added. You can restart the game to try again.".to_string()
            }
            Outcome::EnrollmentCancelled => "No name given; nothing was added.".to_string(),
            Outcome::Duplicate(name) => format!("'{name}' already exists in the catalog."),
            Outcome::Added(name) => format!("{name} was added to the catalog."),
            Outcome::AddedNotDurable { name, reason } => format!(
                "{name} was added for this session, but the catalog could not be saved: {reason}"
            ),
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

/// Where to look for a picture of a guessed entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageHint {
    pub slug: String,
}

impl ImageHint {
    /// The hint for a record.
    pub fn for_record(record: &EntityRecord) -> Self {
        Self {
            slug: record.image_slug(),
        }
    }

    /// The image file, if it exists and can be opened. Never an error.
    pub fn resolve(&self, dir: &Path, extension: &str) -> Option<PathBuf> {
        if self.slug.is_empty() {
            return None;
        }
        let path = dir.join(format!("{}.{}", self.slug, extension.trim_start_matches('.')));
        (path.is_file() && File::open(&path).is_ok()).then_some(path)
    }
}
