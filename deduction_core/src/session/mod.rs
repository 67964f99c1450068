//! The decision controller - one play-through's state machine.
//!
//! A round works as follows:
//! 1. **Record**: Store the answer as an accepted or rejected fact and mark it asked
//! 2. **Forward chain**: Recompute the candidates from the full catalog
//! 3. **Backward chain**: One candidate left means a guess
//! 4. **Recover**: No candidates left means rejected facts are dropped and filtering reruns
//! 5. **Select**: Otherwise ask the next question; when none is left, let the user pick
//!    between two survivors or report that the clues ran out

mod enrollment;

pub use enrollment::*;

use entity_catalog::{AddEntityError, Catalog, CatalogLoadError, CatalogStore, EntityRecord};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::events::{ImageHint, OfferReason, Outcome, Prompt};
use crate::inference::{forward_chain_indices, QuestionSelector};
use crate::knowledge::{Answer, AskedCategories, AskedQuestions, ConstraintStore, Question};

/// Unique identifier for sessions, attached to their log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors from driving a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("the catalog has no entities")]
    EmptyCatalog,

    #[error(transparent)]
    Load(#[from] CatalogLoadError),

    #[error("expected {expected}, but the session is {phase}")]
    UnexpectedInput {
        expected: &'static str,
        phase: &'static str,
    },
}

/// Where the session currently stands.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    AwaitingAnswer(Question),
    /// Holds the catalog position of the guessed entity.
    ConfirmingGuess(usize),
    ChoosingBetween {
        options: Vec<usize>,
        rejected: Option<String>,
    },
    OfferingEnrollment(OfferReason),
    Enrolling(NewEntityForm),
    ConfirmingEnrollment(EntityRecord),
    Finished(Outcome),
}

impl Phase {
    /// Short name for error messages and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Phase::AwaitingAnswer(_) => "awaiting an answer",
            Phase::ConfirmingGuess(_) => "confirming a guess",
            Phase::ChoosingBetween { .. } => "choosing between candidates",
            Phase::OfferingEnrollment(_) => "offering to add an entity",
            Phase::Enrolling(_) => "collecting a new entity",
            Phase::ConfirmingEnrollment(_) => "confirming a new entity",
            Phase::Finished(_) => "finished",
        }
    }
}

/// One active guessing session.
///
/// The session exclusively owns the constraint store, both asked sets, and the candidate
/// set. The catalog is only mutated by a confirmed enrollment, which appends and persists.
#[derive(Debug)]
pub struct Session {
    state: SessionState,
    phase: Phase,
}

/// Everything a session knows apart from where it stands. Each step returns the next phase.
#[derive(Debug)]
struct SessionState {
    id: SessionId,
    catalog: Catalog,
    selector: QuestionSelector,
    constraints: ConstraintStore,
    asked_categories: AskedCategories,
    asked_questions: AskedQuestions,
    history: Vec<Question>,
    candidates: Vec<usize>,
}

impl Session {
    /// Create a session over a catalog and start its first play-through.
    /// An empty catalog cannot be played.
    pub fn new(catalog: Catalog) -> Result<Self, SessionError> {
        if catalog.is_empty() {
            return Err(SessionError::EmptyCatalog);
        }
        let mut state = SessionState {
            id: SessionId::new(),
            catalog,
            selector: QuestionSelector::new(),
            constraints: ConstraintStore::new(),
            asked_categories: AskedCategories::new(),
            asked_questions: AskedQuestions::new(),
            history: Vec::new(),
            candidates: Vec::new(),
        };
        let phase = state.open();
        Ok(Self { state, phase })
    }

    /// Load the catalog from storage and create a session over it.
    pub fn load(store: &dyn CatalogStore) -> Result<Self, SessionError> {
        let records = store.load()?;
        Self::new(Catalog::from_records(records))
    }

    pub fn id(&self) -> SessionId {
        self.state.id
    }

    pub fn catalog(&self) -> &Catalog {
        &self.state.catalog
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn constraints(&self) -> &ConstraintStore {
        &self.state.constraints
    }

    pub fn asked_questions(&self) -> &AskedQuestions {
        &self.state.asked_questions
    }

    pub fn asked_categories(&self) -> &AskedCategories {
        &self.state.asked_categories
    }

    /// Questions presented since the last (re)start, in order.
    pub fn history(&self) -> &[Question] {
        &self.state.history
    }

    /// Current candidates, in catalog order.
    pub fn candidates(&self) -> Vec<&EntityRecord> {
        self.state.candidates()
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished(_))
    }

    /// Begin a play-through from a clean slate and return the first prompt.
    pub fn start(&mut self) -> Prompt {
        self.enter(|state| state.open())
    }

    /// Discard everything learned and start over. Allowed in any phase.
    pub fn restart(&mut self) -> Prompt {
        info!(session = %self.state.id, phase = self.phase.name(), "session restarted");
        self.start()
    }

    /// The prompt for the current phase.
    pub fn prompt(&self) -> Prompt {
        match &self.phase {
            Phase::AwaitingAnswer(question) => Prompt::Question(question.clone()),
            Phase::ConfirmingGuess(index) => {
                let record = &self.state.catalog.entities()[*index];
                Prompt::Guess {
                    name: record.name.clone(),
                    image: ImageHint::for_record(record),
                }
            }
            Phase::ChoosingBetween { options, rejected } => Prompt::Choose {
                options: options.iter().map(|&i| self.state.name_of(i)).collect(),
                rejected: rejected.clone(),
            },
            Phase::OfferingEnrollment(reason) => Prompt::OfferEnrollment(reason.clone()),
            Phase::Enrolling(form) => Prompt::Field {
                field: form.current(),
                text: form.current_text(),
            },
            Phase::ConfirmingEnrollment(record) => Prompt::ConfirmEnrollment(record.clone()),
            Phase::Finished(outcome) => Prompt::Finished(outcome.clone()),
        }
    }

    /// Answer the pending question.
    pub fn answer(&mut self, answer: Answer) -> Result<Prompt, SessionError> {
        let Phase::AwaitingAnswer(question) = &self.phase else {
            return Err(self.unexpected("an answer"));
        };
        let question = question.clone();
        Ok(self.enter(|state| state.apply(&question, answer)))
    }

    /// Confirm or reject the current guess.
    pub fn confirm_guess(&mut self, correct: bool) -> Result<Prompt, SessionError> {
        let Phase::ConfirmingGuess(index) = self.phase else {
            return Err(self.unexpected("a guess confirmation"));
        };
        let name = self.state.name_of(index);
        let id = self.state.id;

        if correct {
            info!(session = %id, %name, questions = self.state.history.len(), "guess confirmed");
            Ok(self.enter(|state| state.finish(Outcome::Solved(name))))
        } else {
            info!(session = %id, %name, "guess rejected");
            Ok(self.enter(|_| Phase::OfferingEnrollment(OfferReason::WrongGuess(name))))
        }
    }

    /// Pick one of the remaining candidates by name. Empty input aborts; a name that
    /// matches none of the options asks again.
    pub fn choose(&mut self, input: &str) -> Result<Prompt, SessionError> {
        let Phase::ChoosingBetween { options, .. } = &self.phase else {
            return Err(self.unexpected("a choice"));
        };
        let options = options.clone();

        let input = input.trim();
        if input.is_empty() {
            return Ok(self.enter(|state| state.finish(Outcome::SelectionAborted)));
        }

        let picked = options
            .iter()
            .copied()
            .find(|&index| self.state.catalog.entities()[index].is_named(input));
        match picked {
            Some(index) => Ok(self.enter(|_| Phase::ConfirmingGuess(index))),
            None => {
                debug!(session = %self.state.id, input, "choice matched no candidate");
                Ok(self.enter(|_| Phase::ChoosingBetween {
                    options,
                    rejected: Some(input.to_string()),
                }))
            }
        }
    }

    /// Accept or decline the offer to add a new entity.
    pub fn respond_to_offer(&mut self, accept: bool) -> Result<Prompt, SessionError> {
        if !matches!(self.phase, Phase::OfferingEnrollment(_)) {
            return Err(self.unexpected("a reply to the enrollment offer"));
        }

        if accept {
            Ok(self.enter(|_| Phase::Enrolling(NewEntityForm::new())))
        } else {
            Ok(self.enter(|state| state.finish(Outcome::NotAdded)))
        }
    }

    /// Submit the current field of the new-entity form.
    pub fn submit_field(&mut self, input: &str) -> Result<Prompt, SessionError> {
        let Phase::Enrolling(form) = &mut self.phase else {
            return Err(self.unexpected("a form field"));
        };

        match form.submit(input, &self.state.catalog) {
            FormStep::Next(_) => Ok(self.prompt()),
            FormStep::Cancelled => {
                Ok(self.enter(|state| state.finish(Outcome::EnrollmentCancelled)))
            }
            FormStep::Duplicate(name) => {
                Ok(self.enter(|state| state.finish(Outcome::Duplicate(name))))
            }
            FormStep::Complete(record) => Ok(self.enter(|_| Phase::ConfirmingEnrollment(record))),
        }
    }

    /// Add the collected entity to the catalog and persist it, or discard it.
    ///
    /// A failed save keeps the entity for the rest of the run and is reported in the
    /// outcome.
    pub fn confirm_enrollment(
        &mut self,
        accept: bool,
        store: &dyn CatalogStore,
    ) -> Result<Prompt, SessionError> {
        let Phase::ConfirmingEnrollment(record) = &self.phase else {
            return Err(self.unexpected("a confirmation of the new entity"));
        };
        let record = record.clone();
        if !accept {
            return Ok(self.enter(|state| state.finish(Outcome::NotAdded)));
        }
        Ok(self.enter(|state| state.enroll(record, store)))
    }

    /// Move to the phase computed by `step` and return its prompt.
    fn enter(&mut self, step: impl FnOnce(&mut SessionState) -> Phase) -> Prompt {
        self.phase = step(&mut self.state);
        self.prompt()
    }

    fn unexpected(&self, expected: &'static str) -> SessionError {
        SessionError::UnexpectedInput {
            expected,
            phase: self.phase.name(),
        }
    }
}

impl SessionState {
    /// Reset to a clean slate and decide the opening phase.
    fn open(&mut self) -> Phase {
        self.constraints.clear();
        self.asked_categories.clear();
        self.asked_questions.clear();
        self.history.clear();
        self.candidates = (0..self.catalog.len()).collect();
        debug!(session = %self.id, entities = self.catalog.len(), "session started");
        self.advance()
    }

    fn apply(&mut self, question: &Question, answer: Answer) -> Phase {
        self.constraints.record(question, answer);
        self.asked_categories.insert(question.category);
        self.asked_questions.insert(question);
        self.refilter();
        debug!(
            session = %self.id,
            %question,
            ?answer,
            candidates = self.candidates.len(),
            "answer applied"
        );
        self.advance()
    }

    fn enroll(&mut self, record: EntityRecord, store: &dyn CatalogStore) -> Phase {
        let name = match self.catalog.add(record) {
            Ok(index) => self.name_of(index),
            Err(AddEntityError::Duplicate(name)) => return self.finish(Outcome::Duplicate(name)),
            Err(AddEntityError::BlankName) => return self.finish(Outcome::EnrollmentCancelled),
        };

        let outcome = match store.save(self.catalog.entities()) {
            Ok(()) => {
                info!(session = %self.id, %name, entities = self.catalog.len(), "entity added");
                Outcome::Added(name)
            }
            Err(error) => {
                warn!(session = %self.id, %name, %error, "entity added but catalog not saved");
                Outcome::AddedNotDurable {
                    name,
                    reason: error.to_string(),
                }
            }
        };
        self.finish(outcome)
    }

    fn candidates(&self) -> Vec<&EntityRecord> {
        self.candidates
            .iter()
            .filter_map(|&index| self.catalog.get(index))
            .collect()
    }

    fn refilter(&mut self) {
        self.candidates = forward_chain_indices(
            self.catalog.entities(),
            self.constraints.accepted(),
            self.constraints.rejected(),
        );
    }

    /// Backward chaining over the freshly filtered candidates.
    fn advance(&mut self) -> Phase {
        match self.candidates.len() {
            0 => self.recover_from_empty(),
            1 => Phase::ConfirmingGuess(self.candidates[0]),
            _ => self.next_question(),
        }
    }

    fn recover_from_empty(&mut self) -> Phase {
        self.relax();
        match self.candidates.len() {
            0 => {
                info!(session = %self.id, "no entity matches the accepted facts");
                Phase::OfferingEnrollment(OfferReason::NoMatch)
            }
            1 => Phase::ConfirmingGuess(self.candidates[0]),
            _ => self.next_question(),
        }
    }

    /// Drop rejected facts and reopen their categories. The asked questions stay asked.
    fn relax(&mut self) {
        let reopened = self.constraints.relax();
        for category in &reopened {
            self.asked_categories.remove(*category);
        }
        self.refilter();
        info!(
            session = %self.id,
            ?reopened,
            candidates = self.candidates.len(),
            "relaxed rejected facts"
        );
    }

    fn next_question(&mut self) -> Phase {
        if let Some(question) = self.select() {
            return self.ask(question);
        }

        match self.candidates.len() {
            1 => Phase::ConfirmingGuess(self.candidates[0]),
            2 => Phase::ChoosingBetween {
                options: self.candidates.clone(),
                rejected: None,
            },
            0 => self.insufficient_clues(),
            _ => {
                self.relax();
                match self.select() {
                    Some(question) => self.ask(question),
                    None => self.insufficient_clues(),
                }
            }
        }
    }

    fn select(&self) -> Option<Question> {
        let candidates = self.candidates();
        self.selector
            .select(&candidates, &self.asked_categories, &self.asked_questions)
    }

    fn ask(&mut self, question: Question) -> Phase {
        self.history.push(question.clone());
        Phase::AwaitingAnswer(question)
    }

    fn insufficient_clues(&self) -> Phase {
        let candidates = self.candidates.iter().map(|&i| self.name_of(i)).collect();
        self.finish(Outcome::InsufficientClues { candidates })
    }

    fn finish(&self, outcome: Outcome) -> Phase {
        debug!(session = %self.id, ?outcome, "session finished");
        Phase::Finished(outcome)
    }

    fn name_of(&self, index: usize) -> String {
        self.catalog
            .get(index)
            .map(|record| record.name.clone())
            .unwrap_or_default()
    }
}
