//! The presentation seam, and a blocking driver that plays a session through it.

mod scripted;

pub use scripted::*;

use entity_catalog::CatalogStore;
use std::io;
use thiserror::Error;

use crate::events::{ImageHint, Outcome, Prompt};
use crate::knowledge::{Answer, Question};
use crate::session::{Session, SessionError};

/// Renders prompts and collects the user's replies.
///
/// Every request blocks until the user replies.
pub trait Presenter {
    fn show_question(&mut self, question: &Question) -> io::Result<()>;

    fn show_guess(&mut self, name: &str, image: &ImageHint) -> io::Result<()>;

    fn request_answer(&mut self) -> io::Result<Answer>;

    fn request_confirmation(&mut self, prompt: &str) -> io::Result<bool>;

    /// `None` (or an empty string) means the user skipped or cancelled.
    fn request_free_text(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Informational message that does not end the play-through.
    fn notify(&mut self, message: &str) -> io::Result<()>;

    fn notify_terminal(&mut self, outcome: &Outcome) -> io::Result<()>;
}

/// Errors from playing a session through a presenter.
#[derive(Debug, Error)]
pub enum PlayError {
    #[error("presentation failed: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Play one full round from a clean slate until it finishes.
pub fn play<P>(
    session: &mut Session,
    presenter: &mut P,
    store: &dyn CatalogStore,
) -> Result<Outcome, PlayError>
where
    P: Presenter + ?Sized,
{
    let prompt = session.start();
    drive(session, presenter, store, prompt)
}

/// Feed `prompt` and every prompt after it to the presenter until the session finishes.
pub fn drive<P>(
    session: &mut Session,
    presenter: &mut P,
    store: &dyn CatalogStore,
    mut prompt: Prompt,
) -> Result<Outcome, PlayError>
where
    P: Presenter + ?Sized,
{
    loop {
        prompt = match prompt {
            Prompt::Question(question) => {
                presenter.show_question(&question)?;
                let answer = presenter.request_answer()?;
                session.answer(answer)?
            }
            Prompt::Guess { name, image } => {
                presenter.show_guess(&name, &image)?;
                let correct =
                    presenter.request_confirmation(&format!("Is your character {name}?"))?;
                session.confirm_guess(correct)?
            }
            Prompt::Choose { options, rejected } => {
                if let Some(input) = rejected {
                    presenter.notify(&format!("'{input}' is not one of the options."))?;
                }
                let choice = presenter.request_free_text(&format!(
                    "I can't decide for sure. Please choose one of these characters:\n{}\n\nType the name exactly:",
                    options.join(", ")
                ))?;
                session.choose(choice.as_deref().unwrap_or(""))?
            }
            Prompt::OfferEnrollment(reason) => {
                let accept = presenter.request_confirmation(&reason.phrase())?;
                session.respond_to_offer(accept)?
            }
            Prompt::Field { text, .. } => {
                let value = presenter.request_free_text(&text)?;
                session.submit_field(value.as_deref().unwrap_or(""))?
            }
            Prompt::ConfirmEnrollment(record) => {
                let accept = presenter.request_confirmation(&format!(
                    "Do you want to add this character?\n\n{}",
                    record.summary()
                ))?;
                session.confirm_enrollment(accept, store)?
            }
            Prompt::Finished(outcome) => {
                presenter.notify_terminal(&outcome)?;
                return Ok(outcome);
            }
        };
    }
}
