//! A presenter that replays canned replies, for tests and scripted harnesses.

use std::collections::VecDeque;
use std::io;

use super::Presenter;
use crate::events::{ImageHint, Outcome};
use crate::knowledge::{Answer, Question};

/// One canned reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Answer(Answer),
    Confirm(bool),
    Text(String),
}

impl Reply {
    pub fn text(value: impl Into<String>) -> Self {
        Reply::Text(value.into())
    }
}

/// Something the presenter was asked to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shown {
    Question(Question),
    Guess { name: String, image: ImageHint },
    ConfirmationRequest(String),
    TextRequest(String),
    Notice(String),
    Outcome(Outcome),
}

/// Replays replies in order and records everything shown.
///
/// Running out of replies, or a reply of the wrong kind, is an I/O error.
#[derive(Debug, Default)]
pub struct ScriptedPresenter {
    replies: VecDeque<Reply>,
    transcript: Vec<Shown>,
}

impl ScriptedPresenter {
    /// Create a presenter with the given replies.
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: replies.into_iter().collect(),
            transcript: Vec::new(),
        }
    }

    /// Everything shown so far, in order.
    pub fn transcript(&self) -> &[Shown] {
        &self.transcript
    }

    /// Questions shown so far, in order.
    pub fn questions(&self) -> Vec<&Question> {
        self.transcript
            .iter()
            .filter_map(|shown| match shown {
                Shown::Question(question) => Some(question),
                _ => None,
            })
            .collect()
    }

    /// Names guessed so far, in order.
    pub fn guesses(&self) -> Vec<&str> {
        self.transcript
            .iter()
            .filter_map(|shown| match shown {
                Shown::Guess { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Replies not consumed yet.
    pub fn remaining(&self) -> usize {
        self.replies.len()
    }

    fn next_reply(&mut self, wanted: &str) -> io::Result<Reply> {
        self.replies.pop_front().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("script ran out while waiting for {wanted}"),
            )
        })
    }

    fn mismatch(wanted: &str, got: &Reply) -> io::Error {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("expected {wanted}, script has {got:?}"),
        )
    }
}

impl Presenter for ScriptedPresenter {
    fn show_question(&mut self, question: &Question) -> io::Result<()> {
        self.transcript.push(Shown::Question(question.clone()));
        Ok(())
    }

    fn show_guess(&mut self, name: &str, image: &ImageHint) -> io::Result<()> {
        self.transcript.push(Shown::Guess {
            name: name.to_string(),
            image: image.clone(),
        });
        Ok(())
    }

    fn request_answer(&mut self) -> io::Result<Answer> {
        match self.next_reply("an answer")? {
            Reply::Answer(answer) => Ok(answer),
            other => Err(Self::mismatch("an answer", &other)),
        }
    }

    fn request_confirmation(&mut self, prompt: &str) -> io::Result<bool> {
        self.transcript
            .push(Shown::ConfirmationRequest(prompt.to_string()));
        match self.next_reply("a confirmation")? {
            Reply::Confirm(value) => Ok(value),
            other => Err(Self::mismatch("a confirmation", &other)),
        }
    }

    fn request_free_text(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.transcript.push(Shown::TextRequest(prompt.to_string()));
        match self.next_reply("free text")? {
            Reply::Text(text) if text.is_empty() => Ok(None),
            Reply::Text(text) => Ok(Some(text)),
            other => Err(Self::mismatch("free text", &other)),
        }
    }

    fn notify(&mut self, message: &str) -> io::Result<()> {
        self.transcript.push(Shown::Notice(message.to_string()));
        Ok(())
    }

    fn notify_terminal(&mut self, outcome: &Outcome) -> io::Result<()> {
        self.transcript.push(Shown::Outcome(outcome.clone()));
        Ok(())
    }
}
