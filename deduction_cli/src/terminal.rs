//! Line-oriented presenter over any reader/writer pair (stdin/stdout in the binary).

use deduction_core::{Answer, ImageHint, Outcome, Presenter, Question};
use std::io::{self, BufRead, Write};

use crate::config::ImageConfig;

/// Plays a session as a question-and-answer dialogue in the terminal.
///
/// End of input is reported as [`io::ErrorKind::UnexpectedEof`].
pub struct TerminalPresenter<R, W> {
    input: R,
    output: W,
    images: ImageConfig,
}

impl<R: BufRead, W: Write> TerminalPresenter<R, W> {
    pub fn new(input: R, output: W, images: ImageConfig) -> Self {
        Self {
            input,
            output,
            images,
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self) -> io::Result<String> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead, W: Write> Presenter for TerminalPresenter<R, W> {
    fn show_question(&mut self, question: &Question) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", question.phrase())
    }

    fn show_guess(&mut self, name: &str, image: &ImageHint) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "I think your character is {name}!")?;
        if let Some(path) = image.resolve(&self.images.dir, &self.images.extension) {
            writeln!(self.output, "(picture: {})", path.display())?;
        }
        Ok(())
    }

    fn request_answer(&mut self) -> io::Result<Answer> {
        loop {
            write!(self.output, "[y]es / [n]o / [?] don't know: ")?;
            let line = self.read_line()?;
            match Answer::parse(&line) {
                Some(answer) => return Ok(answer),
                None => writeln!(self.output, "Please answer yes, no, or ? if you don't know.")?,
            }
        }
    }

    fn request_confirmation(&mut self, prompt: &str) -> io::Result<bool> {
        writeln!(self.output, "{prompt}")?;
        loop {
            write!(self.output, "[y]es / [n]o: ")?;
            let line = self.read_line()?;
            match Answer::parse(&line) {
                Some(Answer::Yes) => return Ok(true),
                Some(Answer::No) => return Ok(false),
                _ => writeln!(self.output, "Please answer yes or no.")?,
            }
        }
    }

    fn request_free_text(&mut self, prompt: &str) -> io::Result<Option<String>> {
        writeln!(self.output, "{prompt}")?;
        write!(self.output, "> ")?;
        let line = self.read_line()?;
        Ok((!line.is_empty()).then_some(line))
    }

    fn notify(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{message}")
    }

    fn notify_terminal(&mut self, outcome: &Outcome) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{outcome}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deduction_core::{play, Session};
    use entity_catalog::{Catalog, Category, EntityRecord, MemoryStore};
    use std::io::Cursor;
    use tempfile::TempDir;

    fn presenter(input: &str) -> TerminalPresenter<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalPresenter::new(
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
            ImageConfig::default(),
        )
    }

    fn output(presenter: TerminalPresenter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(presenter.into_output()).unwrap()
    }

    #[test]
    fn test_answer_reprompts_until_recognised() {
        let mut presenter = presenter("maybe\n\n  N \n");
        assert_eq!(presenter.request_answer().unwrap(), Answer::No);
        let text = output(presenter);
        assert_eq!(text.matches("Please answer").count(), 2);
    }

    #[test]
    fn test_unknown_answer() {
        let mut presenter = presenter("?\n");
        assert_eq!(presenter.request_answer().unwrap(), Answer::Unknown);
    }

    #[test]
    fn test_confirmation_rejects_unknown() {
        let mut presenter = presenter("?\nyes\n");
        assert!(presenter.request_confirmation("Is your character Storm?").unwrap());
        assert!(output(presenter).contains("Is your character Storm?"));
    }

    #[test]
    fn test_blank_free_text_is_none() {
        let mut presenter = presenter("   \n Gambit \n");
        assert_eq!(presenter.request_free_text("Name:").unwrap(), None);
        assert_eq!(
            presenter.request_free_text("Name:").unwrap(),
            Some("Gambit".to_string())
        );
    }

    #[test]
    fn test_end_of_input_is_eof_error() {
        let mut presenter = presenter("");
        let error = presenter.request_answer().unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_guess_mentions_picture_only_when_present() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("storm.jpg"), b"jpeg").unwrap();
        let images = ImageConfig {
            dir: dir.path().to_path_buf(),
            extension: "jpg".to_string(),
        };
        let mut presenter = TerminalPresenter::new(Cursor::new(Vec::new()), Vec::new(), images);

        presenter
            .show_guess("Storm", &ImageHint::for_record(&EntityRecord::new("Storm")))
            .unwrap();
        presenter
            .show_guess("Rogue", &ImageHint::for_record(&EntityRecord::new("Rogue")))
            .unwrap();

        let text = String::from_utf8(presenter.into_output()).unwrap();
        assert!(text.contains("storm.jpg"));
        assert!(!text.contains("rogue.jpg"));
    }

    #[test]
    fn test_full_round_over_text() {
        let records = vec![
            EntityRecord::new("Wolverine").with_text(Category::Gender, "male"),
            EntityRecord::new("Storm").with_text(Category::Gender, "female"),
        ];
        let store = MemoryStore::new(records.clone());
        let mut session = Session::new(Catalog::from_records(records)).unwrap();
        // Whichever gender is asked, "no" leaves a single guess.
        let mut presenter = presenter("n\ny\n");

        let outcome = play(&mut session, &mut presenter, &store).unwrap();

        assert!(matches!(outcome, Outcome::Solved(_)));
        let text = output(presenter);
        assert!(text.contains("Is your character's gender"));
        assert!(text.contains("I guessed right"));
    }
}
