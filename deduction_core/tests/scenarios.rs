//! Whole play-throughs driven through the presenter seam.

use std::collections::BTreeSet;
use std::io;

use deduction_core::{
    play, Answer, ImageHint, Outcome, Presenter, Prompt, Question, Reply, ScriptedPresenter,
    Session, Shown,
};
use entity_catalog::{Catalog, CatalogStore, Category, EntityRecord, JsonFileStore, MemoryStore};
use tempfile::TempDir;

fn mutant(
    name: &str,
    gender: &str,
    hair: &str,
    affiliation: &str,
    powers: &[&str],
) -> EntityRecord {
    EntityRecord::new(name)
        .with_text(Category::Gender, gender)
        .with_text(Category::Hair, hair)
        .with_text(Category::Affiliation, affiliation)
        .with_list(Category::Powers, powers.iter().copied())
}

fn roster() -> Vec<EntityRecord> {
    vec![
        mutant("Wolverine", "male", "black", "X-Men", &["healing", "claws"]),
        mutant("Storm", "female", "white", "X-Men", &["weather", "flight"]),
        mutant("Magneto", "male", "white", "Brotherhood", &["magnetism", "flight"]),
        mutant("Mystique", "female", "blue", "Brotherhood", &["shapeshifting"]),
    ]
}

/// Answers truthfully on behalf of someone thinking of `target`.
struct Oracle {
    target: EntityRecord,
    asked: Vec<Question>,
    pending: Option<Question>,
    guesses: Vec<String>,
    outcome: Option<Outcome>,
}

impl Oracle {
    fn new(target: EntityRecord) -> Self {
        Self {
            target,
            asked: Vec::new(),
            pending: None,
            guesses: Vec::new(),
            outcome: None,
        }
    }
}

impl Presenter for Oracle {
    fn show_question(&mut self, question: &Question) -> io::Result<()> {
        self.asked.push(question.clone());
        self.pending = Some(question.clone());
        Ok(())
    }

    fn show_guess(&mut self, name: &str, _image: &ImageHint) -> io::Result<()> {
        self.guesses.push(name.to_string());
        Ok(())
    }

    fn request_answer(&mut self) -> io::Result<Answer> {
        let question = self.pending.take().expect("answer requested without a question");
        if self.target.values(question.category).is_empty() {
            Ok(Answer::Unknown)
        } else if self.target.has_value(question.category, &question.value) {
            Ok(Answer::Yes)
        } else {
            Ok(Answer::No)
        }
    }

    fn request_confirmation(&mut self, _prompt: &str) -> io::Result<bool> {
        // Only guesses get confirmed; enrollment offers are declined.
        Ok(self
            .guesses
            .last()
            .is_some_and(|name| self.target.is_named(name))
            && self.outcome.is_none())
    }

    fn request_free_text(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let name = &self.target.name;
        Ok(prompt.contains(name.as_str()).then(|| name.clone()))
    }

    fn notify(&mut self, _message: &str) -> io::Result<()> {
        Ok(())
    }

    fn notify_terminal(&mut self, outcome: &Outcome) -> io::Result<()> {
        self.outcome = Some(outcome.clone());
        Ok(())
    }
}

#[test]
fn test_every_entity_is_found_within_bound() {
    let records = roster();
    let store = MemoryStore::new(records.clone());
    let mut session = Session::load(&store).unwrap();

    for target in &records {
        let mut oracle = Oracle::new(target.clone());
        let outcome = play(&mut session, &mut oracle, &store).unwrap();

        assert_eq!(outcome, Outcome::Solved(target.name.clone()));
        assert!(oracle.asked.len() < records.len());
        assert_eq!(oracle.guesses, vec![target.name.clone()]);
    }
    assert_eq!(store.save_count(), 0);
}

#[test]
fn test_no_question_is_repeated() {
    let records = roster();
    let store = MemoryStore::new(records.clone());
    let mut session = Session::load(&store).unwrap();

    // Someone nobody in the roster matches.
    let phantom = mutant("Polaris", "female", "green", "X-Men", &["magnetism"]);
    let mut oracle = Oracle::new(phantom);
    play(&mut session, &mut oracle, &store).unwrap();

    let distinct: BTreeSet<_> = oracle.asked.iter().collect();
    assert_eq!(distinct.len(), oracle.asked.len());
    assert_eq!(session.history(), oracle.asked.as_slice());
    assert!(oracle.asked.iter().all(|q| q.category != Category::Nationality));
    assert!(oracle.outcome.is_some());
}

#[test]
fn test_unknown_answers_exhaust_questions() {
    let store = MemoryStore::new(roster());
    let mut session = Session::load(&store).unwrap();
    let mut presenter = ScriptedPresenter::new(vec![Reply::Answer(Answer::Unknown); 4]);

    let outcome = play(&mut session, &mut presenter, &store).unwrap();

    let Outcome::InsufficientClues { candidates } = outcome else {
        panic!("expected insufficient clues, got {outcome:?}");
    };
    assert_eq!(candidates, vec!["Wolverine", "Storm", "Magneto", "Mystique"]);

    let categories: Vec<_> = presenter.questions().iter().map(|q| q.category).collect();
    assert_eq!(
        categories,
        vec![
            Category::Gender,
            Category::Hair,
            Category::Affiliation,
            Category::Powers
        ]
    );
    assert_eq!(presenter.remaining(), 0);
}

#[test]
fn test_guess_rejected_then_enrolled_and_persisted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mutants.json");
    let store = JsonFileStore::new(&path);
    store
        .save(&[
            mutant("Wolverine", "male", "black", "X-Men", &["healing", "claws"]),
            mutant("Storm", "female", "white", "X-Men", &["weather"]),
        ])
        .unwrap();

    let mut session = Session::load(&store).unwrap();
    let first = match session.prompt() {
        Prompt::Question(question) => question,
        other => panic!("expected a question, got {other:?}"),
    };
    // Whichever gender comes up, "no" points at the other mutant.
    let mut presenter = ScriptedPresenter::new([
        Reply::Answer(Answer::No),
        Reply::Confirm(false),
        Reply::Confirm(true),
        Reply::text("Gambit"),
        Reply::text("male"),
        Reply::text("brown"),
        Reply::text("X-Men"),
        Reply::text(""),
        Reply::text("kinetic charge"),
        Reply::text(""),
        Reply::Confirm(true),
    ]);

    let outcome = play(&mut session, &mut presenter, &store).unwrap();

    assert_eq!(outcome, Outcome::Added("Gambit".to_string()));
    assert_eq!(presenter.questions(), vec![&first]);
    assert_eq!(presenter.guesses().len(), 1);

    let reloaded = Catalog::from_records(store.load().unwrap());
    assert_eq!(reloaded.len(), 3);
    let gambit = reloaded.find("gambit").unwrap();
    assert_eq!(gambit.values(Category::Powers), vec!["kinetic charge"]);
    assert!(gambit.values(Category::Nationality).is_empty());

    // The new entity can be found in the next round.
    let mut oracle = Oracle::new(gambit.clone());
    let outcome = play(&mut session, &mut oracle, &store).unwrap();
    assert_eq!(outcome, Outcome::Solved("Gambit".to_string()));
}

#[test]
fn test_two_way_choice_through_presenter() {
    let store = MemoryStore::new(vec![
        mutant("Wolverine", "male", "black", "X-Men", &["claws"]),
        mutant("Daken", "male", "black", "X-Men", &["claws"]),
    ]);
    let mut session = Session::load(&store).unwrap();
    let mut presenter = ScriptedPresenter::new([
        Reply::Answer(Answer::Yes),
        Reply::Answer(Answer::Yes),
        Reply::Answer(Answer::Yes),
        Reply::Answer(Answer::Yes),
        Reply::text("Sabretooth"),
        Reply::text("wolverine"),
        Reply::Confirm(true),
    ]);

    let outcome = play(&mut session, &mut presenter, &store).unwrap();

    assert_eq!(outcome, Outcome::Solved("Wolverine".to_string()));
    assert!(presenter
        .transcript()
        .iter()
        .any(|shown| matches!(shown, Shown::Notice(text) if text.contains("Sabretooth"))));
}

#[test]
fn test_script_running_dry_is_an_io_error() {
    let store = MemoryStore::new(roster());
    let mut session = Session::load(&store).unwrap();
    let mut presenter = ScriptedPresenter::default();

    let error = play(&mut session, &mut presenter, &store).unwrap_err();
    assert!(error.to_string().contains("presentation failed"));
}

#[test]
fn test_sample_catalog_is_playable() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../data/mutants.json");
    let store = JsonFileStore::new(path);
    let records = store.load().unwrap();
    let mut session = Session::load(&store).unwrap();

    for target in &records {
        let mut oracle = Oracle::new(target.clone());
        let outcome = play(&mut session, &mut oracle, &store).unwrap();

        assert_eq!(outcome, Outcome::Solved(target.name.clone()), "{}", target.name);
        let distinct: BTreeSet<_> = oracle.asked.iter().collect();
        assert_eq!(distinct.len(), oracle.asked.len(), "{}", target.name);
    }
}
