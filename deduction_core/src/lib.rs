//! # Deduction Core
//!
//! The decision-narrowing engine of a twenty-questions style guessing game. It reads
//! an [`entity_catalog::Catalog`], asks yes/no/unknown questions about attribute
//! values, and narrows the candidates until it can name the entity the user is
//! thinking of.
//!
//! ## Core Components
//!
//! - **knowledge**: Questions, answers, and the constraint store of accepted/rejected facts
//! - **inference**: Forward chaining filter and the question selection heuristic
//! - **session**: The decision controller state machine, including recovery and enrollment
//! - **events**: Prompts and outcomes the session hands to the presentation layer
//! - **presenter**: The presentation seam and a blocking driver for it
//!
//! ## Design Philosophy
//!
//! - **Explicit state**: All session state lives in one [`Session`] value, never in globals
//! - **Recomputed, not patched**: Candidates are filtered from the full catalog every round
//! - **Presentation-agnostic**: The core returns prompts; it never renders or reads input

pub mod events;
pub mod inference;
pub mod knowledge;
pub mod presenter;
pub mod session;

pub use events::*;
pub use inference::*;
pub use knowledge::*;
pub use presenter::*;
pub use session::*;
