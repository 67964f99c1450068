//! Knowledge module - what the session has learned from the user.
//!
//! - **Questions**: (category, value) pairs put to the user, and their answers
//! - **Constraint store**: accepted and rejected facts per category
//! - **Asked sets**: questions and categories already covered

mod asked;
mod question;
mod store;

pub use asked::*;
pub use question::*;
pub use store::*;
