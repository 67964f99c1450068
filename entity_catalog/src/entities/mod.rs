//! Entity definitions: the attribute schema and the records built on it.

mod attribute;
mod record;

pub use attribute::*;
pub use record::*;

use serde::{Deserialize, Serialize};

/// How many values a category holds per entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeKind {
    /// Exactly one value (possibly empty when unknown).
    Scalar,
    /// An ordered list of values. A lone string is read as a one-element list.
    List,
}

/// The attribute categories every entity exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Gender,
    Hair,
    Affiliation,
    Powers,
    Nationality,
}

/// Static schema table, indexed by `Category as usize`.
pub const SCHEMA: [(Category, AttributeKind); 5] = [
    (Category::Gender, AttributeKind::Scalar),
    (Category::Hair, AttributeKind::List),
    (Category::Affiliation, AttributeKind::Scalar),
    (Category::Powers, AttributeKind::List),
    (Category::Nationality, AttributeKind::Scalar),
];

impl Category {
    /// Every category, in schema order.
    pub const ALL: [Category; 5] = [
        Category::Gender,
        Category::Hair,
        Category::Affiliation,
        Category::Powers,
        Category::Nationality,
    ];

    /// Categories the engine asks about, highest priority first.
    /// `Nationality` is collected when enrolling entities but never asked.
    pub const QUESTION_ORDER: [Category; 4] = [
        Category::Gender,
        Category::Hair,
        Category::Affiliation,
        Category::Powers,
    ];

    /// The attribute kind from the schema table.
    pub fn kind(self) -> AttributeKind {
        SCHEMA[self as usize].1
    }

    /// Storage key of this category.
    pub fn key(self) -> &'static str {
        match self {
            Category::Gender => "gender",
            Category::Hair => "hair",
            Category::Affiliation => "affiliation",
            Category::Powers => "powers",
            Category::Nationality => "nationality",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
