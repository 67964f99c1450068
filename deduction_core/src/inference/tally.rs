//! Value frequencies across the current candidates.

use std::collections::{BTreeMap, BTreeSet};

/// Counts how many candidates exhibit each value of one category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueTally {
    counts: BTreeMap<String, usize>,
}

impl ValueTally {
    /// Create a new empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one candidate's values. A value repeated by the same candidate counts once.
    pub fn add_candidate<'a>(&mut self, values: impl IntoIterator<Item = &'a str>) {
        let distinct: BTreeSet<&str> = values.into_iter().collect();
        for value in distinct {
            *self.counts.entry(value.to_string()).or_default() += 1;
        }
    }

    /// Number of candidates exhibiting a value.
    pub fn get(&self, value: &str) -> usize {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// The most common value. Ties go to the value that sorts first.
    pub fn hottest(&self) -> Option<(&str, usize)> {
        let mut best: Option<(&str, usize)> = None;
        for (value, count) in &self.counts {
            if best.map_or(true, |(_, top)| *count > top) {
                best = Some((value.as_str(), *count));
            }
        }
        best
    }

    /// Iterate over values and their counts, in value order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(value, count)| (value.as_str(), *count))
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
