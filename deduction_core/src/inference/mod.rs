//! Inference - narrowing the catalog and choosing what to ask next.
//!
//! Each round works as follows:
//! 1. **Forward chaining**: Filter the full catalog against every accepted and rejected fact
//! 2. **Tally**: Count, per unasked value, how many candidates exhibit it
//! 3. **Selection**: Walk the categories in priority order and ask the most common value
//!
//! Backward chaining (stopping when one candidate is left) lives in the session.

mod selector;
mod tally;

pub use selector::*;
pub use tally::*;

use entity_catalog::EntityRecord;

use crate::knowledge::FactSet;

/// Check an entity against accepted and rejected facts.
///
/// Within a category the entity must show at least one accepted value and none of the
/// rejected ones; across categories every condition must hold.
pub fn admits(entity: &EntityRecord, yes: &FactSet, no: &FactSet) -> bool {
    let accepted = yes.iter().all(|(category, values)| {
        entity
            .values(category)
            .iter()
            .any(|value| values.contains(*value))
    });
    let not_rejected = || {
        no.iter().all(|(category, values)| {
            entity
                .values(category)
                .iter()
                .all(|value| !values.contains(*value))
        })
    };
    accepted && not_rejected()
}

/// Entities consistent with all facts, in catalog order.
pub fn forward_chain<'a, I>(entities: I, yes: &FactSet, no: &FactSet) -> Vec<&'a EntityRecord>
where
    I: IntoIterator<Item = &'a EntityRecord>,
{
    entities
        .into_iter()
        .filter(|entity| admits(entity, yes, no))
        .collect()
}

/// Positions of the entities consistent with all facts.
pub fn forward_chain_indices(entities: &[EntityRecord], yes: &FactSet, no: &FactSet) -> Vec<usize> {
    entities
        .iter()
        .enumerate()
        .filter(|(_, entity)| admits(entity, yes, no))
        .map(|(index, _)| index)
        .collect()
}
