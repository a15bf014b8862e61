pub mod last_hadrons;

pub use last_hadrons::{find_last_hadrons, find_terminal_hadrons, Lineage};

use crate::error::{GenealogyError, Result};
use crate::types::GeneratorRecord;
use std::collections::HashSet;

/// Indices already handed out as someone's daughter during one traversal.
///
/// A fresh set is created for every pass (one rendered event, one classifier
/// sweep) and dropped with it.
#[derive(Debug, Default)]
pub struct VisitationSet {
    seen: HashSet<usize>,
}

impl VisitationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the index was already present.
    pub fn insert(&mut self, index: usize) -> bool {
        self.seen.insert(index)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Daughters of `mother` not yet claimed in this pass, in ascending order.
///
/// Only positions from `mother` onward are scanned, so the record must list
/// daughters after their mother (see [`GeneratorRecord::is_ordered`]).
pub fn children_of(
    mother: usize,
    visited: &mut VisitationSet,
    record: &GeneratorRecord,
) -> Vec<usize> {
    let mut daughters = Vec::new();
    for idx in mother..record.len() {
        if record.mother(idx) == Some(mother) && visited.insert(idx) {
            daughters.push(idx);
        }
    }
    daughters
}

/// Mother, grandmother, ... up to the root.
pub fn ancestors_of(index: usize, record: &GeneratorRecord) -> Result<Vec<usize>> {
    let mut mothers = Vec::new();
    let mut current = index;
    while let Some(mother) = record.mother(current) {
        if mothers.len() >= record.len() {
            return Err(GenealogyError::CorruptGenealogy {
                index,
                steps: mothers.len(),
            });
        }
        mothers.push(mother);
        current = mother;
    }
    Ok(mothers)
}
