use super::{ancestors_of, children_of, VisitationSet};
use crate::error::Result;
use crate::particle_db::ParticleDb;
use crate::types::GeneratorRecord;
use serde::{Deserialize, Serialize};

/// The two ancestor codes a last hadron must descend from, compared by
/// absolute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineage {
    #[serde(default = "default_quark")]
    pub quark: i32,
    #[serde(default = "default_resonance")]
    pub resonance: i32,
}

fn default_quark() -> i32 {
    5
}

fn default_resonance() -> i32 {
    25
}

impl Default for Lineage {
    fn default() -> Self {
        Self {
            quark: default_quark(),
            resonance: default_resonance(),
        }
    }
}

impl Lineage {
    fn matches(&self, record: &GeneratorRecord, mothers: &[usize]) -> bool {
        let from = |code: i32| {
            mothers
                .iter()
                .any(|&m| record.pdg_id(m).abs() == code.abs())
        };
        from(self.quark) && from(self.resonance)
    }
}

/// Last hadrons of the default b-from-Higgs lineage.
pub fn find_terminal_hadrons(record: &GeneratorRecord, db: &ParticleDb) -> Result<Vec<usize>> {
    find_last_hadrons(record, db, Lineage::default())
}

/// Hadrons descending from both lineage codes whose daughters contain no
/// further hadron, in ascending index order.
///
/// One visitation set spans the whole sweep. Every particle has a single
/// mother and is queried once, so sharing it never hides a daughter.
pub fn find_last_hadrons(
    record: &GeneratorRecord,
    db: &ParticleDb,
    lineage: Lineage,
) -> Result<Vec<usize>> {
    let mut visited = VisitationSet::new();
    let mut last_hadrons = Vec::new();

    for idx in 0..record.len() {
        let daughters = children_of(idx, &mut visited, record);
        let mothers = ancestors_of(idx, record)?;

        // Every daughter is resolved, so an unknown code fails the sweep even
        // outside the lineage.
        let mut has_hadron_daughters = false;
        for &daughter in &daughters {
            if db.is_hadron(record.pdg_id(daughter))? {
                has_hadron_daughters = true;
            }
        }

        if !lineage.matches(record, &mothers) || has_hadron_daughters {
            continue;
        }

        if db.is_hadron(record.pdg_id(idx))? {
            log::trace!(
                "event {}: particle {} ({}) is a last hadron",
                record.event(),
                idx,
                record.pdg_id(idx)
            );
            last_hadrons.push(idx);
        }
    }

    Ok(last_hadrons)
}
