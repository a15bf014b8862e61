use crate::error::{GenealogyError, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct ParticleInfo {
    pub pdg_id: i32,
    pub name: String,
    pub category: String,
    pub charge: i32,
}

impl ParticleInfo {
    /// Baryons and mesons.
    pub fn is_hadron(&self) -> bool {
        self.category == "baryon" || self.category == "meson"
    }
}

/// Particle metadata keyed by PDG id, loaded once from a
/// `pdgId,name,type,charge` table.
#[derive(Debug, Default, Clone)]
pub struct ParticleDb {
    particles: HashMap<i32, ParticleInfo>,
}

impl ParticleDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let db = Self::from_reader(BufReader::new(file))?;
        log::info!(
            "Loaded {} particle definitions from {}",
            db.len(),
            path.as_ref().display()
        );
        Ok(db)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut db = Self::new();
        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            db.insert(parse_line(trimmed, line_no + 1)?);
        }
        Ok(db)
    }

    pub fn insert(&mut self, info: ParticleInfo) {
        self.particles.insert(info.pdg_id, info);
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn get(&self, pdg_id: i32) -> Result<&ParticleInfo> {
        if self.particles.is_empty() {
            return Err(GenealogyError::NotInitialized);
        }
        self.particles
            .get(&pdg_id)
            .ok_or(GenealogyError::UnknownParticle(pdg_id))
    }

    pub fn is_hadron(&self, pdg_id: i32) -> Result<bool> {
        Ok(self.get(pdg_id)?.is_hadron())
    }
}

fn parse_line(line: &str, line_no: usize) -> Result<ParticleInfo> {
    let bad = |reason: String| GenealogyError::ParticleTable {
        line: line_no,
        reason,
    };

    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < 4 {
        return Err(bad(format!("expected 4 fields, found {}", fields.len())));
    }

    let pdg_id = fields[0]
        .parse::<i32>()
        .map_err(|e| bad(format!("invalid pdgId '{}': {}", fields[0], e)))?;
    let charge = fields[3]
        .parse::<i32>()
        .map_err(|e| bad(format!("invalid charge '{}': {}", fields[3], e)))?;

    Ok(ParticleInfo {
        pdg_id,
        name: fields[1].to_string(),
        category: fields[2].to_string(),
        charge,
    })
}
