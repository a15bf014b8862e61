pub mod last_hadrons;
pub mod render;

use crate::config::Config;
use crate::events::EventReader;
use crate::particle_db::ParticleDb;
use crate::types::GeneratorRecord;
use crate::utils::progress_bar_builder::ProgressBarBuilder;
use anyhow::{anyhow, Context, Result};
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};

/// Particle table from the command line, else from the config file.
pub(crate) fn load_particle_db(table: Option<PathBuf>, config: &Config) -> Result<ParticleDb> {
    let path = table
        .or_else(|| config.particle_table.clone())
        .ok_or_else(|| anyhow!("No particle table given; pass --particle-table or set particle_table in config.toml"))?;
    let db = ParticleDb::from_path(&path)
        .with_context(|| format!("Failed to load particle table {}", path.display()))?;
    if db.is_empty() {
        return Err(anyhow!("Particle table {} has no entries", path.display()));
    }
    Ok(db)
}

/// Events of `path`, restricted to `selected` when it is not empty.
pub(crate) fn selected_events(
    path: &Path,
    selected: &[u64],
) -> Result<impl Iterator<Item = crate::error::Result<GeneratorRecord>>> {
    let selected = selected.to_vec();
    let reader = EventReader::open(path)
        .with_context(|| format!("Failed to open events file {}", path.display()))?;
    Ok(reader.filter(move |record| match record {
        Ok(record) => selected.is_empty() || selected.contains(&record.event()),
        Err(_) => true,
    }))
}

pub(crate) fn event_progress(message: &str, quiet: bool) -> Result<ProgressBar> {
    let builder = ProgressBarBuilder::new(message)
        .with_template("{spinner:.green} [{elapsed_precise}] {msg} {pos} events ({per_sec})")
        .with_tick();
    let builder = if quiet { builder.hidden() } else { builder };
    builder.build()
}
