use crate::config::Config;
use crate::decay_chain::{render_event, RenderContext};
use crate::mass_table::MassTable;
use crate::particle_db::ParticleDb;
use crate::types::GeneratorRecord;
use crate::utils::event_pool::{run_events, EventProcessor};
use anyhow::{anyhow, Context, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Clone)]
struct DecayChainWriter {
    db: Arc<ParticleDb>,
    masses: Arc<MassTable>,
    output_dir: PathBuf,
}

impl DecayChainWriter {
    fn output_path(&self, event: u64) -> PathBuf {
        self.output_dir.join(format!("event_{}.txt", event))
    }

    fn write_event(&self, record: &GeneratorRecord, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        let ctx = RenderContext::new(&self.db, &self.masses);
        render_event(record, &ctx, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

impl EventProcessor for DecayChainWriter {
    fn process_event(&mut self, record: &GeneratorRecord) -> Result<()> {
        let path = self.output_path(record.event());
        let result = self.write_event(record, &path);
        if result.is_err() {
            // no half-written trees
            let _ = fs::remove_file(&path);
        }
        result.with_context(|| format!("event {}", record.event()))
    }
}

pub fn run(
    config: &Config,
    events_file: PathBuf,
    output_dir: PathBuf,
    particle_table: Option<PathBuf>,
    threads: Option<usize>,
    selected: Vec<u64>,
    quiet: bool,
) -> Result<()> {
    let db = super::load_particle_db(particle_table, config)?;
    let masses = MassTable::default().with_overrides(&config.masses);

    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;

    let mut writer = DecayChainWriter {
        db: Arc::new(db),
        masses: Arc::new(masses),
        output_dir: output_dir.clone(),
    };

    let progress = super::event_progress("Rendering decay chains", quiet)?;
    let events = super::selected_events(&events_file, &selected)?;
    let stats = run_events(
        events,
        &mut writer,
        threads.unwrap_or(config.threads),
        &progress,
    )?;

    progress.finish_with_message(format!(
        "Rendered {} events to {}",
        stats.processed,
        output_dir.display()
    ));

    if stats.errors > 0 {
        return Err(anyhow!("{} events failed to render", stats.errors));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_failed_event_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let db = ParticleDb::from_reader(Cursor::new("25,H,boson,0\n")).unwrap();
        let mut writer = DecayChainWriter {
            db: Arc::new(db),
            masses: Arc::new(MassTable::default()),
            output_dir: dir.path().to_path_buf(),
        };

        let good = GeneratorRecord::from_genealogy(1, vec![25], vec![-1]).unwrap();
        writer.process_event(&good).unwrap();
        assert!(dir.path().join("event_1.txt").exists());

        let bad = GeneratorRecord::from_genealogy(2, vec![25, 5], vec![-1, 0]).unwrap();
        assert!(writer.process_event(&bad).is_err());
        assert!(!dir.path().join("event_2.txt").exists());
    }
}
