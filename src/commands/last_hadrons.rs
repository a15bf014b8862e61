use crate::config::Config;
use crate::genealogy::{find_last_hadrons, Lineage};
use crate::particle_db::ParticleDb;
use crate::types::GeneratorRecord;
use crate::utils::event_pool::{run_events, EventProcessor};
use anyhow::{anyhow, Context, Result};
use chrono::Local;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct LastHadronRow {
    pub event: u64,
    pub index: usize,
    pub pdg_id: i32,
    pub name: String,
}

#[derive(Clone)]
struct LastHadronCollector {
    db: Arc<ParticleDb>,
    lineage: Lineage,
    rows: Vec<LastHadronRow>,
}

impl EventProcessor for LastHadronCollector {
    fn process_event(&mut self, record: &GeneratorRecord) -> Result<()> {
        let found = find_last_hadrons(record, &self.db, self.lineage)
            .with_context(|| format!("event {}", record.event()))?;
        for index in found {
            let pdg_id = record.pdg_id(index);
            self.rows.push(LastHadronRow {
                event: record.event(),
                index,
                pdg_id,
                name: self.db.get(pdg_id)?.name.clone(),
            });
        }
        Ok(())
    }

    fn merge_processor(&mut self, other: Self) -> Result<()> {
        self.rows.extend(other.rows);
        Ok(())
    }
}

fn write_report<W: Write>(rows: &[LastHadronRow], lineage: Lineage, out: &mut W) -> Result<()> {
    writeln!(out, "# generated {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(
        out,
        "# lineage |pdgId| {} under {}",
        lineage.quark, lineage.resonance
    )?;
    writeln!(out, "event\tindex\tpdg_id\tname")?;
    for row in rows {
        writeln!(out, "{}\t{}\t{}\t{}", row.event, row.index, row.pdg_id, row.name)?;
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    config: &Config,
    events_file: PathBuf,
    output_file: PathBuf,
    particle_table: Option<PathBuf>,
    threads: Option<usize>,
    lineage: Option<Lineage>,
    selected: Vec<u64>,
    quiet: bool,
) -> Result<()> {
    let db = super::load_particle_db(particle_table, config)?;
    let lineage = lineage.unwrap_or(config.lineage);

    let mut collector = LastHadronCollector {
        db: Arc::new(db),
        lineage,
        rows: Vec::new(),
    };

    let progress = super::event_progress("Searching last hadrons", quiet)?;
    let events = super::selected_events(&events_file, &selected)?;
    let stats = run_events(
        events,
        &mut collector,
        threads.unwrap_or(config.threads),
        &progress,
    )?;

    let mut rows = collector.rows;
    rows.sort_by_key(|row| (row.event, row.index));

    let file = File::create(&output_file)
        .with_context(|| format!("Failed to create {}", output_file.display()))?;
    let mut writer = BufWriter::new(file);
    write_report(&rows, lineage, &mut writer)?;
    writer.flush()?;

    progress.finish_with_message(format!(
        "Found {} last hadrons in {} events",
        rows.len(),
        stats.processed
    ));
    log::info!("Wrote {}", output_file.display());

    if stats.errors > 0 {
        return Err(anyhow!("{} events failed classification", stats.errors));
    }
    Ok(())
}
