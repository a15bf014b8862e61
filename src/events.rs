use crate::error::{GenealogyError, Result};
use crate::types::{GeneratorRecord, RawRecord};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reads generator records from JSON Lines, one event per line.
///
/// Blank lines are skipped. Records without an event number get their
/// 0-based position in the file. Event numbers must be unique within a file,
/// since they name the per-event outputs. Records whose daughters precede
/// their mother are passed through with a warning.
pub struct EventReader<R: BufRead> {
    reader: R,
    line: String,
    line_no: usize,
    records: u64,
    seen: HashSet<u64>,
}

impl EventReader<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> EventReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            line_no: 0,
            records: 0,
            seen: HashSet::new(),
        }
    }

    fn read_record(&mut self) -> Result<Option<GeneratorRecord>> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            self.line_no += 1;
            let trimmed = self.line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let mut raw: RawRecord = serde_json::from_str(trimmed)?;
            let position = self.records;
            self.records += 1;
            let event = *raw.event.get_or_insert(position);
            if !self.seen.insert(event) {
                return Err(GenealogyError::DuplicateEvent {
                    event,
                    line: self.line_no,
                });
            }

            let record = GeneratorRecord::try_from(raw)?;
            if !record.is_ordered() {
                log::warn!(
                    "event {} (line {}): daughters listed before their mother, children lookup may miss them",
                    record.event(),
                    self.line_no
                );
            }
            return Ok(Some(record));
        }
    }
}

impl<R: BufRead> Iterator for EventReader<R> {
    type Item = Result<GeneratorRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

/// Loads every event of a JSONL file.
pub fn load_events(path: impl AsRef<Path>) -> Result<Vec<GeneratorRecord>> {
    let events = EventReader::open(path.as_ref())?.collect::<Result<Vec<_>>>()?;
    log::info!(
        "Loaded {} events from {}",
        events.len(),
        path.as_ref().display()
    );
    Ok(events)
}
