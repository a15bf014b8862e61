use crate::types::GeneratorRecord;
use crate::utils::progress_bar_builder::ProgressBarBuilder;
use anyhow::{anyhow, Result};
use crossbeam_channel::{bounded, Sender};
use indicatif::ProgressBar;
use std::thread;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EventStats {
    pub processed: u64,
    pub errors: u64,
}

impl EventStats {
    fn add(&mut self, other: EventStats) {
        self.processed += other.processed;
        self.errors += other.errors;
    }
}

/// Per-event work item. Each worker owns a clone; clones are merged back into
/// the caller's processor once all events are done.
pub trait EventProcessor: Send + Clone + 'static {
    fn process_event(&mut self, record: &GeneratorRecord) -> Result<()>;

    fn merge_processor(&mut self, _other: Self) -> Result<()> {
        Ok(())
    }
}

pub struct EventPool<P: EventProcessor> {
    handles: Vec<thread::JoinHandle<(P, EventStats)>>,
    tx: Sender<GeneratorRecord>,
    num_threads: usize,
}

impl<P: EventProcessor> EventPool<P> {
    pub fn new(processor: &P, num_threads: usize, progress: &ProgressBar) -> Self {
        let num_threads = num_threads.max(1);
        let (tx, rx) = bounded::<GeneratorRecord>(num_threads * 2);
        let mut handles = Vec::with_capacity(num_threads);

        for _ in 0..num_threads {
            let rx = rx.clone();
            let progress = progress.clone();
            let mut worker_processor = processor.clone();
            let handle = thread::spawn(move || {
                let mut local_stats = EventStats::default();
                while let Ok(record) = rx.recv() {
                    process_one(&mut worker_processor, &record, &mut local_stats);
                    progress.inc(1);
                }
                (worker_processor, local_stats)
            });
            handles.push(handle);
        }

        EventPool {
            handles,
            tx,
            num_threads,
        }
    }

    pub fn send(&self, record: GeneratorRecord) -> Result<()> {
        self.tx
            .send(record)
            .map_err(|_| anyhow!("all event workers have stopped"))
    }

    pub fn finish(self) -> Result<(EventStats, Vec<P>)> {
        drop(self.tx);

        let mut stats = EventStats::default();
        let mut processors = Vec::with_capacity(self.handles.len());

        for (idx, handle) in self.handles.into_iter().enumerate() {
            let (worker_processor, worker_stats) = handle
                .join()
                .map_err(|_| anyhow!("event worker {} of {} panicked", idx + 1, self.num_threads))?;
            processors.push(worker_processor);
            stats.add(worker_stats);
        }

        Ok((stats, processors))
    }
}

fn process_one<P: EventProcessor>(processor: &mut P, record: &GeneratorRecord, stats: &mut EventStats) {
    match processor.process_event(record) {
        Ok(()) => stats.processed += 1,
        Err(e) => {
            log::error!("Error processing event {}: {:#}", record.event(), e);
            stats.errors += 1;
        }
    }
}

/// Feeds `events` through `processor`, on worker threads when `num_threads > 1`.
///
/// A failing event is logged and counted; the remaining events still run.
pub fn run_events<P, I>(
    events: I,
    processor: &mut P,
    num_threads: usize,
    progress: &ProgressBar,
) -> Result<EventStats>
where
    P: EventProcessor,
    I: IntoIterator<Item = crate::error::Result<GeneratorRecord>>,
{
    if num_threads <= 1 {
        let mut stats = EventStats::default();
        for record in events {
            process_one(processor, &record?, &mut stats);
            progress.inc(1);
        }
        return Ok(stats);
    }

    let pool = EventPool::new(processor, num_threads, progress);
    for record in events {
        pool.send(record?)?;
    }
    let (stats, processors) = pool.finish()?;

    let merge_progress = ProgressBarBuilder::new("Merging results")
        .with_template("{spinner:.green} [{elapsed_precise}] {msg}")
        .build()?;
    if progress.is_hidden() {
        merge_progress.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }
    let total = processors.len();
    for (idx, worker_processor) in processors.into_iter().enumerate() {
        merge_progress.set_message(format!("Merging worker {} of {}", idx + 1, total));
        processor.merge_processor(worker_processor)?;
    }
    merge_progress.finish_and_clear();

    Ok(stats)
}
