// The receive loop: INIT -> BOUND -> RECEIVING -> DRAINING -> DONE.

use super::config::BenchConfig;
use super::disk_writer::DiskWriter;
use super::integrity::IntegrityChecker;
use super::message::Message;
use super::pool::WorkerPool;
use super::report;
use super::sampler::{Rate, ThroughputSampler};
use crate::Core::MessageSource;
use std::io::{self, Write};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Init,
    Bound,
    Receiving,
    Draining,
    Done,
}

/// What a finished run observed.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Messages received, including the first.
    pub received: u64,
    /// Messages handed to writer threads (`received - 1`).
    pub dispatched: u64,
    pub gaps: u64,
    pub size_mismatches: u64,
    pub intervals: Vec<Rate>,
    pub aggregate: Rate,
    /// Whole-run stopwatch reading, never below 1.
    pub elapsed_us: u64,
    pub peak_workers: usize,
    pub written: u64,
    pub skipped: u64,
    pub failed: u64,
}

pub struct Orchestrator<S: MessageSource> {
    config: BenchConfig,
    state: RunState,
    source: Option<S>,
    writer: Arc<DiskWriter>,
    pool: WorkerPool,
    integrity: IntegrityChecker,
    thread_ctr: u64,
    size_mismatches: u64,
}

impl<S: MessageSource> Orchestrator<S> {
    pub fn new(config: BenchConfig) -> io::Result<Self> {
        let pool = WorkerPool::new(config.workers)?;
        let writer = Arc::new(DiskWriter::new(&config.disk_name));

        if let Some(dir) = writer.data_dir() {
            if !dir.is_dir() {
                warn!("data directory {} does not exist, writes will fail", dir.display());
            }
        }

        Ok(Self {
            config,
            state: RunState::Init,
            source: None,
            writer,
            pool,
            integrity: IntegrityChecker::new(),
            thread_ctr: 0,
            size_mismatches: 0,
        })
    }

    /// Attaches the bound receiving endpoint.
    pub fn bind(&mut self, source: S) {
        self.source = Some(source);
        self.state = RunState::Bound;
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Runs the benchmark to completion, writing report lines to `out`.
    pub fn run<W: Write>(&mut self, out: &mut W) -> io::Result<RunSummary> {
        let mut source = match (self.state, self.source.take()) {
            (RunState::Bound, Some(source)) => source,
            (state, _) => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("Orchestrator::run(): expected a bound endpoint, state is {:?}", state),
                ))
            }
        };
        self.state = RunState::Receiving;

        // The first message only sets the baseline; timing starts after it.
        let first = self.receive(&mut source)?;
        let mut received = 1u64;
        if let Some(counter) = first.sequence() {
            self.integrity.baseline(counter);
        }
        drop(first);

        let mut sampler = ThroughputSampler::start(self.config.message_size);
        report::interval_banner(out, sampler.interval())?;

        for i in 0..self.config.message_count - 1 {
            let message = self.receive(&mut source)?;
            received += 1;
            if let Some(counter) = message.sequence() {
                self.integrity.observe(counter);
            }

            let slot = self.pool.slot_for(i);
            let counter = self.thread_ctr;
            let writer = Arc::clone(&self.writer);
            self.pool.dispatch(slot, move || {
                writer.write(counter, message.payload());
            })?;
            self.thread_ctr += 1;

            if let Some(rate) = sampler.record(i) {
                report::interval_line(out, &rate)?;
            }
        }

        let (aggregate, elapsed_us) = sampler.finish(self.config.message_count);

        self.state = RunState::Draining;
        let drained = self.pool.drain();
        info!("drained {} writer threads", drained);

        self.state = RunState::Done;
        report::final_block(out, self.config.message_size, self.config.message_count, &aggregate)?;
        source.close()?;

        let stats = self.writer.stats();
        Ok(RunSummary {
            received,
            dispatched: self.pool.dispatched(),
            gaps: self.integrity.gaps(),
            size_mismatches: self.size_mismatches,
            intervals: sampler.intervals().to_vec(),
            aggregate,
            elapsed_us,
            peak_workers: self.pool.peak_workers(),
            written: stats.written(),
            skipped: stats.skipped(),
            failed: stats.failed(),
        })
    }

    fn receive(&mut self, source: &mut S) -> io::Result<Message> {
        let message = Message::new(source.receive()?);
        if message.len() != self.config.message_size {
            warn!("message of incorrect size ({}) received", message.len());
            self.size_mismatches += 1;
        }
        Ok(message)
    }
}
