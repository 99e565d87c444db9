// Best-effort persistence of one message payload per file.
// File names come from the dispatch counter, not the message's own sequence number.

use super::config::NETWORK_SENTINEL;
use crossbeam_utils::CachePadded;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::warn;

/// Subdirectory of the mount point receiving the files.
pub const DATA_DIR: &str = "data";

/// Where payloads go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiskMode {
    /// Nothing is written.
    Network,
    /// Files are written under `<root>/data/`.
    Directory(PathBuf),
}

impl DiskMode {
    pub fn from_disk_name(disk_name: &str) -> Self {
        if disk_name == NETWORK_SENTINEL {
            DiskMode::Network
        } else {
            DiskMode::Directory(PathBuf::from(disk_name))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The payload was persisted in full.
    Written,
    /// Network-only mode, nothing to do.
    Skipped,
    /// Open or write failed; logged and dropped.
    Failed,
}

/// Counters shared by all writer threads.
#[derive(Debug, Default)]
pub struct WriteStats {
    written: CachePadded<AtomicU64>,
    skipped: CachePadded<AtomicU64>,
    failed: CachePadded<AtomicU64>,
}

impl WriteStats {
    fn record(&self, outcome: WriteOutcome) {
        let counter = match outcome {
            WriteOutcome::Written => &self.written,
            WriteOutcome::Skipped => &self.skipped,
            WriteOutcome::Failed => &self.failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn written(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    pub fn skipped(&self) -> u64 {
        self.skipped.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }
}

pub struct DiskWriter {
    mode: DiskMode,
    stats: WriteStats,
}

impl DiskWriter {
    pub fn new(disk_name: &str) -> Self {
        Self::with_mode(DiskMode::from_disk_name(disk_name))
    }

    pub fn with_mode(mode: DiskMode) -> Self {
        Self {
            mode,
            stats: WriteStats::default(),
        }
    }

    pub fn mode(&self) -> &DiskMode {
        &self.mode
    }

    pub fn is_network_only(&self) -> bool {
        self.mode == DiskMode::Network
    }

    /// `<root>/data`, or `None` in network-only mode.
    pub fn data_dir(&self) -> Option<PathBuf> {
        match &self.mode {
            DiskMode::Network => None,
            DiskMode::Directory(root) => Some(root.join(DATA_DIR)),
        }
    }

    /// `<root>/data/test%06d.dat` for the given dispatch counter.
    pub fn path_for(&self, counter: u64) -> Option<PathBuf> {
        self.data_dir().map(|dir| dir.join(file_name(counter)))
    }

    /// Writes `payload` to the file for `counter`, truncating any previous
    /// content. Failures are logged and reported, never propagated.
    pub fn write(&self, counter: u64, payload: &[u8]) -> WriteOutcome {
        let outcome = match self.path_for(counter) {
            None => WriteOutcome::Skipped,
            Some(path) => write_file(&path, payload),
        };
        self.stats.record(outcome);
        outcome
    }

    pub fn stats(&self) -> &WriteStats {
        &self.stats
    }
}

pub fn file_name(counter: u64) -> String {
    format!("test{:06}.dat", counter)
}

fn write_file(path: &Path, payload: &[u8]) -> WriteOutcome {
    let mut file = match File::create(path) {
        Ok(file) => file,
        Err(e) => {
            warn!("file_writer(): failed to open file {}: {}", path.display(), e);
            return WriteOutcome::Failed;
        }
    };

    if let Err(e) = file.write_all(payload) {
        warn!("file_writer(): failed to write file {}: {}", path.display(), e);
        return WriteOutcome::Failed;
    }
    WriteOutcome::Written
}

impl std::fmt::Debug for DiskWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        crate::Debug::StructDebug::debug_disk_writer(self, f)
    }
}
