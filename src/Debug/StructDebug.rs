use crate::Harness::disk_writer::{DiskMode, DiskWriter};
use crate::Harness::pool::WorkerPool;
use std::fmt;

/// Debug function for WorkerPool
///
/// Join handles are not printable, so this shows:
/// - Capacity and which slots are occupied
/// - Live and peak worker counts
/// - Dispatch/join/panic counters
pub fn debug_worker_pool(pool: &WorkerPool, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("WorkerPool")
        .field("capacity", &pool.capacity())
        .field("occupied", &pool.occupied_slots())
        .field("live", &pool.live_workers())
        .field("peak", &pool.peak_workers())
        .field("dispatched", &pool.dispatched())
        .field("joined", &pool.joined())
        .field("panicked", &pool.panicked())
        .finish()
}

/// Debug function for DiskWriter
///
/// Shows the target directory (or network-only) and the write counters
pub fn debug_disk_writer(writer: &DiskWriter, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let target = match writer.mode() {
        DiskMode::Network => "<network only>".to_string(),
        DiskMode::Directory(_) => writer
            .data_dir()
            .map(|dir| dir.display().to_string())
            .unwrap_or_default(),
    };
    let stats = writer.stats();
    f.debug_struct("DiskWriter")
        .field("target", &target)
        .field("written", &stats.written())
        .field("skipped", &stats.skipped())
        .field("failed", &stats.failed())
        .finish()
}
