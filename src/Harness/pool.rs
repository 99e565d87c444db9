// Fixed-size pool of writer slots.
//
// Each slot holds at most one running thread. Dispatching into an occupied
// slot first joins its previous occupant, so at most `capacity` writers are
// alive and at most `capacity` payloads are buffered at any time.

use super::config::MAX_WORKERS;
use crossbeam_utils::CachePadded;
use std::fmt;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

pub struct WorkerPool {
    slots: Vec<Option<JoinHandle<()>>>,
    live: Arc<CachePadded<AtomicUsize>>,
    peak: Arc<CachePadded<AtomicUsize>>,
    dispatched: u64,
    joined: u64,
    panicked: u64,
}

/// Decrements the live-worker gauge when a worker finishes, even by panic.
struct LiveGuard(Arc<CachePadded<AtomicUsize>>);

impl Drop for LiveGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

impl WorkerPool {
    /// Creates a pool with `capacity` slots. Zero is rejected, values above
    /// `MAX_WORKERS` are clamped.
    pub fn new(capacity: usize) -> io::Result<Self> {
        if capacity == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "WorkerPool::new(): capacity must be at least 1",
            ));
        }
        let capacity = capacity.min(MAX_WORKERS);

        Ok(Self {
            slots: (0..capacity).map(|_| None).collect(),
            live: Arc::new(CachePadded::new(AtomicUsize::new(0))),
            peak: Arc::new(CachePadded::new(AtomicUsize::new(0))),
            dispatched: 0,
            joined: 0,
            panicked: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Round-robin slot for the `index`-th dispatch.
    pub fn slot_for(&self, index: u64) -> usize {
        (index % self.slots.len() as u64) as usize
    }

    pub fn is_occupied(&self, slot: usize) -> bool {
        matches!(self.slots.get(slot), Some(Some(_)))
    }

    /// Indices of slots that still hold a (possibly finished) worker.
    pub fn occupied_slots(&self) -> Vec<usize> {
        (0..self.slots.len()).filter(|&s| self.is_occupied(s)).collect()
    }

    /// Blocks until the worker in `slot`, if any, has finished, and frees the slot.
    pub fn wait_slot(&mut self, slot: usize) -> io::Result<()> {
        self.check_slot(slot)?;
        if let Some(handle) = self.slots[slot].take() {
            debug!("joining writer in slot {}", slot);
            self.join(slot, handle);
        }
        Ok(())
    }

    /// Runs `job` on a new thread in `slot`, joining the slot's previous
    /// worker first. The job owns everything it captures; its buffers are
    /// released when it returns.
    pub fn dispatch<F>(&mut self, slot: usize, job: F) -> io::Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.wait_slot(slot)?;

        let live = self.live.fetch_add(1, Ordering::AcqRel) + 1;
        self.peak.fetch_max(live, Ordering::AcqRel);
        let guard = LiveGuard(Arc::clone(&self.live));

        let handle = thread::Builder::new()
            .name(format!("disk-writer-{}", slot))
            .spawn(move || {
                let _guard = guard;
                job();
            })?;

        self.slots[slot] = Some(handle);
        self.dispatched += 1;
        Ok(())
    }

    /// Joins every occupied slot. Returns the number of workers joined.
    pub fn drain(&mut self) -> usize {
        let mut drained = 0;
        for slot in 0..self.slots.len() {
            if let Some(handle) = self.slots[slot].take() {
                self.join(slot, handle);
                drained += 1;
            }
        }
        drained
    }

    /// Workers currently running.
    pub fn live_workers(&self) -> usize {
        self.live.load(Ordering::Acquire)
    }

    /// Highest number of simultaneously running workers seen.
    pub fn peak_workers(&self) -> usize {
        self.peak.load(Ordering::Acquire)
    }

    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    pub fn joined(&self) -> u64 {
        self.joined
    }

    pub fn panicked(&self) -> u64 {
        self.panicked
    }

    fn join(&mut self, slot: usize, handle: JoinHandle<()>) {
        if handle.join().is_err() {
            warn!("writer in slot {} panicked", slot);
            self.panicked += 1;
        }
        self.joined += 1;
    }

    fn check_slot(&self, slot: usize) -> io::Result<()> {
        if slot >= self.slots.len() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Slot {} out of range (capacity {})", slot, self.slots.len()),
            ));
        }
        Ok(())
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.drain();
    }
}

impl fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::Debug::StructDebug::debug_worker_pool(self, f)
    }
}
