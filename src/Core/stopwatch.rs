// Monotonic stopwatch used for every throughput window

use std::time::Instant;

/// A started stopwatch. Elapsed time is reported in whole microseconds.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    started: Instant,
}

impl Stopwatch {
    /// Starts a new stopwatch at the current instant.
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Microseconds elapsed since `start()`, without consuming the stopwatch.
    pub fn elapsed_us(&self) -> u64 {
        self.started.elapsed().as_micros() as u64
    }

    /// Stops the stopwatch and returns the elapsed microseconds.
    pub fn stop(self) -> u64 {
        self.elapsed_us()
    }
}
