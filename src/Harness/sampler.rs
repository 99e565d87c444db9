// Throughput measurement over fixed message-count windows and over the whole run.

use super::config::INTERVAL;
use crate::Core::Stopwatch;

/// Throughput of one measurement window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rate {
    /// Messages per second, rounded.
    pub messages_per_sec: u64,
    /// Megabytes (10^6 bytes) per second.
    pub megabytes_per_sec: f64,
    /// Megabits (10^6 bits) per second.
    pub megabits_per_sec: f64,
}

impl Rate {
    /// Rate of `count` messages of `message_size` bytes over `elapsed_us`.
    /// An elapsed time of zero is treated as one microsecond.
    pub fn compute(count: u64, elapsed_us: u64, message_size: usize) -> Self {
        let elapsed_us = elapsed_us.max(1);
        let messages_per_sec = (count as f64 / elapsed_us as f64 * 1_000_000.0).round() as u64;
        let bytes_per_sec = messages_per_sec as f64 * message_size as f64;

        Self {
            messages_per_sec,
            megabytes_per_sec: bytes_per_sec / 1_000_000.0,
            megabits_per_sec: bytes_per_sec * 8.0 / 1_000_000.0,
        }
    }
}

/// Two stopwatches: one for the whole run, one restarted every `interval` messages.
#[derive(Debug)]
pub struct ThroughputSampler {
    message_size: usize,
    interval: u64,
    total: Stopwatch,
    window: Stopwatch,
    intervals: Vec<Rate>,
}

impl ThroughputSampler {
    /// Starts both stopwatches with the default 1000-message interval.
    pub fn start(message_size: usize) -> Self {
        Self::start_with_interval(message_size, INTERVAL)
    }

    pub fn start_with_interval(message_size: usize, interval: u64) -> Self {
        let now = Stopwatch::start();
        Self {
            message_size,
            interval: interval.max(1),
            total: now,
            window: now,
            intervals: Vec::new(),
        }
    }

    /// True for loop indices that close an interval window.
    pub fn is_boundary(&self, index: u64) -> bool {
        index > 0 && index % self.interval == 0
    }

    /// Called once per received message with the loop index. Returns the
    /// window's rate when `index` closes a window, and restarts the window.
    pub fn record(&mut self, index: u64) -> Option<Rate> {
        if !self.is_boundary(index) {
            return None;
        }
        let elapsed = self.window.stop();
        let rate = Rate::compute(self.interval, elapsed, self.message_size);
        self.intervals.push(rate);
        self.window = Stopwatch::start();
        Some(rate)
    }

    /// Aggregate rate of `message_count` messages over the whole run.
    pub fn finish(&self, message_count: u64) -> (Rate, u64) {
        let elapsed = self.total.stop().max(1);
        (Rate::compute(message_count, elapsed, self.message_size), elapsed)
    }

    pub fn intervals(&self) -> &[Rate] {
        &self.intervals
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }
}
