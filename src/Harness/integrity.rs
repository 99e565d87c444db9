// Sequence counter check: every message must carry previous + 1.
// Violations are reported, never fatal.

use tracing::warn;

/// Returns true when `current` directly follows `previous`.
pub fn check(previous: i32, current: i32) -> bool {
    current.wrapping_sub(previous) == 1
}

/// Tracks the last observed counter and the number of gaps seen.
#[derive(Debug, Default, Clone)]
pub struct IntegrityChecker {
    previous: Option<i32>,
    gaps: u64,
}

impl IntegrityChecker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the baseline counter without checking it.
    pub fn baseline(&mut self, counter: i32) {
        self.previous = Some(counter);
    }

    /// Checks `current` against the previous counter and makes it the new baseline.
    /// The first observed counter only establishes the baseline.
    pub fn observe(&mut self, current: i32) -> bool {
        let ok = match self.previous {
            Some(previous) if !check(previous, current) => {
                warn!(
                    "error in message data, previous {} and current {} counter, data corrupt!",
                    previous, current
                );
                self.gaps += 1;
                false
            }
            _ => true,
        };
        self.previous = Some(current);
        ok
    }

    pub fn previous(&self) -> Option<i32> {
        self.previous
    }

    /// Number of violations observed so far.
    pub fn gaps(&self) -> u64 {
        self.gaps
    }
}
