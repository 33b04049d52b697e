//! Nullable clock: a manually driven time source for deadlines.

use std::sync::atomic::{AtomicU64, Ordering};
use votepool_types::Timestamp;

/// Seconds since epoch, moved only by the test or simulation driving it.
///
/// Shared through an `Arc` so the exchange double reads the same instant the
/// driver advances.
pub struct NullClock {
    secs: AtomicU64,
}

impl NullClock {
    pub fn new(start_secs: u64) -> Self {
        Self {
            secs: AtomicU64::new(start_secs),
        }
    }

    pub fn now(&self) -> Timestamp {
        Timestamp::new(self.secs.load(Ordering::SeqCst))
    }

    pub fn advance(&self, secs: u64) {
        self.secs.fetch_add(secs, Ordering::SeqCst);
    }

    /// Jump to an absolute reading, backwards included.
    pub fn set(&self, secs: u64) {
        self.secs.store(secs, Ordering::SeqCst);
    }
}

impl Default for NullClock {
    fn default() -> Self {
        Self::new(0)
    }
}
