use crate::ports::outbound::TimeSource;
use shared_types::Timestamp;
use std::sync::atomic::{AtomicU64, Ordering};

/// Wall clock time source.
#[derive(Debug, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// Settable block time for deterministic execution.
#[derive(Debug)]
pub struct FixedTimeSource(AtomicU64);

impl FixedTimeSource {
    pub fn new(time: Timestamp) -> Self {
        Self(AtomicU64::new(time))
    }

    pub fn set(&self, time: Timestamp) {
        self.0.store(time, Ordering::SeqCst);
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> Timestamp {
        self.0.load(Ordering::SeqCst)
    }
}
