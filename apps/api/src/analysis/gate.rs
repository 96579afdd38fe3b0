use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Single-slot gate that keeps analysis runs from overlapping.
///
/// A run holds a `RunPermit` for its whole duration; dropping the permit
/// frees the slot on every exit path, including errors and cancelled requests.
#[derive(Debug, Clone)]
pub struct AnalysisGate {
    slot: Arc<Semaphore>,
}

/// Proof that the holder owns the analysis slot.
#[derive(Debug)]
pub struct RunPermit {
    _permit: OwnedSemaphorePermit,
}

impl Default for AnalysisGate {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisGate {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Semaphore::new(1)),
        }
    }

    /// Claims the slot, or returns `None` while another run holds it.
    pub fn try_begin(&self) -> Option<RunPermit> {
        self.slot
            .clone()
            .try_acquire_owned()
            .ok()
            .map(|permit| RunPermit { _permit: permit })
    }

    pub fn is_running(&self) -> bool {
        self.slot.available_permits() == 0
    }
}
