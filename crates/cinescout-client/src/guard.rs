//! Single-slot request-in-flight guard.

use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Admits at most one operation at a time.
///
/// [`try_begin`](Self::try_begin) is an atomic check-and-set: it hands out
/// the only [`InFlightToken`] or nothing. The slot frees up when the token
/// is dropped, on success, failure, or unwinding alike.
#[derive(Debug, Clone)]
pub struct InFlight {
    slot: Arc<Semaphore>,
}

/// Proof that the guarded operation is running. Dropping it ends the
/// operation.
#[derive(Debug)]
pub struct InFlightToken {
    _permit: OwnedSemaphorePermit,
}

impl InFlight {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Semaphore::new(1)),
        }
    }

    /// Claim the slot, or `None` if an operation is already running.
    pub fn try_begin(&self) -> Option<InFlightToken> {
        Arc::clone(&self.slot)
            .try_acquire_owned()
            .ok()
            .map(|permit| InFlightToken { _permit: permit })
    }

    pub fn is_busy(&self) -> bool {
        self.slot.available_permits() == 0
    }
}

impl Default for InFlight {
    fn default() -> Self {
        Self::new()
    }
}
