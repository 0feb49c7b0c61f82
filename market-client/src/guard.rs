//! At most one in-flight submission per workflow instance
//!
//! This is the only overlap protection on the client. Separate instances (or
//! separate processes) can still submit concurrently; the backend has to
//! cope with that.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::{ClientError, ClientResult};

#[derive(Debug, Default)]
pub struct InFlight {
    busy: AtomicBool,
}

/// Held for the duration of a submission; releases on drop
#[derive(Debug)]
pub struct InFlightToken<'a> {
    busy: &'a AtomicBool,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot or fail with [`ClientError::Busy`]
    pub fn try_begin(&self) -> ClientResult<InFlightToken<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ClientError::Busy)?;
        Ok(InFlightToken { busy: &self.busy })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Drop for InFlightToken<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
