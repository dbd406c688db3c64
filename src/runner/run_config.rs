use std::sync::mpsc;
use std::sync::{Arc, atomic::AtomicBool};

use crate::runner::epoch_summary::EpochSummary;

/// Configuration for an `EpochRunner`.
///
/// # Fields
/// - `epochs`      — how many epoch boundaries the runner drives
/// - `progress_tx` — receives each `EpochSummary` once the hooks have run,
///                   so it sees `mAP` and anything else the hooks logged;
///                   a closed channel is treated as a request to stop
/// - `stop_flag`   — checked before each epoch's step; once `true`, no
///                   further step or hook is started
pub struct RunConfig {
    pub epochs: usize,
    pub progress_tx: Option<mpsc::Sender<EpochSummary>>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl RunConfig {
    /// Creates a minimal `RunConfig` with no progress channel and no stop flag.
    pub fn new(epochs: usize) -> Self {
        RunConfig {
            epochs,
            progress_tx: None,
            stop_flag: None,
        }
    }

    pub fn with_progress(mut self, tx: mpsc::Sender<EpochSummary>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop_flag = Some(flag);
        self
    }
}
