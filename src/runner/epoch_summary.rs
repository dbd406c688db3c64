use serde::{Serialize, Deserialize};

use crate::callback::hook::EpochLogs;

/// What the runner reports after each completed epoch.
///
/// When a `progress_tx` channel is configured in `RunConfig`, one value is
/// sent per epoch after all hooks have run, so `logs` already carries `mAP`
/// when an `EvaluateCallback` is installed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochSummary {
    /// 0-based epoch index, the same index hooks and sinks receive.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Logs produced by the step and extended by the hooks.
    pub logs: EpochLogs,
    /// Wall-clock duration of the step plus hooks, in milliseconds.
    pub elapsed_ms: u64,
}
