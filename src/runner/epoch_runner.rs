use std::sync::atomic::Ordering;
use std::time::Instant;

use crate::callback::hook::{EpochHook, EpochLogs};
use crate::error::Result;
use crate::runner::epoch_summary::EpochSummary;
use crate::runner::run_config::RunConfig;

/// Drives a host's per-epoch work and fires hooks at every epoch boundary.
///
/// The runner does no training itself: `step` is whatever the host does in
/// one epoch, and it returns the logs that hooks then extend.
pub struct EpochRunner {
    config: RunConfig,
}

impl EpochRunner {
    pub fn new(config: RunConfig) -> EpochRunner {
        EpochRunner { config }
    }

    /// Runs up to `config.epochs` epochs and returns a summary of each one
    /// that completed.
    ///
    /// # Early termination
    /// The loop breaks early if:
    /// - the `progress_tx` receiver has been dropped, **or**
    /// - `config.stop_flag` is set to `true`.
    ///
    /// # Errors
    /// The first error from `step` or from a hook ends the run and is returned.
    pub fn run<M, S, H>(&self, model: &mut M, mut step: S, hooks: &mut H) -> Result<Vec<EpochSummary>>
    where
        M: ?Sized,
        S: FnMut(&mut M, usize) -> Result<EpochLogs>,
        H: EpochHook<M> + ?Sized,
    {
        let mut summaries = Vec::with_capacity(self.config.epochs);

        for epoch in 0..self.config.epochs {
            if self.stop_requested() {
                tracing::warn!(epoch, "Stop flag set; ending run");
                break;
            }

            let t_start = Instant::now();

            // ── Host work, then hooks ─────────────────────────────────────
            let mut logs = step(model, epoch)?;
            hooks.on_epoch_end(epoch, model, &mut logs)?;

            let summary = EpochSummary {
                epoch,
                total_epochs: self.config.epochs,
                logs,
                elapsed_ms: t_start.elapsed().as_millis() as u64,
            };

            // ── Emit progress ─────────────────────────────────────────────
            if let Some(ref tx) = self.config.progress_tx {
                if tx.send(summary.clone()).is_err() {
                    summaries.push(summary);
                    tracing::warn!(epoch, "Progress receiver dropped; ending run");
                    break;
                }
            }
            summaries.push(summary);
        }

        Ok(summaries)
    }

    fn stop_requested(&self) -> bool {
        self.config.stop_flag
            .as_ref()
            .map(|flag| flag.load(Ordering::Relaxed))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;
    use std::sync::{mpsc, Arc};

    use crate::callback::hook::HookList;
    use crate::error::EvalError;

    fn loss_step(_model: &mut u32, epoch: usize) -> Result<EpochLogs> {
        let mut logs = EpochLogs::new();
        logs.insert("loss".to_string(), 1.0 / (epoch + 1) as f64);
        Ok(logs)
    }

    struct CountEpochs;

    impl EpochHook<u32> for CountEpochs {
        fn on_epoch_end(&mut self, _epoch: usize, model: &mut u32, logs: &mut EpochLogs) -> Result<()> {
            *model += 1;
            logs.insert("seen".to_string(), *model as f64);
            Ok(())
        }
    }

    #[test]
    fn runs_every_epoch_and_fires_hooks() {
        let (tx, rx) = mpsc::channel();
        let runner = EpochRunner::new(RunConfig::new(3).with_progress(tx));
        let mut hooks: HookList<u32> = HookList::new();
        hooks.push(CountEpochs);

        let mut model = 0u32;
        let summaries = runner.run(&mut model, loss_step, &mut hooks).unwrap();

        assert_eq!(model, 3);
        assert_eq!(summaries.len(), 3);
        assert_eq!(summaries[2].logs.get("seen"), Some(&3.0));
        assert_eq!(summaries[1].logs.get("loss"), Some(&0.5));
        assert_eq!(rx.try_iter().count(), 3);
    }

    #[test]
    fn stop_flag_ends_run_before_first_epoch() {
        let flag = Arc::new(AtomicBool::new(true));
        let runner = EpochRunner::new(RunConfig::new(5).with_stop_flag(flag));
        let mut hooks: HookList<u32> = HookList::new();

        let summaries = runner.run(&mut 0u32, loss_step, &mut hooks).unwrap();
        assert!(summaries.is_empty());
    }

    #[test]
    fn dropped_receiver_ends_run() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let runner = EpochRunner::new(RunConfig::new(5).with_progress(tx));
        let mut hooks: HookList<u32> = HookList::new();

        let summaries = runner.run(&mut 0u32, loss_step, &mut hooks).unwrap();
        assert_eq!(summaries.len(), 1);
    }

    #[test]
    fn step_error_is_returned() {
        let runner = EpochRunner::new(RunConfig::new(2));
        let mut hooks: HookList<u32> = HookList::new();
        let failing = |_: &mut u32, _: usize| -> Result<EpochLogs> {
            Err(EvalError::evaluator("step failed"))
        };

        assert!(runner.run(&mut 0u32, failing, &mut hooks).is_err());
    }
}
