use std::io::{self, Write};

use crate::callback::config::EvaluateConfig;
use crate::callback::hook::{EpochHook, EpochLogs};
use crate::error::Result;
use crate::eval::evaluator::{Evaluation, Evaluator};
use crate::eval::labels::LabelNames;
use crate::metrics::class_ap::AveragePrecisions;
use crate::metrics::mean_ap::mean_average_precision;
use crate::metrics::pr_curve::PrecisionRecallCurve;
use crate::plot::chart::render_pr_curve;
use crate::sink::metrics_sink::MetricsSink;

/// Key under which the epoch's mAP is stored in `EpochLogs` and sent to sinks.
pub const MAP_KEY: &str = "mAP";

/// Evaluates a detection model at the end of every epoch.
///
/// Each call runs `evaluator` over `generator`, reduces the per-class AP to a
/// single mAP, reports it to the optional sink and writes it to the epoch
/// logs under `"mAP"`, where later hooks (early stopping, best-model
/// selection, ...) can pick it up.
pub struct EvaluateCallback<G, E> {
    generator: G,
    evaluator: E,
    config: EvaluateConfig,
    sink: Option<Box<dyn MetricsSink>>,
    report: Box<dyn Write>,
    mean_ap: Option<f64>,
    recall: Vec<f64>,
    precision: Vec<f64>,
}

impl<G: LabelNames, E> EvaluateCallback<G, E> {
    /// Validates `config` and builds a callback with no sink attached.
    pub fn new(generator: G, evaluator: E, config: EvaluateConfig) -> Result<Self> {
        config.validate()?;
        Ok(EvaluateCallback {
            generator,
            evaluator,
            config,
            sink: None,
            report: Box::new(io::stdout()),
            mean_ap: None,
            recall: Vec::new(),
            precision: Vec::new(),
        })
    }

    /// Attaches a sink that receives the mAP, per-class AP and the PR curve.
    pub fn with_sink(mut self, sink: impl MetricsSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Sends the verbose report somewhere other than stdout.
    pub fn with_report(mut self, writer: impl Write + 'static) -> Self {
        self.report = Box::new(writer);
        self
    }

    pub fn config(&self) -> &EvaluateConfig {
        &self.config
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// mAP of the most recent epoch; `None` before the first epoch and after
    /// an epoch whose mAP could not be computed.
    pub fn mean_ap(&self) -> Option<f64> {
        self.mean_ap
    }

    /// Recall samples from the most recent evaluation.
    pub fn recall(&self) -> &[f64] {
        &self.recall
    }

    /// Precision samples from the most recent evaluation.
    pub fn precision(&self) -> &[f64] {
        &self.precision
    }

    // ── Reporting ─────────────────────────────────────────────────────────

    fn report_classes(&mut self, aps: &AveragePrecisions) -> Result<()> {
        for (&label, class) in aps {
            let name = self.generator.label_to_name(label);
            writeln!(self.report, "{}", class_line(class.num_annotations, &name, class.average_precision))?;
        }
        Ok(())
    }

    fn write_summaries(&mut self, epoch: usize, mean_ap: f64, aps: &AveragePrecisions) -> Result<()> {
        let Some(sink) = self.sink.as_mut() else {
            return Ok(());
        };
        // Nothing reaches the sink unless the whole epoch can be written.
        let curve = PrecisionRecallCurve::new(self.recall.clone(), self.precision.clone())?;

        sink.scalar(MAP_KEY, mean_ap, epoch)?;
        if self.config.is_verbose() {
            for (&label, class) in aps {
                let tag = format!("AP_{}", self.generator.label_to_name(label));
                sink.scalar(&tag, class.average_precision, epoch)?;
            }
        }
        sink.flush()?;

        let chart = render_pr_curve(&curve);
        sink.image(&pr_curve_title(epoch), &chart, epoch)?;
        sink.flush()?;

        tracing::debug!(epoch, points = curve.len(), "Wrote evaluation summaries");
        Ok(())
    }
}

impl<G, E, M> EpochHook<M> for EvaluateCallback<G, E>
where
    G: LabelNames,
    E: Evaluator<G, M>,
    M: ?Sized,
{
    fn on_epoch_end(&mut self, epoch: usize, model: &mut M, logs: &mut EpochLogs) -> Result<()> {
        let params = self.config.eval_params();
        let Evaluation { average_precisions, elapsed, recall, precision } =
            self.evaluator.evaluate(&self.generator, model, &params)?;
        tracing::debug!(
            epoch,
            classes = average_precisions.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Evaluation pass finished"
        );

        self.mean_ap = None;
        self.recall = recall;
        self.precision = precision;

        if self.config.is_verbose() {
            self.report_classes(&average_precisions)?;
        }

        let mean_ap = mean_average_precision(&average_precisions, self.config.averaging())?;
        self.mean_ap = Some(mean_ap);

        self.write_summaries(epoch, mean_ap, &average_precisions)?;

        logs.insert(MAP_KEY.to_string(), mean_ap);
        tracing::info!(epoch, mean_ap, "Epoch evaluated");

        if self.config.is_verbose() {
            writeln!(self.report, "{}", map_line(mean_ap))?;
        }
        Ok(())
    }
}

fn class_line(num_annotations: usize, name: &str, average_precision: f64) -> String {
    format!(
        "{} instances of class {} with average precision: {:.4}",
        num_annotations, name, average_precision
    )
}

fn map_line(mean_ap: f64) -> String {
    format!("mAP: {:.4}", mean_ap)
}

fn pr_curve_title(epoch: usize) -> String {
    format!("Precision Recall Curve Epoch {}", epoch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_lines_are_formatted() {
        assert_eq!(
            class_line(12, "car", 0.734_56),
            "12 instances of class car with average precision: 0.7346"
        );
        assert_eq!(map_line(0.5), "mAP: 0.5000");
        assert_eq!(pr_curve_title(4), "Precision Recall Curve Epoch 4");
    }
}
