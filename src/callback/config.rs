use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};

use crate::error::{EvalError, Result};
use crate::eval::params::EvalParams;
use crate::metrics::averaging::Averaging;

/// Configuration for an `EvaluateCallback`.
///
/// # Fields
/// - `iou_threshold`    — IoU at which a detection counts as a match (default 0.5)
/// - `score_threshold`  — minimum detection confidence (default 0.05)
/// - `max_detections`   — detections kept per image (default 100)
/// - `save_path`        — where the evaluator writes images with drawn detections
/// - `weighted_average` — weight each class's AP by its annotation count
/// - `verbose`          — 0 is silent; 1 or more prints per-class lines and the
///                        mAP, and sends per-class `AP_<name>` scalars to the sink
///
/// Every field may be omitted from JSON and takes its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluateConfig {
    pub iou_threshold: f64,
    pub score_threshold: f64,
    pub max_detections: usize,
    pub save_path: Option<PathBuf>,
    pub weighted_average: bool,
    pub verbose: u8,
}

impl Default for EvaluateConfig {
    fn default() -> Self {
        let params = EvalParams::default();
        EvaluateConfig {
            iou_threshold: params.iou_threshold,
            score_threshold: params.score_threshold,
            max_detections: params.max_detections,
            save_path: params.save_path,
            weighted_average: false,
            verbose: 1,
        }
    }
}

impl EvaluateConfig {
    /// Default configuration with the given verbosity.
    pub fn new(verbose: u8) -> Self {
        EvaluateConfig { verbose, ..EvaluateConfig::default() }
    }

    /// Reads a JSON config file and validates it.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<EvaluateConfig> {
        let file = std::fs::File::open(path.as_ref())?;
        let reader = std::io::BufReader::new(file);
        let config: EvaluateConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that thresholds lie in [0, 1] and at least one detection is kept.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.iou_threshold) {
            return Err(EvalError::invalid_config(format!(
                "iou_threshold must be within [0, 1], got {}", self.iou_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.score_threshold) {
            return Err(EvalError::invalid_config(format!(
                "score_threshold must be within [0, 1], got {}", self.score_threshold
            )));
        }
        if self.max_detections == 0 {
            return Err(EvalError::invalid_config("max_detections must be at least 1"));
        }
        Ok(())
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose >= 1
    }

    pub fn averaging(&self) -> Averaging {
        Averaging::from_weighted(self.weighted_average)
    }

    /// The subset of the configuration handed to the evaluator.
    pub fn eval_params(&self) -> EvalParams {
        EvalParams {
            iou_threshold: self.iou_threshold,
            score_threshold: self.score_threshold,
            max_detections: self.max_detections,
            save_path: self.save_path.clone(),
        }
    }
}
