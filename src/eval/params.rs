use std::path::PathBuf;

use serde::{Serialize, Deserialize};

/// Thresholds and output location handed to an `Evaluator` on every call.
///
/// # Fields
/// - `iou_threshold`   — IoU at or above which a detection matches a ground-truth box
/// - `score_threshold` — detections scoring below this are discarded
/// - `max_detections`  — per-image cap on detections, highest scores first
/// - `save_path`       — optional directory for images with drawn detections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalParams {
    pub iou_threshold: f64,
    pub score_threshold: f64,
    pub max_detections: usize,
    pub save_path: Option<PathBuf>,
}

impl Default for EvalParams {
    fn default() -> Self {
        EvalParams {
            iou_threshold: 0.5,
            score_threshold: 0.05,
            max_detections: 100,
            save_path: None,
        }
    }
}
