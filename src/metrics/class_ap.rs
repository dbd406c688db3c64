use std::collections::BTreeMap;

use serde::{Serialize, Deserialize};

/// Numeric class label as produced by the dataset generator.
pub type Label = usize;

/// Evaluation outcome for a single class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassAp {
    /// Area under the class's precision/recall curve, in [0, 1].
    pub average_precision: f64,
    /// Ground-truth boxes of this class in the evaluated dataset.
    pub num_annotations: usize,
}

impl ClassAp {
    pub fn new(average_precision: f64, num_annotations: usize) -> ClassAp {
        ClassAp { average_precision, num_annotations }
    }

    pub fn is_annotated(&self) -> bool {
        self.num_annotations > 0
    }
}

/// Per-class results keyed by label, iterated in ascending label order.
pub type AveragePrecisions = BTreeMap<Label, ClassAp>;
