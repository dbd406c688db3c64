use serde::{Serialize, Deserialize};

use crate::error::{EvalError, Result};

/// Paired recall/precision samples as returned by an evaluator, ordered by
/// descending detection score (so recall is non-decreasing).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PrecisionRecallCurve {
    recall: Vec<f64>,
    precision: Vec<f64>,
}

impl PrecisionRecallCurve {
    /// Pairs up the two sequences.
    ///
    /// # Errors
    /// `EvalError::CurveLengthMismatch` if the sequences differ in length.
    pub fn new(recall: Vec<f64>, precision: Vec<f64>) -> Result<PrecisionRecallCurve> {
        if recall.len() != precision.len() {
            return Err(EvalError::CurveLengthMismatch {
                recall: recall.len(),
                precision: precision.len(),
            });
        }
        Ok(PrecisionRecallCurve { recall, precision })
    }

    pub fn recall(&self) -> &[f64] {
        &self.recall
    }

    pub fn precision(&self) -> &[f64] {
        &self.precision
    }

    pub fn len(&self) -> usize {
        self.recall.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recall.is_empty()
    }

    /// Decreasing-max envelope of the precision: element `i` is the highest
    /// precision reached at index `i` or later.
    pub fn interpolated_precision(&self) -> Vec<f64> {
        let mut out = self.precision.clone();
        let mut running = f64::NEG_INFINITY;
        for p in out.iter_mut().rev() {
            running = running.max(*p);
            *p = running;
        }
        out
    }

    /// `(recall, interpolated precision)` pairs, in sample order.
    pub fn interpolated_points(&self) -> Vec<(f64, f64)> {
        self.recall.iter().copied()
            .zip(self.interpolated_precision())
            .collect()
    }
}
