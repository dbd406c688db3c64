use std::time::Duration;

use crate::error::Result;
use crate::eval::params::EvalParams;
use crate::metrics::class_ap::AveragePrecisions;

/// Everything one evaluation pass reports back.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Evaluation {
    /// Per-class AP and annotation count.
    pub average_precisions: AveragePrecisions,
    /// Wall-clock time spent running inference.
    pub elapsed: Duration,
    pub recall: Vec<f64>,
    pub precision: Vec<f64>,
}

/// Runs a detection model over a dataset and scores its detections.
///
/// Matching, suppression and curve computation are the implementor's business;
/// this crate only consumes the result. `G` is the dataset generator and `M`
/// the model handle.
pub trait Evaluator<G: ?Sized, M: ?Sized> {
    fn evaluate(&mut self, generator: &G, model: &mut M, params: &EvalParams) -> Result<Evaluation>;
}

impl<G, M, F> Evaluator<G, M> for F
where
    G: ?Sized,
    M: ?Sized,
    F: FnMut(&G, &mut M, &EvalParams) -> Result<Evaluation>,
{
    fn evaluate(&mut self, generator: &G, model: &mut M, params: &EvalParams) -> Result<Evaluation> {
        self(generator, model, params)
    }
}
