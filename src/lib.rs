pub mod error;
pub mod metrics;
pub mod eval;
pub mod sink;
pub mod plot;
pub mod callback;
pub mod runner;

// Convenience re-exports
pub use error::{EvalError, Result};
pub use metrics::{mean_average_precision, AveragePrecisions, Averaging, ClassAp, Label, PrecisionRecallCurve};
pub use eval::{EvalParams, Evaluation, Evaluator, LabelNames};
pub use sink::{DirectorySink, MemorySink, MetricsSink, SinkEvent};
pub use callback::{EpochHook, EpochLogs, EvaluateCallback, EvaluateConfig, HookList, MAP_KEY};
pub use runner::{EpochRunner, EpochSummary, RunConfig};
