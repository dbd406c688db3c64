pub mod params;
pub mod evaluator;
pub mod labels;

pub use params::EvalParams;
pub use evaluator::{Evaluation, Evaluator};
pub use labels::LabelNames;
