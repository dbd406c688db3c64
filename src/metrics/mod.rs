pub mod class_ap;
pub mod averaging;
pub mod mean_ap;
pub mod pr_curve;

pub use class_ap::{AveragePrecisions, ClassAp, Label};
pub use averaging::Averaging;
pub use mean_ap::{mean_average_precision, unweighted_mean_ap, weighted_mean_ap};
pub use pr_curve::PrecisionRecallCurve;
