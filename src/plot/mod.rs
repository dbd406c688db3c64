pub mod chart;
pub mod png;

pub use chart::{render_pr_curve, CHART_HEIGHT, CHART_WIDTH};
pub use png::encode_png;
