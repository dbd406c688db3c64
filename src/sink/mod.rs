pub mod metrics_sink;
pub mod directory;
pub mod memory;

pub use metrics_sink::MetricsSink;
pub use directory::{DirectorySink, ScalarRecord, ImageRecord};
pub use memory::{MemorySink, SinkEvent};
