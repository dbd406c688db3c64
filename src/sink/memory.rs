use std::sync::{Arc, Mutex, MutexGuard};

use image::RgbaImage;

use crate::error::Result;
use crate::sink::metrics_sink::MetricsSink;

/// One call recorded by a `MemorySink`.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Scalar { tag: String, value: f64, step: usize },
    Image { tag: String, image: RgbaImage, step: usize },
    Flush,
}

/// Keeps every sink call in memory, in call order.
///
/// Clones share the same event list, so a handle kept outside the callback
/// sees what the callback wrote.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<SinkEvent>>>,
}

impl MemorySink {
    pub fn new() -> MemorySink {
        MemorySink::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn events(&self) -> Vec<SinkEvent> {
        self.lock().clone()
    }

    /// Scalars recorded under `tag`, as `(step, value)` pairs.
    pub fn scalars(&self, tag: &str) -> Vec<(usize, f64)> {
        self.lock().iter()
            .filter_map(|e| match e {
                SinkEvent::Scalar { tag: t, value, step } if t == tag => Some((*step, *value)),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<SinkEvent>> {
        // A panic while holding the lock cannot leave the Vec half-written.
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl MetricsSink for MemorySink {
    fn scalar(&mut self, tag: &str, value: f64, step: usize) -> Result<()> {
        self.lock().push(SinkEvent::Scalar { tag: tag.to_string(), value, step });
        Ok(())
    }

    fn image(&mut self, tag: &str, image: &RgbaImage, step: usize) -> Result<()> {
        self.lock().push(SinkEvent::Image { tag: tag.to_string(), image: image.clone(), step });
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.lock().push(SinkEvent::Flush);
        Ok(())
    }
}
