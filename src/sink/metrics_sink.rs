use image::RgbaImage;

use crate::error::Result;

/// Destination for per-epoch summaries.
///
/// `step` is the epoch index the value belongs to. Implementations may buffer
/// until `flush` is called.
pub trait MetricsSink {
    fn scalar(&mut self, tag: &str, value: f64, step: usize) -> Result<()>;

    fn image(&mut self, tag: &str, image: &RgbaImage, step: usize) -> Result<()>;

    fn flush(&mut self) -> Result<()>;
}

impl<S: MetricsSink + ?Sized> MetricsSink for Box<S> {
    fn scalar(&mut self, tag: &str, value: f64, step: usize) -> Result<()> {
        (**self).scalar(tag, value, step)
    }

    fn image(&mut self, tag: &str, image: &RgbaImage, step: usize) -> Result<()> {
        (**self).image(tag, image, step)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}
