use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use image::RgbaImage;
use serde::{Serialize, Deserialize};
use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::plot::png::encode_png;
use crate::sink::metrics_sink::MetricsSink;

const SCALARS_FILE: &str = "scalars.jsonl";
const IMAGE_DIR: &str = "pr_curve";
const IMAGES_INDEX: &str = "images.jsonl";

/// One line of `scalars.jsonl`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarRecord {
    pub tag: String,
    pub value: f64,
    pub step: usize,
    pub wall_time: DateTime<Utc>,
}

/// One line of `pr_curve/images.jsonl`; `file` is relative to `pr_curve/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub tag: String,
    pub step: usize,
    pub file: String,
    pub width: u32,
    pub height: u32,
    pub wall_time: DateTime<Utc>,
}

/// Writes summaries under a log directory.
///
/// Layout:
/// ```text
/// <log_dir>/scalars.jsonl            one ScalarRecord per line
/// <log_dir>/pr_curve/images.jsonl    one ImageRecord per line
/// <log_dir>/pr_curve/<stem>_<step>.png
/// ```
/// The stem is the tag itself when it is already file-name safe; otherwise
/// the sanitized tag followed by a short digest of the original, so tags
/// like `a/b` and `a_b` never share a file.
/// Both index files are opened in append mode, so a resumed run keeps
/// extending the same history.
pub struct DirectorySink {
    log_dir: PathBuf,
    scalars: BufWriter<File>,
    images: BufWriter<File>,
}

impl DirectorySink {
    /// Creates `log_dir` and its `pr_curve` subdirectory if needed and opens
    /// the index files.
    pub fn create(log_dir: impl AsRef<Path>) -> Result<DirectorySink> {
        let log_dir = log_dir.as_ref().to_path_buf();
        let image_dir = log_dir.join(IMAGE_DIR);
        fs::create_dir_all(&image_dir)?;

        let scalars = BufWriter::new(open_append(&log_dir.join(SCALARS_FILE))?);
        let images = BufWriter::new(open_append(&image_dir.join(IMAGES_INDEX))?);

        tracing::debug!(log_dir = %log_dir.display(), "Opened directory sink");
        Ok(DirectorySink { log_dir, scalars, images })
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn scalars_path(&self) -> PathBuf {
        self.log_dir.join(SCALARS_FILE)
    }

    pub fn image_dir(&self) -> PathBuf {
        self.log_dir.join(IMAGE_DIR)
    }
}

impl MetricsSink for DirectorySink {
    fn scalar(&mut self, tag: &str, value: f64, step: usize) -> Result<()> {
        let record = ScalarRecord {
            tag: tag.to_string(),
            value,
            step,
            wall_time: Utc::now(),
        };
        serde_json::to_writer(&mut self.scalars, &record)?;
        self.scalars.write_all(b"\n")?;
        Ok(())
    }

    fn image(&mut self, tag: &str, image: &RgbaImage, step: usize) -> Result<()> {
        let file = format!("{}_{}.png", image_stem(tag), step);
        let path = self.image_dir().join(&file);
        fs::write(&path, encode_png(image)?)?;
        tracing::debug!(path = %path.display(), "Wrote summary image");

        let record = ImageRecord {
            tag: tag.to_string(),
            step,
            file,
            width: image.width(),
            height: image.height(),
            wall_time: Utc::now(),
        };
        serde_json::to_writer(&mut self.images, &record)?;
        self.images.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.scalars.flush()?;
        self.images.flush()?;
        Ok(())
    }
}

fn open_append(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// File-name-safe stem that is distinct for distinct tags.
fn image_stem(tag: &str) -> String {
    let clean = sanitize_tag(tag);
    if clean == tag {
        return clean;
    }
    let digest = Sha256::digest(tag.as_bytes());
    let short: String = digest[..4].iter().map(|b| format!("{:02x}", b)).collect();
    format!("{}-{}", clean, short)
}

/// Maps a free-form tag onto a file-name-safe string.
fn sanitize_tag(tag: &str) -> String {
    tag.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}
