//! Sample file writer, the inverse of [`SampleReader`](crate::SampleReader).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use huetree_dt::{ColorClass, Sample};
use tracing::{debug, info, instrument};

use crate::IoError;

/// Writes labeled pixel blocks in the format [`SampleReader`](crate::SampleReader)
/// consumes.
///
/// Every block is written as a single row: `width` is the pixel count and
/// `height` is 1.
pub struct SampleWriter {
    path: PathBuf,
    out: BufWriter<File>,
    n_blocks: usize,
    n_samples: usize,
}

impl SampleWriter {
    /// Create (or truncate) the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::WriteFile`] if the file cannot be created.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn create(path: &Path) -> Result<Self, IoError> {
        let file = File::create(path).map_err(|e| IoError::WriteFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        debug!("sample file created");
        Ok(Self {
            path: path.to_path_buf(),
            out: BufWriter::new(file),
            n_blocks: 0,
            n_samples: 0,
        })
    }

    /// Write one block of `pixels` labeled `label`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::WriteFile`] if the write fails.
    pub fn write_block(&mut self, label: ColorClass, pixels: &[(u8, u8, u8)]) -> Result<(), IoError> {
        self.write_lines(label, pixels)
            .map_err(|e| IoError::WriteFile {
                path: self.path.clone(),
                source: e,
            })?;
        self.n_blocks += 1;
        self.n_samples += pixels.len();
        Ok(())
    }

    /// Write `samples`, starting a new block whenever the label changes.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::WriteFile`] if a write fails.
    pub fn write_samples(&mut self, samples: &[Sample]) -> Result<(), IoError> {
        for run in samples.chunk_by(|a, b| a.label() == b.label()) {
            let pixels: Vec<(u8, u8, u8)> = run.iter().map(Sample::rgb).collect();
            self.write_block(run[0].label(), &pixels)?;
        }
        Ok(())
    }

    /// Flush buffered output to disk.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::WriteFile`] if the flush fails.
    pub fn finish(mut self) -> Result<(), IoError> {
        self.out.flush().map_err(|e| IoError::WriteFile {
            path: self.path.clone(),
            source: e,
        })?;
        info!(
            path = %self.path.display(),
            n_blocks = self.n_blocks,
            n_samples = self.n_samples,
            "samples written"
        );
        Ok(())
    }

    fn write_lines(&mut self, label: ColorClass, pixels: &[(u8, u8, u8)]) -> std::io::Result<()> {
        writeln!(self.out, "{label}")?;
        writeln!(self.out, "{} 1", pixels.len())?;
        for (r, g, b) in pixels {
            writeln!(self.out, "{r} {g} {b}")?;
        }
        Ok(())
    }
}
