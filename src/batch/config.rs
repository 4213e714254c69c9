//! Batch run configuration.

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::image::OutputSize;

/// Directory processed when none is given.
pub const DEFAULT_DIRECTORY: &str = "assets";

/// Quality used when re-encoding lossy formats.
pub const DEFAULT_QUALITY: u8 = 95;

/// Configuration for a normalization run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory whose top-level images are normalized in place.
    pub directory: PathBuf,

    /// Size of every normalized image.
    pub output_size: OutputSize,

    /// Output JPEG quality (1-100).
    pub quality: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_DIRECTORY),
            output_size: OutputSize::default(),
            quality: DEFAULT_QUALITY,
        }
    }
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of valid range.
    pub fn validate(&self) -> Result<()> {
        if self.output_size.width == 0 {
            return Err(Error::InvalidParameter {
                name: "width".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        if self.output_size.height == 0 {
            return Err(Error::InvalidParameter {
                name: "height".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        if !(1..=100).contains(&self.quality) {
            return Err(Error::InvalidParameter {
                name: "quality".to_string(),
                reason: "must be between 1 and 100".to_string(),
            });
        }

        Ok(())
    }
}
