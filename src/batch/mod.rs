//! Batch normalization of an image directory.

mod config;
mod driver;

pub use config::{Config, DEFAULT_DIRECTORY, DEFAULT_QUALITY};
pub use driver::{discover, process_file, run, FileOutcome, Report, SUPPORTED_EXTENSIONS};
