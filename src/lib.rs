//! # imgnorm
//!
//! Batch-normalize a directory of images onto a fixed-size white canvas.
//!
//! Every PNG or JPEG directly under the target directory is flattened onto
//! white, cropped to its non-white content, scaled to fit the output size
//! with its aspect ratio kept, centered, and written back over the original
//! file in its original format.
//!
//! ## Example
//!
//! ```no_run
//! use imgnorm::{batch, Config};
//!
//! # fn main() -> imgnorm::Result<()> {
//! let report = batch::run(&Config::default())?;
//! println!("{} failed", report.failed_count());
//! # Ok(())
//! # }
//! ```
//!
//! Single images can be normalized without touching the filesystem:
//!
//! ```
//! use image::{DynamicImage, RgbaImage};
//! use imgnorm::image::{normalize, OutputSize};
//!
//! let img = DynamicImage::ImageRgba8(RgbaImage::new(32, 16));
//! let out = normalize(&img, OutputSize::default());
//! assert_eq!(out.dimensions(), (400, 400));
//! ```

pub mod batch;
pub mod error;
pub mod image;

pub use batch::{Config, FileOutcome, Report};
pub use error::{Error, Result};
