//! Image loading utilities.

use std::path::Path;

use image::{DynamicImage, GenericImageView, ImageReader};

use crate::error::{Error, Result};

/// Load and decode an image from disk.
///
/// The container format is sniffed from the file contents rather than
/// trusted from the extension, so a PNG saved as `.jpg` still decodes.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    let path = path.as_ref();

    let img = ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|source| Error::ImageLoad {
            path: path.to_path_buf(),
            source,
        })?;

    let (width, height) = img.dimensions();
    tracing::debug!("Decoded {} ({width}x{height}, {:?})", path.display(), img.color());

    Ok(img)
}
