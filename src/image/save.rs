//! Image saving utilities.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::{ImageFormat, RgbImage};

use crate::error::{Error, Result};

/// Save an RGB image, overwriting whatever is at `path`.
///
/// The format is inferred from the extension:
/// - JPEG is written at the given `quality` (1-100)
/// - PNG is written with the best compression and adaptive row filtering
///
/// The image is encoded in memory and written to a sibling temporary file
/// that is then renamed over `path`, so an encoding or write failure leaves
/// the original file intact.
///
/// # Errors
///
/// Returns an error if the extension is not PNG or JPEG, or if encoding or
/// writing fails.
pub fn save_image<P: AsRef<Path>>(img: &RgbImage, path: P, quality: u8) -> Result<()> {
    let path = path.as_ref();

    let format = ImageFormat::from_path(path).map_err(|_| Error::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let mut buffer = Cursor::new(Vec::new());
    let encoded = match format {
        ImageFormat::Jpeg => {
            img.write_with_encoder(JpegEncoder::new_with_quality(&mut buffer, quality))
        }
        ImageFormat::Png => img.write_with_encoder(PngEncoder::new_with_quality(
            &mut buffer,
            CompressionType::Best,
            PngFilter::Adaptive,
        )),
        _ => {
            return Err(Error::UnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    };
    encoded.map_err(|source| Error::ImageSave {
        path: path.to_path_buf(),
        source,
    })?;

    // Write to a temporary file first, then rename for atomicity
    let temp_path = temp_path_for(path);
    fs::write(&temp_path, buffer.into_inner())?;
    if let Err(err) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(err.into());
    }

    tracing::debug!("Wrote {} as {format:?}", path.display());
    Ok(())
}

/// `dir/name.ext` -> `dir/.name.ext.tmp`
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = std::ffi::OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    use image::{GenericImageView, Rgb};

    fn checker(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            if (x + y) % 2 == 0 {
                Rgb([255, 255, 255])
            } else {
                Rgb([10, 60, 200])
            }
        })
    }

    #[test]
    fn test_png_roundtrip_is_lossless() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let img = checker(16, 9);

        save_image(&img, &path, 95).unwrap();

        let loaded = image::open(&path).unwrap();
        assert_eq!(loaded.to_rgb8(), img);
        assert!(!loaded.color().has_alpha());
    }

    #[test]
    fn test_jpeg_uppercase_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("OUT.JPEG");

        save_image(&checker(32, 24), &path, 95).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
        assert_eq!(image::load_from_memory(&bytes).unwrap().dimensions(), (32, 24));
    }

    #[test]
    fn test_overwrites_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        fs::write(&path, b"old bytes").unwrap();

        save_image(&checker(8, 8), &path, 95).unwrap();

        assert_ne!(fs::read(&path).unwrap(), b"old bytes");
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("anim.gif");

        let err = save_image(&checker(4, 4), &path, 95).unwrap_err();

        assert!(matches!(err, Error::UnsupportedFormat { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_temp_path_is_hidden_sibling() {
        assert_eq!(
            temp_path_for(Path::new("assets/a.png")),
            PathBuf::from("assets/.a.png.tmp")
        );
    }
}
