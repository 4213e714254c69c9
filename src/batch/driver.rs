//! Directory scan and per-file normalize loop.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::image;

use super::Config;

/// File extensions picked up by [`discover`], compared case-insensitively.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// What happened to a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// The file was normalized and overwritten.
    Normalized { path: PathBuf },
    /// The file was left untouched.
    Failed { path: PathBuf, message: String },
}

impl FileOutcome {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Normalized { path } | Self::Failed { path, .. } => path,
        }
    }

    #[must_use]
    pub const fn is_normalized(&self) -> bool {
        matches!(self, Self::Normalized { .. })
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, Default)]
pub struct Report {
    /// Files found, in processing order.
    pub discovered: Vec<PathBuf>,
    /// One outcome per discovered file.
    pub outcomes: Vec<FileOutcome>,
}

impl Report {
    #[must_use]
    pub fn normalized_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_normalized()).count()
    }

    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.normalized_count()
    }
}

/// List the images directly under `directory`, sorted by path.
///
/// Only regular files with a supported extension are returned;
/// subdirectories are not descended into.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn discover<P: AsRef<Path>>(directory: P) -> Result<Vec<PathBuf>> {
    let directory = directory.as_ref();
    let read_err = |source: std::io::Error| Error::DirectoryRead {
        path: directory.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(directory).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        // Follows symlinks, so a link to an image counts as a file
        if path.is_file() && has_supported_extension(&path) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

/// Normalize one file in place, turning any failure into an outcome.
#[must_use]
pub fn process_file(path: &Path, config: &Config) -> FileOutcome {
    match normalize_in_place(path, config) {
        Ok(()) => FileOutcome::Normalized {
            path: path.to_path_buf(),
        },
        Err(err) => {
            tracing::error!("Error processing {}: {err}", path.display());
            FileOutcome::Failed {
                path: path.to_path_buf(),
                message: err.to_string(),
            }
        }
    }
}

fn normalize_in_place(path: &Path, config: &Config) -> Result<()> {
    let img = image::load_image(path)?;
    let normalized = image::normalize(&img, config.output_size);
    drop(img);
    image::save_image(&normalized, path, config.quality)
}

/// Normalize every supported image in `config.directory`, overwriting each.
///
/// Progress and a final summary are printed to stdout. Failures on single
/// files are reported and skipped.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the directory
/// cannot be read.
pub fn run(config: &Config) -> Result<Report> {
    config.validate()?;

    tracing::info!("Normalizing {} to {}", config.directory.display(), config.output_size);

    let discovered = discover(&config.directory)?;

    println!("Found {} images to process:", discovered.len());
    for path in &discovered {
        println!("  - {}", path.display());
    }

    let mut outcomes = Vec::with_capacity(discovered.len());
    for path in &discovered {
        println!("\nProcessing: {}", path.display());

        let outcome = process_file(path, config);
        if outcome.is_normalized() {
            println!("  \u{2713} Processed and saved: {}", path.display());
        } else {
            println!("  \u{2717} Failed to process: {}", path.display());
        }
        outcomes.push(outcome);
    }

    let report = Report {
        discovered,
        outcomes,
    };

    println!("\nCompleted processing {} images!", report.discovered.len());
    println!("All images now have:");
    println!("- White backgrounds (no transparency)");
    println!("- Consistent {} size", config.output_size);
    println!("- Centered content");

    tracing::info!(
        "{} normalized, {} failed",
        report.normalized_count(),
        report.failed_count()
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    use ::image::{GenericImageView, Rgb, RgbImage};

    use crate::image::OutputSize;

    fn write_sample(path: &Path) {
        let mut img = RgbImage::from_pixel(60, 40, Rgb([255, 255, 255]));
        for y in 10..30 {
            for x in 5..25 {
                img.put_pixel(x, y, Rgb([200, 30, 30]));
            }
        }
        img.save(path).unwrap();
    }

    fn config_for(dir: &Path) -> Config {
        Config {
            directory: dir.to_path_buf(),
            ..Config::default()
        }
    }

    #[test]
    fn test_discover_scope() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for name in ["b.png", "a.JPG", "c.Jpeg", "d.gif", "e.txt", "noext"] {
            fs::write(root.join(name), b"x").unwrap();
        }
        fs::create_dir(root.join("nested")).unwrap();
        fs::write(root.join("nested").join("f.png"), b"x").unwrap();
        fs::create_dir(root.join("dir.png")).unwrap();

        let files = discover(root).unwrap();

        assert_eq!(
            files,
            vec![root.join("a.JPG"), root.join("b.png"), root.join("c.Jpeg")]
        );
    }

    #[test]
    fn test_discover_missing_directory() {
        let dir = tempfile::tempdir().unwrap();

        let err = discover(dir.path().join("nope")).unwrap_err();

        assert!(matches!(err, Error::DirectoryRead { .. }));
    }

    #[test]
    fn test_process_file_failure_leaves_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.png");
        fs::write(&path, b"\x89PNG\r\n\x1a\ntruncated").unwrap();

        let outcome = process_file(&path, &config_for(dir.path()));

        assert!(matches!(outcome, FileOutcome::Failed { .. }));
        assert_eq!(outcome.path(), path.as_path());
        assert_eq!(fs::read(&path).unwrap(), b"\x89PNG\r\n\x1a\ntruncated");
    }

    #[test]
    fn test_run_is_resilient_to_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write_sample(&root.join("one.png"));
        write_sample(&root.join("two.jpg"));
        fs::write(root.join("three.png"), b"not an image").unwrap();

        let report = run(&config_for(root)).unwrap();

        assert_eq!(report.discovered.len(), 3);
        assert_eq!(report.normalized_count(), 2);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(fs::read(root.join("three.png")).unwrap(), b"not an image");

        for name in ["one.png", "two.jpg"] {
            let img = ::image::open(root.join(name)).unwrap();
            assert_eq!(img.dimensions(), (400, 400));
            assert!(!img.color().has_alpha());
        }
    }

    #[test]
    fn test_run_leaves_out_of_scope_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("sub")).unwrap();
        write_sample(&root.join("sub").join("inner.png"));
        fs::write(root.join("anim.gif"), b"GIF89a").unwrap();
        let inner_before = fs::read(root.join("sub").join("inner.png")).unwrap();

        let report = run(&config_for(root)).unwrap();

        assert!(report.discovered.is_empty());
        assert_eq!(
            fs::read(root.join("sub").join("inner.png")).unwrap(),
            inner_before
        );
        assert_eq!(fs::read(root.join("anim.gif")).unwrap(), b"GIF89a");
    }

    #[test]
    fn test_run_custom_size() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write_sample(&root.join("one.png"));

        let config = Config {
            output_size: OutputSize::new(64, 32),
            ..config_for(root)
        };
        let report = run(&config).unwrap();

        assert_eq!(report.normalized_count(), 1);
        let img = ::image::open(root.join("one.png")).unwrap();
        assert_eq!(img.dimensions(), (64, 32));
    }

    #[test]
    fn test_run_rejects_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            quality: 101,
            ..config_for(dir.path())
        };

        assert!(run(&config).is_err());
    }
}
