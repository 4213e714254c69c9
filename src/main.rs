//! `imgnorm` CLI - Normalize a directory of images in place.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use imgnorm::batch::{self, DEFAULT_DIRECTORY};
use imgnorm::image::{OutputSize, DEFAULT_OUTPUT_EDGE};
use imgnorm::Config;

/// Flatten, crop, scale, and center every PNG/JPEG in a directory onto a
/// white canvas, overwriting the originals.
#[derive(Parser, Debug)]
#[command(name = "imgnorm")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory whose top-level images are rewritten in place.
    #[arg(value_name = "DIRECTORY", default_value = DEFAULT_DIRECTORY)]
    directory: PathBuf,

    /// Output canvas width in pixels.
    #[arg(long, default_value_t = DEFAULT_OUTPUT_EDGE, value_name = "INT")]
    width: u32,

    /// Output canvas height in pixels.
    #[arg(long, default_value_t = DEFAULT_OUTPUT_EDGE, value_name = "INT")]
    height: u32,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("imgnorm={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(err) = run(&args) {
        tracing::error!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(args: &Args) -> Result<()> {
    let config = Config {
        directory: args.directory.clone(),
        output_size: OutputSize::new(args.width, args.height),
        ..Config::default()
    };

    // Per-file failures are reported by the batch and do not fail the run
    batch::run(&config)
        .with_context(|| format!("Failed to normalize {}", config.directory.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_uses_defaults() {
        let args = Args::try_parse_from(["imgnorm"]).unwrap();
        assert_eq!(args.directory, PathBuf::from("assets"));
        assert_eq!((args.width, args.height), (400, 400));
        assert!(!args.verbose);
    }

    #[test]
    fn test_overrides() {
        let args =
            Args::try_parse_from(["imgnorm", "photos", "--width", "640", "--height", "480", "-v"])
                .unwrap();
        assert_eq!(args.directory, PathBuf::from("photos"));
        assert_eq!((args.width, args.height), (640, 480));
        assert!(args.verbose);
    }
}
