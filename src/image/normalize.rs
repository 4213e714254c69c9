//! Flatten, crop, fit, and center an image onto a white canvas.

use image::{imageops, imageops::FilterType, DynamicImage, Rgb, RgbImage, RgbaImage};

use super::{BoundingBox, OutputSize, WHITE};

/// Normalize an image onto an opaque white canvas of `output_size`.
///
/// The image is:
/// 1. Composited over white, dropping the alpha channel
/// 2. Cropped to the bounding box of its non-white pixels
/// 3. Scaled to fit within `output_size` with its aspect ratio kept (Lanczos3)
/// 4. Pasted centered on a white canvas of exactly `output_size`
///
/// An image with no non-white pixels yields a plain white canvas.
#[must_use]
pub fn normalize(img: &DynamicImage, output_size: OutputSize) -> RgbImage {
    let flattened = flatten_onto_white(&img.to_rgba8());

    let mut canvas = RgbImage::from_pixel(output_size.width, output_size.height, WHITE);

    let Some(bounds) = content_bounds(&flattened) else {
        tracing::debug!("No content found, emitting blank {output_size} canvas");
        return canvas;
    };

    let cropped = imageops::crop_imm(
        &flattened,
        bounds.left,
        bounds.top,
        bounds.width(),
        bounds.height(),
    )
    .to_image();

    let (new_width, new_height) = fit_within(cropped.dimensions(), output_size);
    let resized = if (new_width, new_height) == cropped.dimensions() {
        cropped
    } else {
        imageops::resize(&cropped, new_width, new_height, FilterType::Lanczos3)
    };

    let (x, y) = center_offset(resized.dimensions(), output_size);
    tracing::debug!(
        "Content {bounds:?} -> {new_width}x{new_height} at ({x}, {y}) on {output_size}"
    );

    imageops::replace(&mut canvas, &resized, i64::from(x), i64::from(y));
    canvas
}

/// Alpha-composite an RGBA image over opaque white and drop the alpha channel.
///
/// Uses straight (non-premultiplied) alpha: `out = c * a + 255 * (1 - a)`.
#[must_use]
pub fn flatten_onto_white(img: &RgbaImage) -> RgbImage {
    let (width, height) = img.dimensions();
    let mut out = RgbImage::new(width, height);

    for (dst, src) in out.pixels_mut().zip(img.pixels()) {
        let alpha = u32::from(src[3]);
        *dst = Rgb(std::array::from_fn(|c| {
            blend_over_white(u32::from(src[c]), alpha)
        }));
    }

    out
}

/// Blend one straight-alpha channel value over white, rounding to nearest.
#[inline]
#[allow(clippy::cast_possible_truncation)]
fn blend_over_white(value: u32, alpha: u32) -> u8 {
    // Safe: a convex combination of two values <= 255 stays <= 255
    ((value * alpha + 255 * (255 - alpha) + 127) / 255) as u8
}

/// Find the bounding box of all pixels that are not pure white.
///
/// Returns `None` when every pixel is white.
#[must_use]
pub fn content_bounds(img: &RgbImage) -> Option<BoundingBox> {
    let mut bounds: Option<BoundingBox> = None;

    for (x, y, pixel) in img.enumerate_pixels() {
        if *pixel == WHITE {
            continue;
        }
        let b = bounds.get_or_insert(BoundingBox {
            left: x,
            top: y,
            right: x + 1,
            bottom: y + 1,
        });
        b.left = b.left.min(x);
        b.top = b.top.min(y);
        b.right = b.right.max(x + 1);
        b.bottom = b.bottom.max(y + 1);
    }

    bounds
}

/// Compute the largest size with the same aspect ratio as `size` that fits
/// within `output_size`.
///
/// Each dimension is rounded to the nearest pixel and clamped to
/// `1..=bound`, so at least one axis always equals its bound.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn fit_within(size: (u32, u32), output_size: OutputSize) -> (u32, u32) {
    let (width, height) = size;
    let scale = f64::min(
        f64::from(output_size.width) / f64::from(width),
        f64::from(output_size.height) / f64::from(height),
    );

    // Safe: clamped to the output bounds, which fit in u32
    let scaled = |dim: u32, bound: u32| {
        (f64::from(dim) * scale)
            .round()
            .min(f64::from(bound))
            .max(1.0) as u32
    };

    (
        scaled(width, output_size.width),
        scaled(height, output_size.height),
    )
}

/// Top-left offset that centers `size` within `output_size` (floor division).
#[must_use]
pub fn center_offset(size: (u32, u32), output_size: OutputSize) -> (u32, u32) {
    let (width, height) = size;
    (
        output_size.width.saturating_sub(width) / 2,
        output_size.height.saturating_sub(height) / 2,
    )
}
