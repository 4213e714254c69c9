//! Image loading, normalizing, and saving utilities.

mod load;
mod normalize;
mod save;

pub use load::load_image;
pub use normalize::{center_offset, content_bounds, fit_within, flatten_onto_white, normalize};
pub use save::save_image;

use ::image::Rgb;

/// Default edge length of the normalized canvas.
pub const DEFAULT_OUTPUT_EDGE: u32 = 400;

/// Canvas and background color.
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Target dimensions of a normalized image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputSize {
    pub width: u32,
    pub height: u32,
}

impl OutputSize {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for OutputSize {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_EDGE, DEFAULT_OUTPUT_EDGE)
    }
}

impl std::fmt::Display for OutputSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Smallest rectangle enclosing all non-white pixels.
///
/// `right` and `bottom` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl BoundingBox {
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.right - self.left
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.bottom - self.top
    }
}
