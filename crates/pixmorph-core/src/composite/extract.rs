//! Recover a watermark's colour and alpha from a render over white.
//!
//! A watermark `W` blended over white at alpha `a` gives, per channel,
//! `C = W * a + 1 * (1 - a)`. The alpha is inferred as `1 - max(R, G, B)` and
//! the equation is solved for `W`:
//!
//! ```text
//! W = 1 - (1 - C) / a
//! ```
//!
//! Pixels whose brightest channel is already white carry no recoverable
//! watermark and become transparent black.

use crate::raster::{Color, Raster};

/// Extract the watermark layer from a watermark-over-white composite.
#[tracing::instrument(level = "debug", skip(image), fields(size = ?image.dimensions()))]
pub fn extract_from_white_background(image: &Raster) -> Raster {
    image.map_pixels(extract_pixel)
}

#[inline]
fn extract_pixel(c: Color) -> Color {
    let alpha = 1.0 - c.max_rgb();
    if alpha <= 0.0 {
        return Color::TRANSPARENT;
    }
    c.map_rgb(|v| 1.0 - (1.0 - v) / alpha).with_alpha(alpha)
}
