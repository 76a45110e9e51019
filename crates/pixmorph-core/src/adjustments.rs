//! Per-pixel colour adjustments.
//!
//! Every adjustment works on red, green and blue and carries each source
//! pixel's alpha through unchanged. Adjustments that take an `amount` build a
//! fully adjusted raster and mix it over the original with
//! [`mix_alpha`](crate::composite::mix_alpha) semantics: `0` keeps the
//! original, `255` is the full effect.

use serde::{Deserialize, Serialize};

use crate::composite::composite;
use crate::composite::region::mix_unchecked;
use crate::error::{FilterError, Result};
use crate::geometry::{distance, Point2};
use crate::raster::{Color, Raster};

/// One 8-bit channel step.
const STEP: f32 = 1.0 / 255.0;

/// Colour cast applied by [`tint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorShift {
    /// Keep only the red channel, nudged up one step.
    Red,
    /// Keep only the green channel, nudged up one step.
    Green,
    /// Keep only the blue channel, nudged up one step.
    Blue,
    /// Saturate red, drop blue.
    Warm,
    /// Drop red, saturate blue.
    Cool,
}

impl ColorShift {
    #[inline]
    fn apply(self, c: Color) -> Color {
        let (r, g, b) = match self {
            ColorShift::Red => (c.r() + STEP, 0.0, 0.0),
            ColorShift::Green => (0.0, c.g() + STEP, 0.0),
            ColorShift::Blue => (0.0, 0.0, c.b() + STEP),
            ColorShift::Warm => (1.0, c.g(), 0.0),
            ColorShift::Cool => (0.0, c.g(), 1.0),
        };
        Color::new(r, g, b, c.a())
    }
}

/// Replace each pixel with a grey at the level of its brightest channel.
pub fn greyscale(image: &Raster) -> Raster {
    image.map_pixels(|c| {
        let v = c.max_rgb();
        Color::new(v, v, v, c.a())
    })
}

/// Invert red, green and blue.
pub fn negative(image: &Raster) -> Raster {
    image.map_pixels(|c| c.map_rgb(|v| 1.0 - v))
}

/// Add `amount` 8-bit steps to every colour channel, saturating at white.
pub fn brighten(image: &Raster, amount: u8) -> Raster {
    let delta = amount as f32 * STEP;
    image.map_pixels(|c| c.map_rgb(|v| v + delta))
}

/// Subtract `amount` 8-bit steps from every colour channel, saturating at black.
pub fn darken(image: &Raster, amount: u8) -> Raster {
    let delta = amount as f32 * STEP;
    image.map_pixels(|c| c.map_rgb(|v| v - delta))
}

/// Sepia tone.
///
/// Uses the common sepia matrix:
///
/// ```text
/// r' = 0.393 r + 0.769 g + 0.189 b
/// g' = 0.349 r + 0.686 g + 0.168 b
/// b' = 0.272 r + 0.534 g + 0.131 b
/// ```
#[tracing::instrument(level = "debug", skip(image), fields(size = ?image.dimensions()))]
pub fn sepia(image: &Raster, amount: u8) -> Raster {
    let toned = image.map_pixels(|c| {
        Color::new(
            0.393 * c.r() + 0.769 * c.g() + 0.189 * c.b(),
            0.349 * c.r() + 0.686 * c.g() + 0.168 * c.b(),
            0.272 * c.r() + 0.534 * c.g() + 0.131 * c.b(),
            c.a(),
        )
    });
    mix_unchecked(&toned, image, amount)
}

/// Push every channel to `0` or `1` around the 8-bit midpoint 128.
pub fn saturate(image: &Raster, amount: u8) -> Raster {
    let threshold = 128.0 / 255.0;
    let posterized = image.map_pixels(|c| c.map_rgb(|v| if v < threshold { 0.0 } else { 1.0 }));
    mix_unchecked(&posterized, image, amount)
}

/// Cast the image toward a colour.
pub fn tint(image: &Raster, shift: ColorShift, amount: u8) -> Raster {
    let cast = image.map_pixels(|c| shift.apply(c));
    mix_unchecked(&cast, image, amount)
}

/// Fade toward `color` with Euclidean distance from the center.
///
/// The blend fraction is `d / (radius + fade_length)`, reaching the full
/// colour at that distance and beyond.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameter`] if `radius + fade_length` is zero.
#[tracing::instrument(level = "debug", skip(image), fields(size = ?image.dimensions()))]
pub fn circle_fade(image: &Raster, color: Color, radius: u32, fade_length: u32) -> Result<Raster> {
    let reach = fade_reach(radius, fade_length)?;
    let center = image.center();
    Ok(fade_by(image, color, |p| distance(center, p) / reach))
}

/// Fade toward `color` with Chebyshev distance from the center.
///
/// The blend fraction is `max(|dx|, |dy|) / (half_width + fade_length)`, so
/// the fade follows concentric squares.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameter`] if `half_width + fade_length` is zero.
#[tracing::instrument(level = "debug", skip(image), fields(size = ?image.dimensions()))]
pub fn square_fade(
    image: &Raster,
    color: Color,
    half_width: u32,
    fade_length: u32,
) -> Result<Raster> {
    let reach = fade_reach(half_width, fade_length)?;
    let center = image.center();
    Ok(fade_by(image, color, |p| {
        (p.x - center.x).abs().max((p.y - center.y).abs()) / reach
    }))
}

fn fade_reach(extent: u32, fade_length: u32) -> Result<f64> {
    let reach = extent as f64 + fade_length as f64;
    if reach == 0.0 {
        return Err(FilterError::InvalidParameter(
            "fade extent plus fade length must be positive".to_string(),
        ));
    }
    Ok(reach)
}

/// Blend `color` over each pixel with a position-dependent fraction.
fn fade_by(image: &Raster, color: Color, fraction: impl Fn(Point2) -> f64) -> Raster {
    let color = color.opaque();
    Raster::from_fn(image.width(), image.height(), |x, y| {
        let src = image.pixel(x, y);
        let a = fraction(Point2::new(x as f64, y as f64)).clamp(0.0, 1.0) as f32;
        composite(color, src, a).with_alpha(src.a())
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: brighten then darken by the same amount restores unclipped channels.
        #[test]
        fn prop_brighten_darken_cancel(v in 0u8..=155, amount in 0u8..=100) {
            let img = Raster::filled(1, 1, Color::from_rgba8(v, v, v, 255)).unwrap();
            let out = darken(&brighten(&img, amount), amount);
            prop_assert_eq!(out.pixel(0, 0).to_rgba8(), [v, v, v, 255]);
        }

        /// Property: greyscale output has equal colour channels.
        #[test]
        fn prop_greyscale_channels_equal(r: u8, g: u8, b: u8, a: u8) {
            let img = Raster::filled(1, 1, Color::from_rgba8(r, g, b, a)).unwrap();
            let [gr, gg, gb, ga] = greyscale(&img).pixel(0, 0).to_rgba8();
            prop_assert_eq!(gr, gg);
            prop_assert_eq!(gg, gb);
            prop_assert_eq!(gr, r.max(g).max(b));
            prop_assert_eq!(ga, a);
        }
    }
}
