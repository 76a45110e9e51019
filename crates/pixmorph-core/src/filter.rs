//! Declarative filter configuration.
//!
//! A [`Filter`] names one single-raster operation and its parameters, so a
//! pipeline can be described as data (JSON, a JS object) and run later:
//!
//! ```json
//! [
//!   { "filter": "rotate", "degrees": 30.0 },
//!   { "filter": "sepia", "amount": 128 },
//!   { "filter": "blur", "range": 2 }
//! ]
//! ```
//!
//! Missing `amount` fields default to `255` (full effect).

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::adjustments::{self, ColorShift};
use crate::composite;
use crate::effects;
use crate::error::Result;
use crate::raster::{Color, Raster};
use crate::transform;

fn full() -> u8 {
    u8::MAX
}

fn one() -> u32 {
    1
}

/// One filter invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "filter", rename_all = "snake_case")]
pub enum Filter {
    ReflectX,
    ReflectY,
    #[serde(rename = "rotate_90_cw")]
    Rotate90Cw,
    #[serde(rename = "rotate_90_ccw")]
    Rotate90Ccw,
    #[serde(rename = "rotate_180")]
    Rotate180,
    /// Rotate by any angle, growing the canvas to fit.
    Rotate {
        degrees: f64,
    },
    /// Rotate by any angle inside the original canvas.
    RotateCropped {
        degrees: f64,
    },
    CircleDistort {
        #[serde(default = "full")]
        amount: u8,
    },
    CircleDisfigure {
        #[serde(default = "full")]
        amount: u8,
    },
    ConcaveDistort {
        #[serde(default = "full")]
        amount: u8,
    },
    SphereDistort {
        #[serde(default = "full")]
        amount: u8,
    },
    Ripple {
        #[serde(default = "full")]
        amount: u8,
    },
    Bulge {
        #[serde(default = "full")]
        amount: u8,
    },
    ScaleOut,
    CurveUp,
    CurveRight,
    Wave,
    WaveX,
    WaveY,
    Greyscale,
    Negative,
    Brighten {
        amount: u8,
    },
    Darken {
        amount: u8,
    },
    Sepia {
        #[serde(default = "full")]
        amount: u8,
    },
    Saturate {
        #[serde(default = "full")]
        amount: u8,
    },
    Tint {
        shift: ColorShift,
        #[serde(default = "full")]
        amount: u8,
    },
    CircleFade {
        color: Color,
        radius: u32,
        fade_length: u32,
    },
    SquareFade {
        color: Color,
        half_width: u32,
        fade_length: u32,
    },
    Blur {
        range: u32,
        #[serde(default = "one")]
        passes: u32,
    },
    Pixelate {
        block: u32,
    },
    Noise {
        #[serde(default = "full")]
        amount: u8,
    },
    NoiseGreyscale {
        #[serde(default = "full")]
        amount: u8,
    },
    Shimmer {
        #[serde(default = "full")]
        amount: u8,
    },
    /// Recover a watermark rendered over a white background.
    ExtractWatermark,
}

impl Filter {
    /// Run this filter on `image`.
    ///
    /// `rng` is only drawn from by the random effects.
    ///
    /// # Errors
    ///
    /// Propagates the parameter checks of the underlying filter.
    pub fn apply<R: Rng + ?Sized>(&self, image: &Raster, rng: &mut R) -> Result<Raster> {
        let out = match *self {
            Filter::ReflectX => transform::reflect_x(image),
            Filter::ReflectY => transform::reflect_y(image),
            Filter::Rotate90Cw => transform::rotate_90_cw(image),
            Filter::Rotate90Ccw => transform::rotate_90_ccw(image),
            Filter::Rotate180 => transform::rotate_180(image),
            Filter::Rotate { degrees } => transform::rotate_any(image, degrees)?,
            Filter::RotateCropped { degrees } => transform::rotate_any_cropped(image, degrees)?,
            Filter::CircleDistort { amount } => transform::circle_distort(image, amount),
            Filter::CircleDisfigure { amount } => transform::circle_disfigure(image, amount),
            Filter::ConcaveDistort { amount } => transform::concave_distort(image, amount),
            Filter::SphereDistort { amount } => transform::sphere_distort(image, amount),
            Filter::Ripple { amount } => transform::ripple(image, amount),
            Filter::Bulge { amount } => transform::bulge(image, amount),
            Filter::ScaleOut => transform::scale_out(image),
            Filter::CurveUp => transform::curve_up(image),
            Filter::CurveRight => transform::curve_right(image),
            Filter::Wave => transform::wave(image),
            Filter::WaveX => transform::wave_x(image),
            Filter::WaveY => transform::wave_y(image),
            Filter::Greyscale => adjustments::greyscale(image),
            Filter::Negative => adjustments::negative(image),
            Filter::Brighten { amount } => adjustments::brighten(image, amount),
            Filter::Darken { amount } => adjustments::darken(image, amount),
            Filter::Sepia { amount } => adjustments::sepia(image, amount),
            Filter::Saturate { amount } => adjustments::saturate(image, amount),
            Filter::Tint { shift, amount } => adjustments::tint(image, shift, amount),
            Filter::CircleFade {
                color,
                radius,
                fade_length,
            } => adjustments::circle_fade(image, color, radius, fade_length)?,
            Filter::SquareFade {
                color,
                half_width,
                fade_length,
            } => adjustments::square_fade(image, color, half_width, fade_length)?,
            Filter::Blur { range, passes } => effects::blur_passes(image, range, passes)?,
            Filter::Pixelate { block } => effects::pixelate(image, block)?,
            Filter::Noise { amount } => effects::noise(image, rng, amount),
            Filter::NoiseGreyscale { amount } => effects::noise_greyscale(image, rng, amount),
            Filter::Shimmer { amount } => effects::shimmer(image, rng, amount),
            Filter::ExtractWatermark => composite::extract_from_white_background(image),
        };
        Ok(out)
    }
}

/// Run `filters` in order, feeding each output into the next.
///
/// An empty pipeline returns a copy of `image`.
#[tracing::instrument(level = "debug", skip(image, filters, rng), fields(steps = filters.len()))]
pub fn apply_all<R: Rng + ?Sized>(
    image: &Raster,
    filters: &[Filter],
    rng: &mut R,
) -> Result<Raster> {
    let mut current = image.clone();
    for filter in filters {
        current = filter.apply(&current, rng)?;
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FilterError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn gradient(width: u32, height: u32) -> Raster {
        Raster::from_fn(width, height, |x, y| {
            Color::from_rgba8((x * 25) as u8, (y * 25) as u8, 128, 255)
        })
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_deserialize_tagged() {
        let f: Filter = serde_json::from_str(r#"{"filter": "rotate", "degrees": 45.0}"#).unwrap();
        assert_eq!(f, Filter::Rotate { degrees: 45.0 });

        let f: Filter = serde_json::from_str(r#"{"filter": "rotate_90_cw"}"#).unwrap();
        assert_eq!(f, Filter::Rotate90Cw);
    }

    #[test]
    fn test_missing_amount_defaults_to_full() {
        let f: Filter = serde_json::from_str(r#"{"filter": "sepia"}"#).unwrap();
        assert_eq!(f, Filter::Sepia { amount: 255 });

        let f: Filter = serde_json::from_str(r#"{"filter": "tint", "shift": "cool"}"#).unwrap();
        assert_eq!(
            f,
            Filter::Tint {
                shift: ColorShift::Cool,
                amount: 255
            }
        );
    }

    #[test]
    fn test_blur_passes_default_to_one() {
        let f: Filter = serde_json::from_str(r#"{"filter": "blur", "range": 3}"#).unwrap();
        assert_eq!(f, Filter::Blur { range: 3, passes: 1 });
    }

    #[test]
    fn test_deserialize_fade_color() {
        let json = r#"{
            "filter": "circle_fade",
            "color": {"r": 1.0, "g": 0.5, "b": 0.0, "a": 1.0},
            "radius": 10,
            "fade_length": 5
        }"#;
        let f: Filter = serde_json::from_str(json).unwrap();
        assert_eq!(
            f,
            Filter::CircleFade {
                color: Color::rgb(1.0, 0.5, 0.0),
                radius: 10,
                fade_length: 5
            }
        );
    }

    #[test]
    fn test_unknown_filter_rejected() {
        assert!(serde_json::from_str::<Filter>(r#"{"filter": "emboss"}"#).is_err());
    }

    #[test]
    fn test_serialize_round_trip_name() {
        let json = serde_json::to_string(&Filter::NoiseGreyscale { amount: 9 }).unwrap();
        assert_eq!(json, r#"{"filter":"noise_greyscale","amount":9}"#);
    }

    #[test]
    fn test_apply_matches_direct_call() {
        let img = gradient(8, 6);
        let out = Filter::Rotate { degrees: 90.0 }.apply(&img, &mut rng()).unwrap();
        assert_eq!(out, transform::rotate_90_ccw(&img));

        let out = Filter::Sepia { amount: 100 }.apply(&img, &mut rng()).unwrap();
        assert_eq!(out, adjustments::sepia(&img, 100));
    }

    #[test]
    fn test_apply_random_effect_uses_rng() {
        let img = gradient(8, 6);
        let a = Filter::Noise { amount: 255 }.apply(&img, &mut rng()).unwrap();
        let b = effects::noise(&img, &mut rng(), 255);
        assert_eq!(a, b);
    }

    #[test]
    fn test_apply_propagates_parameter_errors() {
        let img = gradient(4, 4);
        let result = Filter::Pixelate { block: 0 }.apply(&img, &mut rng());
        assert!(matches!(result, Err(FilterError::InvalidParameter(_))));
    }

    #[test]
    fn test_apply_rejects_non_finite_rotation() {
        let img = gradient(4, 4);
        let result = Filter::Rotate { degrees: f64::NAN }.apply(&img, &mut rng());
        assert!(matches!(result, Err(FilterError::InvalidParameter(_))));
        let result = Filter::RotateCropped {
            degrees: f64::INFINITY,
        }
        .apply(&img, &mut rng());
        assert!(matches!(result, Err(FilterError::InvalidParameter(_))));
    }

    #[test]
    fn test_apply_all_pipeline() {
        let img = gradient(5, 3);
        let filters: Vec<Filter> = serde_json::from_str(
            r#"[{"filter": "rotate_90_cw"}, {"filter": "reflect_x"}, {"filter": "negative"}]"#,
        )
        .unwrap();
        let out = apply_all(&img, &filters, &mut rng()).unwrap();
        let expected = adjustments::negative(&transform::reflect_x(&transform::rotate_90_cw(&img)));
        assert_eq!(out, expected);
        assert_eq!(out.dimensions(), (3, 5));
    }

    #[test]
    fn test_apply_all_empty_is_copy() {
        let img = gradient(3, 3);
        assert_eq!(apply_all(&img, &[], &mut rng()).unwrap(), img);
    }
}
