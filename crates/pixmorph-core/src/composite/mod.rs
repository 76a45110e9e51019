//! Alpha compositing and its algebraic inverse.
//!
//! # Formulas
//!
//! With `a` the blend fraction in `[0, 1]`, per channel:
//!
//! ```text
//! composite:    out    = top * a + bottom * (1 - a)
//! uncomposite:  bottom = (out - top * a) / (1 - a)
//! ```
//!
//! Both results are clamped into `[0, 1]`. The inverse has no solution at
//! `a = 1` (the bottom colour is fully hidden); there it returns the
//! contributor colour instead of dividing by zero.
//!
//! The region operations in [`region`] apply these per pixel over the overlap
//! of two rasters; [`extract`] inverts a blend over a white background.

pub mod extract;
pub mod region;

use serde::{Deserialize, Serialize};

use crate::raster::{clamp_unit, Color};

pub use extract::extract_from_white_background;
pub use region::{add_watermark, composite_region, mix_alpha, remove_watermark};

/// Direction of a region composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Blend the overlay onto the base.
    #[default]
    Forward,
    /// Undo a previous forward blend of the same overlay.
    Inverse,
}

/// Blend fractions at or above this are treated as fully opaque by [`uncomposite`].
const OPAQUE_THRESHOLD: f32 = 1.0 - 1e-6;

/// Convert an 8-bit mix amount into a blend fraction.
#[inline]
pub fn alpha_fraction(amount: u8) -> f32 {
    amount as f32 / 255.0
}

/// Blend `top` over `bottom` with a single scalar `alpha` in `[0, 1]`.
///
/// All four channels use the same fraction; pass the top pixel's own alpha
/// as `alpha` for a per-pixel "over".
#[inline]
pub fn composite(top: Color, bottom: Color, alpha: f32) -> Color {
    let a = clamp_unit(alpha);
    let top = top.channels();
    let bottom = bottom.channels();
    Color::from_channels(std::array::from_fn(|i| top[i] * a + bottom[i] * (1.0 - a)))
}

/// Recover the bottom colour of a [`composite`] from its result.
///
/// `observed` is the blended colour, `contributor` the known top colour and
/// `alpha` the fraction it was blended with. For `alpha` at (or numerically
/// at) `1.0` nothing of the bottom colour survived, and the contributor is
/// returned.
#[inline]
pub fn uncomposite(observed: Color, contributor: Color, alpha: f32) -> Color {
    let a = clamp_unit(alpha);
    if a >= OPAQUE_THRESHOLD {
        return Color::from_channels(contributor.channels());
    }
    let observed = observed.channels();
    let contributor = contributor.channels();
    Color::from_channels(std::array::from_fn(|i| {
        (observed[i] - contributor[i] * a) / (1.0 - a)
    }))
}

/// Whether [`uncomposite`] takes its opaque fallback for this fraction.
#[inline]
pub(crate) fn is_unrecoverable(alpha: f32) -> bool {
    clamp_unit(alpha) >= OPAQUE_THRESHOLD
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn color8() -> impl Strategy<Value = Color> {
        any::<[u8; 4]>().prop_map(|[r, g, b, a]| Color::from_rgba8(r, g, b, a))
    }

    proptest! {
        /// Property: uncompositing a composite recovers the bottom within one 8-bit step.
        #[test]
        fn prop_uncomposite_round_trip(top in color8(), bottom in color8(), amount in 1u8..=254) {
            let a = alpha_fraction(amount);
            let recovered = uncomposite(composite(top, bottom, a), top, a);
            for (got, want) in recovered.to_rgba8().iter().zip(bottom.to_rgba8().iter()) {
                prop_assert!((*got as i16 - *want as i16).abs() <= 1, "{:?} vs {:?}", recovered, bottom);
            }
        }

        /// Property: composite output stays in range.
        #[test]
        fn prop_composite_in_range(top in color8(), bottom in color8(), alpha in -1.0f32..2.0) {
            let out = composite(top, bottom, alpha);
            prop_assert!(out.channels().iter().all(|v| (0.0..=1.0).contains(v)));
        }

        /// Property: uncomposite never produces NaN or out-of-range channels.
        #[test]
        fn prop_uncomposite_in_range(observed in color8(), top in color8(), amount in any::<u8>()) {
            let out = uncomposite(observed, top, alpha_fraction(amount));
            prop_assert!(out.channels().iter().all(|v| (0.0..=1.0).contains(v)));
        }
    }
}
