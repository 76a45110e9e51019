//! Pixel-by-pixel compositing over the overlap of two rasters.
//!
//! The overlay is placed with its top-left corner at `(x0, y0)` in base
//! coordinates. Overlay pixels landing outside the base are skipped, so an
//! overlay may sit partially or entirely off canvas.
//!
//! Each overlay pixel contributes its colour at its own alpha: the colour is
//! treated as opaque and the alpha channel is the blend fraction. Forward
//! blending therefore applies the standard "over" operator to all four
//! channels, and the inverse solves the same equation back for the base.

use tracing::{debug, warn};

use super::{alpha_fraction, composite, is_unrecoverable, uncomposite, BlendMode};
use crate::error::Result;
use crate::raster::Raster;

/// Composite `overlay` onto a copy of `base` at offset `(x0, y0)`.
///
/// [`BlendMode::Forward`] blends the overlay in, [`BlendMode::Inverse`] removes
/// an overlay that was previously blended in at the same offset. Overlay pixels
/// with alpha `1.0` cannot be removed; those base pixels take the overlay
/// colour.
#[tracing::instrument(
    level = "debug",
    skip(base, overlay),
    fields(base = ?base.dimensions(), overlay = ?overlay.dimensions())
)]
pub fn composite_region(
    base: &Raster,
    overlay: &Raster,
    x0: i32,
    y0: i32,
    mode: BlendMode,
) -> Raster {
    let mut output = base.clone();

    let (x0, y0) = (x0 as i64, y0 as i64);
    let (base_w, base_h) = (base.width() as i64, base.height() as i64);
    let (over_w, over_h) = (overlay.width() as i64, overlay.height() as i64);

    // Overlay-space range whose base coordinates land inside the base
    let wx_start = (-x0).clamp(0, over_w);
    let wx_end = (base_w - x0).clamp(0, over_w);
    let wy_start = (-y0).clamp(0, over_h);
    let wy_end = (base_h - y0).clamp(0, over_h);

    let mut written = 0usize;
    let mut unrecoverable = 0usize;

    for wy in wy_start..wy_end {
        for wx in wx_start..wx_end {
            let (bx, by) = ((x0 + wx) as u32, (y0 + wy) as u32);
            let over = overlay.pixel(wx as u32, wy as u32);
            let below = base.pixel(bx, by);
            let alpha = over.a();

            let result = match mode {
                BlendMode::Forward => composite(over.opaque(), below, alpha),
                BlendMode::Inverse => {
                    if is_unrecoverable(alpha) {
                        unrecoverable += 1;
                    }
                    uncomposite(below, over.opaque(), alpha)
                }
            };
            output.set(bx, by, result);
            written += 1;
        }
    }

    debug!(written, "region composite finished");
    if unrecoverable > 0 {
        warn!(
            unrecoverable,
            "overlay pixels were fully opaque; base colour could not be recovered"
        );
    }

    output
}

/// Blend a watermark onto `base` at `(x, y)` using the watermark's own alpha.
pub fn add_watermark(base: &Raster, watermark: &Raster, x: i32, y: i32) -> Raster {
    composite_region(base, watermark, x, y, BlendMode::Forward)
}

/// Undo [`add_watermark`] for the same watermark at the same offset.
pub fn remove_watermark(watermarked: &Raster, watermark: &Raster, x: i32, y: i32) -> Raster {
    composite_region(watermarked, watermark, x, y, BlendMode::Inverse)
}

/// Blend two same-size rasters with a scalar mix `amount` (0-255).
///
/// `0` returns `bottom`, `255` returns `top`; every channel, alpha included,
/// is interpolated with the same fraction.
///
/// # Errors
///
/// Returns [`FilterError::IncompatibleDimensions`](crate::FilterError) if the
/// rasters differ in size.
#[tracing::instrument(level = "debug", skip(top, bottom))]
pub fn mix_alpha(top: &Raster, bottom: &Raster, amount: u8) -> Result<Raster> {
    bottom.ensure_same_size(top)?;
    Ok(mix_unchecked(top, bottom, amount))
}

/// [`mix_alpha`] for rasters already known to share a size.
pub(crate) fn mix_unchecked(top: &Raster, bottom: &Raster, amount: u8) -> Raster {
    debug_assert_eq!(top.dimensions(), bottom.dimensions());
    match amount {
        0 => bottom.clone(),
        255 => top.clone(),
        _ => {
            let a = alpha_fraction(amount);
            Raster::from_fn(top.width(), top.height(), |x, y| {
                composite(top.pixel(x, y), bottom.pixel(x, y), a)
            })
        }
    }
}
