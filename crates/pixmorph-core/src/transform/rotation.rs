//! Arbitrary-angle rotation with nearest-neighbour sampling.
//!
//! # Algorithm
//!
//! The rotation uses inverse mapping: for each pixel in the output image we
//! rotate its coordinate about the source center and copy whichever source
//! pixel it lands on.
//!
//! For the unclipped variant the output canvas spans every destination pixel
//! whose sample lands inside the source, and the sample grid is shifted so
//! that region starts at the canvas origin:
//!
//! ```text
//! (src_x, src_y) = rotate(center, dst_x - offset_x, dst_y - offset_y, θ)
//! ```
//!
//! A positive angle turns the content counter-clockwise on screen.

use tracing::debug;

use crate::error::{FilterError, Result};
use crate::geometry::rotate_point;
use crate::raster::Raster;
use crate::resample::{resample, resample_same_size};

use super::orient::{rotate_180, rotate_90_ccw, rotate_90_cw};

/// Angles within this many degrees of a quarter turn take the exact path.
const ANGLE_EPSILON: f64 = 1e-9;

/// Slack when snapping the covered region onto the pixel grid, so corners
/// that sit on a grid line up to floating-point noise are kept.
const GRID_EPSILON: f64 = 1e-6;

/// Output canvas for an unclipped rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotatedCanvas {
    /// Width of the canvas that holds the whole rotated image.
    pub width: u32,
    /// Height of the canvas that holds the whole rotated image.
    pub height: u32,
    /// Horizontal shift applied to destination coordinates before sampling.
    pub offset_x: i64,
    /// Vertical shift applied to destination coordinates before sampling.
    pub offset_y: i64,
}

/// Which exact quarter turn, if any, an angle in degrees lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuarterTurn {
    None,
    Ccw90,
    Half,
    Cw90,
}

fn quarter_turn(angle_degrees: f64) -> Option<QuarterTurn> {
    let normalized = angle_degrees.rem_euclid(360.0);
    [
        (0.0, QuarterTurn::None),
        (90.0, QuarterTurn::Ccw90),
        (180.0, QuarterTurn::Half),
        (270.0, QuarterTurn::Cw90),
        (360.0, QuarterTurn::None),
    ]
    .into_iter()
    .find(|(angle, _)| (normalized - angle).abs() < ANGLE_EPSILON)
    .map(|(_, turn)| turn)
}

fn check_angle(angle_degrees: f64) -> Result<()> {
    if !angle_degrees.is_finite() {
        return Err(FilterError::InvalidParameter(format!(
            "rotation angle must be finite, got {angle_degrees}"
        )));
    }
    Ok(())
}

/// Compute the canvas that holds a `width` x `height` image rotated by
/// `angle_degrees` without cropping.
///
/// Quarter turns swap or keep the dimensions exactly. Any other angle gets
/// the smallest canvas (at least 1x1) containing every destination pixel
/// whose sample lands inside the source.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameter`] for a NaN or infinite angle.
///
/// # Example
///
/// ```
/// use pixmorph_core::transform::compute_rotated_bounds;
///
/// // 90-degree rotation swaps dimensions
/// let canvas = compute_rotated_bounds(100, 50, 90.0).unwrap();
/// assert_eq!((canvas.width, canvas.height), (50, 100));
/// ```
pub fn compute_rotated_bounds(
    width: u32,
    height: u32,
    angle_degrees: f64,
) -> Result<RotatedCanvas> {
    check_angle(angle_degrees)?;
    let canvas = match quarter_turn(angle_degrees) {
        Some(QuarterTurn::None | QuarterTurn::Half) => centered(width, height, width, height),
        Some(QuarterTurn::Ccw90 | QuarterTurn::Cw90) => centered(width, height, height, width),
        None => covering(width, height, angle_degrees.to_radians()),
    };
    debug!(?canvas, width, height, angle_degrees, "computed rotated canvas");
    Ok(canvas)
}

fn centered(width: u32, height: u32, new_w: u32, new_h: u32) -> RotatedCanvas {
    RotatedCanvas {
        width: new_w,
        height: new_h,
        offset_x: (new_w as i64 - width as i64) / 2,
        offset_y: (new_h as i64 - height as i64) / 2,
    }
}

/// Grid-aligned bounding box of the destination points that sample inside
/// the source: the source rectangle turned by `-angle` about the center.
fn covering(width: u32, height: u32, angle: f64) -> RotatedCanvas {
    let (w, h) = (width as f64, height as f64);
    let (cx, cy) = ((width / 2) as f64, (height / 2) as f64);

    let corners = [(0.0, 0.0), (w, 0.0), (0.0, h), (w, h)]
        .map(|(x, y)| rotate_point(cx, cy, x, y, -angle));

    let (min_x, max_x, min_y, max_y) = corners.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
        |(min_x, max_x, min_y, max_y), p| {
            (min_x.min(p.x), max_x.max(p.x), min_y.min(p.y), max_y.max(p.y))
        },
    );

    let first = |min: f64| (min - GRID_EPSILON).ceil() as i64;
    let last = |max: f64| (max + GRID_EPSILON).floor() as i64;
    let (x0, y0) = (first(min_x), first(min_y));
    let extent = |lo: i64, hi: i64| (hi - lo + 1).max(1) as u32;

    RotatedCanvas {
        width: extent(x0, last(max_x)),
        height: extent(y0, last(max_y)),
        offset_x: -x0,
        offset_y: -y0,
    }
}

/// Rotate an image by any angle, growing the canvas so nothing is cropped.
///
/// Multiples of 360° return an exact copy and exact quarter turns use the
/// index-permutation paths. Uncovered canvas pixels are transparent.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameter`] for a NaN or infinite angle.
#[tracing::instrument(level = "debug", skip(image), fields(size = ?image.dimensions()))]
pub fn rotate_any(image: &Raster, angle_degrees: f64) -> Result<Raster> {
    check_angle(angle_degrees)?;
    match quarter_turn(angle_degrees) {
        Some(QuarterTurn::None) => return Ok(image.clone()),
        Some(QuarterTurn::Ccw90) => return Ok(rotate_90_ccw(image)),
        Some(QuarterTurn::Half) => return Ok(rotate_180(image)),
        Some(QuarterTurn::Cw90) => return Ok(rotate_90_cw(image)),
        None => {}
    }

    let canvas = compute_rotated_bounds(image.width(), image.height(), angle_degrees)?;
    let center = image.center();
    let angle = angle_degrees.to_radians();

    Ok(resample(image, canvas.width, canvas.height, |x, y| {
        rotate_point(
            center.x,
            center.y,
            (x as i64 - canvas.offset_x) as f64,
            (y as i64 - canvas.offset_y) as f64,
            angle,
        )
    }))
}

/// Rotate an image by any angle about its center, keeping its size.
///
/// Corners that leave the canvas are cropped; uncovered pixels are transparent.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameter`] for a NaN or infinite angle.
#[tracing::instrument(level = "debug", skip(image), fields(size = ?image.dimensions()))]
pub fn rotate_any_cropped(image: &Raster, angle_degrees: f64) -> Result<Raster> {
    check_angle(angle_degrees)?;
    if let Some(QuarterTurn::None) = quarter_turn(angle_degrees) {
        return Ok(image.clone());
    }

    let center = image.center();
    let angle = angle_degrees.to_radians();
    Ok(resample_same_size(image, |x, y| {
        rotate_point(center.x, center.y, x as f64, y as f64, angle)
    }))
}
