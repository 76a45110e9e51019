//! Warp filters built on the resampler.
//!
//! Each filter picks a geometry primitive and derives its per-pixel parameter
//! from the destination position: distance to the center, angle to the
//! center, or a periodic function of the coordinate. Filters that take an
//! `amount` (0-255) mix the warped result over the original; `0` returns the
//! original unchanged and `255` the pure warp.
//!
//! Distances are measured from [`Raster::center`]. Where a filter uses the
//! whole-pixel distance it is truncated first, which gives the warps their
//! banded look.

use crate::composite::region::mix_unchecked;
use crate::geometry::{angle_to, distance, rotate_point, scale_point, Point2};
use crate::raster::Raster;
use crate::resample::resample_same_size;

/// Resample with a mapping that sees the destination pixel and the center.
fn warp_about_center<F>(image: &Raster, map: F) -> Raster
where
    F: Fn(Point2, Point2) -> Point2,
{
    let center = image.center();
    resample_same_size(image, |x, y| map(center, Point2::new(x as f64, y as f64)))
}

/// Swirl: rotate each sample by an angle proportional to its distance from the center.
///
/// One radian of twist per tenth of the shorter side.
#[tracing::instrument(level = "debug", skip(image), fields(size = ?image.dimensions()))]
pub fn circle_distort(image: &Raster, amount: u8) -> Raster {
    let period = image.width().min(image.height()) as f64 / 10.0;
    let warped = warp_about_center(image, |c, p| {
        rotate_point(c.x, c.y, p.x, p.y, distance(c, p) / period)
    });
    mix_unchecked(&warped, image, amount)
}

/// Scramble: rotate each sample by `cos(x * y)` radians about the center.
#[tracing::instrument(level = "debug", skip(image), fields(size = ?image.dimensions()))]
pub fn circle_disfigure(image: &Raster, amount: u8) -> Raster {
    let warped = warp_about_center(image, |c, p| {
        rotate_point(c.x, c.y, p.x, p.y, (p.x * p.y).cos())
    });
    mix_unchecked(&warped, image, amount)
}

/// Four-lobed pinch: scale by `cos(4 * angle)` where `angle` points from the center.
///
/// Along the axes the image is untouched; along the diagonals it is reflected
/// through the center.
#[tracing::instrument(level = "debug", skip(image), fields(size = ?image.dimensions()))]
pub fn concave_distort(image: &Raster, amount: u8) -> Raster {
    let warped = warp_about_center(image, |c, p| {
        scale_point(c.x, c.y, p.x, p.y, (angle_to(c, p) * 4.0).cos())
    });
    mix_unchecked(&warped, image, amount)
}

/// Lens: scale by `sin(d / 50)` of the whole-pixel distance `d`.
#[tracing::instrument(level = "debug", skip(image), fields(size = ?image.dimensions()))]
pub fn sphere_distort(image: &Raster, amount: u8) -> Raster {
    let warped = warp_about_center(image, |c, p| {
        scale_point(c.x, c.y, p.x, p.y, (distance(c, p).trunc() / 50.0).sin())
    });
    mix_unchecked(&warped, image, amount)
}

/// Concentric rings: scale by `sin(d / 6)` of the whole-pixel distance `d`.
#[tracing::instrument(level = "debug", skip(image), fields(size = ?image.dimensions()))]
pub fn ripple(image: &Raster, amount: u8) -> Raster {
    let warped = warp_about_center(image, |c, p| {
        scale_point(c.x, c.y, p.x, p.y, (distance(c, p).trunc() / 6.0).sin())
    });
    mix_unchecked(&warped, image, amount)
}

/// Magnify toward the center: scale by `d / min(width, height)`.
#[tracing::instrument(level = "debug", skip(image), fields(size = ?image.dimensions()))]
pub fn bulge(image: &Raster, amount: u8) -> Raster {
    let span = image.width().min(image.height()) as f64;
    let warped = warp_about_center(image, |c, p| {
        scale_point(c.x, c.y, p.x, p.y, distance(c, p).trunc() / span)
    });
    mix_unchecked(&warped, image, amount)
}

/// Shrink toward the edges: scale by `(max(width, height) - d) / max(width, height)`.
#[tracing::instrument(level = "debug", skip(image), fields(size = ?image.dimensions()))]
pub fn scale_out(image: &Raster) -> Raster {
    let span = image.width().max(image.height()) as f64;
    warp_about_center(image, |c, p| {
        scale_point(c.x, c.y, p.x, p.y, (span - distance(c, p).trunc()) / span)
    })
}

/// Scale about the top-left corner by `y / height`.
pub fn curve_up(image: &Raster) -> Raster {
    let height = image.height() as f64;
    resample_same_size(image, |x, y| {
        let (x, y) = (x as f64, y as f64);
        scale_point(0.0, 0.0, x, y, y / height)
    })
}

/// Scale about the top-left corner by `x / width`.
pub fn curve_right(image: &Raster) -> Raster {
    let width = image.width() as f64;
    resample_same_size(image, |x, y| {
        let (x, y) = (x as f64, y as f64);
        scale_point(0.0, 0.0, x, y, x / width)
    })
}

/// Horizontal sample offset of the wave filters: `10 * sin(x / 18)`.
#[inline]
fn wave_offset_x(x: f64) -> f64 {
    (x / 18.0).sin() * 10.0
}

/// Vertical sample offset of the wave filters: `10 * cos(y / 20)`.
#[inline]
fn wave_offset_y(y: f64) -> f64 {
    (y / 20.0).cos() * 10.0
}

/// Truncate a sample coordinate and clamp it onto `[0, len)`.
#[inline]
fn clamp_to_axis(v: f64, len: u32) -> f64 {
    v.trunc().clamp(0.0, (len - 1) as f64)
}

/// Shift samples along both axes. Never leaves the source.
pub fn wave(image: &Raster) -> Raster {
    let (width, height) = image.dimensions();
    resample_same_size(image, |x, y| {
        let (x, y) = (x as f64, y as f64);
        Point2::new(
            clamp_to_axis(x + wave_offset_x(x), width),
            clamp_to_axis(y + wave_offset_y(y), height),
        )
    })
}

/// Shift samples horizontally.
pub fn wave_x(image: &Raster) -> Raster {
    let width = image.width();
    resample_same_size(image, |x, y| {
        let x = x as f64;
        Point2::new(clamp_to_axis(x + wave_offset_x(x), width), y as f64)
    })
}

/// Shift samples vertically.
pub fn wave_y(image: &Raster) -> Raster {
    let height = image.height();
    resample_same_size(image, |x, y| {
        let y = y as f64;
        Point2::new(x as f64, clamp_to_axis(y + wave_offset_y(y), height))
    })
}
