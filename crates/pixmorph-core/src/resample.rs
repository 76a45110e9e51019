//! Inverse-mapping resampler shared by every geometric filter.
//!
//! # Algorithm
//!
//! For each pixel of the output we ask the mapping function which source
//! coordinate it comes from, truncate that coordinate onto the source grid
//! with `floor`, and copy the source pixel unchanged (nearest neighbour).
//! Coordinates that land outside the source leave the output pixel at its
//! transparent default.
//!
//! ```text
//! for (dst_x, dst_y) in output:
//!     (src_x, src_y) = map_dest(dst_x, dst_y)
//!     output[dst_x, dst_y] = source[floor(src_x), floor(src_y)]  // if inside
//! ```
//!
//! Output pixels never depend on each other, so the visiting order only
//! matters for mapping functions that draw from a random source.

use crate::geometry::Point2;
use crate::raster::{Color, Raster};

/// Resample `source` into a new `width` x `height` raster.
///
/// `map_dest` receives destination coordinates in row-major order and returns
/// the source coordinate to read.
///
/// Callers pass non-zero dimensions; every filter derives them from an
/// existing raster.
pub fn resample<F>(source: &Raster, width: u32, height: u32, mut map_dest: F) -> Raster
where
    F: FnMut(u32, u32) -> Point2,
{
    Raster::from_fn(width, height, |x, y| {
        source.sample(map_dest(x, y)).unwrap_or(Color::TRANSPARENT)
    })
}

/// Resample into a raster the same size as `source`.
#[inline]
pub fn resample_same_size<F>(source: &Raster, map_dest: F) -> Raster
where
    F: FnMut(u32, u32) -> Point2,
{
    let (width, height) = source.dimensions();
    resample(source, width, height, map_dest)
}
