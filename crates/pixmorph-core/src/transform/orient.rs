//! Exact reflections and quarter turns.
//!
//! These are pure index permutations expressed as resampler mappings; every
//! source coordinate is an exact integer, so pixels are moved, never blended.

use crate::geometry::Point2;
use crate::raster::Raster;
use crate::resample::{resample, resample_same_size};

/// Mirror left/right.
pub fn reflect_x(image: &Raster) -> Raster {
    let last_x = image.width() as f64 - 1.0;
    resample_same_size(image, |x, y| Point2::new(last_x - x as f64, y as f64))
}

/// Mirror top/bottom.
pub fn reflect_y(image: &Raster) -> Raster {
    let last_y = image.height() as f64 - 1.0;
    resample_same_size(image, |x, y| Point2::new(x as f64, last_y - y as f64))
}

/// Rotate a quarter turn clockwise. A W×H raster becomes H×W.
pub fn rotate_90_cw(image: &Raster) -> Raster {
    let (width, height) = image.dimensions();
    let last_y = height as f64 - 1.0;
    resample(image, height, width, |x, y| {
        Point2::new(y as f64, last_y - x as f64)
    })
}

/// Rotate a quarter turn counter-clockwise. A W×H raster becomes H×W.
pub fn rotate_90_ccw(image: &Raster) -> Raster {
    let (width, height) = image.dimensions();
    let last_x = width as f64 - 1.0;
    resample(image, height, width, |x, y| {
        Point2::new(last_x - y as f64, x as f64)
    })
}

/// Rotate a half turn.
pub fn rotate_180(image: &Raster) -> Raster {
    let last_x = image.width() as f64 - 1.0;
    let last_y = image.height() as f64 - 1.0;
    resample_same_size(image, |x, y| {
        Point2::new(last_x - x as f64, last_y - y as f64)
    })
}
