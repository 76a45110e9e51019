//! Neighbourhood and random effects.
//!
//! Random effects draw from a caller-supplied [`Rng`]; seed it for
//! reproducible output. Pixels are visited in row-major order, so the same
//! seed on the same raster always gives the same result.

use rand::Rng;

use crate::composite::region::mix_unchecked;
use crate::error::{FilterError, Result};
use crate::geometry::Point2;
use crate::raster::{Color, Raster};
use crate::resample::resample_same_size;

/// Maximum shimmer displacement in pixels along each axis.
const SHIMMER_REACH: f64 = 25.0;

/// Box blur: each pixel becomes the mean colour of the `(2 * range + 1)²`
/// window around it, clipped to the raster. Alpha is kept per pixel.
#[tracing::instrument(level = "debug", skip(image), fields(size = ?image.dimensions()))]
pub fn blur(image: &Raster, range: u32) -> Raster {
    if range == 0 {
        return image.clone();
    }
    let table = SummedArea::new(image);
    let (width, height) = image.dimensions();
    let r = range as i64;

    Raster::from_fn(width, height, |x, y| {
        let (x, y) = (x as i64, y as i64);
        let x0 = (x - r).max(0) as usize;
        let y0 = (y - r).max(0) as usize;
        let x1 = (x + r + 1).min(width as i64) as usize;
        let y1 = (y + r + 1).min(height as i64) as usize;

        let count = ((x1 - x0) * (y1 - y0)) as f64;
        let [sr, sg, sb] = table.window(x0, y0, x1, y1);
        let a = image.pixel(x as u32, y as u32).a();
        Color::new(
            (sr / count) as f32,
            (sg / count) as f32,
            (sb / count) as f32,
            a,
        )
    })
}

/// Run [`blur`] `passes` times.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameter`] if `passes` is zero.
pub fn blur_passes(image: &Raster, range: u32, passes: u32) -> Result<Raster> {
    if passes == 0 {
        return Err(FilterError::InvalidParameter(
            "blur needs at least one pass".to_string(),
        ));
    }
    let mut out = blur(image, range);
    for _ in 1..passes {
        out = blur(&out, range);
    }
    Ok(out)
}

/// Replace each `block`×`block` tile with its top-left pixel.
///
/// Tiles on the right and bottom edges are clipped.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameter`] if `block` is zero.
#[tracing::instrument(level = "debug", skip(image), fields(size = ?image.dimensions()))]
pub fn pixelate(image: &Raster, block: u32) -> Result<Raster> {
    if block == 0 {
        return Err(FilterError::InvalidParameter(
            "pixelation block size must be at least 1".to_string(),
        ));
    }
    let snap = |v: u32| (v / block * block) as f64;
    Ok(resample_same_size(image, |x, y| Point2::new(snap(x), snap(y))))
}

/// Mix uniform colour noise over the image.
pub fn noise<R: Rng + ?Sized>(image: &Raster, rng: &mut R, amount: u8) -> Raster {
    let noisy = image.map_pixels(|c| Color::new(rng.gen(), rng.gen(), rng.gen(), c.a()));
    mix_unchecked(&noisy, image, amount)
}

/// Mix uniform grey noise over the image.
pub fn noise_greyscale<R: Rng + ?Sized>(image: &Raster, rng: &mut R, amount: u8) -> Raster {
    let noisy = image.map_pixels(|c| {
        let v: f32 = rng.gen();
        Color::new(v, v, v, c.a())
    });
    mix_unchecked(&noisy, image, amount)
}

/// Sample every pixel from a random neighbour up to 25 px away on each axis.
///
/// Sample coordinates are clamped onto the raster, so no pixel goes
/// transparent.
#[tracing::instrument(level = "debug", skip(image, rng), fields(size = ?image.dimensions()))]
pub fn shimmer<R: Rng + ?Sized>(image: &Raster, rng: &mut R, amount: u8) -> Raster {
    let (width, height) = image.dimensions();
    let mut jitter = |v: u32, len: u32| {
        let offset = (rng.gen::<f64>() - 0.5) * 2.0 * SHIMMER_REACH;
        (v as f64 + offset).trunc().clamp(0.0, (len - 1) as f64)
    };
    let shimmered = resample_same_size(image, |x, y| {
        let sx = jitter(x, width);
        let sy = jitter(y, height);
        Point2::new(sx, sy)
    });
    mix_unchecked(&shimmered, image, amount)
}

/// Inclusive prefix sums of the colour channels, padded with a zero row and column.
struct SummedArea {
    stride: usize,
    sums: Vec<[f64; 3]>,
}

impl SummedArea {
    fn new(image: &Raster) -> Self {
        let (width, height) = (image.width() as usize, image.height() as usize);
        let stride = width + 1;
        let mut sums = vec![[0.0; 3]; stride * (height + 1)];

        for y in 0..height {
            let mut row = [0.0f64; 3];
            for x in 0..width {
                let c = image.pixel(x as u32, y as u32);
                row[0] += c.r() as f64;
                row[1] += c.g() as f64;
                row[2] += c.b() as f64;

                let above = sums[y * stride + x + 1];
                sums[(y + 1) * stride + x + 1] =
                    [above[0] + row[0], above[1] + row[1], above[2] + row[2]];
            }
        }
        Self { stride, sums }
    }

    /// Channel sums over `[x0, x1) × [y0, y1)`.
    fn window(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> [f64; 3] {
        let at = |x: usize, y: usize| self.sums[y * self.stride + x];
        let (a, b, c, d) = (at(x1, y1), at(x0, y1), at(x1, y0), at(x0, y0));
        std::array::from_fn(|i| a[i] - b[i] - c[i] + d[i])
    }
}
