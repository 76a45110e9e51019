//! The pixel grid every filter reads and writes.
//!
//! A [`Raster`] is a row-major grid of [`Color`] values with normalized `f32`
//! channels. Float storage keeps the inverse blend numerically stable: a pixel
//! can be composited and uncomposited without losing more than one 8-bit step.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, `y` grows downward
//! - Signed accessors ([`Raster::get`], [`Raster::contains`]) guard every lookup;
//!   unsigned accessors ([`Raster::pixel`], [`Raster::set`]) panic out of bounds

use serde::{Deserialize, Serialize};

use crate::error::{FilterError, Result};
use crate::geometry::Point2;

/// An RGBA colour with channels in `[0.0, 1.0]`.
///
/// An alpha of `1.0` is fully opaque. Every constructor clamps, including
/// deserialization, so a `Color` never holds an out-of-range or NaN channel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "ColorFields")]
pub struct Color {
    r: f32,
    g: f32,
    b: f32,
    a: f32,
}

/// Wire form of [`Color`] before clamping.
#[derive(Deserialize)]
struct ColorFields {
    r: f32,
    g: f32,
    b: f32,
    a: f32,
}

impl From<ColorFields> for Color {
    fn from(c: ColorFields) -> Self {
        Self::new(c.r, c.g, c.b, c.a)
    }
}

impl Color {
    /// Fully transparent black, the value of every freshly allocated pixel.
    pub const TRANSPARENT: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    /// Create a colour, clamping every channel into `[0.0, 1.0]`.
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::from_channels([r, g, b, a])
    }

    /// Create an opaque colour.
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Create a colour from 8-bit channels.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Convert to 8-bit channels, rounding to the nearest step.
    pub fn to_rgba8(self) -> [u8; 4] {
        self.channels().map(channel_to_u8)
    }

    #[inline]
    pub fn r(self) -> f32 {
        self.r
    }

    #[inline]
    pub fn g(self) -> f32 {
        self.g
    }

    #[inline]
    pub fn b(self) -> f32 {
        self.b
    }

    /// Opacity, `1.0` fully opaque.
    #[inline]
    pub fn a(self) -> f32 {
        self.a
    }

    /// Channels in `[r, g, b, a]` order.
    #[inline]
    pub fn channels(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Build a colour from `[r, g, b, a]`, clamping each channel.
    ///
    /// NaN channels become `0.0`.
    #[inline]
    pub fn from_channels(channels: [f32; 4]) -> Self {
        let [r, g, b, a] = channels.map(clamp_unit);
        Self { r, g, b, a }
    }

    /// The same colour with alpha forced to `1.0`.
    #[inline]
    pub fn opaque(self) -> Self {
        Self { a: 1.0, ..self }
    }

    /// The same colour with a different alpha.
    #[inline]
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: clamp_unit(a),
            ..self
        }
    }

    /// Apply `f` to red, green and blue, keeping alpha.
    #[inline]
    pub fn map_rgb(self, f: impl Fn(f32) -> f32) -> Self {
        Self::new(f(self.r), f(self.g), f(self.b), self.a)
    }

    /// Largest of the red, green and blue channels.
    #[inline]
    pub fn max_rgb(self) -> f32 {
        self.r.max(self.g).max(self.b)
    }
}

/// Clamp a channel into `[0.0, 1.0]`, mapping NaN to `0.0`.
#[inline]
pub(crate) fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

#[inline]
fn channel_to_u8(v: f32) -> u8 {
    (clamp_unit(v) * 255.0).round() as u8
}

/// A W×H grid of RGBA pixels in row-major order.
///
/// Rasters are values: filters take `&Raster` and return a freshly allocated
/// one. Both dimensions are always at least 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Raster {
    /// Allocate a fully transparent raster.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidDimensions`] if either dimension is zero.
    pub fn blank(width: u32, height: u32) -> Result<Self> {
        Self::filled(width, height, Color::TRANSPARENT)
    }

    /// Allocate a raster with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: Color) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self::alloc(width, height, color))
    }

    /// Wrap an existing row-major pixel buffer.
    ///
    /// Every pixel is re-clamped on the way in.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidDimensions`] for a zero dimension and
    /// [`FilterError::BufferSizeMismatch`] if `pixels.len() != width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> Result<Self> {
        check_dimensions(width, height)?;
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(FilterError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels: pixels
                .into_iter()
                .map(|c| Color::from_channels(c.channels()))
                .collect(),
        })
    }

    /// Build a raster from RGBA8 bytes (4 bytes per pixel, row-major).
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        check_dimensions(width, height)?;
        let expected = width as usize * height as usize * 4;
        if bytes.len() != expected {
            return Err(FilterError::BufferSizeMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|px| Color::from_rgba8(px[0], px[1], px[2], px[3]))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Export as RGBA8 bytes (4 bytes per pixel, row-major).
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_rgba8()).collect()
    }

    /// Create a Raster from an `image::RgbaImage`.
    pub fn from_rgba_image(img: &image::RgbaImage) -> Result<Self> {
        let (width, height) = img.dimensions();
        Self::from_rgba8(width, height, img.as_raw())
    }

    /// Convert to an `image::RgbaImage` for further processing.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            image::Rgba(self.pixel(x, y).to_rgba8())
        })
    }

    /// Allocate without validation. Callers guarantee non-zero dimensions.
    pub(crate) fn alloc(width: u32, height: u32, color: Color) -> Self {
        debug_assert!(width > 0 && height > 0, "raster dimensions must be non-zero");
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// A transparent raster the same size as this one.
    pub fn blank_like(&self) -> Self {
        Self::alloc(self.width, self.height, Color::TRANSPARENT)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Row-major pixel slice.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Pivot for centered filters: `(width / 2, height / 2)` in integer division.
    pub fn center(&self) -> Point2 {
        Point2::new((self.width / 2) as f64, (self.height / 2) as f64)
    }

    /// Whether `(x, y)` addresses a pixel of this raster.
    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    /// Guarded lookup; `None` outside the grid.
    #[inline]
    pub fn get(&self, x: i64, y: i64) -> Option<Color> {
        if self.contains(x, y) {
            Some(self.pixels[self.index(x as u32, y as u32)])
        } else {
            None
        }
    }

    /// Look up a real-valued coordinate, truncating toward the grid with `floor`.
    #[inline]
    pub fn sample(&self, point: Point2) -> Option<Color> {
        if !point.x.is_finite() || !point.y.is_finite() {
            return None;
        }
        self.get(point.x.floor() as i64, point.y.floor() as i64)
    }

    /// Read a pixel.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the raster.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds for {}x{} raster",
            self.width,
            self.height
        );
        self.pixels[self.index(x, y)]
    }

    /// Write a pixel.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the raster.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds for {}x{} raster",
            self.width,
            self.height
        );
        let idx = self.index(x, y);
        self.pixels[idx] = color;
    }

    /// Build a same-size raster by mapping every pixel.
    ///
    /// Pixels are visited in row-major order.
    pub fn map_pixels(&self, mut f: impl FnMut(Color) -> Color) -> Self {
        Self {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().map(|&c| f(c)).collect(),
        }
    }

    /// Build a same-size raster from a per-coordinate function.
    pub(crate) fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Color) -> Self {
        debug_assert!(width > 0 && height > 0, "raster dimensions must be non-zero");
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Fail with [`FilterError::IncompatibleDimensions`] unless `other` matches.
    pub fn ensure_same_size(&self, other: &Raster) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(FilterError::IncompatibleDimensions {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        Ok(())
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(FilterError::InvalidDimensions { width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new_clamps() {
        let c = Color::new(1.5, -0.25, 0.5, 2.0);
        assert_eq!(c, Color::new(1.0, 0.0, 0.5, 1.0));
    }

    #[test]
    fn test_color_nan_becomes_zero() {
        let c = Color::new(f32::NAN, 0.5, 0.5, 1.0);
        assert_eq!(c.r, 0.0);
    }

    #[test]
    fn test_color_deserialize_clamps() {
        let c: Color =
            serde_json::from_str(r#"{"r": 7.0, "g": -3.0, "b": 0.5, "a": 1.5}"#).unwrap();
        assert_eq!(c, Color::new(1.0, 0.0, 0.5, 1.0));
        assert_eq!(c.channels(), [1.0, 0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_color_serialize_field_names() {
        let json = serde_json::to_string(&Color::rgb(1.0, 0.0, 0.5)).unwrap();
        assert_eq!(json, r#"{"r":1.0,"g":0.0,"b":0.5,"a":1.0}"#);
    }

    #[test]
    fn test_from_pixels_keeps_channels_in_range() {
        let r = Raster::from_pixels(1, 1, vec![Color::new(2.0, -1.0, 0.5, f32::NAN)]).unwrap();
        assert_eq!(r.pixel(0, 0).channels(), [1.0, 0.0, 0.5, 0.0]);
    }

    #[test]
    fn test_color_rgba8_conversion() {
        let c = Color::from_rgba8(255, 128, 0, 64);
        assert_eq!(c.to_rgba8(), [255, 128, 0, 64]);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_color_opaque_and_alpha() {
        let c = Color::new(0.2, 0.3, 0.4, 0.1);
        assert_eq!(c.opaque().a, 1.0);
        assert_eq!(c.with_alpha(0.5).a, 0.5);
        assert_eq!(c.opaque().r, c.r);
    }

    #[test]
    fn test_color_max_rgb() {
        assert_eq!(Color::rgb(0.1, 0.7, 0.3).max_rgb(), 0.7);
    }

    #[test]
    fn test_blank_is_transparent() {
        let r = Raster::blank(3, 2).unwrap();
        assert_eq!(r.dimensions(), (3, 2));
        assert_eq!(r.pixel_count(), 6);
        assert!(r.pixels().iter().all(|&c| c == Color::TRANSPARENT));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(
            Raster::blank(0, 5),
            Err(FilterError::InvalidDimensions {
                width: 0,
                height: 5
            })
        );
        assert!(Raster::from_rgba8(4, 0, &[]).is_err());
    }

    #[test]
    fn test_from_pixels_size_mismatch() {
        let err = Raster::from_pixels(2, 2, vec![Color::WHITE; 3]).unwrap_err();
        assert_eq!(
            err,
            FilterError::BufferSizeMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_rgba8_round_trip() {
        let bytes: Vec<u8> = (0..2 * 3 * 4).map(|i| (i * 10) as u8).collect();
        let r = Raster::from_rgba8(2, 3, &bytes).unwrap();
        assert_eq!(r.to_rgba8(), bytes);
    }

    #[test]
    fn test_rgba8_size_mismatch() {
        let err = Raster::from_rgba8(2, 2, &[0u8; 15]).unwrap_err();
        assert_eq!(
            err,
            FilterError::BufferSizeMismatch {
                expected: 16,
                actual: 15
            }
        );
    }

    #[test]
    fn test_rgba_image_interop() {
        let img = image::RgbaImage::from_fn(4, 3, |x, y| image::Rgba([x as u8, y as u8, 7, 255]));
        let r = Raster::from_rgba_image(&img).unwrap();
        assert_eq!(r.pixel(3, 2).to_rgba8(), [3, 2, 7, 255]);
        assert_eq!(r.to_rgba_image(), img);
    }

    #[test]
    fn test_guarded_get() {
        let mut r = Raster::blank(2, 2).unwrap();
        r.set(1, 1, Color::WHITE);
        assert_eq!(r.get(1, 1), Some(Color::WHITE));
        assert_eq!(r.get(-1, 0), None);
        assert_eq!(r.get(0, 2), None);
        assert_eq!(r.get(2, 0), None);
    }

    #[test]
    fn test_sample_floors() {
        let mut r = Raster::blank(3, 3).unwrap();
        r.set(2, 1, Color::WHITE);
        assert_eq!(r.sample(Point2::new(2.9, 1.2)), Some(Color::WHITE));
        assert_eq!(r.sample(Point2::new(-0.5, 1.0)), None);
        assert_eq!(r.sample(Point2::new(3.0, 1.0)), None);
        assert_eq!(r.sample(Point2::new(f64::NAN, 1.0)), None);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_pixel_out_of_bounds_panics() {
        let r = Raster::blank(2, 2).unwrap();
        let _ = r.pixel(2, 0);
    }

    #[test]
    fn test_center_uses_integer_division() {
        let r = Raster::blank(5, 4).unwrap();
        assert_eq!(r.center(), Point2::new(2.0, 2.0));
    }

    #[test]
    fn test_ensure_same_size() {
        let a = Raster::blank(4, 2).unwrap();
        let b = Raster::blank(2, 4).unwrap();
        assert!(a.ensure_same_size(&a.clone()).is_ok());
        assert_eq!(
            a.ensure_same_size(&b),
            Err(FilterError::IncompatibleDimensions {
                expected: (4, 2),
                actual: (2, 4)
            })
        );
    }

    #[test]
    fn test_map_pixels_does_not_mutate_input() {
        let r = Raster::filled(2, 2, Color::BLACK).unwrap();
        let inverted = r.map_pixels(|c| c.map_rgb(|v| 1.0 - v));
        assert_eq!(r.pixel(0, 0), Color::BLACK);
        assert_eq!(inverted.pixel(0, 0), Color::WHITE);
    }
}
