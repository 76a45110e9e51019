//! WASM-compatible wrapper types for raster data.
//!
//! Rasters cross the JS boundary as RGBA8 bytes (4 bytes per pixel,
//! row-major), the layout of a canvas `ImageData` buffer.

use pixmorph_core::{FilterError, Raster, RotatedCanvas};
use wasm_bindgen::prelude::*;

/// An RGBA raster wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`.
///
/// The `free()` method can be called to explicitly release WASM memory, but this is
/// optional as wasm-bindgen's finalizer will handle cleanup automatically.
#[wasm_bindgen]
pub struct JsRaster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsRaster {
    /// Create a new JsRaster from dimensions and RGBA8 pixel data.
    ///
    /// The buffer is validated when the raster is first passed to a filter.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsRaster {
        JsRaster {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsRaster {
    /// Wrap a core raster, quantizing it to RGBA8.
    pub(crate) fn from_raster(raster: &Raster) -> Self {
        Self {
            width: raster.width(),
            height: raster.height(),
            pixels: raster.to_rgba8(),
        }
    }

    /// Convert to a core raster.
    ///
    /// Fails if a dimension is zero or the buffer does not hold
    /// `width * height * 4` bytes.
    pub(crate) fn to_raster(&self) -> Result<Raster, FilterError> {
        Raster::from_rgba8(self.width, self.height, &self.pixels)
    }
}

/// Canvas size and content offset for an unclipped rotation.
#[wasm_bindgen]
pub struct JsRotatedCanvas {
    inner: RotatedCanvas,
}

#[wasm_bindgen]
impl JsRotatedCanvas {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Horizontal shift between canvas and source coordinates (may be negative)
    #[wasm_bindgen(getter)]
    pub fn offset_x(&self) -> f64 {
        self.inner.offset_x as f64
    }

    /// Vertical shift between canvas and source coordinates (may be negative)
    #[wasm_bindgen(getter)]
    pub fn offset_y(&self) -> f64 {
        self.inner.offset_y as f64
    }
}

impl From<RotatedCanvas> for JsRotatedCanvas {
    fn from(inner: RotatedCanvas) -> Self {
        Self { inner }
    }
}

/// Map a core error onto a JS exception value.
pub(crate) fn js_error(err: FilterError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
