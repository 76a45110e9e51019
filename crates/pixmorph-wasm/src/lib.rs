//! Pixmorph WASM - WebAssembly bindings for Pixmorph
//!
//! This crate exposes the pixmorph-core filters to JavaScript/TypeScript
//! applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for RGBA raster data
//! - `transform` - Reflections, quarter turns and arbitrary rotation
//! - `composite` - Watermark add/remove/extract and two-image blending
//! - `filter` - Every filter, driven by a tagged JS config object
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsRaster, rotate, apply_filter } from '@pixmorph/wasm';
//!
//! await init();
//!
//! const data = ctx.getImageData(0, 0, w, h);
//! const image = new JsRaster(w, h, new Uint8Array(data.data.buffer));
//! const rotated = rotate(image, 30);
//! const swirled = apply_filter(rotated, { filter: "circle_distort", amount: 200 }, 0);
//! ```

use wasm_bindgen::prelude::*;

mod composite;
mod filter;
mod transform;
mod types;

// Re-export public types
pub use composite::{add_watermark, extract_watermark, mix_alpha, remove_watermark};
pub use filter::{apply_filter, apply_filters};
pub use transform::{
    reflect_x, reflect_y, rotate, rotate_180, rotate_90_ccw, rotate_90_cw, rotate_cropped,
    rotated_bounds,
};
pub use types::{JsRaster, JsRotatedCanvas};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
