//! WASM bindings for watermarking and blending.
//!
//! Watermark offsets place the watermark's top-left corner in base
//! coordinates and may be negative or off canvas.

use crate::types::{js_error, JsRaster};
use pixmorph_core::composite;
use wasm_bindgen::prelude::*;

/// Blend `watermark` onto `base` at `(x, y)` using the watermark's own alpha.
#[wasm_bindgen]
pub fn add_watermark(
    base: &JsRaster,
    watermark: &JsRaster,
    x: i32,
    y: i32,
) -> Result<JsRaster, JsValue> {
    let base = base.to_raster().map_err(js_error)?;
    let watermark = watermark.to_raster().map_err(js_error)?;
    let out = composite::add_watermark(&base, &watermark, x, y);
    Ok(JsRaster::from_raster(&out))
}

/// Remove a watermark previously added with [`add_watermark`] at the same offset.
///
/// Pixels under fully opaque watermark pixels cannot be recovered and take
/// the watermark colour.
///
/// Both calls return RGBA8, so the watermarked image is quantized before it
/// gets here. Unblending scales that rounding error by `1 / (1 - alpha)`: the
/// result is within one step of the original for watermark alphas up to
/// about half opacity, and drifts further as alpha approaches 255. Keep the
/// pipeline in `pixmorph-core` when an exact round trip is needed at high
/// alpha.
#[wasm_bindgen]
pub fn remove_watermark(
    watermarked: &JsRaster,
    watermark: &JsRaster,
    x: i32,
    y: i32,
) -> Result<JsRaster, JsValue> {
    let watermarked = watermarked.to_raster().map_err(js_error)?;
    let watermark = watermark.to_raster().map_err(js_error)?;
    let out = composite::remove_watermark(&watermarked, &watermark, x, y);
    Ok(JsRaster::from_raster(&out))
}

/// Recover a watermark layer from a render of it over pure white.
#[wasm_bindgen]
pub fn extract_watermark(image: &JsRaster) -> Result<JsRaster, JsValue> {
    let src = image.to_raster().map_err(js_error)?;
    Ok(JsRaster::from_raster(
        &composite::extract_from_white_background(&src),
    ))
}

/// Blend two same-size images: `0` returns `bottom`, `255` returns `top`.
#[wasm_bindgen]
pub fn mix_alpha(top: &JsRaster, bottom: &JsRaster, amount: u8) -> Result<JsRaster, JsValue> {
    let top = top.to_raster().map_err(js_error)?;
    let bottom = bottom.to_raster().map_err(js_error)?;
    let out = composite::mix_alpha(&top, &bottom, amount).map_err(js_error)?;
    Ok(JsRaster::from_raster(&out))
}
