//! WASM bindings for orientation and rotation.
//!
//! Angles are in degrees, positive = counter-clockwise on screen.

use crate::types::{js_error, JsRaster, JsRotatedCanvas};
use pixmorph_core::transform;
use wasm_bindgen::prelude::*;

/// Run an infallible core transform over a JS raster.
fn with_raster(
    image: &JsRaster,
    f: impl FnOnce(&pixmorph_core::Raster) -> pixmorph_core::Raster,
) -> Result<JsRaster, JsValue> {
    let src = image.to_raster().map_err(js_error)?;
    Ok(JsRaster::from_raster(&f(&src)))
}

/// Mirror the image left/right.
#[wasm_bindgen]
pub fn reflect_x(image: &JsRaster) -> Result<JsRaster, JsValue> {
    with_raster(image, transform::reflect_x)
}

/// Mirror the image top/bottom.
#[wasm_bindgen]
pub fn reflect_y(image: &JsRaster) -> Result<JsRaster, JsValue> {
    with_raster(image, transform::reflect_y)
}

/// Rotate a quarter turn clockwise.
#[wasm_bindgen]
pub fn rotate_90_cw(image: &JsRaster) -> Result<JsRaster, JsValue> {
    with_raster(image, transform::rotate_90_cw)
}

/// Rotate a quarter turn counter-clockwise.
#[wasm_bindgen]
pub fn rotate_90_ccw(image: &JsRaster) -> Result<JsRaster, JsValue> {
    with_raster(image, transform::rotate_90_ccw)
}

/// Rotate a half turn.
#[wasm_bindgen]
pub fn rotate_180(image: &JsRaster) -> Result<JsRaster, JsValue> {
    with_raster(image, transform::rotate_180)
}

/// Rotate by any angle.
///
/// The output canvas is expanded to fit the entire rotated image (no
/// clipping); uncovered canvas pixels are transparent. Throws for a NaN or
/// infinite angle.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const canvas = rotated_bounds(image.width, image.height, 30);
/// const rotated = rotate(image, 30);
/// console.log(rotated.width === canvas.width); // true
/// ```
#[wasm_bindgen]
pub fn rotate(image: &JsRaster, angle_degrees: f64) -> Result<JsRaster, JsValue> {
    let src = image.to_raster().map_err(js_error)?;
    let out = transform::rotate_any(&src, angle_degrees).map_err(js_error)?;
    Ok(JsRaster::from_raster(&out))
}

/// Rotate by any angle inside the original canvas, clipping the corners.
#[wasm_bindgen]
pub fn rotate_cropped(image: &JsRaster, angle_degrees: f64) -> Result<JsRaster, JsValue> {
    let src = image.to_raster().map_err(js_error)?;
    let out = transform::rotate_any_cropped(&src, angle_degrees).map_err(js_error)?;
    Ok(JsRaster::from_raster(&out))
}

/// Compute the canvas an unclipped rotation would produce.
#[wasm_bindgen]
pub fn rotated_bounds(
    width: u32,
    height: u32,
    angle_degrees: f64,
) -> Result<JsRotatedCanvas, JsValue> {
    transform::compute_rotated_bounds(width, height, angle_degrees)
        .map(JsRotatedCanvas::from)
        .map_err(js_error)
}
