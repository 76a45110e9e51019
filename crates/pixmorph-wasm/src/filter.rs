//! WASM bindings for the declarative filter pipeline.
//!
//! Filters are passed as plain JS objects tagged by name:
//!
//! ```typescript
//! const out = apply_filter(image, { filter: "ripple", amount: 180 }, 7);
//! const piped = apply_filters(image, [
//!   { filter: "rotate", degrees: 15 },
//!   { filter: "noise", amount: 40 },
//! ], 7);
//! ```
//!
//! `seed` drives the random effects, so the same seed reproduces the same
//! output.

use crate::types::{js_error, JsRaster};
use pixmorph_core::Filter;
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

fn parse_filter(config: JsValue) -> Result<Filter, JsValue> {
    serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("Invalid filter config: {}", e)))
}

/// Apply one filter described by `config`.
#[wasm_bindgen]
pub fn apply_filter(image: &JsRaster, config: JsValue, seed: u32) -> Result<JsRaster, JsValue> {
    let filter = parse_filter(config)?;
    let src = image.to_raster().map_err(js_error)?;
    let mut rng = StdRng::seed_from_u64(seed as u64);
    let out = filter.apply(&src, &mut rng).map_err(js_error)?;
    Ok(JsRaster::from_raster(&out))
}

/// Apply a list of filters in order.
///
/// Every config is parsed before any pixel work, so a bad entry fails the
/// whole call without partial output.
#[wasm_bindgen]
pub fn apply_filters(
    image: &JsRaster,
    configs: js_sys::Array,
    seed: u32,
) -> Result<JsRaster, JsValue> {
    let filters = configs
        .iter()
        .map(parse_filter)
        .collect::<Result<Vec<Filter>, JsValue>>()?;
    let src = image.to_raster().map_err(js_error)?;
    let mut rng = StdRng::seed_from_u64(seed as u64);
    let out = pixmorph_core::apply_all(&src, &filters, &mut rng).map_err(js_error)?;
    Ok(JsRaster::from_raster(&out))
}
