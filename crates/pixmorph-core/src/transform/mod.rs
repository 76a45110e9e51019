//! Geometric transforms: orientation, rotation and warps.
//!
//! Every transform in this module is an instance of the inverse-mapping
//! [`resample`](crate::resample::resample) routine, parametrized by one of the
//! two point primitives in [`geometry`](crate::geometry).
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = counter-clockwise on screen
//! - Origin is top-left corner, `y` grows downward
//! - Centered transforms pivot on `(width / 2, height / 2)` (integer division)
//! - Sampling is nearest neighbour; source coordinates are floored

mod distort;
mod orient;
mod rotation;

pub use distort::{
    bulge, circle_disfigure, circle_distort, concave_distort, curve_right, curve_up, ripple,
    scale_out, sphere_distort, wave, wave_x, wave_y,
};
pub use orient::{reflect_x, reflect_y, rotate_180, rotate_90_ccw, rotate_90_cw};
pub use rotation::{compute_rotated_bounds, rotate_any, rotate_any_cropped, RotatedCanvas};
