//! Resolution of user-facing positions and paddings into absolute pixel coordinates.
//!
//! Positions accept three regimes per axis, relative to a reference dimension `d`:
//!
//! - `0 <= v <= 1`: fraction of `d` (`v * d`)
//! - `-1 <= v < 0`: fraction measured from the far edge (`d + v * d`)
//! - `v < -1`: absolute offset from the far edge (`d + v`)
//! - `v > 1`: already absolute
//!
//! Paddings only distinguish fractions (`|v| <= 1`, scaled by `d`) from absolute values.

use crate::foundation::core::{Point, Vec2};

/// Resolve one position component against reference dimension `d`.
pub fn resolve_position_axis(v: f64, d: f64) -> f64 {
    if v < 0.0 {
        if v >= -1.0 { d + v * d } else { d + v }
    } else if v <= 1.0 {
        v * d
    } else {
        v
    }
}

/// Resolve one padding component against reference dimension `d`.
pub fn resolve_padding_axis(v: f64, d: f64) -> f64 {
    if v.abs() <= 1.0 { v * d } else { v }
}

/// Resolve a position against a `ref_width x ref_height` reference (usually the canvas).
pub fn resolve_position(pos: Vec2, ref_width: f64, ref_height: f64) -> Point {
    Point::new(
        resolve_position_axis(pos.x, ref_width),
        resolve_position_axis(pos.y, ref_height),
    )
}

/// Resolve a padding against a `ref_width x ref_height` reference (usually the decorated box).
pub fn resolve_padding(pad: Vec2, ref_width: f64, ref_height: f64) -> Vec2 {
    Vec2::new(
        resolve_padding_axis(pad.x, ref_width),
        resolve_padding_axis(pad.y, ref_height),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/layout/resolve.rs"]
mod tests;
