//! Value types shared by every layer: geometry, colors and the error taxonomy.

/// Stable colors, named colors and categorical palettes.
pub mod color;
/// Geometry value types and anchors.
pub mod core;
/// Error taxonomy.
pub mod error;
