//! vizpipe composes visualization overlays onto 2D images.
//!
//! Register named overlays on a [`Pipeline`], then call [`Pipeline::visualize`] once per frame:
//!
//! - overlays run in registration order, later ones drawing on top
//! - per-frame parameters are looked up by overlay identifier
//! - positions and paddings use one normalization rule ([`resolve_position`],
//!   [`resolve_padding`]): values within `[-1, 1]` are fractions of a reference size, negative
//!   values count from the far edge
//! - rasterization is delegated to a [`Painter`]; [`CpuPainter`] renders with `vello_cpu`
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// JSON pipeline configuration.
pub mod config;
/// Coordinate normalization.
pub mod layout;
/// Overlay contract and built-in overlays.
pub mod overlay;
/// Overlay registry and dispatch.
pub mod pipeline;
/// Drawing surface abstraction and implementation.
pub mod render;

#[cfg(test)]
#[path = "../tests/unit/support/mod.rs"]
mod test_support;

pub use crate::foundation::color::Color;
pub use crate::foundation::core::{
    Affine, Anchor, Axis, BezPath, Mat3, Point, Rect, Vec2, Vec3,
};
pub use crate::foundation::error::{VizError, VizResult};

pub use crate::config::{OverlayConfig, OverlayEntry, PipelineConfig};
pub use crate::layout::resolve::{resolve_padding, resolve_position};
pub use crate::overlay::bbox::{
    BoundingBox, BoundingBoxOverlay, BoxFill, ObjectClass, create_bounding_box,
};
pub use crate::overlay::image::ImageOverlay;
pub use crate::overlay::pose::{CameraPose, CameraPoseOverlay, TagPose, TagPoseOverlay, TagPoses};
pub use crate::overlay::text::{
    DynamicTextOverlay, FrameLabelFormat, StaticTextOverlay, TextBoxLook, frame_label,
};
pub use crate::overlay::{Overlay, OverlayInput, TextContent};
pub use crate::pipeline::{OverlayOutcome, Pipeline, Visualization};
pub use crate::render::cpu::CpuPainter;
pub use crate::render::painter::Painter;
pub use crate::render::style::{
    ArrowStyle, AxesStyle, BoundingBoxStyle, BoxLabels, HAlign, ImagePlacement, LineCap,
    LineJoin, LineStyle, PinholePose, ProjectedAxes, TextBoxStyle, TextStyle,
};
