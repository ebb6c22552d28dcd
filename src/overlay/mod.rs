//! The overlay contract and the built-in overlay kinds.
//!
//! An overlay owns its style configuration and decides what to draw and where; all rasterization
//! goes through a [`Painter`]. Draw failures never escape [`Overlay::apply`]: they are logged and
//! folded into the returned success flag.

use ::image::{RgbImage, RgbaImage};
use serde::{Deserialize, Deserializer, Serialize};

use crate::foundation::error::VizResult;
use crate::render::painter::Painter;

/// Bounding boxes with labels.
pub mod bbox;
/// Image blitting.
pub mod image;
/// Camera and tag pose axes.
pub mod pose;
/// Dynamic and static text boxes.
pub mod text;

use self::bbox::BoundingBox;
use self::pose::{CameraPose, TagPoses};

/// A configurable unit that draws one kind of annotation onto a painter.
pub trait Overlay {
    /// Short name of the overlay kind, used in logs.
    fn kind(&self) -> &'static str;

    /// Check that the configuration can be applied.
    ///
    /// [`crate::Pipeline::add`] refuses overlays that fail this check.
    fn validate(&self) -> VizResult<()> {
        Ok(())
    }

    /// Draw onto `painter` using the per-call `input`, if any.
    ///
    /// Returns `true` only if every draw call succeeded.
    fn apply(&self, painter: &mut dyn Painter, input: Option<&OverlayInput>) -> bool;
}

/// Per-call parameters handed to an overlay.
#[derive(Clone, Debug, PartialEq)]
pub enum OverlayInput {
    /// Text for a dynamic text overlay.
    Text(TextContent),
    /// Boxes for a bounding box overlay, drawn in order.
    BoundingBoxes(Vec<BoundingBox>),
    /// Straight-alpha image for an image overlay.
    Image(RgbaImage),
    /// Single camera pose.
    CameraPose(CameraPose),
    /// Several tag poses sharing one intrinsic matrix.
    TagPoses(TagPoses),
}

impl OverlayInput {
    /// Short name of the input variant, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            OverlayInput::Text(_) => "text",
            OverlayInput::BoundingBoxes(_) => "bounding_boxes",
            OverlayInput::Image(_) => "image",
            OverlayInput::CameraPose(_) => "camera_pose",
            OverlayInput::TagPoses(_) => "tag_poses",
        }
    }
}

impl From<TextContent> for OverlayInput {
    fn from(v: TextContent) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for OverlayInput {
    fn from(v: &str) -> Self {
        Self::Text(v.into())
    }
}

impl From<String> for OverlayInput {
    fn from(v: String) -> Self {
        Self::Text(v.into())
    }
}

impl From<Vec<String>> for OverlayInput {
    fn from(v: Vec<String>) -> Self {
        Self::Text(v.into())
    }
}

impl From<Vec<BoundingBox>> for OverlayInput {
    fn from(v: Vec<BoundingBox>) -> Self {
        Self::BoundingBoxes(v)
    }
}

impl From<RgbaImage> for OverlayInput {
    fn from(v: RgbaImage) -> Self {
        Self::Image(v)
    }
}

impl From<RgbImage> for OverlayInput {
    fn from(v: RgbImage) -> Self {
        Self::Image(::image::DynamicImage::ImageRgb8(v).into_rgba8())
    }
}

impl From<CameraPose> for OverlayInput {
    fn from(v: CameraPose) -> Self {
        Self::CameraPose(v)
    }
}

impl From<TagPoses> for OverlayInput {
    fn from(v: TagPoses) -> Self {
        Self::TagPoses(v)
    }
}

/// A single line or an ordered list of lines.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextContent {
    /// One line.
    Line(String),
    /// Lines from top to bottom.
    Lines(Vec<String>),
}

impl TextContent {
    /// Lines from top to bottom.
    pub fn lines(&self) -> &[String] {
        match self {
            TextContent::Line(s) => std::slice::from_ref(s),
            TextContent::Lines(v) => v,
        }
    }

    /// Consume into owned lines.
    pub fn into_lines(self) -> Vec<String> {
        match self {
            TextContent::Line(s) => vec![s],
            TextContent::Lines(v) => v,
        }
    }
}

impl Default for TextContent {
    fn default() -> Self {
        Self::Lines(Vec::new())
    }
}

impl From<&str> for TextContent {
    fn from(v: &str) -> Self {
        Self::Line(v.to_owned())
    }
}

impl From<String> for TextContent {
    fn from(v: String) -> Self {
        Self::Line(v)
    }
}

impl From<Vec<String>> for TextContent {
    fn from(v: Vec<String>) -> Self {
        Self::Lines(v)
    }
}

/// Deserialize a label given as `null`, a string or a list of strings.
pub(crate) fn deserialize_lines<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<TextContent>::deserialize(deserializer)?
        .map(TextContent::into_lines)
        .unwrap_or_default())
}

/// Turn a painter result into a success flag.
pub(crate) fn drawn(result: VizResult<()>, what: &str) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!(what, error = %e, "draw failed");
            false
        }
    }
}

/// Log an input that does not fit the overlay and report failure.
pub(crate) fn unexpected_input(overlay: &'static str, input: Option<&OverlayInput>) -> bool {
    match input {
        Some(input) => tracing::warn!(
            overlay,
            input = input.kind(),
            "overlay received parameters of the wrong kind"
        ),
        None => tracing::warn!(overlay, "overlay requires parameters but none were given"),
    }
    false
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/mod.rs"]
mod tests;
