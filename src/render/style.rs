//! Style value types understood by [`crate::Painter`] implementations.

use serde::{Deserialize, Serialize};

use crate::foundation::color::Color;
use crate::foundation::core::{Anchor, Mat3, Point, Vec2, Vec3};
use crate::foundation::error::{VizError, VizResult};

/// Line end shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCap {
    /// Flat end at the exact endpoint.
    #[default]
    Butt,
    /// Rounded end.
    Round,
    /// Square end extending past the endpoint.
    Square,
}

/// Line corner shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineJoin {
    /// Sharp corner.
    #[default]
    Miter,
    /// Rounded corner.
    Round,
    /// Cut-off corner.
    Bevel,
}

/// Stroke configuration. A style with non-positive width or transparent color draws nothing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineStyle {
    /// Stroke width in pixels.
    pub width: f64,
    /// Stroke color.
    pub color: Color,
    /// Alternating dash/gap lengths; empty for solid lines.
    pub dash_pattern: Vec<f64>,
    /// Offset into the dash pattern.
    pub dash_offset: f64,
    /// Line end shape.
    pub cap: LineCap,
    /// Line corner shape.
    pub join: LineJoin,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            width: 2.0,
            color: Color::named("navy-blue").unwrap_or(Color::BLACK),
            dash_pattern: Vec::new(),
            dash_offset: 0.0,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
        }
    }
}

impl LineStyle {
    /// A style that disables stroking.
    pub fn invalid() -> Self {
        Self {
            width: 0.0,
            ..Self::default()
        }
    }

    /// Solid line of the given width.
    pub fn with_width(width: f64) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    /// Return `true` if this style would draw something.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite()
            && self.width > 0.0
            && self.color.is_finite()
            && self.color.a > 0.0
            && self.dash_pattern.iter().all(|d| d.is_finite() && *d >= 0.0)
    }
}

/// Horizontal alignment of multi-line text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HAlign {
    /// Lines share their left edge.
    #[default]
    Left,
    /// Lines are centered.
    Center,
    /// Lines share their right edge.
    Right,
}

impl HAlign {
    pub(crate) fn factor(self) -> f64 {
        match self {
            HAlign::Left => 0.0,
            HAlign::Center => 0.5,
            HAlign::Right => 1.0,
        }
    }
}

/// Glyph rendering configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    /// Font family; matched against registered fonts, falling back to the first one.
    pub family: String,
    /// Font size in pixels.
    pub size: f64,
    /// Glyph color.
    pub color: Color,
    /// Bold weight.
    pub bold: bool,
    /// Italic style.
    pub italic: bool,
    /// Alignment of lines within a text block.
    pub halign: HAlign,
    /// Line advance as a multiple of the font size; never less than the shaped line height.
    pub line_spacing: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_owned(),
            size: 14.0,
            color: Color::named("navy-blue").unwrap_or(Color::BLACK),
            bold: false,
            italic: false,
            halign: HAlign::Left,
            line_spacing: 1.2,
        }
    }
}

impl TextStyle {
    /// Default style with another family.
    pub fn with_family(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            ..Self::default()
        }
    }

    pub(crate) fn validate(&self) -> VizResult<()> {
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(VizError::validation("text size must be finite and > 0"));
        }
        if !self.line_spacing.is_finite() || self.line_spacing <= 0.0 {
            return Err(VizError::validation(
                "text line spacing must be finite and > 0",
            ));
        }
        if !self.color.is_finite() {
            return Err(VizError::validation("text color must be finite"));
        }
        Ok(())
    }
}

/// Everything needed to draw a text box around a block of text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBoxStyle {
    /// Glyph style.
    pub text_style: TextStyle,
    /// Absolute distance between box edge and glyphs.
    pub padding: Vec2,
    /// Rotation in degrees around the anchor point (clockwise on screen).
    pub rotation: f64,
    /// Border; invalid styles skip the border.
    pub line_style: LineStyle,
    /// Background fill, if any.
    pub fill_color: Option<Color>,
    /// Corner radius, see [`corner_radius_px`].
    pub corner_radius: f64,
}

/// Resolved bounding box style for one box.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundingBoxStyle {
    /// Box outline (the color is the box color).
    pub line_style: LineStyle,
    /// Label glyph style.
    pub text_style: TextStyle,
    /// Box interior fill, if any.
    pub box_fill_color: Option<Color>,
    /// Label background fill, if any.
    pub text_fill_color: Option<Color>,
    /// Absolute label padding in pixels.
    pub label_padding: Vec2,
    /// Clip labels to the box outline.
    pub clip_label: bool,
}

/// Label groups drawn along the four sides of a bounding box.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoxLabels {
    /// Lines inside the top edge.
    pub top: Vec<String>,
    /// Lines inside the bottom edge.
    pub bottom: Vec<String>,
    /// Lines along the left edge (rotated).
    pub left: Vec<String>,
    /// Lines along the right edge (rotated).
    pub right: Vec<String>,
    /// Left labels read top-to-bottom instead of bottom-to-top.
    pub left_t2b: bool,
    /// Right labels read top-to-bottom instead of bottom-to-top.
    pub right_t2b: bool,
}

/// Transform and decoration of an image drawn onto the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct ImagePlacement {
    /// Which point of the (scaled) image lands on the position.
    pub anchor: Anchor,
    /// Per-axis scale factor.
    pub scale: Vec2,
    /// Rotation in degrees around the anchor point.
    pub rotation: f64,
    /// Opacity from 0 (transparent) to 1 (opaque).
    pub alpha: f64,
    /// Border; invalid styles skip the border.
    pub line_style: LineStyle,
    /// Corner rounding, see [`corner_radius_px`]; `<= 0` keeps square corners.
    pub clip_factor: f64,
}

/// Arrow configuration for pose axes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrowStyle {
    /// Shaft stroke.
    #[serde(flatten)]
    pub line: LineStyle,
    /// Tip length: fraction of the arrow length if `<= 1`, else pixels.
    pub tip_length: f64,
    /// Angle between shaft and tip edges, in degrees.
    pub tip_angle: f64,
    /// Fill the tip as a triangle instead of two strokes.
    pub tip_closed: bool,
    /// Draw a tip at both ends.
    pub double_headed: bool,
}

impl Default for ArrowStyle {
    fn default() -> Self {
        Self {
            line: LineStyle {
                width: 5.0,
                cap: LineCap::Round,
                join: LineJoin::Miter,
                ..LineStyle::default()
            },
            tip_length: 0.3,
            tip_angle: 20.0,
            tip_closed: true,
            double_headed: false,
        }
    }
}

/// Style of a three-axis pose marker.
#[derive(Clone, Debug, PartialEq)]
pub struct AxesStyle {
    /// Marker origin in world coordinates.
    pub origin: Vec3,
    /// Arrow lengths along x, y and z in world units.
    pub lengths: Vec3,
    /// Arrow style shared by all axes (colors are overridden per axis).
    pub arrow: ArrowStyle,
    /// X axis color.
    pub color_x: Color,
    /// Y axis color.
    pub color_y: Color,
    /// Z axis color.
    pub color_z: Color,
}

/// Camera intrinsics plus the extrinsic transform world -> camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinholePose {
    /// Intrinsic matrix `K`.
    pub intrinsics: Mat3,
    /// Rotation `R`.
    pub rotation: Mat3,
    /// Translation `t`.
    pub translation: Vec3,
}

/// Image-space points of a drawn pose marker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedAxes {
    /// Projected origin.
    pub origin: Point,
    /// Projected tip of the x arrow.
    pub x: Point,
    /// Projected tip of the y arrow.
    pub y: Point,
    /// Projected tip of the z arrow.
    pub z: Point,
}

/// Convert a corner radius setting into pixels for a `width x height` shape.
///
/// `0 < r <= 1` is a fraction of the shorter side, `r > 1` is absolute; the result never exceeds
/// half the shorter side.
pub fn corner_radius_px(radius: f64, width: f64, height: f64) -> f64 {
    let short = width.abs().min(height.abs());
    if !radius.is_finite() || radius <= 0.0 || short <= 0.0 {
        return 0.0;
    }
    let px = if radius <= 1.0 { radius * short } else { radius };
    px.min(0.5 * short)
}

#[cfg(test)]
#[path = "../../tests/unit/render/style.rs"]
mod tests;
