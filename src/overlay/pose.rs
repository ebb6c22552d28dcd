use serde::{Deserialize, Serialize};

use crate::foundation::color::Color;
use crate::foundation::core::{Anchor, Axis, Mat3, Vec2, Vec3};
use crate::foundation::error::{VizError, VizResult};
use crate::overlay::{Overlay, OverlayInput, drawn, unexpected_input};
use crate::render::painter::Painter;
use crate::render::style::{ArrowStyle, AxesStyle, LineStyle, PinholePose, TextBoxStyle, TextStyle};

/// Camera intrinsics and extrinsics plus an optional label drawn at the projected origin.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    /// Intrinsic matrix `K`.
    pub intrinsics: Mat3,
    /// Rotation `R` (world to camera).
    pub rotation: Mat3,
    /// Translation `t` (world to camera).
    pub translation: Vec3,
    /// Label drawn at the origin; empty labels are skipped.
    #[serde(default)]
    pub label: Option<String>,
}

/// Extrinsics of one detected tag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TagPose {
    /// Rotation `R` (tag to camera).
    pub rotation: Mat3,
    /// Translation `t` (tag to camera).
    pub translation: Vec3,
    /// Label drawn at the tag origin; empty labels are skipped.
    #[serde(default)]
    pub label: Option<String>,
}

/// Tag poses observed by one camera.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TagPoses {
    /// Intrinsic matrix `K` shared by all tags.
    pub intrinsics: Mat3,
    /// Tags in draw order.
    pub tags: Vec<TagPose>,
}

/// Draws the world frame axes as seen by a camera.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraPoseOverlay {
    /// Frame origin in world coordinates.
    pub origin: Vec3,
    /// Arrow lengths along x, y and z in world units.
    pub arrow_lengths: Vec3,
    /// Arrow style; the color is replaced per axis.
    pub arrow_style: ArrowStyle,
    /// X axis color.
    pub color_x: Color,
    /// Y axis color.
    pub color_y: Color,
    /// Z axis color.
    pub color_z: Color,
    /// Which point of the label box lands on the projected origin.
    pub text_anchor: Anchor,
    /// Label glyph style.
    pub text_style: TextStyle,
    /// Label border; an invalid style draws no border.
    pub text_box_line_style: LineStyle,
    /// Label background fill.
    pub text_box_fill_color: Option<Color>,
    /// Distance between label box edge and glyphs.
    pub text_padding: Vec2,
    /// Label box corner radius.
    pub text_box_radius: f64,
}

impl Default for CameraPoseOverlay {
    fn default() -> Self {
        Self {
            origin: Vec3::default(),
            arrow_lengths: Vec3::splat(1e3),
            arrow_style: ArrowStyle::default(),
            color_x: Color::axis(Axis::X),
            color_y: Color::axis(Axis::Y),
            color_z: Color::axis(Axis::Z),
            text_anchor: Anchor::Top,
            text_style: TextStyle::with_family("sans-serif"),
            text_box_line_style: LineStyle::invalid(),
            text_box_fill_color: Some(Color::WHITE.with_alpha(0.8)),
            text_padding: Vec2::new(5.0, 5.0),
            text_box_radius: 0.2,
        }
    }
}

impl CameraPoseOverlay {
    fn axes_style(&self) -> AxesStyle {
        AxesStyle {
            origin: self.origin,
            lengths: self.arrow_lengths,
            arrow: self.arrow_style.clone(),
            color_x: self.color_x,
            color_y: self.color_y,
            color_z: self.color_z,
        }
    }

    fn label_style(&self) -> TextBoxStyle {
        TextBoxStyle {
            text_style: self.text_style.clone(),
            padding: self.text_padding,
            rotation: 0.0,
            line_style: self.text_box_line_style.clone(),
            fill_color: self.text_box_fill_color,
            corner_radius: self.text_box_radius,
        }
    }

    /// Draw one pose and its label.
    ///
    /// The label needs the projected origin, so it is skipped when the axes cannot be drawn.
    pub fn draw_pose(
        &self,
        painter: &mut dyn Painter,
        intrinsics: &Mat3,
        rotation: &Mat3,
        translation: Vec3,
        label: Option<&str>,
    ) -> bool {
        let pose = PinholePose {
            intrinsics: *intrinsics,
            rotation: *rotation,
            translation,
        };
        let axes = match painter.draw_xyz_axes(&pose, &self.axes_style()) {
            Ok(axes) => axes,
            Err(e) => {
                tracing::debug!(error = %e, "pose axes could not be drawn");
                return false;
            }
        };

        match label.filter(|l| !l.is_empty()) {
            Some(label) => drawn(
                painter.draw_text_box(
                    &[label.to_owned()],
                    axes.origin,
                    self.text_anchor,
                    &self.label_style(),
                ),
                "pose label",
            ),
            None => true,
        }
    }
}

impl Overlay for CameraPoseOverlay {
    fn kind(&self) -> &'static str {
        "camera_pose"
    }

    fn validate(&self) -> VizResult<()> {
        if !self.origin.is_finite() || !self.arrow_lengths.is_finite() {
            return Err(VizError::validation("pose origin and arrow lengths must be finite"));
        }
        if !self.arrow_style.line.width.is_finite() || self.arrow_style.line.width <= 0.0 {
            return Err(VizError::validation("arrow width must be finite and > 0"));
        }
        if !self.text_padding.is_finite() {
            return Err(VizError::validation("label padding must be finite"));
        }
        self.text_style.validate()
    }

    fn apply(&self, painter: &mut dyn Painter, input: Option<&OverlayInput>) -> bool {
        match input {
            Some(OverlayInput::CameraPose(p)) => self.draw_pose(
                painter,
                &p.intrinsics,
                &p.rotation,
                p.translation,
                p.label.as_deref(),
            ),
            other => unexpected_input(self.kind(), other),
        }
    }
}

/// Draws the axes of every detected tag, sharing the camera pose overlay's style.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagPoseOverlay {
    /// Style shared by all tags.
    pub style: CameraPoseOverlay,
}

impl TagPoseOverlay {
    /// Draw every tag in order; a failing tag does not stop the others.
    pub fn draw(&self, painter: &mut dyn Painter, poses: &TagPoses) -> bool {
        let mut success = true;
        for tag in &poses.tags {
            success &= self.style.draw_pose(
                painter,
                &poses.intrinsics,
                &tag.rotation,
                tag.translation,
                tag.label.as_deref(),
            );
        }
        success
    }
}

impl Overlay for TagPoseOverlay {
    fn kind(&self) -> &'static str {
        "tag_pose"
    }

    fn validate(&self) -> VizResult<()> {
        self.style.validate()
    }

    fn apply(&self, painter: &mut dyn Painter, input: Option<&OverlayInput>) -> bool {
        match input {
            Some(OverlayInput::TagPoses(poses)) => self.draw(painter, poses),
            other => unexpected_input(self.kind(), other),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/pose.rs"]
mod tests;
