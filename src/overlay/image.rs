use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::foundation::core::{Anchor, Vec2};
use crate::foundation::error::{VizError, VizResult};
use crate::layout::resolve::resolve_position;
use crate::overlay::{Overlay, OverlayInput, drawn, unexpected_input};
use crate::render::painter::Painter;
use crate::render::style::{ImagePlacement, LineStyle};

/// Draws a per-call image (depth map, thumbnail, ...) at a fixed canvas position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageOverlay {
    /// Anchor position on the canvas; fractions within `[-1, 1]`, pixels otherwise.
    pub position: Vec2,
    /// Which point of the scaled image lands on the position.
    pub anchor: Anchor,
    /// Per-axis scale factor.
    pub scale: Vec2,
    /// Rotation in degrees around the anchor point.
    pub rotation: f64,
    /// Opacity from 0 (transparent) to 1 (opaque).
    pub alpha: f64,
    /// Border; an invalid style draws no border.
    pub line_style: LineStyle,
    /// Corner rounding; `<= 0` keeps square corners.
    pub clip_factor: f64,
}

impl Default for ImageOverlay {
    fn default() -> Self {
        Self {
            position: Vec2::new(-5.0, -5.0),
            anchor: Anchor::BottomRight,
            scale: Vec2::new(1.0, 1.0),
            rotation: 0.0,
            alpha: 0.8,
            line_style: LineStyle::invalid(),
            clip_factor: 0.2,
        }
    }
}

impl ImageOverlay {
    fn placement(&self) -> ImagePlacement {
        ImagePlacement {
            anchor: self.anchor,
            scale: self.scale,
            rotation: self.rotation,
            alpha: self.alpha,
            line_style: self.line_style.clone(),
            clip_factor: self.clip_factor,
        }
    }

    /// Draw `image` at the configured position.
    pub fn draw(&self, painter: &mut dyn Painter, image: &RgbaImage) -> bool {
        let at = resolve_position(
            self.position,
            f64::from(painter.width()),
            f64::from(painter.height()),
        );
        drawn(painter.draw_image(image, at, &self.placement()), "image")
    }
}

impl Overlay for ImageOverlay {
    fn kind(&self) -> &'static str {
        "image"
    }

    fn validate(&self) -> VizResult<()> {
        if !self.position.is_finite() || !self.rotation.is_finite() {
            return Err(VizError::validation("image position and rotation must be finite"));
        }
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(VizError::validation(format!(
                "image alpha must be within [0, 1], got {}",
                self.alpha
            )));
        }
        if !self.scale.is_finite() || self.scale.x <= 0.0 || self.scale.y <= 0.0 {
            return Err(VizError::validation("image scale must be finite and > 0"));
        }
        if !self.clip_factor.is_finite() {
            return Err(VizError::validation("image clip factor must be finite"));
        }
        Ok(())
    }

    fn apply(&self, painter: &mut dyn Painter, input: Option<&OverlayInput>) -> bool {
        match input {
            Some(OverlayInput::Image(image)) => self.draw(painter, image),
            other => unexpected_input(self.kind(), other),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/image.rs"]
mod tests;
