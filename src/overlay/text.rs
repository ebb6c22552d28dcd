use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::foundation::color::Color;
use crate::foundation::core::{Anchor, Vec2};
use crate::foundation::error::{VizError, VizResult};
use crate::layout::resolve::resolve_position;
use crate::overlay::{Overlay, OverlayInput, TextContent, drawn, unexpected_input};
use crate::render::painter::Painter;
use crate::render::style::{LineStyle, TextBoxStyle, TextStyle};

/// Look of a text box, shared by the dynamic and static text overlays.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextBoxLook {
    /// Glyph style.
    pub text_style: TextStyle,
    /// Border; an invalid style draws no border.
    pub line_style: LineStyle,
    /// Background fill, if any.
    pub fill_color: Option<Color>,
    /// Absolute distance between box edge and glyphs.
    pub padding: Vec2,
    /// Rotation in degrees around the anchor point.
    pub rotation: f64,
    /// Corner radius, fraction of the shorter side if `<= 1`.
    pub corner_radius: f64,
}

impl Default for TextBoxLook {
    fn default() -> Self {
        Self {
            text_style: TextStyle::with_family("monospace"),
            line_style: LineStyle::invalid(),
            fill_color: Some(Color::WHITE.with_alpha(0.8)),
            padding: Vec2::new(5.0, 5.0),
            rotation: 0.0,
            corner_radius: 0.2,
        }
    }
}

impl TextBoxLook {
    fn validate(&self) -> VizResult<()> {
        self.text_style.validate()?;
        if !self.padding.is_finite() || self.padding.x < 0.0 || self.padding.y < 0.0 {
            return Err(VizError::validation("text padding must be finite and >= 0"));
        }
        if !self.rotation.is_finite() || !self.corner_radius.is_finite() {
            return Err(VizError::validation(
                "text rotation and corner radius must be finite",
            ));
        }
        Ok(())
    }

    fn box_style(&self) -> TextBoxStyle {
        TextBoxStyle {
            text_style: self.text_style.clone(),
            padding: self.padding,
            rotation: self.rotation,
            line_style: self.line_style.clone(),
            fill_color: self.fill_color,
            corner_radius: self.corner_radius,
        }
    }

    /// Draw `lines` with the box `anchor` on `position` (resolved against the canvas).
    fn draw(
        &self,
        painter: &mut dyn Painter,
        position: Vec2,
        anchor: Anchor,
        lines: &[String],
    ) -> bool {
        let at = resolve_position(
            position,
            f64::from(painter.width()),
            f64::from(painter.height()),
        );
        drawn(
            painter.draw_text_box(lines, at, anchor, &self.box_style()),
            "text box",
        )
    }
}

fn validate_position(position: Vec2) -> VizResult<()> {
    if position.is_finite() {
        Ok(())
    } else {
        Err(VizError::validation("position must be finite"))
    }
}

/// Draws per-call text (time, frame number, ...) at a fixed canvas position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DynamicTextOverlay {
    /// Anchor position on the canvas; fractions within `[-1, 1]`, pixels otherwise.
    pub position: Vec2,
    /// Which point of the text box lands on the position.
    pub anchor: Anchor,
    /// Box appearance.
    #[serde(flatten)]
    pub look: TextBoxLook,
}

impl Default for DynamicTextOverlay {
    fn default() -> Self {
        Self {
            position: Vec2::new(0.5, 10.0),
            anchor: Anchor::Top,
            look: TextBoxLook::default(),
        }
    }
}

impl DynamicTextOverlay {
    /// Draw `lines` at the configured position.
    pub fn draw(&self, painter: &mut dyn Painter, lines: &[String]) -> bool {
        self.look.draw(painter, self.position, self.anchor, lines)
    }
}

impl Overlay for DynamicTextOverlay {
    fn kind(&self) -> &'static str {
        "text"
    }

    fn validate(&self) -> VizResult<()> {
        validate_position(self.position)?;
        self.look.validate()
    }

    fn apply(&self, painter: &mut dyn Painter, input: Option<&OverlayInput>) -> bool {
        match input {
            Some(OverlayInput::Text(text)) => self.draw(painter, text.lines()),
            other => unexpected_input(self.kind(), other),
        }
    }
}

/// Draws text fixed at configuration time (camera names, sequence labels, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticTextOverlay {
    /// The text to draw.
    pub text: TextContent,
    /// Anchor position on the canvas; fractions within `[-1, 1]`, pixels otherwise.
    pub position: Vec2,
    /// Which point of the text box lands on the position.
    pub anchor: Anchor,
    /// Box appearance.
    #[serde(flatten)]
    pub look: TextBoxLook,
}

impl Default for StaticTextOverlay {
    fn default() -> Self {
        Self {
            text: TextContent::from("Static Text"),
            position: Vec2::new(-10.0, 10.0),
            anchor: Anchor::TopRight,
            look: TextBoxLook::default(),
        }
    }
}

impl StaticTextOverlay {
    /// Static overlay showing `text` with default placement and look.
    pub fn new(text: impl Into<TextContent>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

impl Overlay for StaticTextOverlay {
    fn kind(&self) -> &'static str {
        "static_text"
    }

    fn validate(&self) -> VizResult<()> {
        validate_position(self.position)?;
        if self.text.lines().is_empty() {
            return Err(VizError::validation("static text must not be empty"));
        }
        self.look.validate()
    }

    fn apply(&self, painter: &mut dyn Painter, input: Option<&OverlayInput>) -> bool {
        if let Some(input) = input {
            tracing::warn!(
                overlay = self.kind(),
                input = input.kind(),
                "static text ignores per-call parameters"
            );
        }
        self.look
            .draw(painter, self.position, self.anchor, self.text.lines())
    }
}

/// Formatting options for [`frame_label`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameLabelFormat {
    /// Zero-padded width of the frame number.
    pub num_digits: usize,
    /// Prefix the time of day with the date.
    pub include_date: bool,
}

impl Default for FrameLabelFormat {
    fn default() -> Self {
        Self {
            num_digits: 5,
            include_date: true,
        }
    }
}

/// Label for a frame: `"<camera> #<frame>, <date> <time>.<millis>"`.
///
/// The frame number and timestamp parts are omitted when not given.
pub fn frame_label<Tz>(
    camera: &str,
    frame_number: Option<u64>,
    timestamp: Option<&DateTime<Tz>>,
    format: &FrameLabelFormat,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut label = camera.to_owned();
    if let Some(n) = frame_number {
        label.push_str(&format!(" #{n:0width$}", width = format.num_digits));
    }
    if let Some(ts) = timestamp {
        let pattern = if format.include_date {
            "%Y-%m-%d %H:%M:%S%.3f"
        } else {
            "%H:%M:%S%.3f"
        };
        label.push_str(&format!(", {}", ts.format(pattern)));
    }
    label
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/text.rs"]
mod tests;
