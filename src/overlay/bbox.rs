use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::foundation::color::Color;
use crate::foundation::core::{Rect, Vec2};
use crate::foundation::error::{VizError, VizResult};
use crate::layout::resolve::resolve_padding;
use crate::overlay::{Overlay, OverlayInput, TextContent, deserialize_lines, drawn, unexpected_input};
use crate::render::painter::Painter;
use crate::render::style::{BoundingBoxStyle, BoxLabels, HAlign, LineStyle, TextStyle};

/// A box to draw: geometry, color and up to four label groups.
///
/// Immutable once built; use [`BoundingBox::from_ltwh`] and the `with_label_*` builders.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    color: Color,
    #[serde(default, deserialize_with = "deserialize_lines")]
    label_top: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_lines")]
    label_bottom: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_lines")]
    label_left: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_lines")]
    label_right: Vec<String>,
}

impl BoundingBox {
    /// Unlabeled box from its left/top corner and size, in pixels.
    pub fn from_ltwh(left: f64, top: f64, width: f64, height: f64, color: Color) -> Self {
        Self {
            left,
            top,
            width,
            height,
            color,
            label_top: Vec::new(),
            label_bottom: Vec::new(),
            label_left: Vec::new(),
            label_right: Vec::new(),
        }
    }

    /// Set the label drawn inside the top edge.
    pub fn with_label_top(mut self, label: impl Into<TextContent>) -> Self {
        self.label_top = label.into().into_lines();
        self
    }

    /// Set the label drawn inside the bottom edge.
    pub fn with_label_bottom(mut self, label: impl Into<TextContent>) -> Self {
        self.label_bottom = label.into().into_lines();
        self
    }

    /// Set the label drawn along the left edge.
    pub fn with_label_left(mut self, label: impl Into<TextContent>) -> Self {
        self.label_left = label.into().into_lines();
        self
    }

    /// Set the label drawn along the right edge.
    pub fn with_label_right(mut self, label: impl Into<TextContent>) -> Self {
        self.label_right = label.into().into_lines();
        self
    }

    /// Left edge.
    pub fn left(&self) -> f64 {
        self.left
    }

    /// Top edge.
    pub fn top(&self) -> f64 {
        self.top
    }

    /// Box width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Box height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Box color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Top label lines.
    pub fn label_top(&self) -> &[String] {
        &self.label_top
    }

    /// Bottom label lines.
    pub fn label_bottom(&self) -> &[String] {
        &self.label_bottom
    }

    /// Left label lines.
    pub fn label_left(&self) -> &[String] {
        &self.label_left
    }

    /// Right label lines.
    pub fn label_right(&self) -> &[String] {
        &self.label_right
    }

    /// Box geometry as a rectangle.
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.left,
            self.top,
            self.left + self.width,
            self.top + self.height,
        )
    }
}

/// Object class of a detection: a category name or a numeric class id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObjectClass {
    /// Numeric class id.
    Id(u64),
    /// Category name.
    Name(String),
}

impl From<u64> for ObjectClass {
    fn from(v: u64) -> Self {
        Self::Id(v)
    }
}

impl From<&str> for ObjectClass {
    fn from(v: &str) -> Self {
        Self::Name(v.to_owned())
    }
}

impl From<String> for ObjectClass {
    fn from(v: String) -> Self {
        Self::Name(v)
    }
}

/// Default box for a detection.
///
/// A named class labels the top edge with the name and takes its category color; a numeric class
/// is labeled `Class #<id>` and colored by id. The bottom edge shows the score.
pub fn create_bounding_box(
    class: impl Into<ObjectClass>,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    score: f64,
) -> BoundingBox {
    let (label, color) = match class.into() {
        ObjectClass::Name(name) => {
            let color = Color::from_object_category(&name);
            (name, color)
        }
        ObjectClass::Id(id) => (format!("Class #{id}"), Color::from_object_id(id)),
    };
    BoundingBox::from_ltwh(left, top, width, height, color)
        .with_label_top(label)
        .with_label_bottom(format!("C: {score:.2}"))
}

/// Interior fill of a bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoxFill {
    /// Leave the interior untouched.
    None,
    /// Fill with a fixed color.
    Solid(Color),
    /// Fill with the box color at the given alpha.
    SameAsBox {
        /// Fill opacity.
        alpha: f64,
    },
}

impl BoxFill {
    /// Fill color for a box of `box_color`.
    pub fn resolve(self, box_color: Color) -> Option<Color> {
        match self {
            BoxFill::None => None,
            BoxFill::Solid(c) => Some(c),
            BoxFill::SameAsBox { alpha } => Some(box_color.with_alpha(alpha)),
        }
    }
}

impl std::str::FromStr for BoxFill {
    type Err = VizError;

    /// Parse `none`, `same`, `same!<alpha percent>` or any color string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase();
        if norm == "none" {
            return Ok(BoxFill::None);
        }
        if norm == "same" {
            return Ok(BoxFill::SameAsBox { alpha: 1.0 });
        }
        if let Some(pct) = norm.strip_prefix("same!") {
            let pct: f64 = pct.trim().parse().map_err(|_| {
                VizError::validation(format!("invalid alpha suffix in box fill \"{s}\""))
            })?;
            return Ok(BoxFill::SameAsBox {
                alpha: (pct / 100.0).clamp(0.0, 1.0),
            });
        }
        Ok(BoxFill::Solid(s.parse()?))
    }
}

impl Serialize for BoxFill {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            BoxFill::None => serializer.serialize_str("none"),
            BoxFill::SameAsBox { alpha } => {
                let pct = (alpha * 100.0 * 1e4).round() / 1e4;
                serializer.serialize_str(&format!("same!{pct}"))
            }
            BoxFill::Solid(c) => c.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for BoxFill {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Keyword(String),
            Color(Color),
        }

        match Option::<Repr>::deserialize(deserializer)? {
            None => Ok(BoxFill::None),
            Some(Repr::Keyword(s)) => s.parse().map_err(serde::de::Error::custom),
            Some(Repr::Color(c)) => Ok(BoxFill::Solid(c)),
        }
    }
}

/// Draws bounding boxes with their labels.
///
/// Label padding follows the padding rule with each box's own size as reference, so fractional
/// padding scales with the box.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundingBoxOverlay {
    /// Label glyph style.
    pub text_style: TextStyle,
    /// Box outline; the color is replaced by each box's color.
    pub line_style: LineStyle,
    /// Box interior fill.
    pub box_fill_color: BoxFill,
    /// Label background fill.
    pub text_fill_color: Option<Color>,
    /// Corner radius, fraction of the shorter side if `<= 1`.
    pub corner_radius: f64,
    /// Label padding, fraction of the box size if `<= 1`.
    pub label_padding: Vec2,
    /// Clip labels to the box outline.
    pub clip_label: bool,
    /// Left labels read top-to-bottom.
    pub label_left_t2b: bool,
    /// Right labels read top-to-bottom.
    pub label_right_t2b: bool,
}

impl Default for BoundingBoxOverlay {
    fn default() -> Self {
        Self {
            text_style: TextStyle {
                halign: HAlign::Left,
                ..TextStyle::with_family("sans-serif")
            },
            line_style: LineStyle::with_width(3.0),
            box_fill_color: BoxFill::SameAsBox { alpha: 0.3 },
            text_fill_color: Some(Color::WHITE.with_alpha(0.7)),
            corner_radius: 0.1,
            label_padding: Vec2::new(0.05, 0.05),
            clip_label: false,
            label_left_t2b: false,
            label_right_t2b: true,
        }
    }
}

impl BoundingBoxOverlay {
    fn style_for(&self, bbox: &BoundingBox) -> BoundingBoxStyle {
        BoundingBoxStyle {
            line_style: LineStyle {
                color: bbox.color(),
                ..self.line_style.clone()
            },
            text_style: self.text_style.clone(),
            box_fill_color: self.box_fill_color.resolve(bbox.color()),
            text_fill_color: self.text_fill_color,
            label_padding: resolve_padding(self.label_padding, bbox.width(), bbox.height()),
            clip_label: self.clip_label,
        }
    }

    fn labels_for(&self, bbox: &BoundingBox) -> BoxLabels {
        BoxLabels {
            top: bbox.label_top().to_vec(),
            bottom: bbox.label_bottom().to_vec(),
            left: bbox.label_left().to_vec(),
            right: bbox.label_right().to_vec(),
            left_t2b: self.label_left_t2b,
            right_t2b: self.label_right_t2b,
        }
    }

    /// Draw `boxes` in order; later boxes end up on top.
    pub fn draw(&self, painter: &mut dyn Painter, boxes: &[BoundingBox]) -> bool {
        let mut success = true;
        for bbox in boxes {
            let style = self.style_for(bbox);
            let labels = self.labels_for(bbox);
            success &= drawn(
                painter.draw_bounding_box(bbox.rect(), self.corner_radius, &style, &labels),
                "bounding box",
            );
        }
        success
    }
}

impl Overlay for BoundingBoxOverlay {
    fn kind(&self) -> &'static str {
        "bounding_boxes"
    }

    fn validate(&self) -> VizResult<()> {
        self.text_style.validate()?;
        if !self.label_padding.is_finite() {
            return Err(VizError::validation("label padding must be finite"));
        }
        if !self.corner_radius.is_finite() {
            return Err(VizError::validation("corner radius must be finite"));
        }
        Ok(())
    }

    fn apply(&self, painter: &mut dyn Painter, input: Option<&OverlayInput>) -> bool {
        match input {
            Some(OverlayInput::BoundingBoxes(boxes)) => self.draw(painter, boxes),
            other => unexpected_input(self.kind(), other),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/bbox.rs"]
mod tests;
