use crate::foundation::error::{VizError, VizResult};
use crate::render::style::TextStyle;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    /// Red channel.
    pub(crate) r: u8,
    /// Green channel.
    pub(crate) g: u8,
    /// Blue channel.
    pub(crate) b: u8,
    /// Alpha channel.
    pub(crate) a: u8,
}

struct RegisteredFont {
    family: String,
    data: vello_cpu::peniko::FontData,
}

/// One shaped line of a text block.
pub(crate) struct ShapedLine {
    pub(crate) layout: parley::Layout<TextBrushRgba8>,
    pub(crate) width: f64,
    /// Offset of the line's top edge from the block's top edge.
    pub(crate) top: f64,
}

/// Shaped multi-line text with its extent.
pub(crate) struct TextBlock {
    pub(crate) lines: Vec<ShapedLine>,
    pub(crate) width: f64,
    pub(crate) height: f64,
    pub(crate) font: vello_cpu::peniko::FontData,
}

/// Stateful helper for shaping text from registered font bytes.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    fonts: Vec<RegisteredFont>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct a new layout engine with fresh Parley contexts and no fonts.
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            fonts: Vec::new(),
        }
    }

    /// Register a font file and return its family name.
    pub(crate) fn register_font(&mut self, font_bytes: Vec<u8>) -> VizResult<String> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            VizError::validation("no font families registered from font bytes")
        })?;

        let family = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| VizError::validation("registered font family has no name"))?
            .to_string();

        let data = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0);
        self.fonts.retain(|f| f.family != family);
        self.fonts.push(RegisteredFont {
            family: family.clone(),
            data,
        });
        Ok(family)
    }

    /// Registered family names in registration order.
    pub(crate) fn families(&self) -> impl Iterator<Item = &str> {
        self.fonts.iter().map(|f| f.family.as_str())
    }

    fn resolve(&self, family: &str) -> Option<&RegisteredFont> {
        self.fonts
            .iter()
            .find(|f| f.family.eq_ignore_ascii_case(family))
            .or_else(|| self.fonts.first())
    }

    /// Shape `lines` as a left-aligned block; alignment offsets are applied when drawing.
    pub(crate) fn layout_block(&mut self, lines: &[String], style: &TextStyle) -> VizResult<TextBlock> {
        style.validate()?;
        if lines.is_empty() {
            return Err(VizError::draw("text block has no lines"));
        }
        let (family, font) = match self.resolve(&style.family) {
            Some(f) => (f.family.clone(), f.data.clone()),
            None => return Err(VizError::draw("no font registered for text rendering")),
        };

        let [r, g, b, a] = style.color.to_rgba8();
        let brush = TextBrushRgba8 { r, g, b, a };
        let size_px = style.size as f32;
        let advance = style.size * style.line_spacing;

        let mut shaped = Vec::with_capacity(lines.len());
        let mut top = 0.0;
        let mut width: f64 = 0.0;
        for text in lines {
            let layout = self.layout_line(text, &family, size_px, brush, style)?;
            let line_width = f64::from(layout.width());
            let line_height = f64::from(layout.height());
            width = width.max(line_width);
            shaped.push(ShapedLine {
                layout,
                width: line_width,
                top,
            });
            top += advance.max(line_height);
        }

        Ok(TextBlock {
            lines: shaped,
            width,
            height: top,
            font,
        })
    }

    fn layout_line(
        &mut self,
        text: &str,
        family: &str,
        size_px: f32,
        brush: TextBrushRgba8,
        style: &TextStyle,
    ) -> VizResult<parley::Layout<TextBrushRgba8>> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family.to_owned())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));
        if style.bold {
            builder.push_default(parley::style::StyleProperty::FontWeight(
                parley::style::FontWeight::BOLD,
            ));
        }
        if style.italic {
            builder.push_default(parley::style::StyleProperty::FontStyle(
                parley::style::FontStyle::Italic,
            ));
        }

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
