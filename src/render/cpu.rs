use std::f64::consts::FRAC_PI_2;
use std::path::Path;
use std::sync::Arc;

use image::{RgbImage, RgbaImage};
use kurbo::Shape;

use crate::foundation::color::Color;
use crate::foundation::core::{Affine, Anchor, BezPath, Point, Rect, Vec2};
use crate::foundation::error::{VizError, VizResult};
use crate::render::composite::{over_rgb_in_place, premultiply};
use crate::render::painter::Painter;
use crate::render::projection::project_axes;
use crate::render::style::{
    ArrowStyle, AxesStyle, BoundingBoxStyle, BoxLabels, ImagePlacement, LineCap, LineJoin,
    LineStyle, PinholePose, ProjectedAxes, TextBoxStyle, corner_radius_px,
};
use crate::render::text::{TextBlock, TextLayoutEngine};

/// Software [`Painter`] powered by `vello_cpu` for rasterization and `parley` for text.
///
/// The bound image is kept as an opaque background; overlays are rasterized into a premultiplied
/// layer that is composited over the background on [`Painter::read_rgb`]. The render context and
/// layer are reused across binds of equally sized images.
pub struct CpuPainter {
    width: u16,
    height: u16,
    background: Vec<u8>,
    ctx: Option<vello_cpu::RenderContext>,
    layer: Option<vello_cpu::Pixmap>,
    text: TextLayoutEngine,
}

impl Default for CpuPainter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CpuPainter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuPainter")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("fonts", &self.font_families())
            .finish()
    }
}

impl CpuPainter {
    /// Create an unbound painter without fonts.
    pub fn new() -> Self {
        Self {
            width: 0,
            height: 0,
            background: Vec::new(),
            ctx: None,
            layer: None,
            text: TextLayoutEngine::new(),
        }
    }

    /// Register font bytes (TTF/OTF) for text rendering and return the family name.
    ///
    /// Text styles select fonts by family name; unknown families use the first registered font.
    pub fn register_font(&mut self, font_bytes: Vec<u8>) -> VizResult<String> {
        let family = self.text.register_font(font_bytes)?;
        tracing::debug!(%family, "registered font");
        Ok(family)
    }

    /// Read and register a font file.
    pub fn register_font_file(&mut self, path: &Path) -> VizResult<String> {
        let bytes = std::fs::read(path).map_err(|e| {
            VizError::Other(anyhow::Error::new(e).context(format!(
                "failed to read font '{}'",
                path.display()
            )))
        })?;
        self.register_font(bytes)
    }

    /// Registered font families in registration order.
    pub fn font_families(&self) -> Vec<String> {
        self.text.families().map(str::to_owned).collect()
    }

    fn bound_ctx(&mut self) -> VizResult<&mut vello_cpu::RenderContext> {
        self.ctx
            .as_mut()
            .ok_or_else(|| VizError::draw("no image bound to the painter"))
    }
}

impl Painter for CpuPainter {
    fn bind_image(&mut self, image: &RgbImage) -> VizResult<()> {
        let (w, h) = image.dimensions();
        if w == 0 || h == 0 {
            return Err(VizError::validation("canvas image must not be empty"));
        }
        let width: u16 = w
            .try_into()
            .map_err(|_| VizError::validation("canvas width exceeds u16"))?;
        let height: u16 = h
            .try_into()
            .map_err(|_| VizError::validation("canvas height exceeds u16"))?;

        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        self.ctx = Some(ctx);

        let reuse_layer = self
            .layer
            .as_ref()
            .is_some_and(|p| p.width() == width && p.height() == height);
        if !reuse_layer {
            self.layer = Some(vello_cpu::Pixmap::new(width, height));
        }

        self.background.clear();
        self.background.extend_from_slice(image.as_raw());
        self.width = width;
        self.height = height;
        Ok(())
    }

    fn width(&self) -> u32 {
        u32::from(self.width)
    }

    fn height(&self) -> u32 {
        u32::from(self.height)
    }

    fn draw_bounding_box(
        &mut self,
        rect: Rect,
        corner_radius: f64,
        style: &BoundingBoxStyle,
        labels: &BoxLabels,
    ) -> VizResult<()> {
        if !rect_is_drawable(rect) {
            return Err(VizError::draw(format!("degenerate bounding box {rect:?}")));
        }

        let mut failures = Vec::new();
        let mut blocks = Vec::new();
        for (side, lines) in [
            (Side::Top, &labels.top),
            (Side::Bottom, &labels.bottom),
            (Side::Left, &labels.left),
            (Side::Right, &labels.right),
        ] {
            if lines.is_empty() {
                continue;
            }
            match self.text.layout_block(lines, &style.text_style) {
                Ok(block) => blocks.push((side, block)),
                Err(e) => failures.push(format!("{side:?} label: {e}")),
            }
        }

        let radius = corner_radius_px(corner_radius, rect.width(), rect.height());
        let outline = rounded_rect_path(rect, radius);
        let ctx = self.bound_ctx()?;
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

        if let Some(fill) = style.box_fill_color {
            set_color(ctx, fill);
            ctx.fill_path(&outline);
        }
        if style.line_style.is_valid() {
            stroke_path(ctx, &outline, &style.line_style, style.line_style.color);
        }

        if style.clip_label {
            ctx.push_clip_layer(&outline);
        }
        for (side, block) in &blocks {
            let frame = label_frame(rect, *side, labels, block.height, style.label_padding);
            draw_label(ctx, &frame, block, style);
        }
        if style.clip_label {
            ctx.pop_layer();
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(VizError::draw(failures.join("; ")))
        }
    }

    fn draw_text_box(
        &mut self,
        lines: &[String],
        position: Point,
        anchor: Anchor,
        style: &TextBoxStyle,
    ) -> VizResult<()> {
        if !position.is_finite() || !style.padding.is_finite() || !style.rotation.is_finite() {
            return Err(VizError::draw("text box placement must be finite"));
        }
        let block = self.text.layout_block(lines, &style.text_style)?;

        let pad = style.padding;
        let box_w = block.width + 2.0 * pad.x;
        let box_h = block.height + 2.0 * pad.y;
        let transform = Affine::translate(position.to_vec2())
            * Affine::rotate(style.rotation.to_radians())
            * Affine::translate(-anchor.offset(box_w, box_h));
        let outline = rounded_rect_path(
            Rect::new(0.0, 0.0, box_w, box_h),
            corner_radius_px(style.corner_radius, box_w, box_h),
        );

        let ctx = self.bound_ctx()?;
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(affine_to_cpu(transform));
        if let Some(fill) = style.fill_color {
            set_color(ctx, fill);
            ctx.fill_path(&outline);
        }
        fill_text_block(
            ctx,
            &block,
            transform * Affine::translate(pad),
            block.width,
            style.text_style.halign.factor(),
        );
        if style.line_style.is_valid() {
            ctx.set_transform(affine_to_cpu(transform));
            stroke_path(ctx, &outline, &style.line_style, style.line_style.color);
        }
        Ok(())
    }

    fn draw_image(
        &mut self,
        image: &RgbaImage,
        position: Point,
        placement: &ImagePlacement,
    ) -> VizResult<()> {
        let (w, h) = image.dimensions();
        if w == 0 || h == 0 {
            return Err(VizError::draw("overlay image is empty"));
        }
        let scale = placement.scale;
        if !scale.is_finite() || scale.x <= 0.0 || scale.y <= 0.0 {
            return Err(VizError::draw("image scale must be finite and > 0"));
        }
        if !position.is_finite() || !placement.rotation.is_finite() || !placement.alpha.is_finite()
        {
            return Err(VizError::draw("image placement must be finite"));
        }
        let pixmap = rgba_straight_to_pixmap(image)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };

        let (iw, ih) = (f64::from(w), f64::from(h));
        let (sw, sh) = (iw * scale.x, ih * scale.y);
        let frame = Affine::translate(position.to_vec2())
            * Affine::rotate(placement.rotation.to_radians())
            * Affine::translate(-placement.anchor.offset(sw, sh));
        let radius = corner_radius_px(placement.clip_factor, sw, sh);
        let outline = rounded_rect_path(Rect::new(0.0, 0.0, sw, sh), radius);
        let alpha = placement.alpha.clamp(0.0, 1.0) as f32;

        let ctx = self.bound_ctx()?;
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        if alpha < 1.0 {
            ctx.push_opacity_layer(alpha);
        }
        ctx.set_transform(affine_to_cpu(frame));
        if radius > 0.0 {
            ctx.push_clip_layer(&outline);
        }
        ctx.set_transform(affine_to_cpu(frame * Affine::scale_non_uniform(scale.x, scale.y)));
        ctx.set_paint(paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
        if radius > 0.0 {
            ctx.pop_layer();
        }
        if placement.line_style.is_valid() {
            ctx.set_transform(affine_to_cpu(frame));
            stroke_path(ctx, &outline, &placement.line_style, placement.line_style.color);
        }
        if alpha < 1.0 {
            ctx.pop_layer();
        }
        Ok(())
    }

    fn draw_xyz_axes(&mut self, pose: &PinholePose, style: &AxesStyle) -> VizResult<ProjectedAxes> {
        if !style.arrow.line.is_valid() {
            return Err(VizError::draw("arrow line style draws nothing"));
        }
        let axes = project_axes(pose, style.origin, style.lengths)?;

        let ctx = self.bound_ctx()?;
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        for (tip, color) in [
            (axes.x, style.color_x),
            (axes.y, style.color_y),
            (axes.z, style.color_z),
        ] {
            draw_arrow(ctx, axes.origin, tip, &style.arrow, color);
        }
        Ok(axes)
    }

    fn read_rgb(&mut self) -> VizResult<RgbImage> {
        let (Some(ctx), Some(layer)) = (self.ctx.as_mut(), self.layer.as_mut()) else {
            return Err(VizError::draw("no image bound to the painter"));
        };
        clear_pixmap(layer);
        ctx.flush();
        ctx.render_to_pixmap(layer);

        let mut out = self.background.clone();
        over_rgb_in_place(&mut out, layer.data_as_u8_slice())?;
        RgbImage::from_raw(u32::from(self.width), u32::from(self.height), out)
            .ok_or_else(|| VizError::validation("composited buffer does not match canvas size"))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

/// Label band in a local frame whose x axis runs along the box edge and whose y axis points into
/// the box.
struct LabelFrame {
    transform: Affine,
    length: f64,
    band: f64,
    padding: Vec2,
}

fn label_frame(
    rect: Rect,
    side: Side,
    labels: &BoxLabels,
    block_height: f64,
    padding: Vec2,
) -> LabelFrame {
    let across = Vec2::new(padding.y, padding.x);
    let (pad, length) = match side {
        Side::Top | Side::Bottom => (padding, rect.width()),
        Side::Left | Side::Right => (across, rect.height()),
    };
    let band = block_height + 2.0 * pad.y;
    let (x0, y0, x1, y1) = (rect.x0, rect.y0, rect.x1, rect.y1);

    let down = Affine::rotate(FRAC_PI_2);
    let up = Affine::rotate(-FRAC_PI_2);
    let transform = match side {
        Side::Top => Affine::translate((x0, y0)),
        Side::Bottom => Affine::translate((x0, y1 - band)),
        Side::Left if labels.left_t2b => Affine::translate((x0 + band, y0)) * down,
        Side::Left => Affine::translate((x0, y1)) * up,
        Side::Right if labels.right_t2b => Affine::translate((x1, y0)) * down,
        Side::Right => Affine::translate((x1 - band, y1)) * up,
    };
    LabelFrame {
        transform,
        length,
        band,
        padding: pad,
    }
}

fn draw_label(
    ctx: &mut vello_cpu::RenderContext,
    frame: &LabelFrame,
    block: &TextBlock,
    style: &BoundingBoxStyle,
) {
    ctx.set_transform(affine_to_cpu(frame.transform));
    if let Some(fill) = style.text_fill_color {
        set_color(ctx, fill);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, frame.length, frame.band));
    }
    let inner = (frame.length - 2.0 * frame.padding.x).max(block.width);
    fill_text_block(
        ctx,
        block,
        frame.transform * Affine::translate(frame.padding),
        inner,
        style.text_style.halign.factor(),
    );
}

/// Draw every line of `block` with its top-left at `transform`, aligned within `width`.
fn fill_text_block(
    ctx: &mut vello_cpu::RenderContext,
    block: &TextBlock,
    transform: Affine,
    width: f64,
    align: f64,
) {
    for line in &block.lines {
        let dx = (width - line.width) * align;
        ctx.set_transform(affine_to_cpu(
            transform * Affine::translate((dx, line.top)),
        ));
        for layout_line in line.layout.lines() {
            for item in layout_line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&block.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }
}

fn draw_arrow(
    ctx: &mut vello_cpu::RenderContext,
    from: Point,
    to: Point,
    style: &ArrowStyle,
    color: Color,
) {
    let mut shaft = BezPath::new();
    shaft.move_to(from);
    shaft.line_to(to);
    stroke_path(ctx, &bezpath_to_cpu(&shaft), &style.line, color);

    draw_arrow_tip(ctx, from, to, style, color);
    if style.double_headed {
        draw_arrow_tip(ctx, to, from, style, color);
    }
}

fn draw_arrow_tip(
    ctx: &mut vello_cpu::RenderContext,
    from: Point,
    to: Point,
    style: &ArrowStyle,
    color: Color,
) {
    let back = from - to;
    let len = back.hypot();
    if len < 1e-6 {
        return;
    }
    let tip_len = if style.tip_length <= 1.0 {
        style.tip_length * len
    } else {
        style.tip_length
    };
    let angle = style.tip_angle.to_radians();
    let left = to + Vec2::from_angle(back.angle() + angle) * tip_len;
    let right = to + Vec2::from_angle(back.angle() - angle) * tip_len;

    let mut tip = BezPath::new();
    tip.move_to(left);
    tip.line_to(to);
    tip.line_to(right);
    if style.tip_closed {
        tip.close_path();
        let tip = bezpath_to_cpu(&tip);
        set_color(ctx, color);
        ctx.fill_path(&tip);
        stroke_path(ctx, &tip, &style.line, color);
    } else {
        stroke_path(ctx, &bezpath_to_cpu(&tip), &style.line, color);
    }
}

fn stroke_path(
    ctx: &mut vello_cpu::RenderContext,
    path: &vello_cpu::kurbo::BezPath,
    style: &LineStyle,
    color: Color,
) {
    let mut stroke = vello_cpu::kurbo::Stroke::new(style.width)
        .with_caps(match style.cap {
            LineCap::Butt => vello_cpu::kurbo::Cap::Butt,
            LineCap::Round => vello_cpu::kurbo::Cap::Round,
            LineCap::Square => vello_cpu::kurbo::Cap::Square,
        })
        .with_join(match style.join {
            LineJoin::Miter => vello_cpu::kurbo::Join::Miter,
            LineJoin::Round => vello_cpu::kurbo::Join::Round,
            LineJoin::Bevel => vello_cpu::kurbo::Join::Bevel,
        });
    if !style.dash_pattern.is_empty() {
        stroke = stroke.with_dashes(style.dash_offset, style.dash_pattern.iter().copied());
    }
    ctx.set_stroke(stroke);
    set_color(ctx, color);
    ctx.stroke_path(path);
}

fn set_color(ctx: &mut vello_cpu::RenderContext, color: Color) {
    let [r, g, b, a] = color.to_rgba8();
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
}

fn rect_is_drawable(rect: Rect) -> bool {
    rect.is_finite() && rect.width() > 0.0 && rect.height() > 0.0
}

fn rounded_rect_path(rect: Rect, radius: f64) -> vello_cpu::kurbo::BezPath {
    let path = if radius > 0.0 {
        rect.to_rounded_rect(radius).to_path(0.1)
    } else {
        rect.to_path(0.1)
    };
    bezpath_to_cpu(&path)
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap) {
    pixmap.data_as_u8_slice_mut().fill(0);
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn rgba_straight_to_pixmap(image: &RgbaImage) -> VizResult<vello_cpu::Pixmap> {
    let (width, height) = image.dimensions();
    let w: u16 = width
        .try_into()
        .map_err(|_| VizError::draw("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| VizError::draw("image height exceeds u16"))?;

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in image.pixels() {
        let [r, g, b, a] = premultiply(px.0);
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 { r, g, b, a });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
