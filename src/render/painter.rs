use image::{RgbImage, RgbaImage};

use crate::foundation::core::{Anchor, Point, Rect};
use crate::foundation::error::VizResult;
use crate::render::style::{
    AxesStyle, BoundingBoxStyle, BoxLabels, ImagePlacement, PinholePose, ProjectedAxes,
    TextBoxStyle,
};

/// The drawing surface overlays render onto.
///
/// A painter is bound to one input image at a time; every draw call composes on top of what was
/// drawn before, and [`Painter::read_rgb`] returns the composited result. Draw calls receive
/// absolute pixel coordinates only; resolving relative positions is the caller's job.
pub trait Painter {
    /// Bind `image` as the canvas, discarding everything drawn since the previous bind.
    fn bind_image(&mut self, image: &RgbImage) -> VizResult<()>;

    /// Canvas width in pixels (0 while unbound).
    fn width(&self) -> u32;

    /// Canvas height in pixels (0 while unbound).
    fn height(&self) -> u32;

    /// Draw a (rounded) rectangle plus up to four label groups along its sides.
    fn draw_bounding_box(
        &mut self,
        rect: Rect,
        corner_radius: f64,
        style: &BoundingBoxStyle,
        labels: &BoxLabels,
    ) -> VizResult<()>;

    /// Draw a block of text inside a padded box whose `anchor` point lands on `position`.
    fn draw_text_box(
        &mut self,
        lines: &[String],
        position: Point,
        anchor: Anchor,
        style: &TextBoxStyle,
    ) -> VizResult<()>;

    /// Draw `image` so that its `placement.anchor` point lands on `position`.
    fn draw_image(
        &mut self,
        image: &RgbaImage,
        position: Point,
        placement: &ImagePlacement,
    ) -> VizResult<()>;

    /// Project and draw x/y/z arrows of a world frame seen through a pinhole camera.
    fn draw_xyz_axes(&mut self, pose: &PinholePose, style: &AxesStyle) -> VizResult<ProjectedAxes>;

    /// Read back the composited canvas as an RGB image.
    fn read_rgb(&mut self) -> VizResult<RgbImage>;
}
