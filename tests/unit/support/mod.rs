//! Test doubles shared by unit tests.

use image::{RgbImage, RgbaImage};

use crate::foundation::core::{Anchor, Point, Rect};
use crate::foundation::error::{VizError, VizResult};
use crate::render::painter::Painter;
use crate::render::projection::project_axes;
use crate::render::style::{
    AxesStyle, BoundingBoxStyle, BoxLabels, ImagePlacement, PinholePose, ProjectedAxes,
    TextBoxStyle,
};

/// One painter invocation.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Call {
    Bind(u32, u32),
    BoundingBox {
        rect: Rect,
        corner_radius: f64,
        style: BoundingBoxStyle,
        labels: BoxLabels,
    },
    TextBox {
        lines: Vec<String>,
        position: Point,
        anchor: Anchor,
        style: TextBoxStyle,
    },
    Image {
        size: (u32, u32),
        position: Point,
        placement: ImagePlacement,
    },
    Axes {
        pose: PinholePose,
        style: AxesStyle,
    },
    Read,
}

/// Painter that records calls and returns the bound image unchanged.
#[derive(Default)]
pub(crate) struct RecordingPainter {
    pub(crate) calls: Vec<Call>,
    pub(crate) fail_text: bool,
    pub(crate) fail_boxes: bool,
    image: Option<RgbImage>,
}

impl RecordingPainter {
    /// Painter bound to a black `w x h` canvas without recording the bind.
    pub(crate) fn bound(w: u32, h: u32) -> Self {
        Self {
            image: Some(RgbImage::new(w, h)),
            ..Self::default()
        }
    }

    pub(crate) fn text_calls(&self) -> Vec<&Call> {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::TextBox { .. }))
            .collect()
    }
}

impl Painter for RecordingPainter {
    fn bind_image(&mut self, image: &RgbImage) -> VizResult<()> {
        self.calls.push(Call::Bind(image.width(), image.height()));
        self.image = Some(image.clone());
        Ok(())
    }

    fn width(&self) -> u32 {
        self.image.as_ref().map_or(0, RgbImage::width)
    }

    fn height(&self) -> u32 {
        self.image.as_ref().map_or(0, RgbImage::height)
    }

    fn draw_bounding_box(
        &mut self,
        rect: Rect,
        corner_radius: f64,
        style: &BoundingBoxStyle,
        labels: &BoxLabels,
    ) -> VizResult<()> {
        self.calls.push(Call::BoundingBox {
            rect,
            corner_radius,
            style: style.clone(),
            labels: labels.clone(),
        });
        if self.fail_boxes {
            return Err(VizError::draw("box refused"));
        }
        Ok(())
    }

    fn draw_text_box(
        &mut self,
        lines: &[String],
        position: Point,
        anchor: Anchor,
        style: &TextBoxStyle,
    ) -> VizResult<()> {
        self.calls.push(Call::TextBox {
            lines: lines.to_vec(),
            position,
            anchor,
            style: style.clone(),
        });
        if self.fail_text {
            return Err(VizError::draw("text refused"));
        }
        Ok(())
    }

    fn draw_image(
        &mut self,
        image: &RgbaImage,
        position: Point,
        placement: &ImagePlacement,
    ) -> VizResult<()> {
        self.calls.push(Call::Image {
            size: image.dimensions(),
            position,
            placement: placement.clone(),
        });
        Ok(())
    }

    fn draw_xyz_axes(&mut self, pose: &PinholePose, style: &AxesStyle) -> VizResult<ProjectedAxes> {
        self.calls.push(Call::Axes {
            pose: *pose,
            style: style.clone(),
        });
        project_axes(pose, style.origin, style.lengths)
    }

    fn read_rgb(&mut self) -> VizResult<RgbImage> {
        self.calls.push(Call::Read);
        self.image
            .clone()
            .ok_or_else(|| VizError::draw("nothing bound"))
    }
}
