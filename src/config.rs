//! JSON pipeline configuration.
//!
//! ```json
//! {
//!   "fonts": ["fonts/DejaVuSans.ttf"],
//!   "overlays": [
//!     { "id": "detections", "kind": "bounding_boxes", "clip_label": true },
//!     { "id": "camera", "kind": "static_text", "text": "cam0" }
//!   ]
//! }
//! ```
//!
//! Every overlay field is optional and falls back to the overlay's default.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::foundation::error::VizResult;
use crate::overlay::Overlay;
use crate::overlay::bbox::BoundingBoxOverlay;
use crate::overlay::image::ImageOverlay;
use crate::overlay::pose::{CameraPoseOverlay, TagPoseOverlay};
use crate::overlay::text::{DynamicTextOverlay, StaticTextOverlay};
use crate::pipeline::Pipeline;
use crate::render::cpu::CpuPainter;
use crate::render::painter::Painter;

/// Configuration of one built-in overlay, tagged by `kind`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OverlayConfig {
    /// [`BoundingBoxOverlay`].
    BoundingBoxes(BoundingBoxOverlay),
    /// [`DynamicTextOverlay`].
    Text(DynamicTextOverlay),
    /// [`StaticTextOverlay`].
    StaticText(StaticTextOverlay),
    /// [`ImageOverlay`].
    Image(ImageOverlay),
    /// [`CameraPoseOverlay`].
    CameraPose(CameraPoseOverlay),
    /// [`TagPoseOverlay`].
    TagPose(TagPoseOverlay),
}

impl OverlayConfig {
    /// Instantiate the configured overlay.
    pub fn into_overlay(self) -> Box<dyn Overlay> {
        match self {
            OverlayConfig::BoundingBoxes(o) => Box::new(o),
            OverlayConfig::Text(o) => Box::new(o),
            OverlayConfig::StaticText(o) => Box::new(o),
            OverlayConfig::Image(o) => Box::new(o),
            OverlayConfig::CameraPose(o) => Box::new(o),
            OverlayConfig::TagPose(o) => Box::new(o),
        }
    }
}

/// An overlay with the identifier it is registered under.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OverlayEntry {
    /// Pipeline identifier; also the key of the overlay's per-call parameters.
    pub id: String,
    /// Overlay kind and settings.
    #[serde(flatten)]
    pub overlay: OverlayConfig,
}

/// Fonts plus overlays in draw order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Font files registered with the painter; relative paths resolve against the build base dir.
    #[serde(default)]
    pub fonts: Vec<PathBuf>,
    /// Overlays in draw order.
    #[serde(default)]
    pub overlays: Vec<OverlayEntry>,
}

impl PipelineConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json_str(s: &str) -> VizResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Read and parse a configuration file.
    pub fn from_path(path: &Path) -> VizResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read pipeline config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Build a [`CpuPainter`] pipeline, loading fonts relative to `base_dir`.
    pub fn build(&self, base_dir: &Path) -> VizResult<Pipeline> {
        let mut painter = CpuPainter::new();
        for font in &self.fonts {
            painter.register_font_file(&base_dir.join(font))?;
        }
        self.build_with(painter)
    }

    /// Register the configured overlays on a pipeline drawing with `painter`.
    ///
    /// Fonts are left to the caller.
    pub fn build_with<P: Painter>(&self, painter: P) -> VizResult<Pipeline<P>> {
        let mut pipeline = Pipeline::with_painter(painter);
        for entry in &self.overlays {
            pipeline.add_boxed(entry.id.as_str(), entry.overlay.clone().into_overlay())?;
        }
        Ok(pipeline)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
