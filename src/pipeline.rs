//! Ordered overlay registry and per-frame dispatch.

use std::collections::{HashMap, HashSet};

use image::RgbImage;

use crate::foundation::error::{VizError, VizResult};
use crate::overlay::{Overlay, OverlayInput};
use crate::render::cpu::CpuPainter;
use crate::render::painter::Painter;

struct Registration {
    identifier: String,
    overlay: Box<dyn Overlay>,
}

/// Success flag of one overlay in one [`Pipeline::visualize`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlayOutcome {
    /// Identifier the overlay was registered under.
    pub identifier: String,
    /// `true` if every draw call of the overlay succeeded.
    pub success: bool,
}

/// Result of [`Pipeline::visualize`].
#[derive(Clone, Debug, PartialEq)]
pub struct Visualization {
    /// The composited image, same size as the input.
    pub image: RgbImage,
    /// Per-overlay outcomes in draw order.
    pub outcomes: Vec<OverlayOutcome>,
}

impl Visualization {
    /// Outcome of the overlay registered under `identifier`.
    pub fn success(&self, identifier: &str) -> Option<bool> {
        self.outcomes
            .iter()
            .find(|o| o.identifier == identifier)
            .map(|o| o.success)
    }

    /// `true` if every overlay drew successfully.
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(|o| o.success)
    }
}

/// Named overlays applied in registration order onto one painter.
///
/// The painter is owned by the pipeline and rebound on every [`Pipeline::visualize`] call, so a
/// pipeline must not be shared between threads without external locking.
pub struct Pipeline<P: Painter = CpuPainter> {
    painter: P,
    overlays: Vec<Registration>,
    identifiers: HashSet<String>,
}

impl Pipeline<CpuPainter> {
    /// Empty pipeline drawing with a [`CpuPainter`] without fonts.
    pub fn new() -> Self {
        Self::with_painter(CpuPainter::new())
    }
}

impl Default for Pipeline<CpuPainter> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Painter> std::fmt::Debug for Pipeline<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("overlays", &self.identifiers().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl<P: Painter> Pipeline<P> {
    /// Empty pipeline drawing with `painter`.
    pub fn with_painter(painter: P) -> Self {
        Self {
            painter,
            overlays: Vec::new(),
            identifiers: HashSet::new(),
        }
    }

    /// The painter overlays draw on.
    pub fn painter(&self) -> &P {
        &self.painter
    }

    /// Mutable access to the painter, e.g. to register fonts.
    pub fn painter_mut(&mut self) -> &mut P {
        &mut self.painter
    }

    /// Register `overlay` under `identifier`; it draws on top of every overlay added before it.
    ///
    /// Fails with [`VizError::DuplicateIdentifier`] if the identifier is taken and with
    /// [`VizError::InvalidOverlay`] if the overlay configuration cannot be applied. The pipeline
    /// is unchanged on failure.
    pub fn add(
        &mut self,
        identifier: impl Into<String>,
        overlay: impl Overlay + 'static,
    ) -> VizResult<()> {
        self.add_boxed(identifier, Box::new(overlay))
    }

    /// [`Pipeline::add`] for overlays that are already boxed.
    pub fn add_boxed(
        &mut self,
        identifier: impl Into<String>,
        overlay: Box<dyn Overlay>,
    ) -> VizResult<()> {
        let identifier = identifier.into();
        if self.identifiers.contains(&identifier) {
            return Err(VizError::duplicate_identifier(identifier));
        }
        overlay
            .validate()
            .map_err(|e| VizError::invalid_overlay(identifier.as_str(), e.to_string()))?;

        tracing::debug!(%identifier, kind = overlay.kind(), "registered overlay");
        self.identifiers.insert(identifier.clone());
        self.overlays.push(Registration {
            identifier,
            overlay,
        });
        Ok(())
    }

    /// Number of registered overlays.
    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    /// `true` if no overlay is registered.
    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    /// `true` if an overlay is registered under `identifier`.
    pub fn contains(&self, identifier: &str) -> bool {
        self.identifiers.contains(identifier)
    }

    /// Registered identifiers in draw order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.overlays.iter().map(|r| r.identifier.as_str())
    }

    /// Draw every overlay onto `image` and return the composited result.
    ///
    /// Overlays run in registration order; each receives the entry of `params` keyed by its
    /// identifier, or no input at all. Entries for unknown identifiers are logged and ignored.
    /// Returns `Ok(None)` without touching any overlay when `image` is `None`.
    #[tracing::instrument(skip_all, fields(overlays = self.overlays.len(), params = params.len()))]
    pub fn visualize(
        &mut self,
        image: Option<&RgbImage>,
        params: &HashMap<String, OverlayInput>,
    ) -> VizResult<Option<Visualization>> {
        let Some(image) = image else {
            tracing::debug!("no image given");
            return Ok(None);
        };
        self.painter.bind_image(image)?;

        let mut unknown: Vec<&str> = params
            .keys()
            .map(String::as_str)
            .filter(|id| !self.identifiers.contains(*id))
            .collect();
        unknown.sort_unstable();
        for identifier in unknown {
            tracing::warn!(identifier, "parameters given for an unregistered overlay");
        }

        let mut outcomes = Vec::with_capacity(self.overlays.len());
        for reg in &self.overlays {
            let span = tracing::debug_span!(
                "overlay",
                id = %reg.identifier,
                kind = reg.overlay.kind()
            );
            let _enter = span.enter();

            let success = reg
                .overlay
                .apply(&mut self.painter, params.get(&reg.identifier));
            if !success {
                tracing::debug!("overlay did not draw completely");
            }
            outcomes.push(OverlayOutcome {
                identifier: reg.identifier.clone(),
                success,
            });
        }

        let image = self.painter.read_rgb()?;
        Ok(Some(Visualization { image, outcomes }))
    }
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
