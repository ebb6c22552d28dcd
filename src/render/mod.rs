//! Drawing surface abstraction and its CPU implementation.
//!
//! Overlays only talk to [`painter::Painter`]; [`cpu::CpuPainter`] rasterizes with `vello_cpu`
//! and shapes text with `parley`.

pub(crate) mod composite;
/// `vello_cpu` painter.
pub mod cpu;
/// Drawing surface trait.
pub mod painter;
/// Pinhole projection of world points.
pub mod projection;
/// Style value types consumed by painters.
pub mod style;
pub(crate) mod text;
