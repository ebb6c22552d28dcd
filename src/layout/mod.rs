//! Coordinate normalization shared by every overlay.

/// Position and padding resolution rules.
pub mod resolve;
