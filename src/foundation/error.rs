/// Convenience result type used across vizpipe.
pub type VizResult<T> = Result<T, VizError>;

/// Top-level error taxonomy used by pipeline, overlay and painter APIs.
#[derive(thiserror::Error, Debug)]
pub enum VizError {
    /// An overlay identifier was registered twice on the same pipeline.
    #[error("configuration error: identifier \"{identifier}\" has already been registered")]
    DuplicateIdentifier {
        /// The offending identifier.
        identifier: String,
    },

    /// An overlay was refused at registration because it cannot be applied.
    #[error("configuration error: overlay \"{identifier}\" cannot be applied: {reason}")]
    InvalidOverlay {
        /// Identifier the overlay was to be registered under.
        identifier: String,
        /// Why the overlay configuration is unusable.
        reason: String,
    },

    /// Invalid caller-provided data (canvas sizes, buffers, style values).
    #[error("validation error: {0}")]
    Validation(String),

    /// The painter could not draw an element.
    ///
    /// Overlays never propagate this; they turn it into a `false` success flag.
    #[error("draw error: {0}")]
    Draw(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VizError {
    /// Build a [`VizError::DuplicateIdentifier`] value.
    pub fn duplicate_identifier(identifier: impl Into<String>) -> Self {
        Self::DuplicateIdentifier {
            identifier: identifier.into(),
        }
    }

    /// Build a [`VizError::InvalidOverlay`] value.
    pub fn invalid_overlay(identifier: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOverlay {
            identifier: identifier.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`VizError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`VizError::Draw`] value.
    pub fn draw(msg: impl Into<String>) -> Self {
        Self::Draw(msg.into())
    }

    /// Build a [`VizError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for errors raised while configuring a pipeline (registration time).
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::DuplicateIdentifier { .. } | Self::InvalidOverlay { .. }
        )
    }
}

impl From<serde_json::Error> for VizError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
