/// Convenience result type used across texela.
pub type TexelaResult<T> = Result<T, TexelaError>;

/// Top-level error taxonomy used by materialization APIs.
///
/// Every variant is recoverable per frame: the compositor skips rendering the
/// offending frame this tick and continues with other layers. A stale cache
/// (textures built on a previous device) is deliberately *not* an error; it is
/// the normal trigger for a rebuild and never surfaces here.
#[derive(thiserror::Error, Debug)]
pub enum TexelaError {
    /// Texture or staging-surface allocation was rejected by the device.
    #[error("allocation failed: {0}")]
    Allocation(String),

    /// The device refused to lock a texture region for CPU writes.
    #[error("lock failed: {0}")]
    Lock(String),

    /// The frame carries no kind/content this layer can turn into a texture.
    #[error("unsupported frame kind: {0}")]
    UnsupportedFrame(String),

    /// Invalid caller-provided frame geometry or buffers.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TexelaError {
    /// Build a [`TexelaError::Allocation`] value.
    pub fn allocation(msg: impl Into<String>) -> Self {
        Self::Allocation(msg.into())
    }

    /// Build a [`TexelaError::Lock`] value.
    pub fn lock(msg: impl Into<String>) -> Self {
        Self::Lock(msg.into())
    }

    /// Build a [`TexelaError::UnsupportedFrame`] value.
    pub fn unsupported_frame(msg: impl Into<String>) -> Self {
        Self::UnsupportedFrame(msg.into())
    }

    /// Build a [`TexelaError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
