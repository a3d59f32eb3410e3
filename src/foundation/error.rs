/// Result alias used by every fallible operation in the crate.
pub type BoothResult<T> = Result<T, BoothError>;

/// Error type for compositing, decoding, editing and export.
#[derive(thiserror::Error, Debug)]
pub enum BoothError {
    /// Invalid user-supplied value (config, session description, geometry).
    #[error("validation error: {0}")]
    Validation(String),

    /// Source photo bytes could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Rasterization failed (surface allocation, paint setup).
    #[error("render error: {0}")]
    Render(String),

    /// Export encoding failed on every available path.
    #[error("encode error: {0}")]
    Encode(String),

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(String),

    /// Any other failure, carrying its source chain.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BoothError {
    /// Build a [`BoothError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BoothError::Decode`].
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`BoothError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`BoothError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`BoothError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
