/// Convenience result type used across EmoView.
pub type EmoviewResult<T> = Result<T, EmoviewError>;

/// Top-level error taxonomy used by capture APIs.
///
/// The framing math never fails; these variants cover the plumbing around it.
#[derive(thiserror::Error, Debug)]
pub enum EmoviewError {
    /// Invalid user-provided settings or run prerequisites.
    #[error("validation error: {0}")]
    Validation(String),

    /// A clip file could not be read or is not an animation clip.
    #[error("clip error: {0}")]
    Clip(String),

    /// Errors raised while driving a capture (step ordering, host rendering).
    #[error("capture error: {0}")]
    Capture(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EmoviewError {
    /// Build a [`EmoviewError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`EmoviewError::Clip`] value.
    pub fn clip(msg: impl Into<String>) -> Self {
        Self::Clip(msg.into())
    }

    /// Build a [`EmoviewError::Capture`] value.
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture(msg.into())
    }

    /// Build a [`EmoviewError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
