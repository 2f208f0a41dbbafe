/// Convenience result type used across the crate.
pub type ViewResult<T> = Result<T, ViewError>;

/// Top-level error taxonomy for the fallible edges of the engine.
///
/// Per-frame work never fails: a missing anchor degrades to a skipped tick. Errors only surface
/// when options, props or scenario files are constructed.
#[derive(thiserror::Error, Debug)]
pub enum ViewError {
    /// Invalid user-provided options or props.
    #[error("validation error: {0}")]
    Validation(String),

    /// Semantically invalid configuration (e.g. a scenario with no pages).
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ViewError {
    /// Build a [`ViewError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ViewError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`ViewError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for ViewError {
    fn from(e: serde_json::Error) -> Self {
        Self::serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
