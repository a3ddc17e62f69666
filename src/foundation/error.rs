/// Convenience result type used across reflow.
pub type ReflowResult<T> = Result<T, ReflowError>;

/// Top-level error taxonomy used by tree, layout and binding APIs.
#[derive(thiserror::Error, Debug)]
pub enum ReflowError {
    /// A subject no longer exposes (or cannot produce) a bound attribute.
    #[error("attribute resolution error: {0}")]
    AttributeResolution(String),

    /// A custom per-attribute update handler failed.
    #[error("handler error: {0}")]
    Handler(String),

    /// A row or column had no members.
    #[error("degenerate layout: {0}")]
    LayoutDegenerate(String),

    /// Malformed descriptors, configuration or node handles.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies, accessors or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReflowError {
    /// Build a [`ReflowError::AttributeResolution`] value.
    pub fn attribute(msg: impl Into<String>) -> Self {
        Self::AttributeResolution(msg.into())
    }

    /// Build a [`ReflowError::Handler`] value.
    pub fn handler(msg: impl Into<String>) -> Self {
        Self::Handler(msg.into())
    }

    /// Build a [`ReflowError::LayoutDegenerate`] value.
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::LayoutDegenerate(msg.into())
    }

    /// Build a [`ReflowError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
