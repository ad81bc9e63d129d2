/// Convenience result type used across the timeline engine.
pub type TimelineResult<T> = Result<T, TimelineError>;

/// Top-level error taxonomy used by construction and playback APIs.
#[derive(thiserror::Error, Debug)]
pub enum TimelineError {
    /// Programmer misuse during construction (reused animation, double show, negative forward).
    #[error("usage error: {0}")]
    Usage(String),

    /// Invariant violation detected while querying a built timeline.
    #[error("consistency error: {0}")]
    Consistency(String),

    /// Invalid user-provided parameters or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped error raised by user code (scheduled tasks, construction closures).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TimelineError {
    /// Build a [`TimelineError::Usage`] value.
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    /// Build a [`TimelineError::Consistency`] value.
    pub fn consistency(msg: impl Into<String>) -> Self {
        Self::Consistency(msg.into())
    }

    /// Build a [`TimelineError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TimelineError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` for [`TimelineError::Usage`].
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }

    /// Return `true` for [`TimelineError::Consistency`].
    pub fn is_consistency(&self) -> bool {
        matches!(self, Self::Consistency(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
