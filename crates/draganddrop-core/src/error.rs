//! Error types.

/// Boxed error raised by host-supplied expressions and handlers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced to the host binding.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The payload-value expression failed to evaluate.
    #[error("payload expression failed: {0}")]
    Evaluation(#[source] BoxError),

    /// The evaluated payload has no structured-text representation.
    #[error("payload is not serializable: {0}")]
    Serialization(#[from] serde_json::Error),

    /// One offered type carried a body that is not valid structured text.
    #[error("cannot decode payload for {wire_type}: {source}")]
    Decode {
        wire_type: String,
        #[source]
        source: serde_json::Error,
    },

    /// A drag-over or drop handler failed.
    #[error("handler failed: {0}")]
    Handler(#[source] BoxError),
}

impl Error {
    /// Wrap a host evaluation failure.
    pub fn evaluation(err: impl Into<BoxError>) -> Self {
        Self::Evaluation(err.into())
    }

    /// Wrap a host handler failure.
    pub fn handler(err: impl Into<BoxError>) -> Self {
        Self::Handler(err.into())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
