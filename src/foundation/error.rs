use std::path::PathBuf;

/// Convenience result type used across qrstream.
pub type QrStreamResult<T> = Result<T, QrStreamError>;

/// Top-level error taxonomy used by the rendering APIs.
#[derive(thiserror::Error, Debug)]
pub enum QrStreamError {
    /// Invalid configuration, geometry, or call sequence.
    #[error("validation error: {0}")]
    Validation(String),

    /// The destination could not be opened or written.
    #[error("io error on '{}': {source}", path.display())]
    Io {
        /// Destination the operation was acting on.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// The symbol encoder or the image encoder rejected the data.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Context-carrying errors from lower layers.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl QrStreamError {
    /// Build a [`QrStreamError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`QrStreamError::Encoding`].
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    /// Build a [`QrStreamError::Io`] for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
