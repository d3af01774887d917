//! Result helpers for shared error handling.

use crate::errors::ErrorEnvelope;

/// Shared result type reporting failures as an [`ErrorEnvelope`].
pub type Result<T, E = ErrorEnvelope> = std::result::Result<T, E>;

/// Extension helpers for results whose error converts into an envelope.
pub trait ResultExt<T> {
    /// Convert the error into an [`ErrorEnvelope`], preserving the success.
    fn into_envelope(self) -> Result<T>;

    /// Convert the error into an envelope and attach one metadata entry.
    fn with_envelope_metadata(self, key: &str, value: &str) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<ErrorEnvelope>,
{
    fn into_envelope(self) -> Result<T> {
        self.map_err(Into::into)
    }

    fn with_envelope_metadata(self, key: &str, value: &str) -> Result<T> {
        self.map_err(|error| error.into().with_metadata(key, value))
    }
}
