//! # confcheck-shared
//!
//! Shared result types and error handling for the confcheck workspace.
//!
//! This crate provides foundational types used by the engine and by hosts that
//! report validation failures:
//!
//! - Error envelope with stable codes and diagnostic metadata
//! - `Result` alias and envelope conversion helpers
//! - `Validated<T>` proof wrapper
//!
//! ## Design Principles
//!
//! 1. **No workspace dependencies** - This crate only depends on external crates
//! 2. **Serde-compatible** - Error envelopes serialize for structured reporting

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod errors;
pub mod invariants;
pub mod result;

pub use errors::{CONFIG_NAMESPACE, ErrorCode, ErrorEnvelope, ErrorKind, ErrorMetadata};
pub use invariants::Validated;
pub use result::{Result, ResultExt};

/// Returns the shared crate version.
#[must_use]
pub const fn shared_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::errors::{ErrorCode, ErrorEnvelope, ErrorKind};
    use super::result::Result;

    #[test]
    fn shared_error_types_are_available() {
        let error = ErrorEnvelope::expected(ErrorCode::config("null_instance"), "invalid");
        assert_eq!(error.kind, ErrorKind::Expected);
    }

    #[test]
    fn shared_result_type_is_available() {
        let value: Result<i32> = Ok(5);
        assert!(matches!(value.map(|value| value + 1), Ok(6)));
    }

    #[test]
    fn shared_crate_version_is_set() {
        assert!(!super::shared_crate_version().is_empty());
    }
}
