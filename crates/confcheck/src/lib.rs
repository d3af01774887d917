//! # confcheck
//!
//! Declarative validation and defaulting for configuration objects.
//!
//! Run it once after a configuration has been populated (from files,
//! environment, flags) and before anything else reads it:
//!
//! - **Required fields** - absent required fields fail validation
//! - **Typed defaults** - absent optional fields receive a parsed default
//! - **Parent fields** - a field's requirement or default only applies when
//!   its named parent field is set
//! - **Self-validation** - an opt-in hook for rules metadata cannot express
//!
//! ## Example
//!
//! ```
//! use confcheck::{Properties, ValidationError, validate};
//!
//! #[derive(Debug, Default, Properties)]
//! struct TlsConfig {
//!     #[property(kind = "bool", name = "Enabled")]
//!     enabled: Option<bool>,
//!     #[property(kind = "string", required, parent = "Enabled")]
//!     certificate: Option<String>,
//!     #[property(kind = "uint16", parent = "Enabled", default = "443")]
//!     port: Option<u16>,
//! }
//!
//! // Nothing enabled: the certificate is not required and no port is set.
//! let mut tls = TlsConfig::default();
//! validate(&mut tls)?;
//! assert_eq!(tls.port, None);
//!
//! // Enabled without a certificate is rejected.
//! let mut tls = TlsConfig { enabled: Some(true), ..TlsConfig::default() };
//! assert!(matches!(
//!     validate(&mut tls),
//!     Err(ValidationError::MissingRequiredField { .. })
//! ));
//! # Ok::<(), ValidationError>(())
//! ```
//!
//! ## Dependency Rules
//!
//! - Depends only on `shared` and `derive` workspace crates
//! - Synchronous, in-memory, no I/O

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

extern crate self as confcheck;

pub mod coercion;
pub mod custom;
pub mod descriptor;
pub mod engine;
pub mod error;
pub mod properties;
pub mod registry;

pub use coercion::{Coercion, CoercionError, PropertyValue, coerce, coercion};
pub use confcheck_derive::Properties;
pub use confcheck_shared::{ErrorCode, ErrorEnvelope, ErrorKind, ResultExt, Validated};
pub use custom::SelfValidate;
pub use descriptor::{FieldDescriptor, PropertyType, UnknownTagError};
pub use engine::{validate, validate_into};
pub use error::{BoxError, ValidationError};
pub use properties::{Properties, Slot, SlotMut};
pub use registry::{FieldEntry, FieldRegistry};

/// Returns the engine crate version.
#[must_use]
pub const fn confcheck_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
