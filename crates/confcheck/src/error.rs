//! Validation error taxonomy.

use crate::descriptor::PropertyType;
use confcheck_shared::{ErrorCode, ErrorEnvelope};

/// Error raised by a [`SelfValidate`](crate::SelfValidate) hook.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The first problem found while validating a configuration instance.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// Validation was invoked without an instance.
    #[error("configuration instance must be provided")]
    NullInstance,
    /// A descriptor references a type tag outside the known set.
    #[error("unknown type '{kind}' for config field '{field}'")]
    UnknownPropertyType {
        /// Field carrying the descriptor.
        field: String,
        /// Tag as registered.
        kind: String,
    },
    /// A descriptor names a parent that has no registry entry.
    #[error("parent config property '{parent}' of config field '{field}' not found")]
    ParentNotFound {
        /// Dependent field.
        field: String,
        /// Parent name that did not resolve.
        parent: String,
    },
    /// A required field is absent and its parent does not waive it.
    #[error("config field '{field}' must be provided")]
    MissingRequiredField {
        /// Missing field.
        field: String,
    },
    /// A configured default does not parse as its declared type.
    #[error("invalid default '{raw}' for {kind} config field '{field}': {reason}")]
    InvalidDefaultValue {
        /// Field whose default failed.
        field: String,
        /// Declared type.
        kind: PropertyType,
        /// Raw default string.
        raw: String,
        /// Parser message.
        reason: String,
    },
    /// Failure raised by the type's own validation hook, carried unchanged.
    ///
    /// Display and `source()` both forward to the hook error, so an error
    /// chain lists its message once. Use [`ValidationError::as_custom`] or
    /// [`ValidationError::into_custom`] to downcast it.
    #[error(transparent)]
    Custom(BoxError),
    /// A descriptor names a field the accessor does not expose.
    #[error("config field '{field}' has no accessor")]
    UnknownField {
        /// Field name from the descriptor.
        field: String,
    },
    /// The stored field type disagrees with the descriptor's type tag.
    #[error("config field '{field}' is declared {declared} but stores {actual}")]
    TypeMismatch {
        /// Field name.
        field: String,
        /// Type from the descriptor.
        declared: PropertyType,
        /// Type of the accessor slot.
        actual: PropertyType,
    },
    /// Two descriptors share a name.
    #[error("config field '{field}' is registered more than once")]
    DuplicateField {
        /// Duplicated name.
        field: String,
    },
}

impl ValidationError {
    /// Wrap a hook failure.
    pub fn custom(error: impl Into<BoxError>) -> Self {
        Self::Custom(error.into())
    }

    /// Field the error is about, if it concerns a single field.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::NullInstance | Self::Custom(_) => None,
            Self::UnknownPropertyType { field, .. }
            | Self::ParentNotFound { field, .. }
            | Self::MissingRequiredField { field }
            | Self::InvalidDefaultValue { field, .. }
            | Self::UnknownField { field }
            | Self::TypeMismatch { field, .. }
            | Self::DuplicateField { field } => Some(field),
        }
    }

    /// Borrow the hook failure when this is a [`ValidationError::Custom`].
    #[must_use]
    pub fn as_custom(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::Custom(error) => Some(error.as_ref()),
            _ => None,
        }
    }

    /// Take back the hook failure when this is a [`ValidationError::Custom`].
    pub fn into_custom(self) -> Result<BoxError, Self> {
        match self {
            Self::Custom(error) => Ok(error),
            other => Err(other),
        }
    }

    /// Stable code in the `config` namespace.
    #[must_use]
    pub fn error_code(&self) -> ErrorCode {
        let code = match self {
            Self::NullInstance => "null_instance",
            Self::UnknownPropertyType { .. } => "unknown_property_type",
            Self::ParentNotFound { .. } => "parent_not_found",
            Self::MissingRequiredField { .. } => "missing_required_field",
            Self::InvalidDefaultValue { .. } => "invalid_default_value",
            Self::Custom(_) => "custom_validation",
            Self::UnknownField { .. } => "unknown_field",
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::DuplicateField { .. } => "duplicate_field",
        };
        ErrorCode::config(code)
    }

    const fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::UnknownField { .. } | Self::TypeMismatch { .. } | Self::DuplicateField { .. }
        )
    }
}

impl From<ValidationError> for ErrorEnvelope {
    fn from(error: ValidationError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let mut envelope = if error.is_contract_violation() {
            Self::invariant(code, message)
        } else {
            Self::expected(code, message)
        };

        match error {
            ValidationError::NullInstance | ValidationError::Custom(_) => {},
            ValidationError::UnknownPropertyType { field, kind } => {
                envelope = envelope
                    .with_metadata("field", field)
                    .with_metadata("kind", kind);
            },
            ValidationError::ParentNotFound { field, parent } => {
                envelope = envelope
                    .with_metadata("field", field)
                    .with_metadata("parent", parent);
            },
            ValidationError::MissingRequiredField { field }
            | ValidationError::UnknownField { field }
            | ValidationError::DuplicateField { field } => {
                envelope = envelope.with_metadata("field", field);
            },
            ValidationError::InvalidDefaultValue {
                field, kind, raw, ..
            } => {
                envelope = envelope
                    .with_metadata("field", field)
                    .with_metadata("kind", kind.as_str())
                    .with_metadata("value", raw);
            },
            ValidationError::TypeMismatch {
                field,
                declared,
                actual,
            } => {
                envelope = envelope
                    .with_metadata("field", field)
                    .with_metadata("declared", declared.as_str())
                    .with_metadata("actual", actual.as_str());
            },
        }

        envelope
    }
}
