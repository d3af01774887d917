//! Custom validation capability.

use crate::error::BoxError;

/// Validation a configuration type performs on itself.
///
/// Runs once after every required field and default has been resolved. A
/// type opts in by returning `Some(self)` from
/// [`Properties::self_validation`](crate::Properties::self_validation), which
/// `#[properties(self_validate)]` generates.
pub trait SelfValidate {
    /// Check cross-field rules the descriptors cannot express.
    fn self_validate(&self) -> Result<(), BoxError>;
}
