//! Validation engine: required-field enforcement, defaulting, and the hook.
//!
//! Validation runs in two passes over the described fields. The first builds
//! a [`FieldRegistry`] with a presence snapshot per field; the second walks
//! the registry in declaration order and applies the required/default rules,
//! writing defaults into the instance as it goes. The first failing field
//! aborts the call; defaults already written stay written.

use crate::coercion::coerce;
use crate::error::ValidationError;
use crate::properties::Properties;
use crate::registry::{FieldEntry, FieldRegistry};
use confcheck_shared::Validated;
use tracing::{debug, trace};

/// Validate `config` in place.
///
/// Pass `None` to model a missing instance; it fails with
/// [`ValidationError::NullInstance`] before any field is looked at.
///
/// # Example
///
/// ```
/// use confcheck::{Properties, validate};
///
/// #[derive(Default, Properties)]
/// struct Server {
///     #[property(kind = "string", required)]
///     host: Option<String>,
///     #[property(kind = "uint16", default = "8080")]
///     port: Option<u16>,
/// }
///
/// let mut server = Server {
///     host: Some("localhost".to_owned()),
///     ..Server::default()
/// };
/// validate(&mut server)?;
/// assert_eq!(server.port, Some(8080));
/// # Ok::<(), confcheck::ValidationError>(())
/// ```
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(config = std::any::type_name::<T>())
)]
pub fn validate<'a, T>(config: impl Into<Option<&'a mut T>>) -> Result<(), ValidationError>
where
    T: Properties + 'a,
{
    let Some(config) = config.into() else {
        return Err(ValidationError::NullInstance);
    };

    let registry = FieldRegistry::build(&*config)?;
    trace!(fields = registry.len(), "field registry built");

    apply_rules(&registry, config)?;
    run_self_validation(config)
}

/// Validate an owned configuration and wrap it as proof of validation.
pub fn validate_into<T: Properties>(mut config: T) -> Result<Validated<T>, ValidationError> {
    validate(&mut config)?;
    Ok(Validated::new(config))
}

/// Second pass: required and default rules, in registry order.
fn apply_rules<T>(registry: &FieldRegistry, config: &mut T) -> Result<(), ValidationError>
where
    T: Properties + ?Sized,
{
    for entry in registry {
        let parent = resolve_parent(registry, entry)?;
        let descriptor = entry.descriptor();

        if descriptor.is_required() {
            if entry.is_present() {
                continue;
            }
            match parent {
                Some(parent) if !parent.is_present() => {
                    debug!(
                        field = entry.name(),
                        parent = parent.name(),
                        "requirement waived, parent is unset"
                    );
                    continue;
                },
                _ => {
                    return Err(ValidationError::MissingRequiredField {
                        field: entry.name().to_owned(),
                    });
                },
            }
        }

        let Some(raw) = descriptor.default_value() else {
            continue;
        };
        if entry.is_present() {
            continue;
        }
        if let Some(parent) = parent.filter(|parent| !parent.is_present()) {
            debug!(
                field = entry.name(),
                parent = parent.name(),
                "default suppressed, parent is unset"
            );
            continue;
        }

        assign_default(config, entry, raw)?;
    }
    Ok(())
}

fn resolve_parent<'r>(
    registry: &'r FieldRegistry,
    entry: &FieldEntry,
) -> Result<Option<&'r FieldEntry>, ValidationError> {
    let Some(parent) = entry.descriptor().parent() else {
        return Ok(None);
    };
    registry
        .get(parent)
        .map(Some)
        .ok_or_else(|| ValidationError::ParentNotFound {
            field: entry.name().to_owned(),
            parent: parent.to_owned(),
        })
}

fn assign_default<T>(config: &mut T, entry: &FieldEntry, raw: &str) -> Result<(), ValidationError>
where
    T: Properties + ?Sized,
{
    let value = coerce(entry.property_type(), raw).map_err(|error| {
        ValidationError::InvalidDefaultValue {
            field: entry.name().to_owned(),
            kind: entry.property_type(),
            raw: error.raw,
            reason: error.reason,
        }
    })?;

    let slot = config
        .slot_mut(entry.name())
        .ok_or_else(|| ValidationError::UnknownField {
            field: entry.name().to_owned(),
        })?;
    let actual = slot.property_type();
    debug!(field = entry.name(), default = %value, "applying default");
    slot.assign(value)
        .map_err(|_| ValidationError::TypeMismatch {
            field: entry.name().to_owned(),
            declared: entry.property_type(),
            actual,
        })
}

fn run_self_validation<T>(config: &T) -> Result<(), ValidationError>
where
    T: Properties + ?Sized,
{
    let Some(hook) = config.self_validation() else {
        return Ok(());
    };
    hook.self_validate().map_err(ValidationError::Custom)
}
