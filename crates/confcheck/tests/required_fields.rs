//! Integration tests for required fields and parent gating.

use confcheck::{Properties, ValidationError, validate};

#[derive(Debug, Default, Properties)]
struct GatedConfig {
    #[property(kind = "bool")]
    bool_value4: Option<bool>,
    #[property(kind = "int32", parent = "bool_value4", default = "1")]
    int_value4: Option<i32>,
    #[property(kind = "bool")]
    bool_value3: Option<bool>,
    #[property(kind = "int32", parent = "bool_value3", default = "1")]
    int_value3: Option<i32>,
    #[property(kind = "bool")]
    bool_value2: Option<bool>,
    #[property(kind = "int32", required, parent = "bool_value2")]
    int_value2: Option<i32>,
    #[property(kind = "bool")]
    bool_value: Option<bool>,
    #[property(kind = "int32", required, parent = "bool_value")]
    int_value: Option<i32>,
}

#[test]
fn present_parent_enforces_and_defaults_dependents() {
    let mut config = GatedConfig {
        bool_value: Some(true),
        bool_value4: Some(true),
        ..GatedConfig::default()
    };
    let result = validate(&mut config);

    assert!(matches!(
        result,
        Err(ValidationError::MissingRequiredField { ref field }) if field == "int_value"
    ));
    // Rules before the failing field already ran and are not rolled back.
    assert_eq!(config.int_value4, Some(1));
    assert_eq!(config.int_value3, None);
    assert_eq!(config.int_value2, None);
}

#[test]
fn absent_parents_waive_everything() -> Result<(), ValidationError> {
    let mut config = GatedConfig::default();
    validate(&mut config)?;

    assert_eq!(config.int_value4, None);
    assert_eq!(config.int_value3, None);
    assert_eq!(config.int_value2, None);
    assert_eq!(config.int_value, None);
    Ok(())
}

#[test]
fn satisfied_dependents_pass() -> Result<(), ValidationError> {
    let mut config = GatedConfig {
        bool_value: Some(false),
        int_value: Some(7),
        bool_value3: Some(false),
        ..GatedConfig::default()
    };
    validate(&mut config)?;

    assert_eq!(config.int_value, Some(7));
    assert_eq!(config.int_value3, Some(1));
    Ok(())
}

#[derive(Debug, Default, Properties)]
struct RequiredConfig {
    #[property(kind = "string", default = "Hello")]
    string_value3: Option<String>,
    #[property(kind = "string", required)]
    string_value2: Option<String>,
    #[property(kind = "string", required, default = "Hello")]
    string_value: Option<String>,
    #[property(kind = "string", required, parent = "bool_value2", default = "Hello")]
    string_value4: Option<String>,
    #[property(kind = "bool", required)]
    bool_value2: Option<bool>,
    #[property(kind = "bool", required)]
    bool_value: Option<bool>,
}

#[test]
fn required_field_is_never_defaulted() {
    let mut config = RequiredConfig {
        string_value2: Some("set".to_owned()),
        bool_value2: Some(true),
        ..RequiredConfig::default()
    };
    let result = validate(&mut config);

    assert!(matches!(
        result,
        Err(ValidationError::MissingRequiredField { ref field }) if field == "string_value"
    ));
    assert_eq!(config.string_value3.as_deref(), Some("Hello"));
    assert_eq!(config.string_value, None);
}

#[test]
fn required_with_absent_parent_is_neither_enforced_nor_defaulted() {
    let mut config = RequiredConfig {
        string_value2: Some("set".to_owned()),
        string_value: Some("set".to_owned()),
        ..RequiredConfig::default()
    };
    let result = validate(&mut config);

    // string_value4 is waived, so the first failure is the unconditional bool.
    assert!(matches!(
        result,
        Err(ValidationError::MissingRequiredField { ref field }) if field == "bool_value2"
    ));
    assert_eq!(config.string_value4, None);
}

#[test]
fn fully_populated_required_config_passes() -> Result<(), ValidationError> {
    let mut config = RequiredConfig {
        string_value2: Some("a".to_owned()),
        string_value: Some("b".to_owned()),
        string_value4: Some("c".to_owned()),
        bool_value2: Some(false),
        bool_value: Some(false),
        ..RequiredConfig::default()
    };
    validate(&mut config)?;
    assert_eq!(config.string_value3.as_deref(), Some("Hello"));
    Ok(())
}

#[derive(Debug, Default, Properties)]
struct DanglingParentConfig {
    #[property(kind = "bool")]
    enabled: Option<bool>,
    #[property(kind = "int32", parent = "missing_flag")]
    int_value: Option<i32>,
}

#[test]
fn unknown_parent_fails_even_when_field_is_set() {
    for int_value in [None, Some(3)] {
        let mut config = DanglingParentConfig {
            enabled: Some(true),
            int_value,
        };
        let result = validate(&mut config);
        assert!(matches!(
            result,
            Err(ValidationError::ParentNotFound { ref field, ref parent })
                if field == "int_value" && parent == "missing_flag"
        ));
    }
}

#[derive(Debug, Default, Properties)]
struct DanglingRequiredConfig {
    #[property(kind = "int32", required, parent = "missing_flag")]
    int_value: Option<i32>,
}

#[test]
fn unknown_parent_fails_required_field_whether_set_or_not() {
    for int_value in [None, Some(1)] {
        let mut config = DanglingRequiredConfig { int_value };
        let result = validate(&mut config);
        assert!(matches!(
            result,
            Err(ValidationError::ParentNotFound { ref field, ref parent })
                if field == "int_value" && parent == "missing_flag"
        ));
        assert_eq!(config.int_value, int_value);
    }
}

#[derive(Debug, Default, Properties)]
struct ChainConfig {
    #[property(kind = "bool")]
    grand: Option<bool>,
    #[property(kind = "bool", parent = "grand")]
    parent: Option<bool>,
    #[property(kind = "int32", required, parent = "parent")]
    child: Option<i32>,
    #[property(kind = "int32", parent = "parent", default = "5")]
    child_default: Option<i32>,
}

#[test]
fn only_the_direct_parent_gates_a_field() {
    let mut config = ChainConfig {
        parent: Some(true),
        ..ChainConfig::default()
    };
    let result = validate(&mut config);

    assert!(matches!(
        result,
        Err(ValidationError::MissingRequiredField { ref field }) if field == "child"
    ));
    assert_eq!(config.grand, None);
}

#[test]
fn absent_grandparent_does_not_suppress_defaults() -> Result<(), ValidationError> {
    let mut config = ChainConfig {
        parent: Some(true),
        child: Some(1),
        ..ChainConfig::default()
    };
    validate(&mut config)?;

    assert_eq!(config.grand, None);
    assert_eq!(config.child, Some(1));
    assert_eq!(config.child_default, Some(5));
    Ok(())
}

#[derive(Debug, Default, Properties)]
struct BlankParentConfig {
    #[property(kind = "uint32", parent = "  ", default = "30")]
    timeout: Option<u32>,
}

#[test]
fn blank_parent_means_no_parent() -> Result<(), ValidationError> {
    let descriptors = BlankParentConfig::descriptors();
    assert!(descriptors.iter().all(|descriptor| descriptor.parent().is_none()));

    let mut config = BlankParentConfig::default();
    validate(&mut config)?;
    assert_eq!(config.timeout, Some(30));
    Ok(())
}

#[derive(Debug, Default, Properties)]
struct ParentAfterChildConfig {
    #[property(kind = "string", required, parent = "tls")]
    cert_path: Option<String>,
    #[property(kind = "bool")]
    tls: Option<bool>,
}

#[test]
fn parent_may_be_declared_after_its_dependent() {
    let mut config = ParentAfterChildConfig {
        tls: Some(true),
        ..ParentAfterChildConfig::default()
    };
    let result = validate(&mut config);
    assert!(matches!(
        result,
        Err(ValidationError::MissingRequiredField { ref field }) if field == "cert_path"
    ));
}

#[test]
fn missing_instance_fails_before_any_field() {
    let result = validate(None::<&mut RequiredConfig>);
    assert!(matches!(result, Err(ValidationError::NullInstance)));
}
