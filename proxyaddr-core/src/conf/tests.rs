use crate::conf::{ConfigError, load_policy, parse_policy};
use crate::error::ProxyAddrError;
use crate::trust::TrustPredicate;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn parse(src: &str) -> Result<crate::conf::LoadedPolicy, ConfigError> {
    parse_policy(src, Path::new("/test/policy.hcl"))
}

#[test]
fn load_policy_from_file() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("policy.hcl");

    fs::write(
        &path,
        r#"
trust = ["loopback", "10.0.0.0/8"]
"#,
    )
    .unwrap();

    // Act
    let policy = load_policy(&path).unwrap();

    // Assert
    assert_eq!(policy.tokens, vec!["loopback", "10.0.0.0/8"]);
    assert_eq!(policy.compiled.subnets().len(), 3);
    assert!(!policy.report.has_violations());
    assert!(policy.trust().is_trusted(Some("10.9.8.7"), 0));
    assert!(!policy.trust().is_trusted(Some("192.168.1.1"), 0));
}

#[test]
fn single_token_policy() {
    let policy = parse(r#"trust = "uniquelocal""#).unwrap();
    assert_eq!(policy.tokens, vec!["uniquelocal"]);
    assert_eq!(policy.compiled.subnets().len(), 4);
}

#[test]
fn empty_list_trusts_nothing() {
    let policy = parse("trust = []").unwrap();
    assert!(policy.compiled.is_empty());
}

#[test]
fn missing_file_is_read_error() {
    let dir = tempdir().unwrap();
    let err = load_policy(&dir.path().join("nope.hcl")).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
}

#[test]
fn malformed_hcl_is_parse_error() {
    let err = parse("trust = [").unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn unknown_attribute_is_parse_error() {
    let err = parse("trust = \"loopback\"\nproxies = 3").unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn missing_trust_is_required() {
    let err = parse("").unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Trust {
            source: ProxyAddrError::TrustRequired,
            ..
        }
    ));
}

#[test]
fn number_trust_is_unsupported() {
    for src in ["trust = 42", "trust = true", "trust = [\"loopback\", 42]"] {
        let err = parse(src).unwrap_err();
        assert!(
            matches!(
                err,
                ConfigError::Trust {
                    source: ProxyAddrError::UnsupportedTrust,
                    ..
                }
            ),
            "{src}"
        );
    }
}

#[test]
fn bad_tokens_fail_validation() {
    let err = parse(r#"trust = ["blargh", "loopback", "10.0.0.1/255.0.255.0"]"#).unwrap_err();

    let ConfigError::Validation { report, .. } = err else {
        panic!("expected validation error");
    };
    assert_eq!(report.errors.len(), 2);
    assert_eq!(report.errors[0].origin.index, Some(0));
    assert_eq!(report.errors[1].origin.index, Some(2));
}

#[test]
fn public_range_loads_with_warning() {
    let policy = parse(r#"trust = ["203.0.113.0/24"]"#).unwrap();
    assert_eq!(policy.report.warnings.len(), 1);
    assert!(policy.trust().is_trusted(Some("203.0.113.7"), 0));
}

#[test]
fn report_serializes_to_json() {
    let policy = parse(r#"trust = ["203.0.113.0/24", "203.0.113.0/24"]"#).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&policy.report.to_json().unwrap()).unwrap();

    assert_eq!(json["errors"].as_array().unwrap().len(), 0);
    assert_eq!(json["warnings"].as_array().unwrap().len(), 2);
    assert_eq!(json["warnings"][0]["severity"], "Warning");
}
