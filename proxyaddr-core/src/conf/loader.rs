use crate::conf::types::{Origin, PolicySpec};
use crate::conf::validation::{ValidationReport, validate_policy};
use crate::conf::error::ConfigError;
use crate::error::ProxyAddrError;
use crate::trust::{CompiledTrust, Trust, TrustSpec};
use std::fs;
use std::path::{Path, PathBuf};

/// A policy file that passed validation, compiled and ready to share.
#[derive(Debug, Clone)]
pub struct LoadedPolicy {
    pub path: PathBuf,
    pub tokens: Vec<String>,
    pub compiled: CompiledTrust,
    /// Warnings only; a policy with errors is never loaded.
    pub report: ValidationReport,
}

impl LoadedPolicy {
    pub fn trust(&self) -> Trust {
        Trust::Ranges(self.compiled.clone())
    }
}

pub fn load_policy(path: &Path) -> Result<LoadedPolicy, ConfigError> {
    let src = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    parse_policy(&src, path)
}

pub fn parse_policy(src: &str, path: &Path) -> Result<LoadedPolicy, ConfigError> {
    //--------------------------------------------------------------------------
    // Hard fail: parsing and value shape
    //--------------------------------------------------------------------------
    let mut spec: PolicySpec = hcl::from_str(src).map_err(|e| ConfigError::parse(path, e))?;
    spec.origin = Origin::new(path, "trust", None);

    let tokens = spec
        .trust
        .as_ref()
        .ok_or(ProxyAddrError::TrustRequired)
        .and_then(tokens_from_value)
        .map_err(|e| ConfigError::trust(path, e))?;

    //--------------------------------------------------------------------------
    // Semantic validation (aggregate every bad token)
    //--------------------------------------------------------------------------
    let mut report = ValidationReport::default();
    validate_policy(&tokens, &spec.origin, &mut report);

    if report.has_errors() {
        return Err(ConfigError::Validation {
            path: path.to_path_buf(),
            report,
        });
    }

    let compiled = CompiledTrust::compile(&tokens).map_err(|e| ConfigError::trust(path, e))?;

    tracing::info!(
        path = %path.display(),
        tokens = tokens.len(),
        subnets = compiled.subnets().len(),
        warnings = report.warnings.len(),
        "loaded trust policy"
    );

    Ok(LoadedPolicy {
        path: path.to_path_buf(),
        tokens,
        compiled,
        report,
    })
}

fn tokens_from_value(value: &hcl::Value) -> Result<Vec<String>, ProxyAddrError> {
    match TrustSpec::try_from(value)? {
        TrustSpec::Literal(token) => Ok(vec![token]),
        TrustSpec::List(tokens) => Ok(tokens),
        TrustSpec::Predicate(_) => Err(ProxyAddrError::UnsupportedTrust),
    }
}
