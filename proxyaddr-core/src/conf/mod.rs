//! Trust policies kept in HCL files.

mod error;
mod loader;
#[cfg(test)]
mod tests;
mod types;
pub mod validation;

pub use error::ConfigError;
pub use loader::{LoadedPolicy, load_policy, parse_policy};
pub use types::{Origin, PolicySpec};
pub use validation::{Severity, ValidationIssue, ValidationReport, validate_policy};
