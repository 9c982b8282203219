mod report;
mod validator;

pub use report::{Severity, ValidationIssue, ValidationReport};
pub use validator::validate_policy;
