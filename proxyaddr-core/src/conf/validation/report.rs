use crate::conf::types::Origin;
use crate::error::ProxyAddrError;
use ipnet::IpNet;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub message: String,
    pub origin: Origin,
    pub help: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Default, Clone)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

#[derive(Serialize)]
struct ValidationReportJson<'a> {
    errors: &'a [ValidationIssue],
    warnings: &'a [ValidationIssue],
}

impl ValidationReport {
    pub fn has_violations(&self) -> bool {
        !self.errors.is_empty() || !self.warnings.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn error(&mut self, message: String, origin: &Origin, help: Option<String>) {
        self.errors.push(ValidationIssue {
            severity: Severity::Error,
            message,
            origin: origin.clone(),
            help,
        });
    }

    fn warning(&mut self, message: String, origin: &Origin, help: Option<String>) {
        self.warnings.push(ValidationIssue {
            severity: Severity::Warning,
            message,
            origin: origin.clone(),
            help,
        });
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&ValidationReportJson {
            errors: &self.errors,
            warnings: &self.warnings,
        })
    }

    pub fn render_plain(&self) {
        for issue in self.errors.iter().chain(self.warnings.iter()) {
            let severity = match issue.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };

            println!("{}: {}: {}", issue.origin, severity, issue.message);

            if let Some(help) = &issue.help {
                println!("  help: {}", help);
            }
        }
    }

    pub fn render_pretty(&self) {
        let errors = self.errors.len();
        let warnings = self.warnings.len();

        if errors > 0 || warnings > 0 {
            println!(
                "policy validation found {} errors, {} warnings\n",
                errors, warnings
            );
        }

        let mut by_file = BTreeMap::new();
        for issue in self.errors.iter().chain(self.warnings.iter()) {
            by_file
                .entry(issue.origin.file())
                .or_insert_with(Vec::new)
                .push(issue);
        }

        for (file, issues) in by_file {
            println!("{}", file.display());

            for issue in issues {
                let at = issue
                    .origin
                    .index
                    .map(|i| format!("[{i}] "))
                    .unwrap_or_default();

                match issue.severity {
                    Severity::Error => {
                        println!("  {}: {}{}", "error".red().bold(), at, issue.message);
                    }
                    Severity::Warning => {
                        println!("  {}: {}{}", "warning".yellow().bold(), at, issue.message);
                    }
                }

                if let Some(help) = &issue.help {
                    println!("    {}: {}", "help".cyan(), help);
                }

                println!();
            }
        }
    }
}

/// Trust token validation
impl ValidationReport {
    pub fn invalid_trust_token(&mut self, err: &ProxyAddrError, origin: &Origin) {
        let help = match err {
            ProxyAddrError::InvalidIpAddress { .. } => Some(
                "Use an IP literal, address/prefix, address/netmask, or one of: \
                 loopback, linklocal, uniquelocal."
                    .to_string(),
            ),
            ProxyAddrError::InvalidRange { .. } => Some(
                "Prefix lengths must be 1-32 for IPv4 and 1-128 for IPv6; \
                 netmasks must be contiguous and of the same family as the address."
                    .to_string(),
            ),
            _ => None,
        };
        self.error(err.to_string(), origin, help);
    }

    pub fn public_trusted_range(&mut self, network: IpNet, origin: &Origin) {
        self.warning(
            format!("trusted range covers public address space: {network}"),
            origin,
            Some(
                "Public ranges should only be trusted if they belong to known \
                 infrastructure (e.g. a CDN or load balancer)."
                    .to_string(),
            ),
        );
    }

    pub fn duplicate_trust_token(&mut self, token: &str, origin: &Origin) {
        self.warning(format!("duplicate trust entry: {token}"), origin, None);
    }
}
