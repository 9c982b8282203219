use crate::conf::types::Origin;
use crate::conf::validation::ValidationReport;
use crate::trust::{CompiledTrust, RangeSubnet, ranges};
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Loopback, link-local and private/unique-local space, both families.
static NON_PUBLIC: Lazy<Vec<RangeSubnet>> = Lazy::new(|| {
    ranges::names()
        .filter_map(ranges::lookup)
        .flatten()
        .filter_map(|token| token.parse().ok())
        .collect()
});

/// Validates every token on its own so that all bad entries are reported
/// at once instead of stopping at the first one.
pub fn validate_policy<S: AsRef<str>>(
    tokens: &[S],
    origin: &Origin,
    report: &mut ValidationReport,
) {
    let mut seen = HashSet::new();

    for (i, token) in tokens.iter().enumerate() {
        let token = token.as_ref();
        let origin = origin.with_index(i);

        if !seen.insert(token) {
            report.duplicate_trust_token(token, &origin);
            continue;
        }

        match CompiledTrust::compile(&[token]) {
            Ok(compiled) => validate_ranges(&compiled, &origin, report),
            Err(err) => report.invalid_trust_token(&err, &origin),
        }
    }
}

fn validate_ranges(compiled: &CompiledTrust, origin: &Origin, report: &mut ValidationReport) {
    for subnet in compiled.subnets() {
        if !is_non_public(subnet) {
            report.public_trusted_range(subnet.to_net(), origin);
        }
    }
}

fn is_non_public(subnet: &RangeSubnet) -> bool {
    NON_PUBLIC.iter().any(|range| range.covers(subnet))
}
