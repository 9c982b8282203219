use crate::cli::{RequestArgs, TrustArgs};
use crate::error::ProxyAddrError;
use crate::request::{all_addrs, resolve_with};
use crate::trust::TrustSpec;
use std::io::Write;

/// Printed in place of an unknown socket address.
pub const ABSENT_ADDR: &str = "-";

pub fn run_resolve(
    request: &RequestArgs,
    trust: TrustArgs,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let trust = trust.into_trust()?.ok_or(ProxyAddrError::TrustRequired)?;

    let addr = resolve_with(&request.to_request(), &trust);
    writeln!(out, "{}", addr.as_deref().unwrap_or(ABSENT_ADDR))?;
    Ok(())
}

pub fn run_all(request: &RequestArgs, trust: TrustArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let trust = trust.into_trust()?.map(TrustSpec::from);

    for addr in all_addrs(&request.to_request(), trust)? {
        writeln!(out, "{}", addr.as_deref().unwrap_or(ABSENT_ADDR))?;
    }
    Ok(())
}
