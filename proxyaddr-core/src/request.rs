//! Top-level entry points over anything that exposes a socket address and
//! an `X-Forwarded-For` value.

use crate::chain::{build_chain, enumerate, resolve};
use crate::error::{ProxyAddrError, Result};
use crate::trust::{Trust, TrustPredicate, TrustSpec, compile};
use std::borrow::Cow;
use std::net::{IpAddr, SocketAddr};

pub const X_FORWARDED_FOR: &str = "x-forwarded-for";

pub trait ClientRequest {
    /// Address of the directly connected peer, if known.
    fn socket_addr(&self) -> Option<Cow<'_, str>>;

    /// Raw forwarding header value, comma separated.
    fn forwarded_for(&self) -> Option<Cow<'_, str>>;
}

/// Plain request data, for callers without an `http::Request` at hand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParts {
    pub socket_addr: Option<String>,
    pub forwarded_for: Option<String>,
}

impl RequestParts {
    pub fn new(socket_addr: Option<&str>, forwarded_for: Option<&str>) -> Self {
        Self {
            socket_addr: socket_addr.map(str::to_owned),
            forwarded_for: forwarded_for.map(str::to_owned),
        }
    }
}

impl ClientRequest for RequestParts {
    fn socket_addr(&self) -> Option<Cow<'_, str>> {
        self.socket_addr.as_deref().map(Cow::Borrowed)
    }

    fn forwarded_for(&self) -> Option<Cow<'_, str>> {
        self.forwarded_for.as_deref().map(Cow::Borrowed)
    }
}

/// The peer address is read from a `SocketAddr` (or bare `IpAddr`) stored
/// in the request extensions by the server. Repeated `X-Forwarded-For`
/// lines are joined in arrival order. Bytes that are not valid UTF-8 are
/// replaced rather than dropped, so such a segment stays in the chain as a
/// hop that never parses as an address.
impl<B> ClientRequest for http::Request<B> {
    fn socket_addr(&self) -> Option<Cow<'_, str>> {
        let extensions = self.extensions();
        extensions
            .get::<SocketAddr>()
            .map(|addr| addr.ip())
            .or_else(|| extensions.get::<IpAddr>().copied())
            .map(|ip| Cow::Owned(ip.to_string()))
    }

    fn forwarded_for(&self) -> Option<Cow<'_, str>> {
        let mut values = self
            .headers()
            .get_all(X_FORWARDED_FOR)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()));

        let first = values.next()?;
        let rest: Vec<Cow<'_, str>> = values.collect();
        if rest.is_empty() {
            return Some(first);
        }

        let mut joined = first.into_owned();
        for value in rest {
            joined.push(',');
            joined.push_str(&value);
        }
        Some(Cow::Owned(joined))
    }
}

/// Resolves with an already compiled predicate. This is the fast path for
/// serving many requests with one policy.
pub fn resolve_with<R, T>(req: &R, trust: &T) -> Option<String>
where
    R: ClientRequest + ?Sized,
    T: TrustPredicate + ?Sized,
{
    let socket_addr = req.socket_addr();
    let forwarded_for = req.forwarded_for();
    let chain = build_chain(socket_addr.as_deref(), forwarded_for.as_deref());

    resolve(&chain, trust).map(str::to_owned)
}

/// Determines the originating address of a proxied request.
///
/// `Ok(None)` means the socket address is unknown and no forwarded hop
/// could be reached through trusted hops.
pub fn proxy_addr<R>(req: &R, trust: impl Into<TrustSpec>) -> Result<Option<String>>
where
    R: ClientRequest + ?Sized,
{
    let trust = trust.into();
    if trust.is_absent() {
        return Err(ProxyAddrError::TrustRequired);
    }

    let trust = compile(trust)?;
    Ok(resolve_with(req, &trust))
}

/// Every address in the request, socket address first, cut off after the
/// first untrusted hop when `trust` is given.
pub fn all_addrs<R>(req: &R, trust: Option<TrustSpec>) -> Result<Vec<Option<String>>>
where
    R: ClientRequest + ?Sized,
{
    let trust = match trust {
        Some(spec) if !spec.is_absent() => Some(compile(spec)?),
        _ => None,
    };

    let socket_addr = req.socket_addr();
    let forwarded_for = req.forwarded_for();
    let chain = build_chain(socket_addr.as_deref(), forwarded_for.as_deref());

    Ok(enumerate::<Trust>(&chain, trust.as_ref())
        .iter()
        .map(|hop| hop.map(str::to_owned))
        .collect())
}

/// [`proxy_addr`] for arguments that may be missing.
pub fn proxy_addr_checked<R>(req: Option<&R>, trust: Option<TrustSpec>) -> Result<Option<String>>
where
    R: ClientRequest + ?Sized,
{
    let req = req.ok_or(ProxyAddrError::RequestRequired)?;
    let trust = trust.ok_or(ProxyAddrError::TrustRequired)?;
    proxy_addr(req, trust)
}

/// [`all_addrs`] for a request that may be missing.
pub fn all_addrs_checked<R>(
    req: Option<&R>,
    trust: Option<TrustSpec>,
) -> Result<Vec<Option<String>>>
where
    R: ClientRequest + ?Sized,
{
    let req = req.ok_or(ProxyAddrError::RequestRequired)?;
    all_addrs(req, trust)
}
