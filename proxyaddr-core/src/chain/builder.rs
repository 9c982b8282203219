/// Socket address followed by the claimed forwarding hops, closest to the
/// server first.
///
/// Index 0 is always the socket address, even when it is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressChain<'a> {
    hops: Vec<Option<&'a str>>,
}

impl<'a> AddressChain<'a> {
    pub fn hops(&self) -> &[Option<&'a str>] {
        &self.hops
    }

    pub fn socket_addr(&self) -> Option<&'a str> {
        self.hops[0]
    }
}

/// Builds the chain from the socket address and a raw `X-Forwarded-For`
/// value.
///
/// The header is append-ordered (each proxy adds to the right), so its
/// segments are reversed. Empty segments are dropped; anything else is kept
/// verbatim, hostnames and garbage included.
pub fn build_chain<'a>(
    socket_addr: Option<&'a str>,
    forwarded_for: Option<&'a str>,
) -> AddressChain<'a> {
    let claims = forwarded_for.unwrap_or_default();

    let mut hops = Vec::with_capacity(claims.matches(',').count() + 2);
    hops.push(socket_addr);
    hops.extend(
        claims
            .rsplit(',')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(Some),
    );

    AddressChain { hops }
}
