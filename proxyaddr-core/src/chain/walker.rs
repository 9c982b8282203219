use crate::chain::AddressChain;
use crate::trust::TrustPredicate;

/// Index of the hop the walk stops on.
///
/// Starting from the socket address, every trusted hop hands the result to
/// the next one. The first untrusted hop ends the walk; nothing past it is
/// inspected. The last hop is never inspected.
fn walk<T: TrustPredicate + ?Sized>(chain: &AddressChain<'_>, trust: &T) -> usize {
    let hops = chain.hops();
    let mut resolved = 0;

    for (index, hop) in hops.iter().enumerate().take(hops.len() - 1) {
        let trusted = trust.is_trusted(*hop, index);
        tracing::debug!(index, addr = hop.unwrap_or("-"), trusted, "inspected hop");

        if !trusted {
            break;
        }
        resolved = index + 1;
    }

    tracing::debug!(
        addr = hops[resolved].unwrap_or("-"),
        hops = resolved + 1,
        "resolved address"
    );

    resolved
}

/// The address of the first untrusted hop, or the furthest hop when every
/// hop before it is trusted.
pub fn resolve<'a, T: TrustPredicate + ?Sized>(
    chain: &AddressChain<'a>,
    trust: &T,
) -> Option<&'a str> {
    chain.hops()[walk(chain, trust)]
}

/// The hops walked, up to and including the one [`resolve`] returns.
/// Without a predicate the whole chain is returned.
pub fn enumerate<'c, 'a, T: TrustPredicate + ?Sized>(
    chain: &'c AddressChain<'a>,
    trust: Option<&T>,
) -> &'c [Option<&'a str>] {
    let hops = chain.hops();
    match trust {
        Some(trust) => &hops[..=walk(chain, trust)],
        None => hops,
    }
}
