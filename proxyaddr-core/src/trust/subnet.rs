use crate::addr::{CanonicalAddr, Family, netmask_prefix_len, prefix_mask};
use crate::error::{ProxyAddrError, Result};
use ipnet::IpNet;
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

/// A base address plus the number of leading bits a candidate must share
/// with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeSubnet {
    base: CanonicalAddr,
    /// Prefix length in the base's literal width (32 or 128).
    prefix_len: u8,
}

impl RangeSubnet {
    /// `None` unless `0 < prefix_len <= width(base)`.
    pub fn new(base: CanonicalAddr, prefix_len: u8) -> Option<Self> {
        (prefix_len > 0 && prefix_len <= base.family().width())
            .then_some(Self { base, prefix_len })
    }

    pub fn base(&self) -> CanonicalAddr {
        self.base
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    fn canonical_prefix(&self) -> u8 {
        self.base.canonical_prefix(self.prefix_len)
    }

    /// True when `addr` shares the leading bits of this subnet once both are
    /// widened to 128 bits.
    pub fn contains(&self, addr: &CanonicalAddr) -> bool {
        let mask = prefix_mask(self.canonical_prefix());
        (addr.bits() ^ self.base.bits()) & mask == 0
    }

    /// True when every address of `other` is also in `self`.
    pub fn covers(&self, other: &RangeSubnet) -> bool {
        self.canonical_prefix() <= other.canonical_prefix() && self.contains(&other.base)
    }

    /// The network this subnet denotes, host bits cleared.
    pub fn to_net(&self) -> IpNet {
        // Construction already bounded prefix_len by the family width.
        IpNet::new(self.base.to_ip(), self.prefix_len)
            .map(|net| net.trunc())
            .unwrap_or_else(|_| IpNet::from(self.base.to_ip()))
    }
}

impl fmt::Display for RangeSubnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_net().fmt(f)
    }
}

/// Parses `address`, `address/prefix` or `address/netmask`. Symbolic names
/// are not resolved here.
impl FromStr for RangeSubnet {
    type Err = ProxyAddrError;

    fn from_str(token: &str) -> Result<Self> {
        let (addr_part, range_part) = split_token(token);

        let base =
            CanonicalAddr::parse(addr_part).ok_or_else(|| ProxyAddrError::invalid_ip(addr_part))?;
        let max = base.family().width();

        let range = match range_part {
            None => u32::from(max),
            Some(range) => effective_range(range, max),
        };

        u8::try_from(range)
            .ok()
            .and_then(|range| RangeSubnet::new(base, range))
            .ok_or_else(|| ProxyAddrError::invalid_range(token))
    }
}

/// Splits on the last `/`.
pub(crate) fn split_token(token: &str) -> (&str, Option<&str>) {
    match token.rfind('/') {
        Some(pos) => (&token[..pos], Some(&token[pos + 1..])),
        None => (token, None),
    }
}

/// Range part to prefix length; 0 for anything unusable.
///
/// A netmask is accepted in either family as long as it matches the base
/// address, so `fe80::/ffc0::` is the same range as `fe80::/10` (see the
/// IPv6 netmask decision in DESIGN.md).
fn effective_range(range: &str, max: u8) -> u32 {
    if !range.is_empty() && range.bytes().all(|b| b.is_ascii_digit()) {
        return range.parse().unwrap_or(0);
    }

    let Ok(mask) = range.parse::<IpAddr>() else {
        return 0;
    };

    let octets = match mask {
        IpAddr::V4(v4) if max == Family::V4.width() => v4.octets().to_vec(),
        IpAddr::V6(v6) if max == Family::V6.width() => v6.octets().to_vec(),
        _ => return 0,
    };

    netmask_prefix_len(&octets).map(u32::from).unwrap_or(0)
}
