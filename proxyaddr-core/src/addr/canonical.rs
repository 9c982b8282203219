use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Offset of an IPv4 address inside the IPv4-mapped IPv6 block.
const V4_MAPPED_PREFIX: u128 = 0xffff_0000_0000;

/// Number of leading bits an IPv4 prefix is shifted by once widened.
const V4_MAPPED_OFFSET: u8 = 96;

/// The literal family an address was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    V4,
    V6,
    /// IPv6 literal carrying an IPv4 address (`::ffff:a.b.c.d`).
    Mapped,
}

impl Family {
    /// Bit width of the literal representation.
    pub fn width(self) -> u8 {
        match self {
            Family::V4 => 32,
            Family::V6 | Family::Mapped => 128,
        }
    }
}

/// A parsed address normalized to 128 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanonicalAddr {
    bits: u128,
    family: Family,
}

impl CanonicalAddr {
    /// Parses a textual address. `None` for anything that is not a plain
    /// IPv4 or IPv6 literal.
    pub fn parse(s: &str) -> Option<Self> {
        s.parse::<IpAddr>().ok().map(Self::from)
    }

    pub fn bits(&self) -> u128 {
        self.bits
    }

    pub fn family(&self) -> Family {
        self.family
    }

    /// Converts a prefix length expressed in this address's literal width
    /// into a prefix length over the 128-bit canonical form.
    pub fn canonical_prefix(&self, prefix_len: u8) -> u8 {
        match self.family {
            Family::V4 => V4_MAPPED_OFFSET + prefix_len,
            Family::V6 | Family::Mapped => prefix_len,
        }
    }

    /// Back to the standard library form, in the family it was written in.
    pub fn to_ip(&self) -> IpAddr {
        match self.family {
            Family::V4 => IpAddr::V4(Ipv4Addr::from((self.bits & u32::MAX as u128) as u32)),
            Family::V6 | Family::Mapped => IpAddr::V6(Ipv6Addr::from(self.bits)),
        }
    }
}

impl From<IpAddr> for CanonicalAddr {
    fn from(ip: IpAddr) -> Self {
        match ip {
            IpAddr::V4(v4) => Self {
                bits: V4_MAPPED_PREFIX | u128::from(u32::from(v4)),
                family: Family::V4,
            },
            IpAddr::V6(v6) => Self {
                bits: u128::from(v6),
                family: if v6.to_ipv4_mapped().is_some() {
                    Family::Mapped
                } else {
                    Family::V6
                },
            },
        }
    }
}

impl fmt::Display for CanonicalAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_ip().fmt(f)
    }
}
