//! Address primitives shared by the trust compiler and the matcher.
//!
//! Every parsed address is widened to a single 128-bit value before any
//! comparison. IPv4 addresses land in the IPv4-mapped block
//! (`::ffff:0:0/96`), so a native IPv4 candidate and its mapped IPv6
//! spelling compare equal without per-family special cases.

mod canonical;
mod netmask;

pub use canonical::{CanonicalAddr, Family};
pub use netmask::{netmask_prefix_len, prefix_mask};
