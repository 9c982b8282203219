//! Trust compiler: turns address, CIDR, netmask and symbolic-name tokens
//! into a predicate over candidate addresses.

mod compile;
pub mod ranges;
mod spec;
mod subnet;

pub use compile::{CompiledTrust, Trust, TrustPredicate, compile, compile_checked};
pub use spec::{TrustFn, TrustSpec};
pub use subnet::RangeSubnet;
