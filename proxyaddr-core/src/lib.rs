//! Determine the originating address of a request that passed through
//! forwarding proxies.
//!
//! The socket address and the `X-Forwarded-For` hops form a chain, closest
//! hop first. A trust policy, compiled from address, CIDR, netmask and
//! symbolic-name tokens, is walked along that chain; the first hop that is
//! not trusted is the answer.
//!
//! ```
//! use proxyaddr_core::{RequestParts, compile, proxy_addr, resolve_with};
//!
//! let req = RequestParts::new(Some("10.0.0.1"), Some("192.168.0.1, 10.0.0.2"));
//! assert_eq!(proxy_addr(&req, "10.0.0.1/8").unwrap().as_deref(), Some("192.168.0.1"));
//!
//! // Compile once, reuse for every request.
//! let trust = compile(["loopback", "uniquelocal"]).unwrap();
//! assert_eq!(resolve_with(&req, &trust).as_deref(), Some("192.168.0.1"));
//! ```

pub mod addr;
pub mod chain;
pub mod cli;
pub mod conf;
pub mod error;
pub mod logging;
pub mod request;
pub mod trust;

pub use error::{ProxyAddrError, Result};
pub use request::{
    ClientRequest, RequestParts, all_addrs, all_addrs_checked, proxy_addr, proxy_addr_checked,
    resolve_with,
};
pub use trust::{
    CompiledTrust, Trust, TrustFn, TrustPredicate, TrustSpec, compile, compile_checked,
};
