use crate::addr::CanonicalAddr;
use crate::error::{ProxyAddrError, Result};
use crate::trust::ranges;
use crate::trust::spec::{TrustFn, TrustSpec};
use crate::trust::subnet::{RangeSubnet, split_token};
use std::fmt;
use std::sync::Arc;

/// Anything the chain walker can ask "is this hop trusted?".
pub trait TrustPredicate {
    fn is_trusted(&self, addr: Option<&str>, index: usize) -> bool;
}

impl<F> TrustPredicate for F
where
    F: Fn(Option<&str>, usize) -> bool,
{
    fn is_trusted(&self, addr: Option<&str>, index: usize) -> bool {
        self(addr, index)
    }
}

/// Ranges compiled from trust tokens. Cheap to clone and safe to share
/// between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledTrust {
    subnets: Arc<[RangeSubnet]>,
}

impl Default for CompiledTrust {
    fn default() -> Self {
        Self {
            subnets: Arc::from(Vec::new()),
        }
    }
}

impl CompiledTrust {
    /// Compiles tokens in order. The input is only borrowed.
    pub fn compile<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        let mut subnets = Vec::with_capacity(tokens.len());
        for token in tokens {
            compile_token(token.as_ref(), &mut subnets)?;
        }

        tracing::debug!(
            tokens = tokens.len(),
            subnets = subnets.len(),
            "compiled trust policy"
        );

        Ok(Self {
            subnets: subnets.into(),
        })
    }

    pub fn subnets(&self) -> &[RangeSubnet] {
        &self.subnets
    }

    pub fn is_empty(&self) -> bool {
        self.subnets.is_empty()
    }

    /// Fails closed: anything that is not an IP literal is untrusted.
    pub fn trusts(&self, addr: &str) -> bool {
        match CanonicalAddr::parse(addr) {
            Some(addr) => self.trusts_addr(&addr),
            None => false,
        }
    }

    pub fn trusts_addr(&self, addr: &CanonicalAddr) -> bool {
        self.subnets.iter().any(|subnet| subnet.contains(addr))
    }
}

impl TrustPredicate for CompiledTrust {
    fn is_trusted(&self, addr: Option<&str>, _index: usize) -> bool {
        addr.is_some_and(|addr| self.trusts(addr))
    }
}

fn compile_token(token: &str, out: &mut Vec<RangeSubnet>) -> Result<()> {
    let (addr_part, range_part) = split_token(token);

    if let Some(expansion) = ranges::lookup(addr_part) {
        // Narrowing a named set with a suffix has no meaning.
        if range_part.is_some() {
            return Err(ProxyAddrError::invalid_range(token));
        }

        tracing::trace!(name = addr_part, ?expansion, "expanding symbolic range");
        for token in expansion {
            compile_token(token, out)?;
        }
        return Ok(());
    }

    out.push(token.parse()?);
    Ok(())
}

/// A compiled trust decision, whatever shape it was given in.
#[derive(Clone)]
pub enum Trust {
    Ranges(CompiledTrust),
    Predicate(TrustFn),
}

impl Trust {
    /// Trusts every hop, absent socket address included.
    pub fn all() -> Self {
        Self::Predicate(Arc::new(|_: Option<&str>, _: usize| true))
    }

    pub fn none() -> Self {
        Self::Ranges(CompiledTrust::default())
    }
}

impl TrustPredicate for Trust {
    fn is_trusted(&self, addr: Option<&str>, index: usize) -> bool {
        match self {
            Self::Ranges(compiled) => compiled.is_trusted(addr, index),
            Self::Predicate(f) => f(addr, index),
        }
    }
}

impl fmt::Debug for Trust {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ranges(compiled) => f.debug_tuple("Ranges").field(compiled).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl From<CompiledTrust> for Trust {
    fn from(compiled: CompiledTrust) -> Self {
        Self::Ranges(compiled)
    }
}

/// A compiled `Trust` can be passed anywhere a spec is accepted; it goes
/// through as a predicate and is not re-parsed.
impl From<Trust> for TrustSpec {
    fn from(trust: Trust) -> Self {
        match trust {
            Trust::Predicate(f) => TrustSpec::Predicate(f),
            Trust::Ranges(compiled) => {
                TrustSpec::Predicate(Arc::new(move |addr: Option<&str>, index: usize| {
                    compiled.is_trusted(addr, index)
                }))
            }
        }
    }
}

impl From<&Trust> for TrustSpec {
    fn from(trust: &Trust) -> Self {
        trust.clone().into()
    }
}

impl From<CompiledTrust> for TrustSpec {
    fn from(compiled: CompiledTrust) -> Self {
        Trust::Ranges(compiled).into()
    }
}

/// Turns a trust specification into a reusable predicate.
///
/// Compile once and keep the result when serving many requests; passing a
/// token list per call re-parses it every time.
pub fn compile(spec: impl Into<TrustSpec>) -> Result<Trust> {
    match spec.into() {
        TrustSpec::Predicate(f) => Ok(Trust::Predicate(f)),
        TrustSpec::Literal(token) => CompiledTrust::compile(&[token]).map(Trust::Ranges),
        TrustSpec::List(tokens) => CompiledTrust::compile(&tokens).map(Trust::Ranges),
    }
}

/// [`compile`] for a possibly missing argument.
pub fn compile_checked(spec: Option<TrustSpec>) -> Result<Trust> {
    match spec {
        Some(spec) if !spec.is_absent() => compile(spec),
        _ => Err(ProxyAddrError::ArgumentRequired),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn trusts(spec: impl Into<TrustSpec>, addr: &str) -> bool {
        compile(spec).unwrap().is_trusted(Some(addr), 0)
    }

    #[test]
    fn accepts_every_token_shape() {
        for spec in [
            "127.0.0.1",
            "::1",
            "::ffff:127.0.0.1",
            "loopback",
            "10.0.0.1/8",
            "10.0.0.1/255.0.0.0",
            "fe80::/10",
        ] {
            assert!(compile(spec).is_ok(), "{spec}");
        }
        assert!(compile(["loopback", "10.0.0.1"]).is_ok());
        assert!(compile(Vec::<String>::new()).is_ok());
    }

    #[test]
    fn rejects_non_ip() {
        assert_eq!(
            compile("blargh").unwrap_err(),
            ProxyAddrError::invalid_ip("blargh")
        );
        assert_eq!(compile("-1").unwrap_err(), ProxyAddrError::invalid_ip("-1"));
        assert_eq!(
            compile(["loopback", "10.0.300.1"]).unwrap_err(),
            ProxyAddrError::invalid_ip("10.0.300.1")
        );
    }

    #[test]
    fn rejects_bad_range() {
        for token in ["10.0.0.1/6000", "::1/6000", "::ffff:a00:2/136", "::ffff:a00:2/-46"] {
            assert_eq!(
                compile(token).unwrap_err(),
                ProxyAddrError::invalid_range(token)
            );
        }
    }

    #[test]
    fn rejects_holey_netmask() {
        assert_eq!(
            compile("10.0.0.1/255.0.255.0").unwrap_err(),
            ProxyAddrError::invalid_range("10.0.0.1/255.0.255.0")
        );
    }

    /// The name is looked up on the address part, so the suffix is what is
    /// rejected. Looking the name up on the whole token would instead report
    /// `invalid IP address: loopback`.
    #[test]
    fn symbolic_name_with_suffix_is_invalid_range() {
        assert_eq!(
            compile("loopback/8").unwrap_err(),
            ProxyAddrError::invalid_range("loopback/8")
        );
    }

    #[test]
    fn does_not_alter_input() {
        let tokens = vec!["loopback".to_string(), "10.0.0.1".to_string()];
        let compiled = CompiledTrust::compile(&tokens).unwrap();

        assert_eq!(tokens, vec!["loopback", "10.0.0.1"]);
        assert_eq!(compiled.subnets().len(), 3);
    }

    #[test]
    fn symbolic_names_expand_in_order() {
        let compiled = CompiledTrust::compile(&["uniquelocal"]).unwrap();
        let nets: Vec<String> = compiled.subnets().iter().map(|s| s.to_string()).collect();

        assert_eq!(
            nets,
            vec!["10.0.0.0/8", "172.16.0.0/12", "192.168.0.0/16", "fc00::/7"]
        );
    }

    #[test]
    fn symbolic_names_match_both_families() {
        assert!(trusts("loopback", "127.0.0.1"));
        assert!(trusts("loopback", "127.255.0.1"));
        assert!(trusts("loopback", "::1"));
        assert!(trusts("loopback", "::ffff:127.0.0.1"));
        assert!(trusts("linklocal", "169.254.10.1"));
        assert!(trusts("linklocal", "fe80::2"));
        assert!(trusts("uniquelocal", "172.31.255.255"));
        assert!(trusts("uniquelocal", "fd00::1"));
        assert!(!trusts("uniquelocal", "172.32.0.0"));
        assert!(!trusts("loopback", "2002:c000:203::1"));
    }

    #[test]
    fn fails_closed_on_garbage() {
        let trust = compile("loopback").unwrap();
        assert!(!trust.is_trusted(Some("myrouter"), 0));
        assert!(!trust.is_trusted(Some(""), 0));
        assert!(!trust.is_trusted(None, 0));
    }

    #[test]
    fn empty_list_trusts_nothing() {
        let trust = compile(Vec::<String>::new()).unwrap();
        assert!(!trust.is_trusted(Some("127.0.0.1"), 0));
    }

    #[test]
    fn mixed_families_match_respectively() {
        let trust = compile(["127.0.0.1", "::1"]).unwrap();
        assert!(trust.is_trusted(Some("::1"), 0));
        assert!(trust.is_trusted(Some("127.0.0.1"), 0));
        assert!(!trust.is_trusted(Some("2002:c000:203::1"), 0));

        assert!(!trusts("127.0.0.1", "::1"));
    }

    #[test]
    fn mapped_equivalence() {
        assert!(trusts(["10.0.0.1", "10.0.0.2"], "::ffff:a00:1"));
        assert!(trusts(["::ffff:a00:1", "::ffff:a00:2"], "10.0.0.1"));
        assert!(trusts(["::ffff:a00:2/122", "fe80::/125"], "10.0.0.1"));
        assert!(!trusts(["::ffff:a00:2/122", "127.0.0.1"], "10.0.0.200"));
    }

    #[test]
    fn predicate_passes_through() {
        let trust = compile(TrustSpec::predicate(|addr, i| addr == Some("x") && i == 3)).unwrap();
        assert!(matches!(trust, Trust::Predicate(_)));
        assert!(trust.is_trusted(Some("x"), 3));
        assert!(!trust.is_trusted(Some("x"), 2));
    }

    #[test]
    fn compiled_trust_reused_as_spec() {
        let trust = compile("10.0.0.0/8").unwrap();
        let again = compile(&trust).unwrap();
        assert!(again.is_trusted(Some("10.1.2.3"), 0));
        assert!(!again.is_trusted(Some("11.1.2.3"), 0));
    }

    #[test]
    fn checked_requires_argument() {
        assert_eq!(
            compile_checked(None).unwrap_err(),
            ProxyAddrError::ArgumentRequired
        );
        assert_eq!(
            compile_checked(Some("".into())).unwrap_err(),
            ProxyAddrError::ArgumentRequired
        );
        assert!(compile_checked(Some("loopback".into())).is_ok());
    }

    #[test]
    fn compiled_trust_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CompiledTrust>();
        assert_send_sync::<Trust>();
    }
}
