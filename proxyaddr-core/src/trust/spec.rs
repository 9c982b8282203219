use crate::error::ProxyAddrError;
use std::fmt;
use std::sync::Arc;

/// Caller-supplied trust decision: `(candidate, index in chain) -> trusted`.
///
/// The candidate is `None` only for an absent socket address.
pub type TrustFn = Arc<dyn Fn(Option<&str>, usize) -> bool + Send + Sync>;

/// The shapes a trust argument may take.
#[derive(Clone)]
pub enum TrustSpec {
    /// One address, range or symbolic name.
    Literal(String),
    /// Any number of tokens. An empty list trusts nothing.
    List(Vec<String>),
    /// Used as-is; never compiled.
    Predicate(TrustFn),
}

impl TrustSpec {
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(Option<&str>, usize) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(f))
    }

    /// An empty literal counts as a missing argument.
    pub(crate) fn is_absent(&self) -> bool {
        matches!(self, Self::Literal(s) if s.is_empty())
    }
}

impl fmt::Debug for TrustSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(s) => f.debug_tuple("Literal").field(s).finish(),
            Self::List(l) => f.debug_tuple("List").field(l).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl From<&str> for TrustSpec {
    fn from(s: &str) -> Self {
        Self::Literal(s.to_owned())
    }
}

impl From<String> for TrustSpec {
    fn from(s: String) -> Self {
        Self::Literal(s)
    }
}

impl From<&String> for TrustSpec {
    fn from(s: &String) -> Self {
        Self::Literal(s.clone())
    }
}

impl From<Vec<String>> for TrustSpec {
    fn from(list: Vec<String>) -> Self {
        Self::List(list)
    }
}

impl From<Vec<&str>> for TrustSpec {
    fn from(list: Vec<&str>) -> Self {
        Self::List(list.into_iter().map(str::to_owned).collect())
    }
}

impl From<&[&str]> for TrustSpec {
    fn from(list: &[&str]) -> Self {
        Self::List(list.iter().map(|s| (*s).to_owned()).collect())
    }
}

impl From<&[String]> for TrustSpec {
    fn from(list: &[String]) -> Self {
        Self::List(list.to_vec())
    }
}

impl<const N: usize> From<[&str; N]> for TrustSpec {
    fn from(list: [&str; N]) -> Self {
        Self::List(list.iter().map(|s| (*s).to_owned()).collect())
    }
}

impl From<TrustFn> for TrustSpec {
    fn from(f: TrustFn) -> Self {
        Self::Predicate(f)
    }
}

//-----------------------------------------------------------------------------
// Untyped trust values (policy files, JSON payloads)
//-----------------------------------------------------------------------------

impl TryFrom<&hcl::Value> for TrustSpec {
    type Error = ProxyAddrError;

    fn try_from(value: &hcl::Value) -> Result<Self, Self::Error> {
        match value {
            hcl::Value::Null => Err(ProxyAddrError::TrustRequired),
            hcl::Value::String(s) => Ok(Self::Literal(s.clone())),
            hcl::Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    hcl::Value::String(s) => Ok(s.clone()),
                    _ => Err(ProxyAddrError::UnsupportedTrust),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self::List),
            _ => Err(ProxyAddrError::UnsupportedTrust),
        }
    }
}

impl TryFrom<&serde_json::Value> for TrustSpec {
    type Error = ProxyAddrError;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Null => Err(ProxyAddrError::TrustRequired),
            serde_json::Value::String(s) => Ok(Self::Literal(s.clone())),
            serde_json::Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(str::to_owned)
                        .ok_or(ProxyAddrError::UnsupportedTrust)
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self::List),
            _ => Err(ProxyAddrError::UnsupportedTrust),
        }
    }
}
