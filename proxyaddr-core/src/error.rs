use thiserror::Error;

pub type Result<T, E = ProxyAddrError> = std::result::Result<T, E>;

/// Failures surfaced by the trust compiler and the top-level entry points.
///
/// Nothing here is raised while matching: an unparseable candidate address
/// is simply not trusted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProxyAddrError {
    //-------------------------------------------------------------------------
    // Arguments
    //-------------------------------------------------------------------------
    #[error("req argument is required")]
    RequestRequired,

    #[error("trust argument is required")]
    TrustRequired,

    #[error("argument is required")]
    ArgumentRequired,

    #[error("unsupported trust argument")]
    UnsupportedTrust,

    //-------------------------------------------------------------------------
    // Trust tokens
    //-------------------------------------------------------------------------
    #[error("invalid IP address: {value}")]
    InvalidIpAddress { value: String },

    #[error("invalid range on address: {token}")]
    InvalidRange { token: String },
}

impl ProxyAddrError {
    pub fn invalid_ip(value: impl Into<String>) -> Self {
        Self::InvalidIpAddress {
            value: value.into(),
        }
    }

    pub fn invalid_range(token: impl Into<String>) -> Self {
        Self::InvalidRange {
            token: token.into(),
        }
    }
}
