use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// Symbolic names accepted in place of an address in a trust token.
pub static SYMBOLIC_RANGES: Lazy<BTreeMap<&'static str, &'static [&'static str]>> =
    Lazy::new(|| {
        BTreeMap::from([
            ("linklocal", &["169.254.0.0/16", "fe80::/10"][..]),
            ("loopback", &["127.0.0.1/8", "::1/128"][..]),
            (
                "uniquelocal",
                &["10.0.0.0/8", "172.16.0.0/12", "192.168.0.0/16", "fc00::/7"][..],
            ),
        ])
    });

/// Concrete tokens a symbolic name expands to.
pub fn lookup(name: &str) -> Option<&'static [&'static str]> {
    SYMBOLIC_RANGES.get(name).copied()
}

pub fn names() -> impl Iterator<Item = &'static str> {
    SYMBOLIC_RANGES.keys().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names() {
        assert_eq!(
            names().collect::<Vec<_>>(),
            vec!["linklocal", "loopback", "uniquelocal"]
        );
    }

    #[test]
    fn names_are_case_sensitive() {
        assert!(lookup("loopback").is_some());
        assert!(lookup("Loopback").is_none());
        assert!(lookup("private").is_none());
    }

    #[test]
    fn every_name_covers_both_families() {
        for name in names() {
            let tokens = lookup(name).unwrap();
            assert!(tokens.iter().any(|t| !t.contains(':')), "{name} lacks IPv4");
            assert!(tokens.iter().any(|t| t.contains(':')), "{name} lacks IPv6");
        }
    }
}
