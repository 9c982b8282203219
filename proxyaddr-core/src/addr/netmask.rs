/// Mask with the `len` most significant bits of a 128-bit value set.
pub fn prefix_mask(len: u8) -> u128 {
    match len {
        0 => 0,
        len if len >= 128 => u128::MAX,
        len => u128::MAX << (128 - u32::from(len)),
    }
}

/// Prefix length of a contiguous netmask given as big-endian octets.
///
/// Counts leading one bits from the most significant end. Returns `None`
/// when a one bit follows a zero bit (`255.0.255.0`).
pub fn netmask_prefix_len(octets: &[u8]) -> Option<u8> {
    let mut len: u32 = 0;
    let mut seen_zero = false;

    for &octet in octets {
        if seen_zero {
            if octet != 0 {
                return None;
            }
            continue;
        }

        let ones = octet.leading_ones();
        len += ones;

        if ones < 8 {
            seen_zero = true;
            // Bits below the first zero must all be zero too.
            if octet.checked_shl(ones).unwrap_or(0) != 0 {
                return None;
            }
        }
    }

    u8::try_from(len).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    fn v4(s: &str) -> [u8; 4] {
        s.parse::<Ipv4Addr>().unwrap().octets()
    }

    fn v6(s: &str) -> [u8; 16] {
        s.parse::<Ipv6Addr>().unwrap().octets()
    }

    #[test]
    fn contiguous_ipv4_masks() {
        assert_eq!(netmask_prefix_len(&v4("255.255.255.255")), Some(32));
        assert_eq!(netmask_prefix_len(&v4("255.255.255.0")), Some(24));
        assert_eq!(netmask_prefix_len(&v4("255.255.0.0")), Some(16));
        assert_eq!(netmask_prefix_len(&v4("255.240.0.0")), Some(12));
        assert_eq!(netmask_prefix_len(&v4("128.0.0.0")), Some(1));
        assert_eq!(netmask_prefix_len(&v4("0.0.0.0")), Some(0));
    }

    #[test]
    fn holey_ipv4_masks() {
        assert_eq!(netmask_prefix_len(&v4("255.0.255.0")), None);
        assert_eq!(netmask_prefix_len(&v4("255.255.255.1")), None);
        assert_eq!(netmask_prefix_len(&v4("254.255.0.0")), None);
        assert_eq!(netmask_prefix_len(&v4("255.160.0.0")), None);
    }

    #[test]
    fn ipv6_masks() {
        assert_eq!(netmask_prefix_len(&v6("ffc0::")), Some(10));
        assert_eq!(netmask_prefix_len(&v6("ffff:ffff:ffff:ffff::")), Some(64));
        assert_eq!(
            netmask_prefix_len(&v6("ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff")),
            Some(128)
        );
        assert_eq!(netmask_prefix_len(&v6("ffff::1")), None);
    }

    #[test]
    fn every_contiguous_mask_matches_its_prefix() {
        for len in 0..=32u32 {
            let mask = if len == 0 { 0 } else { u32::MAX << (32 - len) };
            assert_eq!(
                netmask_prefix_len(&mask.to_be_bytes()),
                Some(len as u8),
                "/{len}"
            );
        }
        for len in 0..=128u8 {
            assert_eq!(netmask_prefix_len(&prefix_mask(len).to_be_bytes()), Some(len));
        }
    }

    #[test]
    fn prefix_mask_edges() {
        assert_eq!(prefix_mask(0), 0);
        assert_eq!(prefix_mask(128), u128::MAX);
        assert_eq!(prefix_mask(1), 1u128 << 127);
        assert_eq!(prefix_mask(96), !0u128 << 32);
    }
}
