//! Exact IPv6 host counts

use serde::{Serialize, Serializer};
use std::fmt;

/// 2^128 does not fit in a `u128`
const TWO_POW_128: &str = "340282366920938463463374607431768211456";

/// Number of addresses in an IPv6 block, 2^host_bits.
///
/// Stored as the exponent so the /0 case (2^128) stays exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HostCount {
    host_bits: u8,
}

impl HostCount {
    /// Count for a block of the given prefix length (clamped to 0-128)
    pub fn for_prefix(prefix_len: u8) -> Self {
        Self {
            host_bits: 128 - prefix_len.min(128),
        }
    }

    /// Exponent, 128 - prefix
    pub fn host_bits(&self) -> u8 {
        self.host_bits
    }

    /// Exact value, `None` only for the full 2^128 space
    pub fn as_u128(&self) -> Option<u128> {
        1u128.checked_shl(u32::from(self.host_bits))
    }

    /// Short form used in reports.
    ///
    /// Blocks of /120 and longer show the literal count; /64 up to /119
    /// show `2^<bits>`; anything wider adds "(astronomical)".
    pub fn abbreviated(&self) -> String {
        match self.host_bits {
            0..=8 => self.to_string(),
            9..=64 => format!("2^{}", self.host_bits),
            _ => format!("2^{} (astronomical)", self.host_bits),
        }
    }
}

impl fmt::Display for HostCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_u128() {
            Some(count) => write!(f, "{}", count),
            None => f.write_str(TWO_POW_128),
        }
    }
}

impl Serialize for HostCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_values() {
        assert_eq!(HostCount::for_prefix(128).as_u128(), Some(1));
        assert_eq!(HostCount::for_prefix(120).as_u128(), Some(256));
        assert_eq!(HostCount::for_prefix(64).as_u128(), Some(1 << 64));
        assert_eq!(HostCount::for_prefix(1).as_u128(), Some(1 << 127));
        assert_eq!(HostCount::for_prefix(0).as_u128(), None);
    }

    #[test]
    fn test_display_is_exact() {
        assert_eq!(HostCount::for_prefix(128).to_string(), "1");
        assert_eq!(
            HostCount::for_prefix(64).to_string(),
            "18446744073709551616"
        );
        assert_eq!(
            HostCount::for_prefix(1).to_string(),
            "170141183460469231731687303715884105728"
        );
        assert_eq!(HostCount::for_prefix(0).to_string(), TWO_POW_128);
    }

    #[test]
    fn test_two_pow_128_is_max_plus_one() {
        let max = u128::MAX.to_string();
        assert_eq!(max.len(), TWO_POW_128.len());
        assert_eq!(max[..38], TWO_POW_128[..38]);
        assert!(max.ends_with('5'));
        assert!(TWO_POW_128.ends_with('6'));
    }

    #[test]
    fn test_abbreviated() {
        assert_eq!(HostCount::for_prefix(128).abbreviated(), "1");
        assert_eq!(HostCount::for_prefix(120).abbreviated(), "256");
        assert_eq!(HostCount::for_prefix(119).abbreviated(), "2^9");
        assert_eq!(HostCount::for_prefix(64).abbreviated(), "2^64");
        assert_eq!(
            HostCount::for_prefix(63).abbreviated(),
            "2^65 (astronomical)"
        );
        assert_eq!(
            HostCount::for_prefix(10).abbreviated(),
            "2^118 (astronomical)"
        );
        assert_eq!(
            HostCount::for_prefix(0).abbreviated(),
            "2^128 (astronomical)"
        );
    }

    #[test]
    fn test_serializes_as_decimal_string() {
        let json = serde_json::to_string(&HostCount::for_prefix(0)).unwrap();
        assert_eq!(json, format!("\"{}\"", TWO_POW_128));
    }
}
