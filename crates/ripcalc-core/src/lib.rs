//! Core types and helpers for ripcalc (IPv4/IPv6 subnet calculator)
//!
//! This crate provides the family-agnostic pieces shared by the IPv4 and
//! IPv6 calculators:
//! - [`Family`] - Address family and CIDR input routing
//! - [`InvalidAddress`] - The single error type for rejected input
//! - [`bits`] - Byte-wise mask arithmetic and bit-string rendering
//! - [`cidr`] - Splitting CIDR text into address and prefix
//! - [`report`] - Aligned `label: value` report layout
//!
//! ```
//! use ripcalc_core::Family;
//!
//! assert_eq!(Family::detect("2001:db8::/64"), Family::V6);
//! assert_eq!(Family::detect("10.0.0.0/8"), Family::V4);
//! ```

use serde::Serialize;
use std::fmt;
use std::net::IpAddr;
use thiserror::Error;

pub mod bits;
pub mod cidr;
pub mod report;

/// IP address family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Family {
    /// 32-bit IPv4
    #[serde(rename = "ipv4")]
    V4,
    /// 128-bit IPv6
    #[serde(rename = "ipv6")]
    V6,
}

impl Family {
    /// Address width in bits
    pub const fn bits(self) -> u8 {
        match self {
            Family::V4 => 32,
            Family::V6 => 128,
        }
    }

    /// Family of an already parsed address
    pub fn of(addr: &IpAddr) -> Self {
        match addr {
            IpAddr::V4(_) => Family::V4,
            IpAddr::V6(_) => Family::V6,
        }
    }

    /// Pick the calculator for a CIDR string.
    ///
    /// Input is routed to IPv6 when it contains a colon and parses as a
    /// CIDR; everything else goes to IPv4, whose parser then reports what
    /// is wrong with it. IPv4-mapped literals such as
    /// `::ffff:192.168.1.1/128` route to IPv6.
    pub fn detect(text: &str) -> Self {
        if text.contains(':') && cidr::split(text).is_ok() {
            Family::V6
        } else {
            Family::V4
        }
    }

    /// Check a raw prefix length against this family's width
    pub fn check_prefix(self, prefix: u32) -> Result<u8> {
        match u8::try_from(prefix) {
            Ok(len) if len <= self.bits() => Ok(len),
            _ => Err(InvalidAddress::PrefixOutOfRange {
                prefix,
                family: self,
            }),
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::V4 => f.write_str("IPv4"),
            Family::V6 => f.write_str("IPv6"),
        }
    }
}

/// Reasons an address or CIDR string was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidAddress {
    /// Text is not `<address>/<prefix>`
    #[error("invalid address: {0}")]
    Notation(String),

    /// Address belongs to the other family
    #[error("invalid address: {input} is not an {expected} address")]
    WrongFamily {
        /// Family the parser accepts
        expected: Family,
        /// Offending address text
        input: String,
    },

    /// Prefix length wider than the address
    #[error("invalid address: prefix length /{prefix} out of range for {family} (must be 0-{max})", max = .family.bits())]
    PrefixOutOfRange {
        /// Prefix as written
        prefix: u32,
        /// Family the prefix was checked against
        family: Family,
    },
}

/// Result type alias for ripcalc operations
pub type Result<T> = std::result::Result<T, InvalidAddress>;
