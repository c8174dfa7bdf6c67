//! IPv4 classful letters and special-range classification

use ripcalc_core::bits;
use serde::{Serialize, Serializer};
use std::fmt;
use std::net::Ipv4Addr;

/// What kind of space an IPv4 address belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ipv4AddressType {
    /// Anything not covered by a special range
    Public,
    /// RFC 1918
    Private,
    /// RFC 6598 carrier-grade NAT
    SharedAddressSpace,
    /// RFC 3927
    LinkLocal,
    /// 127.0.0.0/8
    Loopback,
    /// 224.0.0.0/4
    Multicast,
}

impl Ipv4AddressType {
    /// Display label
    pub fn as_str(&self) -> &'static str {
        match self {
            Ipv4AddressType::Public => "Public Internet",
            Ipv4AddressType::Private => "Private Internet",
            Ipv4AddressType::SharedAddressSpace => "Shared Address Space",
            Ipv4AddressType::LinkLocal => "Link Local",
            Ipv4AddressType::Loopback => "Loopback",
            Ipv4AddressType::Multicast => "Multicast",
        }
    }
}

impl fmt::Display for Ipv4AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Ipv4AddressType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

struct SpecialRange {
    network: Ipv4Addr,
    prefix_len: u8,
    address_type: Ipv4AddressType,
}

const fn range(network: Ipv4Addr, prefix_len: u8, address_type: Ipv4AddressType) -> SpecialRange {
    SpecialRange {
        network,
        prefix_len,
        address_type,
    }
}

/// Checked top to bottom, first match wins.
static SPECIAL_RANGES: &[SpecialRange] = &[
    range(Ipv4Addr::new(192, 168, 0, 0), 16, Ipv4AddressType::Private),
    range(Ipv4Addr::new(172, 16, 0, 0), 12, Ipv4AddressType::Private),
    range(Ipv4Addr::new(10, 0, 0, 0), 8, Ipv4AddressType::Private),
    range(Ipv4Addr::new(100, 64, 0, 0), 10, Ipv4AddressType::SharedAddressSpace),
    range(Ipv4Addr::new(169, 254, 0, 0), 16, Ipv4AddressType::LinkLocal),
    range(Ipv4Addr::new(127, 0, 0, 0), 8, Ipv4AddressType::Loopback),
    range(Ipv4Addr::new(224, 0, 0, 0), 4, Ipv4AddressType::Multicast),
];

/// Classful letter from the first octet
pub fn class_of(addr: Ipv4Addr) -> &'static str {
    match addr.octets()[0] {
        0..=127 => "A",
        128..=191 => "B",
        192..=223 => "C",
        224..=239 => "D",
        _ => "E",
    }
}

/// Special-range type; class E space has no entry and falls back to public
pub fn classify_type(addr: Ipv4Addr) -> Ipv4AddressType {
    SPECIAL_RANGES
        .iter()
        .find(|r| bits::in_block(r.network.octets(), r.prefix_len, addr.octets()))
        .map(|r| r.address_type)
        .unwrap_or(Ipv4AddressType::Public)
}

/// Classful letter and special-range type together
pub fn classify(addr: Ipv4Addr) -> (&'static str, Ipv4AddressType) {
    (class_of(addr), classify_type(addr))
}
