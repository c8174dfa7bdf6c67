//! IPv6 special-range classification and multicast scopes

use ripcalc_core::bits;
use serde::{Serialize, Serializer};
use std::fmt;
use std::net::Ipv6Addr;

/// What kind of space an IPv6 address belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ipv6AddressType {
    /// 2000::/3
    GlobalUnicast,
    /// fe80::/10
    LinkLocal,
    /// fc00::/7
    UniqueLocal,
    /// ff00::/8
    Multicast,
    /// ::1/128
    Loopback,
    /// ::/128
    Unspecified,
    /// 2001:db8::/32
    Documentation,
    /// 2002::/16
    SixToFour,
    /// 2001::/32
    Teredo,
    /// ::ffff:0:0/96
    Ipv4Mapped,
    /// Anything not covered by a special range
    Reserved,
}

impl Ipv6AddressType {
    /// Display label
    pub fn as_str(&self) -> &'static str {
        match self {
            Ipv6AddressType::GlobalUnicast => "Internet Routable",
            Ipv6AddressType::LinkLocal => "Auto-configured",
            Ipv6AddressType::UniqueLocal => "Private",
            Ipv6AddressType::Multicast => "Group Communication",
            Ipv6AddressType::Loopback => "Host-only",
            Ipv6AddressType::Unspecified => "Default/Undefined",
            Ipv6AddressType::Documentation => "RFC Example",
            Ipv6AddressType::SixToFour => "IPv4 Transition (Deprecated)",
            Ipv6AddressType::Teredo => "NAT Traversal",
            Ipv6AddressType::Ipv4Mapped => "Embedded IPv4",
            Ipv6AddressType::Reserved => "Reserved",
        }
    }
}

impl fmt::Display for Ipv6AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Ipv6AddressType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Propagation boundary of a multicast group, the low nibble of byte 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MulticastScope {
    InterfaceLocal,
    LinkLocal,
    AdminLocal,
    SiteLocal,
    OrganizationLocal,
    Global,
    /// Unassigned or reserved scope value
    Other(u8),
}

impl MulticastScope {
    /// Decode the scope of a multicast address
    pub fn of(addr: Ipv6Addr) -> Self {
        Self::from_nibble(addr.octets()[1] & 0x0f)
    }

    /// Decode a raw 4-bit scope value
    pub fn from_nibble(value: u8) -> Self {
        match value & 0x0f {
            0x1 => MulticastScope::InterfaceLocal,
            0x2 => MulticastScope::LinkLocal,
            0x4 => MulticastScope::AdminLocal,
            0x5 => MulticastScope::SiteLocal,
            0x8 => MulticastScope::OrganizationLocal,
            0xe => MulticastScope::Global,
            other => MulticastScope::Other(other),
        }
    }
}

impl fmt::Display for MulticastScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MulticastScope::InterfaceLocal => f.write_str("Interface-Local"),
            MulticastScope::LinkLocal => f.write_str("Link-Local"),
            MulticastScope::AdminLocal => f.write_str("Admin-Local"),
            MulticastScope::SiteLocal => f.write_str("Site-Local"),
            MulticastScope::OrganizationLocal => f.write_str("Organization-Local"),
            MulticastScope::Global => f.write_str("Global"),
            MulticastScope::Other(value) => write!(f, "Scope-{:X}", value),
        }
    }
}

struct SpecialRange {
    network: Ipv6Addr,
    prefix_len: u8,
    address_type: Ipv6AddressType,
    class: &'static str,
}

const fn range(
    network: Ipv6Addr,
    prefix_len: u8,
    address_type: Ipv6AddressType,
    class: &'static str,
) -> SpecialRange {
    SpecialRange {
        network,
        prefix_len,
        address_type,
        class,
    }
}

/// Checked top to bottom, first match wins. Order is priority, not prefix
/// length: ::1/128 must come before 2000::/3, 2001:db8::/32 before 2001::/32.
static SPECIAL_RANGES: &[SpecialRange] = &[
    range(Ipv6Addr::LOCALHOST, 128, Ipv6AddressType::Loopback, "Loopback"),
    range(Ipv6Addr::UNSPECIFIED, 128, Ipv6AddressType::Unspecified, "Unspecified"),
    range(
        Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 0),
        10,
        Ipv6AddressType::LinkLocal,
        "Link-Local Unicast",
    ),
    range(
        Ipv6Addr::new(0xfc00, 0, 0, 0, 0, 0, 0, 0),
        7,
        Ipv6AddressType::UniqueLocal,
        "Unique Local Address",
    ),
    range(
        Ipv6Addr::new(0xff00, 0, 0, 0, 0, 0, 0, 0),
        8,
        Ipv6AddressType::Multicast,
        "Multicast",
    ),
    range(
        Ipv6Addr::new(0x2001, 0x0db8, 0, 0, 0, 0, 0, 0),
        32,
        Ipv6AddressType::Documentation,
        "Documentation",
    ),
    range(
        Ipv6Addr::new(0x2002, 0, 0, 0, 0, 0, 0, 0),
        16,
        Ipv6AddressType::SixToFour,
        "6to4",
    ),
    range(
        Ipv6Addr::new(0x2001, 0, 0, 0, 0, 0, 0, 0),
        32,
        Ipv6AddressType::Teredo,
        "Teredo",
    ),
    range(
        Ipv6Addr::new(0, 0, 0, 0, 0, 0xffff, 0, 0),
        96,
        Ipv6AddressType::Ipv4Mapped,
        "IPv4-Mapped",
    ),
    range(
        Ipv6Addr::new(0x2000, 0, 0, 0, 0, 0, 0, 0),
        3,
        Ipv6AddressType::GlobalUnicast,
        "Global Unicast",
    ),
];

/// Class label and type of an address.
///
/// Multicast classes carry their scope, e.g. "Multicast Link-Local".
/// Addresses outside every special range are "Reserved".
pub fn classify(addr: Ipv6Addr) -> (String, Ipv6AddressType) {
    let hit = SPECIAL_RANGES
        .iter()
        .find(|r| bits::in_block(r.network.octets(), r.prefix_len, addr.octets()));

    match hit {
        Some(r) if r.address_type == Ipv6AddressType::Multicast => (
            format!("{} {}", r.class, MulticastScope::of(addr)),
            r.address_type,
        ),
        Some(r) => (r.class.to_string(), r.address_type),
        None => ("Reserved".to_string(), Ipv6AddressType::Reserved),
    }
}
