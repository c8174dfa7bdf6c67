//! IPv4 CIDR calculation
//!
//! Parses IPv4 CIDR notation and derives everything a subnet calculator
//! shows for it:
//! - Netmask and wildcard
//! - Network and broadcast addresses
//! - Usable host range and host count
//! - Classful letter (A-E) and address type (private, loopback, ...)
//!
//! # Examples
//!
//! ```
//! use ripcalc_ipv4::{Ipv4AddressType, Ipv4Cidr};
//! use std::net::Ipv4Addr;
//!
//! let net = Ipv4Cidr::parse("192.168.1.77/24").unwrap().calculate();
//! assert_eq!(net.network(), Ipv4Addr::new(192, 168, 1, 0));
//! assert_eq!(net.broadcast(), Ipv4Addr::new(192, 168, 1, 255));
//! assert_eq!(net.host_count(), 254);
//! assert_eq!(net.class(), "C");
//! assert_eq!(net.address_type(), Ipv4AddressType::Private);
//! ```

use ripcalc_core::bits;
use ripcalc_core::{cidr, Family, InvalidAddress, Result};
use serde::Serialize;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

mod classify;
mod format;

pub use classify::{class_of, classify, classify_type, Ipv4AddressType};
pub use format::{format_binary, format_binary_with_mask};

/// A parsed IPv4 address and prefix length, before any calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Cidr {
    /// Address as written (host bits kept)
    address: Ipv4Addr,
    /// Prefix length (0-32)
    prefix_len: u8,
}

impl Ipv4Cidr {
    /// Parse CIDR notation string
    ///
    /// # Arguments
    ///
    /// * `text` - CIDR string (e.g., "192.168.1.0/24")
    ///
    /// IPv6 text is rejected, IPv4-mapped forms like `::ffff:10.0.0.1/104`
    /// included.
    ///
    /// # Examples
    ///
    /// ```
    /// use ripcalc_ipv4::Ipv4Cidr;
    ///
    /// let cidr = Ipv4Cidr::parse("10.0.0.0/8").unwrap();
    /// assert_eq!(cidr.prefix_len(), 8);
    /// assert!(Ipv4Cidr::parse("2001:db8::/64").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let (addr, prefix) = cidr::split(text)?;

        let address = match addr {
            IpAddr::V4(v4) => v4,
            IpAddr::V6(_) => {
                return Err(InvalidAddress::WrongFamily {
                    expected: Family::V4,
                    input: text.to_string(),
                })
            }
        };

        Self::new(address, Family::V4.check_prefix(prefix)?)
    }

    /// Create from an address and prefix length
    ///
    /// # Arguments
    ///
    /// * `address` - Any address inside the block
    /// * `prefix_len` - Prefix length (0-32)
    pub fn new(address: Ipv4Addr, prefix_len: u8) -> Result<Self> {
        let prefix_len = Family::V4.check_prefix(u32::from(prefix_len))?;
        Ok(Self {
            address,
            prefix_len,
        })
    }

    /// Get address as written
    pub fn address(&self) -> Ipv4Addr {
        self.address
    }

    /// Get prefix length
    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// Derive every field of the block
    pub fn calculate(&self) -> Ipv4Network {
        let netmask = bits::prefix_mask::<4>(self.prefix_len);
        let wildcard = bits::complement(netmask);
        let network = bits::and(self.address.octets(), netmask);
        let broadcast = bits::or(network, wildcard);
        let (host_min, host_max) = host_range(network, broadcast);
        let (class, address_type) = classify(self.address);

        Ipv4Network {
            address: self.address,
            prefix_len: self.prefix_len,
            netmask: Ipv4Addr::from(netmask),
            wildcard: Ipv4Addr::from(wildcard),
            network: Ipv4Addr::from(network),
            broadcast: Ipv4Addr::from(broadcast),
            host_min: Ipv4Addr::from(host_min),
            host_max: Ipv4Addr::from(host_max),
            host_count: host_count(self.prefix_len),
            class,
            address_type,
        }
    }
}

impl FromStr for Ipv4Cidr {
    type Err = InvalidAddress;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Ipv4Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix_len)
    }
}

/// A fully calculated IPv4 block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ipv4Network {
    address: Ipv4Addr,
    prefix_len: u8,
    netmask: Ipv4Addr,
    wildcard: Ipv4Addr,
    network: Ipv4Addr,
    broadcast: Ipv4Addr,
    host_min: Ipv4Addr,
    host_max: Ipv4Addr,
    host_count: u32,
    class: &'static str,
    #[serde(rename = "type")]
    address_type: Ipv4AddressType,
}

impl Ipv4Network {
    /// Get address as written
    pub fn address(&self) -> Ipv4Addr {
        self.address
    }

    /// Get prefix length
    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// Get netmask
    pub fn netmask(&self) -> Ipv4Addr {
        self.netmask
    }

    /// Get wildcard (inverted netmask)
    pub fn wildcard(&self) -> Ipv4Addr {
        self.wildcard
    }

    /// Get network address
    pub fn network(&self) -> Ipv4Addr {
        self.network
    }

    /// Get broadcast address
    pub fn broadcast(&self) -> Ipv4Addr {
        self.broadcast
    }

    /// Get first usable host (network + 1)
    pub fn host_min(&self) -> Ipv4Addr {
        self.host_min
    }

    /// Get last usable host (broadcast - 1)
    pub fn host_max(&self) -> Ipv4Addr {
        self.host_max
    }

    /// Number of usable hosts, 0 for /31 and /32
    pub fn host_count(&self) -> u32 {
        self.host_count
    }

    /// Classful letter, "A" through "E"
    pub fn class(&self) -> &'static str {
        self.class
    }

    /// Special-range classification
    pub fn address_type(&self) -> Ipv4AddressType {
        self.address_type
    }

    /// Block in `address/prefix` form
    pub fn cidr(&self) -> Ipv4Cidr {
        Ipv4Cidr {
            address: self.address,
            prefix_len: self.prefix_len,
        }
    }
}

impl fmt::Display for Ipv4Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.report())
    }
}

// The last octet is bumped in place with no carry. Host bits of the network
// are zero (and one for broadcast), so this only wraps at /31 and /32, where
// the bounds are kept as computed even though no host is usable.
fn host_range(network: [u8; 4], broadcast: [u8; 4]) -> ([u8; 4], [u8; 4]) {
    let mut host_min = network;
    let mut host_max = broadcast;

    host_min[3] = host_min[3].wrapping_add(1);
    host_max[3] = host_max[3].wrapping_sub(1);

    (host_min, host_max)
}

fn host_count(prefix_len: u8) -> u32 {
    let host_bits = 32 - u32::from(prefix_len);
    if host_bits <= 1 {
        return 0;
    }

    // 2^host_bits - 2, without overflowing at /0
    (u32::MAX >> (32 - host_bits)) - 1
}
