//! IPv6 CIDR calculation
//!
//! The IPv6 counterpart of `ripcalc-ipv4`: there is no broadcast address,
//! the host range spans the whole block, and host counts reach 2^128, so
//! they are kept exact in a [`HostCount`] instead of a machine integer.
//!
//! # Examples
//!
//! ```
//! use ripcalc_ipv6::{Ipv6AddressType, Ipv6Cidr};
//!
//! let net = Ipv6Cidr::parse("2001:db8::1/64").unwrap().calculate();
//! assert_eq!(net.network().to_string(), "2001:db8::");
//! assert_eq!(net.host_max().to_string(), "2001:db8::ffff:ffff:ffff:ffff");
//! assert_eq!(net.host_count().abbreviated(), "2^64");
//! assert_eq!(net.class(), "Documentation");
//! assert_eq!(net.address_type(), Ipv6AddressType::Documentation);
//! ```

use ripcalc_core::bits;
use ripcalc_core::{cidr, Family, InvalidAddress, Result};
use serde::Serialize;
use std::fmt;
use std::net::{IpAddr, Ipv6Addr};
use std::str::FromStr;

mod classify;
mod format;
mod host_count;

pub use classify::{classify, Ipv6AddressType, MulticastScope};
pub use format::{format_binary, format_binary_with_mask, ReportOptions};
pub use host_count::HostCount;

/// A parsed IPv6 address and prefix length, before any calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv6Cidr {
    /// Address as written (host bits kept)
    address: Ipv6Addr,
    /// Prefix length (0-128)
    prefix_len: u8,
}

impl Ipv6Cidr {
    /// Parse CIDR notation string
    ///
    /// # Arguments
    ///
    /// * `text` - CIDR string (e.g., "2001:db8::/32")
    ///
    /// Dotted-quad IPv4 text is rejected. IPv4-mapped IPv6 literals such as
    /// `::ffff:192.168.1.1/128` are IPv6 and accepted.
    ///
    /// # Examples
    ///
    /// ```
    /// use ripcalc_ipv6::Ipv6Cidr;
    ///
    /// let cidr = Ipv6Cidr::parse("fe80::1/64").unwrap();
    /// assert_eq!(cidr.prefix_len(), 64);
    /// assert!(Ipv6Cidr::parse("192.168.1.1/24").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let (addr, prefix) = cidr::split(text)?;

        let address = match addr {
            IpAddr::V6(v6) => v6,
            IpAddr::V4(_) => {
                return Err(InvalidAddress::WrongFamily {
                    expected: Family::V6,
                    input: text.to_string(),
                })
            }
        };

        Self::new(address, Family::V6.check_prefix(prefix)?)
    }

    /// Create from an address and prefix length
    ///
    /// # Arguments
    ///
    /// * `address` - Any address inside the block
    /// * `prefix_len` - Prefix length (0-128)
    pub fn new(address: Ipv6Addr, prefix_len: u8) -> Result<Self> {
        let prefix_len = Family::V6.check_prefix(u32::from(prefix_len))?;
        Ok(Self {
            address,
            prefix_len,
        })
    }

    /// Get address as written
    pub fn address(&self) -> Ipv6Addr {
        self.address
    }

    /// Get prefix length
    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// Derive every field of the block
    pub fn calculate(&self) -> Ipv6Network {
        let mask = bits::prefix_mask::<16>(self.prefix_len);
        let network = bits::and(self.address.octets(), mask);
        let host_max = bits::or(network, bits::complement(mask));
        let (class, address_type) = classify(self.address);

        Ipv6Network {
            address: self.address,
            prefix_len: self.prefix_len,
            network: Ipv6Addr::from(network),
            host_min: Ipv6Addr::from(network),
            host_max: Ipv6Addr::from(host_max),
            host_count: HostCount::for_prefix(self.prefix_len),
            class,
            address_type,
        }
    }
}

impl FromStr for Ipv6Cidr {
    type Err = InvalidAddress;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Ipv6Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix_len)
    }
}

/// A fully calculated IPv6 block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ipv6Network {
    address: Ipv6Addr,
    prefix_len: u8,
    network: Ipv6Addr,
    host_min: Ipv6Addr,
    host_max: Ipv6Addr,
    host_count: HostCount,
    class: String,
    #[serde(rename = "type")]
    address_type: Ipv6AddressType,
}

impl Ipv6Network {
    /// Get address as written
    pub fn address(&self) -> Ipv6Addr {
        self.address
    }

    /// Get prefix length
    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// Get network address
    pub fn network(&self) -> Ipv6Addr {
        self.network
    }

    /// First address in the block (same as the network address)
    pub fn host_min(&self) -> Ipv6Addr {
        self.host_min
    }

    /// Last address in the block, every host bit set
    pub fn host_max(&self) -> Ipv6Addr {
        self.host_max
    }

    /// Exact number of addresses, 2^(128 - prefix)
    pub fn host_count(&self) -> HostCount {
        self.host_count
    }

    /// Class label, e.g. "Global Unicast" or "Multicast Link-Local"
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Special-range classification
    pub fn address_type(&self) -> Ipv6AddressType {
        self.address_type
    }

    /// Netmask, computed on demand
    pub fn netmask(&self) -> Ipv6Addr {
        Ipv6Addr::from(bits::prefix_mask::<16>(self.prefix_len))
    }

    /// Wildcard (inverted netmask), computed on demand
    pub fn wildcard(&self) -> Ipv6Addr {
        Ipv6Addr::from(bits::complement(bits::prefix_mask::<16>(self.prefix_len)))
    }

    /// Block in `address/prefix` form
    pub fn cidr(&self) -> Ipv6Cidr {
        Ipv6Cidr {
            address: self.address,
            prefix_len: self.prefix_len,
        }
    }
}

impl fmt::Display for Ipv6Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.report(ReportOptions::default()))
    }
}
