//! Binary rendering and the IPv4 text report

use crate::Ipv4Network;
use ripcalc_core::bits::BitLayout;
use ripcalc_core::report::Report;
use std::net::Ipv4Addr;

/// Dotted binary form, e.g. `11000000.10101000.00000000.00000000`
pub fn format_binary(addr: Ipv4Addr) -> String {
    BitLayout::DOTTED_OCTETS.render(&addr.octets(), None)
}

/// Dotted binary form with a space between network and host bits
///
/// ```
/// use ripcalc_ipv4::format_binary_with_mask;
/// use std::net::Ipv4Addr;
///
/// assert_eq!(
///     format_binary_with_mask(Ipv4Addr::new(192, 168, 0, 1), 24),
///     "11000000.10101000.00000000. 00000001"
/// );
/// ```
pub fn format_binary_with_mask(addr: Ipv4Addr, prefix_len: u8) -> String {
    BitLayout::DOTTED_OCTETS.render(&addr.octets(), Some(prefix_len))
}

impl Ipv4Network {
    /// Full report with every address shown in binary
    pub fn report(&self) -> String {
        let bin = |addr: Ipv4Addr| format_binary_with_mask(addr, self.prefix_len);

        Report::new()
            .row_with("Address", self.address.to_string(), bin(self.address))
            .row("Prefix", format!("/{}", self.prefix_len))
            .row_with("Netmask", self.netmask.to_string(), bin(self.netmask))
            .row_with("Wildcard", self.wildcard.to_string(), bin(self.wildcard))
            .separator()
            .row_with(
                "Network",
                format!("{}/{}", self.network, self.prefix_len),
                bin(self.network),
            )
            .row_with("First host", self.host_min.to_string(), bin(self.host_min))
            .row_with("Last host", self.host_max.to_string(), bin(self.host_max))
            .row_with("Broadcast", self.broadcast.to_string(), bin(self.broadcast))
            .row_with(
                "Host count",
                self.host_count.to_string(),
                format!("Class {}, {}", self.class, self.address_type),
            )
            .render()
    }
}
