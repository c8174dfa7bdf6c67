//! Binary rendering and the IPv6 text reports

use crate::Ipv6Network;
use ripcalc_core::bits::BitLayout;
use ripcalc_core::report::Report;
use std::net::Ipv6Addr;

/// Which optional parts of the IPv6 report to show
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOptions {
    /// Add netmask and wildcard rows
    pub mask: bool,
    /// Add a binary column to every address row
    pub binary: bool,
}

/// Full 128-bit binary form, eight 16-bit groups joined by `:`
pub fn format_binary(addr: Ipv6Addr) -> String {
    BitLayout::COLON_HEXTETS.render(&addr.octets(), None)
}

/// Binary form with a space between network and host bits.
///
/// No space is added for /0 or /128.
pub fn format_binary_with_mask(addr: Ipv6Addr, prefix_len: u8) -> String {
    BitLayout::COLON_HEXTETS.render(&addr.octets(), Some(prefix_len))
}

impl Ipv6Network {
    /// Text report in one of four variants, see [`ReportOptions`]
    pub fn report(&self, options: ReportOptions) -> String {
        let bin = |addr: Ipv6Addr| {
            options
                .binary
                .then(|| format_binary_with_mask(addr, self.prefix_len))
        };

        let mut report = Report::new()
            .row_maybe("Address", self.address.to_string(), bin(self.address))
            .row("Prefix", format!("/{}", self.prefix_len));

        if options.mask {
            let netmask = self.netmask();
            let wildcard = self.wildcard();
            report = report
                .row_maybe("Netmask", netmask.to_string(), bin(netmask))
                .row_maybe("Wildcard", wildcard.to_string(), bin(wildcard));
        }

        report
            .separator()
            .row_maybe(
                "Network",
                format!("{}/{}", self.network, self.prefix_len),
                bin(self.network),
            )
            .row_maybe("First host", self.host_min.to_string(), bin(self.host_min))
            .row_maybe("Last host", self.host_max.to_string(), bin(self.host_max))
            .row_with(
                "Host count",
                self.host_count.abbreviated(),
                format!("{}, {}", self.class, self.address_type),
            )
            .render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Ipv6Cidr;

    const DOC_PREFIX_BITS: &str = "0010000000000001:0000110110111000";

    fn report(text: &str, mask: bool, binary: bool) -> String {
        Ipv6Cidr::parse(text)
            .unwrap()
            .calculate()
            .report(ReportOptions { mask, binary })
    }

    #[test]
    fn test_format_binary() {
        assert_eq!(
            format_binary(Ipv6Addr::LOCALHOST),
            "0000000000000000:0000000000000000:0000000000000000:0000000000000000:\
             0000000000000000:0000000000000000:0000000000000000:0000000000000001"
        );
        assert_eq!(
            format_binary(Ipv6Addr::UNSPECIFIED),
            "0000000000000000:0000000000000000:0000000000000000:0000000000000000:\
             0000000000000000:0000000000000000:0000000000000000:0000000000000000"
        );
    }

    #[test]
    fn test_format_binary_with_mask() {
        let addr: Ipv6Addr = "2001:db8::1".parse().unwrap();

        let at_64 = format_binary_with_mask(addr, 64);
        assert!(at_64.contains(": 0000000000000000"));
        assert_eq!(at_64.matches(' ').count(), 1);

        let at_48 = format_binary_with_mask(addr, 48);
        assert!(at_48.contains(' '));

        assert!(!format_binary_with_mask(Ipv6Addr::LOCALHOST, 128).contains(' '));
        assert!(!format_binary_with_mask(addr, 0).contains(' '));
    }

    #[test]
    fn test_plain_report() {
        let output = report("2001:db8::/64", false, false);
        for part in [
            "Address:",
            "2001:db8::",
            "Prefix:",
            "/64",
            "Network:",
            "2001:db8::/64",
            "First host:",
            "Last host:",
            "2001:db8::ffff:ffff:ffff:ffff",
            "Host count:",
            "2^64",
            "Documentation, RFC Example",
        ] {
            assert!(output.contains(part), "report missing {:?}:\n{}", part, output);
        }
        assert!(!output.contains("Netmask:"));
        assert!(!output.contains(DOC_PREFIX_BITS));
    }

    #[test]
    fn test_report_variants() {
        let cases = [
            (false, false),
            (true, false),
            (false, true),
            (true, true),
        ];
        for (mask, binary) in cases {
            let output = report("2001:db8::/64", mask, binary);
            let has_mask = output.contains("Netmask:") && output.contains("Wildcard:");
            assert_eq!(has_mask, mask, "mask={} binary={}", mask, binary);
            assert_eq!(output.contains(DOC_PREFIX_BITS), binary, "mask={} binary={}", mask, binary);

            if mask {
                assert!(output.contains("ffff:ffff:ffff:ffff::"));
                assert!(output.contains("::ffff:ffff:ffff:ffff"));
            }
        }
    }

    #[test]
    fn test_report_line_counts() {
        assert_eq!(report("2001:db8::/64", false, false).lines().count(), 7);
        assert_eq!(report("2001:db8::/64", true, false).lines().count(), 9);
        assert_eq!(report("2001:db8::/64", true, true).lines().count(), 9);
    }

    #[test]
    fn test_loopback_report() {
        let output = report("::1/128", false, true);
        assert!(output.contains("Loopback, Host-only"));
        assert!(output.lines().any(|l| l.starts_with("Host count: 1 ")));
        // /128 has no host bits, so no boundary space inside the bit strings
        assert!(!output.contains(": 0"));
    }

    #[test]
    fn test_astronomical_count() {
        let output = report("fe80::/10", false, false);
        assert!(output.contains("2^118 (astronomical)"));
        assert!(output.contains("Link-Local Unicast, Auto-configured"));
    }

    #[test]
    fn test_multicast_report() {
        let output = report("ff02::1/128", false, false);
        assert!(output.contains("ff02::1"));
        assert!(output.contains("Multicast Link-Local, Group Communication"));
    }

    #[test]
    fn test_display_is_plain_report() {
        let net = Ipv6Cidr::parse("fd00::1/64").unwrap().calculate();
        assert_eq!(net.to_string(), net.report(ReportOptions::default()));
    }
}
