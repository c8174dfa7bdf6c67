//! Family routing and output rendering shared by single and batch mode

use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;
use ripcalc_core::Family;
use ripcalc_ipv4::{Ipv4Cidr, Ipv4Network};
use ripcalc_ipv6::{Ipv6Cidr, Ipv6Network, ReportOptions};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    Human,
    /// JSON output (pretty-printed)
    Json,
    /// JSON output (compact)
    JsonCompact,
    /// CSV output
    Csv,
}

pub const CSV_HEADER: [&str; 11] = [
    "family",
    "cidr",
    "network",
    "netmask",
    "wildcard",
    "broadcast",
    "host_min",
    "host_max",
    "host_count",
    "class",
    "type",
];

/// A calculated network of either family
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "family")]
pub enum Calculated {
    #[serde(rename = "ipv4")]
    V4(Ipv4Network),
    #[serde(rename = "ipv6")]
    V6(Ipv6Network),
}

impl Calculated {
    /// Route `text` to the matching calculator, parse and calculate it
    pub fn from_cidr(text: &str) -> Result<Self> {
        let family = Family::detect(text);
        debug!(input = text, %family, "routing CIDR");

        match family {
            Family::V4 => {
                let cidr = Ipv4Cidr::parse(text)
                    .with_context(|| format!("invalid IPv4 CIDR notation {:?}", text))?;
                Ok(Calculated::V4(cidr.calculate()))
            }
            Family::V6 => {
                let cidr = Ipv6Cidr::parse(text)
                    .with_context(|| format!("invalid IPv6 CIDR notation {:?}", text))?;
                Ok(Calculated::V6(cidr.calculate()))
            }
        }
    }

    pub fn family(&self) -> Family {
        match self {
            Calculated::V4(_) => Family::V4,
            Calculated::V6(_) => Family::V6,
        }
    }

    /// Text report; IPv4 ignores the options and always shows everything
    pub fn report(&self, options: ReportOptions) -> String {
        match self {
            Calculated::V4(net) => net.report(),
            Calculated::V6(net) => net.report(options),
        }
    }

    fn csv_record(&self) -> [String; 11] {
        match self {
            Calculated::V4(net) => [
                Family::V4.to_string(),
                net.cidr().to_string(),
                net.network().to_string(),
                net.netmask().to_string(),
                net.wildcard().to_string(),
                net.broadcast().to_string(),
                net.host_min().to_string(),
                net.host_max().to_string(),
                net.host_count().to_string(),
                net.class().to_string(),
                net.address_type().to_string(),
            ],
            Calculated::V6(net) => [
                Family::V6.to_string(),
                net.cidr().to_string(),
                net.network().to_string(),
                net.netmask().to_string(),
                net.wildcard().to_string(),
                String::new(),
                net.host_min().to_string(),
                net.host_max().to_string(),
                net.host_count().to_string(),
                net.class().to_string(),
                net.address_type().to_string(),
            ],
        }
    }
}

/// Render one result in the requested format
pub fn render(result: &Calculated, format: OutputFormat, options: ReportOptions) -> Result<String> {
    match format {
        OutputFormat::Human => Ok(result.report(options)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::JsonCompact => Ok(serde_json::to_string(result)?),
        OutputFormat::Csv => to_csv([result]),
    }
}

/// CSV with a header row and one record per result
pub fn to_csv<'a>(results: impl IntoIterator<Item = &'a Calculated>) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(CSV_HEADER)?;
    for result in results {
        wtr.write_record(result.csv_record())?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| anyhow!("failed to flush CSV output: {}", e.error()))?;
    let text = String::from_utf8(bytes)?;
    Ok(text.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routing() {
        let v4 = Calculated::from_cidr("192.168.0.0/24").unwrap();
        assert_eq!(v4.family(), Family::V4);

        let v6 = Calculated::from_cidr("2001:db8::/64").unwrap();
        assert_eq!(v6.family(), Family::V6);

        let mapped = Calculated::from_cidr("::ffff:192.168.1.1/128").unwrap();
        assert_eq!(mapped.family(), Family::V6);
    }

    #[test]
    fn test_invalid_input_context() {
        let err = Calculated::from_cidr("invalid-cidr").unwrap_err();
        assert_eq!(err.to_string(), "invalid IPv4 CIDR notation \"invalid-cidr\"");
        assert!(format!("{:#}", err).contains("invalid address"));

        let err = Calculated::from_cidr("2001:db8::/200").unwrap_err();
        assert!(err.to_string().starts_with("invalid IPv6 CIDR notation"));
    }

    #[test]
    fn test_render_human_ipv4() {
        let result = Calculated::from_cidr("192.168.1.0/24").unwrap();
        let output = render(&result, OutputFormat::Human, ReportOptions::default()).unwrap();
        for part in [
            "Address:",
            "192.168.1.0",
            "Prefix:",
            "/24",
            "Netmask:",
            "255.255.255.0",
            "Wildcard:",
            "0.0.0.255",
            "Network:",
            "192.168.1.0/24",
            "First host:",
            "192.168.1.1",
            "Last host:",
            "192.168.1.254",
            "Broadcast:",
            "192.168.1.255",
            "Host count:",
            "254",
            "Class C",
            "Private Internet",
            "11000000.10101000.00000001.",
            "11111111.11111111.11111111.",
            "00000000.00000000.00000000.",
        ] {
            assert!(output.contains(part), "missing {:?}:\n{}", part, output);
        }
        assert!(output.contains(" 0000") || output.contains(" 1111"));
    }

    #[test]
    fn test_render_json() {
        let result = Calculated::from_cidr("10.0.0.1/8").unwrap();
        let json = render(&result, OutputFormat::JsonCompact, ReportOptions::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["family"], "ipv4");
        assert_eq!(value["network"], "10.0.0.0");
        assert_eq!(value["host_count"], 16_777_214);
        assert_eq!(value["type"], "Private Internet");

        let result = Calculated::from_cidr("fe80::1/64").unwrap();
        let json = render(&result, OutputFormat::Json, ReportOptions::default()).unwrap();
        assert!(json.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["family"], "ipv6");
        assert_eq!(value["class"], "Link-Local Unicast");
    }

    #[test]
    fn test_render_csv() {
        let result = Calculated::from_cidr("2001:db8::/64").unwrap();
        let csv = render(&result, OutputFormat::Csv, ReportOptions::default()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], CSV_HEADER.join(","));
        assert!(lines[1].starts_with("IPv6,2001:db8::/64,2001:db8::,ffff:ffff:ffff:ffff::,::ffff:ffff:ffff:ffff,,"));
        assert!(lines[1].ends_with("18446744073709551616,Documentation,RFC Example"));
    }
}
