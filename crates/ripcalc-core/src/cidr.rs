//! Splitting CIDR text into its address and prefix parts

use crate::{InvalidAddress, Result};
use std::net::IpAddr;

/// Split `<address>/<prefix>` into a parsed address and the raw prefix.
///
/// The prefix is returned unchecked; callers validate it against their
/// family with [`Family::check_prefix`](crate::Family::check_prefix).
///
/// ```
/// use ripcalc_core::cidr;
///
/// let (addr, prefix) = cidr::split("10.1.2.3/8").unwrap();
/// assert_eq!(addr.to_string(), "10.1.2.3");
/// assert_eq!(prefix, 8);
/// ```
pub fn split(text: &str) -> Result<(IpAddr, u32)> {
    let (addr_str, prefix_str) = text.split_once('/').ok_or_else(|| {
        InvalidAddress::Notation(format!("{:?} is not in <address>/<prefix> form", text))
    })?;

    if prefix_str.is_empty() || !prefix_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InvalidAddress::Notation(format!(
            "invalid prefix length {:?} in {:?}",
            prefix_str, text
        )));
    }

    let prefix: u32 = prefix_str.parse().map_err(|_| {
        InvalidAddress::Notation(format!("prefix length {:?} is too large", prefix_str))
    })?;

    let addr: IpAddr = addr_str.parse().map_err(|_| {
        InvalidAddress::Notation(format!("{:?} is not an IP address", addr_str))
    })?;

    Ok((addr, prefix))
}
