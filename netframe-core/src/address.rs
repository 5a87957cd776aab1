//! MAC and IPv4 address parsing and rendering

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::{Error, Result};

/// MAC address (6 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MacAddress(pub [u8; 6]);

impl MacAddress {
    /// Broadcast MAC address (ff:ff:ff:ff:ff:ff)
    pub const BROADCAST: MacAddress = MacAddress([0xFF; 6]);

    /// Zero MAC address (00:00:00:00:00:00)
    pub const ZERO: MacAddress = MacAddress([0x00; 6]);

    /// Create a new MAC address from a byte array
    pub const fn new(bytes: [u8; 6]) -> Self {
        MacAddress(bytes)
    }

    /// Create a MAC address from a slice of exactly six bytes
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        <[u8; 6]>::try_from(slice).ok().map(MacAddress)
    }

    /// Get the MAC address as a byte array
    pub fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }

    /// Convert to array
    pub fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Check if this is the broadcast address
    pub fn is_broadcast(&self) -> bool {
        *self == Self::BROADCAST
    }

    /// Check if this is a multicast address (bit 0 of first octet is 1)
    pub fn is_multicast(&self) -> bool {
        self.0[0] & 0x01 == 0x01
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }
}

impl FromStr for MacAddress {
    type Err = Error;

    /// Parses the six-group hex-colon form, e.g. `00:11:22:33:44:55`.
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 6 {
            return Err(Error::format(format!(
                "invalid MAC address '{}': expected 6 colon-separated groups, found {}",
                s,
                parts.len()
            )));
        }

        let mut bytes = [0u8; 6];
        for (slot, part) in bytes.iter_mut().zip(&parts) {
            // from_str_radix alone would accept a sign prefix such as "+f"
            if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(Error::format(format!(
                    "invalid MAC address '{}': group '{}' is not two hex digits",
                    s, part
                )));
            }
            *slot = u8::from_str_radix(part, 16)
                .map_err(|_| Error::format(format!("invalid MAC address hex '{}'", part)))?;
        }

        Ok(MacAddress(bytes))
    }
}

impl From<[u8; 6]> for MacAddress {
    fn from(bytes: [u8; 6]) -> Self {
        MacAddress(bytes)
    }
}

impl From<MacAddress> for [u8; 6] {
    fn from(mac: MacAddress) -> Self {
        mac.0
    }
}

/// Parse a MAC address in `aa:bb:cc:dd:ee:ff` notation
pub fn parse_mac(s: &str) -> Result<MacAddress> {
    s.parse()
}

/// Parse an IPv4 address in dotted-decimal notation.
///
/// Exactly four groups of one to three decimal digits are required, each in
/// the range 0-255. Leading zeros are accepted (`010.0.0.1` is `10.0.0.1`).
pub fn parse_ipv4(s: &str) -> Result<Ipv4Addr> {
    let parts: Vec<&str> = s.split('.').collect();
    if parts.len() != 4 {
        return Err(Error::format(format!(
            "invalid IPv4 address '{}': expected 4 dot-separated groups, found {}",
            s,
            parts.len()
        )));
    }

    let mut octets = [0u8; 4];
    for (slot, part) in octets.iter_mut().zip(&parts) {
        if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::format(format!(
                "invalid IPv4 address '{}': group '{}' is not a decimal number",
                s, part
            )));
        }
        let value: u16 = part
            .parse()
            .map_err(|_| Error::format(format!("invalid IPv4 group '{}'", part)))?;
        *slot = u8::try_from(value).map_err(|_| {
            Error::format(format!(
                "invalid IPv4 address '{}': octet {} out of range 0-255",
                s, value
            ))
        })?;
    }

    Ok(Ipv4Addr::from(octets))
}

/// Render an IPv4 address in dotted-decimal notation
pub fn ipv4_to_string(addr: Ipv4Addr) -> String {
    addr.to_string()
}
