//! Ethernet II frame construction and parsing
//!
//! The header is fixed at 14 bytes: destination MAC, source MAC and a
//! big-endian EtherType. No minimum-size padding is applied and no FCS is
//! carried; the payload follows the header verbatim.

use bytes::{BufMut, BytesMut};
use netframe_core::{Error, MacAddress, Result};
use std::fmt;

/// EtherType values recognised by the codec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EtherType {
    /// IPv4 (0x0800)
    IPv4,
    /// ARP (0x0806)
    ARP,
    /// VLAN-tagged frame (0x8100)
    VLAN,
    /// IPv6 (0x86DD)
    IPv6,
    /// Any other value
    Custom(u16),
}

impl EtherType {
    /// Convert EtherType to u16 value
    pub fn to_u16(self) -> u16 {
        match self {
            EtherType::IPv4 => 0x0800,
            EtherType::ARP => 0x0806,
            EtherType::VLAN => 0x8100,
            EtherType::IPv6 => 0x86DD,
            EtherType::Custom(val) => val,
        }
    }

    /// Create EtherType from u16 value
    pub fn from_u16(value: u16) -> Self {
        match value {
            0x0800 => EtherType::IPv4,
            0x0806 => EtherType::ARP,
            0x8100 => EtherType::VLAN,
            0x86DD => EtherType::IPv6,
            val => EtherType::Custom(val),
        }
    }
}

impl fmt::Display for EtherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EtherType::IPv4 => write!(f, "IPv4"),
            EtherType::ARP => write!(f, "ARP"),
            EtherType::VLAN => write!(f, "VLAN"),
            EtherType::IPv6 => write!(f, "IPv6"),
            EtherType::Custom(_) => write!(f, "Unknown"),
        }
    }
}

/// Ethernet II header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EthernetHeader {
    /// Destination MAC address
    pub destination: MacAddress,
    /// Source MAC address
    pub source: MacAddress,
    /// EtherType
    pub ethertype: EtherType,
}

impl EthernetHeader {
    /// Ethernet header size (dst + src + type)
    pub const SIZE: usize = 14;

    pub fn new(destination: MacAddress, source: MacAddress, ethertype: EtherType) -> Self {
        EthernetHeader {
            destination,
            source,
            ethertype,
        }
    }
}

/// Ethernet II frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EthernetFrame {
    pub header: EthernetHeader,
    /// Payload data, opaque to this layer
    pub payload: Vec<u8>,
}

impl EthernetFrame {
    /// Ethernet header size
    pub const HEADER_SIZE: usize = EthernetHeader::SIZE;

    /// Create a new Ethernet frame
    pub fn new(
        destination: MacAddress,
        source: MacAddress,
        ethertype: EtherType,
        payload: Vec<u8>,
    ) -> Self {
        EthernetFrame {
            header: EthernetHeader::new(destination, source, ethertype),
            payload,
        }
    }

    /// Create a frame carrying an IPv4 packet
    pub fn ipv4(destination: MacAddress, source: MacAddress, payload: Vec<u8>) -> Self {
        Self::new(destination, source, EtherType::IPv4, payload)
    }

    /// Encode `header` followed by `payload`
    pub fn encode(header: &EthernetHeader, payload: &[u8]) -> Vec<u8> {
        let mut buffer = BytesMut::with_capacity(Self::HEADER_SIZE + payload.len());

        buffer.put_slice(header.destination.as_bytes());
        buffer.put_slice(header.source.as_bytes());
        buffer.put_u16(header.ethertype.to_u16());
        buffer.put_slice(payload);

        buffer.to_vec()
    }

    /// Convert the frame to bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        Self::encode(&self.header, &self.payload)
    }

    /// Parse an Ethernet frame from bytes
    ///
    /// Everything after the 14-byte header, possibly nothing, becomes the
    /// payload. The EtherType is not checked here.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < Self::HEADER_SIZE {
            return Err(Error::format(format!(
                "data too short for Ethernet header: {} bytes, need {}",
                data.len(),
                Self::HEADER_SIZE
            )));
        }

        let destination = MacAddress::from_slice(&data[0..6])
            .ok_or_else(|| Error::format("invalid destination MAC"))?;
        let source = MacAddress::from_slice(&data[6..12])
            .ok_or_else(|| Error::format("invalid source MAC"))?;
        let ethertype = EtherType::from_u16(u16::from_be_bytes([data[12], data[13]]));

        Ok(EthernetFrame {
            header: EthernetHeader {
                destination,
                source,
                ethertype,
            },
            payload: data[Self::HEADER_SIZE..].to_vec(),
        })
    }

    /// Check whether the frame carries IPv4
    pub fn is_ipv4(&self) -> bool {
        self.header.ethertype == EtherType::IPv4
    }

    /// Get the total frame size in bytes
    pub fn len(&self) -> usize {
        Self::HEADER_SIZE + self.payload.len()
    }

    /// A frame always has a header, so it is never empty
    pub fn is_empty(&self) -> bool {
        false
    }
}
