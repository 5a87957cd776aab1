//! UDP datagram construction and parsing
//!
//! The checksum field is always written as zero ("no checksum") and is passed
//! through untouched on decode.

use bytes::{BufMut, BytesMut};
use netframe_core::{Error, Result};
use std::fmt;

/// UDP port number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UdpPort(pub u16);

impl UdpPort {
    /// DNS (53)
    pub const DNS: UdpPort = UdpPort(53);

    /// HTTP (80)
    pub const HTTP: UdpPort = UdpPort(80);

    pub fn new(port: u16) -> Self {
        UdpPort(port)
    }

    pub fn to_u16(self) -> u16 {
        self.0
    }
}

impl fmt::Display for UdpPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for UdpPort {
    fn from(port: u16) -> Self {
        UdpPort(port)
    }
}

impl From<UdpPort> for u16 {
    fn from(port: UdpPort) -> Self {
        port.0
    }
}

/// UDP header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UdpHeader {
    /// Source port
    pub source_port: UdpPort,
    /// Destination port
    pub destination_port: UdpPort,
    /// Length (header + data)
    pub length: u16,
    /// Checksum, zero when not computed
    pub checksum: u16,
}

impl UdpHeader {
    /// UDP header size in bytes
    pub const SIZE: usize = 8;
}

/// UDP datagram
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UdpDatagram {
    pub header: UdpHeader,
    /// Application payload
    pub payload: Vec<u8>,
}

impl UdpDatagram {
    /// UDP header size in bytes
    pub const HEADER_SIZE: usize = UdpHeader::SIZE;

    /// Create a new UDP datagram with a zero checksum
    pub fn new(source_port: UdpPort, destination_port: UdpPort, payload: Vec<u8>) -> Result<Self> {
        let length = Self::length_for(payload.len())?;

        Ok(UdpDatagram {
            header: UdpHeader {
                source_port,
                destination_port,
                length,
                checksum: 0,
            },
            payload,
        })
    }

    /// Length field for a payload of `payload_len` bytes
    pub fn length_for(payload_len: usize) -> Result<u16> {
        let length = Self::HEADER_SIZE + payload_len;
        u16::try_from(length).map_err(|_| {
            Error::format(format!(
                "UDP length {} exceeds maximum {}",
                length,
                u16::MAX
            ))
        })
    }

    /// Encode a datagram: ports, derived length, zero checksum, then payload
    pub fn encode(
        source_port: UdpPort,
        destination_port: UdpPort,
        payload: &[u8],
    ) -> Result<Vec<u8>> {
        let length = Self::length_for(payload.len())?;
        let mut buffer = BytesMut::with_capacity(length as usize);

        buffer.put_u16(source_port.to_u16());
        buffer.put_u16(destination_port.to_u16());
        buffer.put_u16(length);
        buffer.put_u16(0);
        buffer.put_slice(payload);

        Ok(buffer.to_vec())
    }

    /// Convert the UDP datagram to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Self::encode(
            self.header.source_port,
            self.header.destination_port,
            &self.payload,
        )
    }

    /// Parse a UDP datagram from bytes
    ///
    /// The payload length comes from the length field; bytes past it are
    /// dropped. The checksum is not validated.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < Self::HEADER_SIZE {
            return Err(Error::format(format!(
                "data too short for UDP header: {} bytes, need {}",
                data.len(),
                Self::HEADER_SIZE
            )));
        }

        let length = u16::from_be_bytes([data[4], data[5]]);
        if (length as usize) < Self::HEADER_SIZE || data.len() < length as usize {
            return Err(Error::format(format!(
                "invalid UDP length field: {} with {} bytes available",
                length,
                data.len()
            )));
        }

        Ok(UdpDatagram {
            header: UdpHeader {
                source_port: UdpPort::new(u16::from_be_bytes([data[0], data[1]])),
                destination_port: UdpPort::new(u16::from_be_bytes([data[2], data[3]])),
                length,
                checksum: u16::from_be_bytes([data[6], data[7]]),
            },
            payload: data[Self::HEADER_SIZE..length as usize].to_vec(),
        })
    }

    /// Get the total datagram size in bytes
    pub fn len(&self) -> usize {
        self.header.length as usize
    }

    /// A datagram always has a header, so it is never empty
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Get payload length
    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }
}
