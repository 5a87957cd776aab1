//! IPv4 packet construction and parsing
//!
//! Only the fixed 20-byte header is ever emitted (IHL 5, no options, no
//! fragmentation). Decoding tolerates a longer IHL by skipping the option
//! bytes, and derives the payload from the total-length field rather than
//! from the buffer size, so trailing bytes after the datagram are dropped.
//!
//! The header checksum is written on encode but not checked on decode; call
//! [`Ipv4Packet::verify_checksum`] when integrity matters. Option bytes seen
//! on decode are kept for that check but never re-emitted.

use crate::checksum::{internet_checksum, validate_checksum};
use bytes::{BufMut, BytesMut};
use netframe_core::{Error, Result};
use std::fmt;
use std::net::Ipv4Addr;

/// IP Protocol numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpProtocol {
    /// ICMP (1)
    ICMP,
    /// TCP (6)
    TCP,
    /// UDP (17)
    UDP,
    /// Any other protocol number
    Custom(u8),
}

impl IpProtocol {
    pub fn to_u8(self) -> u8 {
        match self {
            IpProtocol::ICMP => 1,
            IpProtocol::TCP => 6,
            IpProtocol::UDP => 17,
            IpProtocol::Custom(val) => val,
        }
    }

    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => IpProtocol::ICMP,
            6 => IpProtocol::TCP,
            17 => IpProtocol::UDP,
            val => IpProtocol::Custom(val),
        }
    }
}

impl fmt::Display for IpProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpProtocol::ICMP => write!(f, "ICMP (1)"),
            IpProtocol::TCP => write!(f, "TCP (6)"),
            IpProtocol::UDP => write!(f, "UDP (17)"),
            IpProtocol::Custom(val) => write!(f, "{}", val),
        }
    }
}

/// IP Flags (the top 3 bits of the flags/fragment-offset word)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IpFlags {
    /// Reserved bit (must be 0)
    pub reserved: bool,
    /// Don't Fragment flag
    pub dont_fragment: bool,
    /// More Fragments flag
    pub more_fragments: bool,
}

impl IpFlags {
    /// No flags set
    pub const NONE: IpFlags = IpFlags {
        reserved: false,
        dont_fragment: false,
        more_fragments: false,
    };

    /// Convert to 3-bit value
    pub fn to_u8(self) -> u8 {
        let mut flags = 0u8;
        if self.reserved {
            flags |= 0b100;
        }
        if self.dont_fragment {
            flags |= 0b010;
        }
        if self.more_fragments {
            flags |= 0b001;
        }
        flags
    }

    /// Parse from 3-bit value
    pub fn from_u8(value: u8) -> Self {
        IpFlags {
            reserved: (value & 0b100) != 0,
            dont_fragment: (value & 0b010) != 0,
            more_fragments: (value & 0b001) != 0,
        }
    }
}

/// IPv4 header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv4Header {
    /// Version (always 4 for IPv4)
    pub version: u8,
    /// Internet Header Length in 32-bit words
    pub ihl: u8,
    /// Type of Service
    pub tos: u8,
    /// Total length (header + data) in bytes
    pub total_length: u16,
    /// Identification
    pub identification: u16,
    /// Flags
    pub flags: IpFlags,
    /// Fragment offset (in 8-byte blocks, 13 bits)
    pub fragment_offset: u16,
    /// Time to Live
    pub ttl: u8,
    /// Protocol
    pub protocol: IpProtocol,
    /// Header checksum
    pub checksum: u16,
    /// Source IP address
    pub source: Ipv4Addr,
    /// Destination IP address
    pub destination: Ipv4Addr,
}

impl Ipv4Header {
    /// Fixed header size (IHL 5)
    pub const SIZE: usize = 20;

    /// Default Time to Live
    pub const DEFAULT_TTL: u8 = 64;

    /// Create a header with the fixed defaults and an empty payload length
    pub fn new(source: Ipv4Addr, destination: Ipv4Addr, protocol: IpProtocol) -> Self {
        Ipv4Header {
            version: 4,
            ihl: 5,
            tos: 0,
            total_length: Self::SIZE as u16,
            identification: 0,
            flags: IpFlags::NONE,
            fragment_offset: 0,
            ttl: Self::DEFAULT_TTL,
            protocol,
            checksum: 0,
            source,
            destination,
        }
    }

    /// Set the Time to Live
    pub fn with_ttl(mut self, ttl: u8) -> Self {
        self.ttl = ttl;
        self
    }

    /// Header size in bytes as declared by the IHL field
    pub fn header_len(&self) -> usize {
        (self.ihl as usize) * 4
    }

    /// Serialize the 20 fixed header bytes exactly as the fields stand
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut buffer = BytesMut::with_capacity(Self::SIZE);

        buffer.put_u8((self.version << 4) | (self.ihl & 0x0F));
        buffer.put_u8(self.tos);
        buffer.put_u16(self.total_length);
        buffer.put_u16(self.identification);
        buffer.put_u16(((self.flags.to_u8() as u16) << 13) | (self.fragment_offset & 0x1FFF));
        buffer.put_u8(self.ttl);
        buffer.put_u8(self.protocol.to_u8());
        buffer.put_u16(self.checksum);
        buffer.put_slice(&self.source.octets());
        buffer.put_slice(&self.destination.octets());

        let mut header = [0u8; Self::SIZE];
        header.copy_from_slice(&buffer);
        header
    }

    /// The fixed header followed by `options`, as they appear on the wire
    fn raw_header(&self, options: &[u8]) -> Vec<u8> {
        let mut raw = Vec::with_capacity(Self::SIZE + options.len());
        raw.extend_from_slice(&self.to_bytes());
        raw.extend_from_slice(options);
        raw
    }

    /// Checksum over the header and its `options`, with the checksum field
    /// treated as zero
    pub fn compute_checksum(&self, options: &[u8]) -> u16 {
        let mut zeroed = *self;
        zeroed.checksum = 0;
        internet_checksum(&zeroed.raw_header(options))
    }

    /// Check the stored checksum over the header and its `options`.
    ///
    /// `options` must hold the `header_len() - 20` option bytes; pass an
    /// empty slice for an IHL 5 header.
    pub fn verify_checksum(&self, options: &[u8]) -> bool {
        validate_checksum(&self.raw_header(options))
    }
}

/// IPv4 packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ipv4Packet {
    pub header: Ipv4Header,
    /// Option bytes between the fixed header and the payload (decode only)
    pub options: Vec<u8>,
    /// Payload data, opaque to this layer
    pub payload: Vec<u8>,
}

impl Ipv4Packet {
    /// Fixed header size
    pub const HEADER_SIZE: usize = Ipv4Header::SIZE;

    /// Maximum value of the 16-bit total length field
    pub const MAX_TOTAL_LENGTH: usize = u16::MAX as usize;

    /// Create a packet with a consistent total length and checksum
    pub fn new(
        source: Ipv4Addr,
        destination: Ipv4Addr,
        protocol: IpProtocol,
        payload: Vec<u8>,
    ) -> Result<Self> {
        let mut header = Ipv4Header::new(source, destination, protocol);
        header.total_length = Self::total_length_for(payload.len())?;
        header.checksum = header.compute_checksum(&[]);

        Ok(Ipv4Packet {
            header,
            options: Vec::new(),
            payload,
        })
    }

    /// Create a packet carrying a UDP datagram
    pub fn udp(source: Ipv4Addr, destination: Ipv4Addr, payload: Vec<u8>) -> Result<Self> {
        Self::new(source, destination, IpProtocol::UDP, payload)
    }

    /// Total length for a payload of `payload_len` bytes, rejecting anything
    /// the 16-bit field cannot hold
    pub fn total_length_for(payload_len: usize) -> Result<u16> {
        let total = Self::HEADER_SIZE + payload_len;
        if total > Self::MAX_TOTAL_LENGTH {
            return Err(Error::format(format!(
                "IPv4 total length {} exceeds maximum {}",
                total,
                Self::MAX_TOTAL_LENGTH
            )));
        }
        Ok(total as u16)
    }

    /// Encode `header` followed by `payload`.
    ///
    /// Version, IHL, total length and checksum are derived here; the values
    /// stored in `header` for those fields are ignored.
    pub fn encode(header: &Ipv4Header, payload: &[u8]) -> Result<Vec<u8>> {
        let mut header = *header;
        header.version = 4;
        header.ihl = 5;
        header.total_length = Self::total_length_for(payload.len())?;
        header.checksum = header.compute_checksum(&[]);

        let mut buffer = BytesMut::with_capacity(header.total_length as usize);
        buffer.put_slice(&header.to_bytes());
        buffer.put_slice(payload);

        Ok(buffer.to_vec())
    }

    /// Convert the packet to bytes; options are dropped
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Self::encode(&self.header, &self.payload)
    }

    /// Parse an IPv4 packet from bytes
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < Self::HEADER_SIZE {
            return Err(Error::format(format!(
                "data too short for IPv4 header: {} bytes, need {}",
                data.len(),
                Self::HEADER_SIZE
            )));
        }

        let version = data[0] >> 4;
        if version != 4 {
            return Err(Error::format(format!("invalid IP version: {}", version)));
        }

        let ihl = data[0] & 0x0F;
        let header_len = (ihl as usize) * 4;
        if header_len < Self::HEADER_SIZE || header_len > data.len() {
            return Err(Error::format(format!(
                "invalid IP header length: IHL {} ({} bytes) with {} bytes available",
                ihl,
                header_len,
                data.len()
            )));
        }

        let total_length = u16::from_be_bytes([data[2], data[3]]);
        if total_length as usize > data.len() {
            return Err(Error::format(format!(
                "invalid total length: {} exceeds {} available bytes",
                total_length,
                data.len()
            )));
        }
        if (total_length as usize) < header_len {
            return Err(Error::format(format!(
                "invalid total length: {} is shorter than the {}-byte header",
                total_length, header_len
            )));
        }

        let flags_and_offset = u16::from_be_bytes([data[6], data[7]]);

        let header = Ipv4Header {
            version,
            ihl,
            tos: data[1],
            total_length,
            identification: u16::from_be_bytes([data[4], data[5]]),
            flags: IpFlags::from_u8((flags_and_offset >> 13) as u8),
            fragment_offset: flags_and_offset & 0x1FFF,
            ttl: data[8],
            protocol: IpProtocol::from_u8(data[9]),
            checksum: u16::from_be_bytes([data[10], data[11]]),
            source: Ipv4Addr::new(data[12], data[13], data[14], data[15]),
            destination: Ipv4Addr::new(data[16], data[17], data[18], data[19]),
        };

        Ok(Ipv4Packet {
            header,
            options: data[Self::HEADER_SIZE..header_len].to_vec(),
            payload: data[header_len..total_length as usize].to_vec(),
        })
    }

    /// Check whether the packet carries UDP
    pub fn is_udp(&self) -> bool {
        self.header.protocol == IpProtocol::UDP
    }

    /// Checksum the header would carry, options included
    pub fn compute_checksum(&self) -> u16 {
        self.header.compute_checksum(&self.options)
    }

    /// Check the stored checksum over the full header, options included
    pub fn verify_checksum(&self) -> bool {
        self.header.verify_checksum(&self.options)
    }

    /// Get the header size in bytes
    pub fn header_len(&self) -> usize {
        self.header.header_len()
    }

    /// Get the total packet size in bytes
    pub fn len(&self) -> usize {
        self.header.total_length as usize
    }

    /// A packet always has a header, so it is never empty
    pub fn is_empty(&self) -> bool {
        false
    }
}
