//! Decapsulation: raw frame bytes back to the layered structure
//!
//! Each layer is decoded and its tag checked before descending. The first
//! failure aborts the whole pipeline; a [`DecodedPacket`] is only produced
//! when every layer decoded.

use crate::application::ApplicationData;
use crate::ethernet::{EtherType, EthernetFrame};
use crate::ip::{IpProtocol, Ipv4Packet};
use crate::udp::UdpDatagram;
use netframe_core::{Error, Result};

/// Every layer of a successfully decoded frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPacket {
    pub ethernet: EthernetFrame,
    pub ipv4: Ipv4Packet,
    pub udp: UdpDatagram,
    pub application: ApplicationData,
}

/// Decapsulation switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecapsulateOptions {
    /// Also check the IPv4 header checksum, options included
    pub verify_checksum: bool,
}

/// Strips Ethernet, IPv4 and UDP headers in order
#[derive(Debug, Clone, Default)]
pub struct Decapsulator {
    options: DecapsulateOptions,
}

impl Decapsulator {
    pub fn new(options: DecapsulateOptions) -> Self {
        Decapsulator { options }
    }

    /// Enable or disable IPv4 header checksum verification
    pub fn with_checksum_verification(mut self, enabled: bool) -> Self {
        self.options.verify_checksum = enabled;
        self
    }

    pub fn options(&self) -> DecapsulateOptions {
        self.options
    }

    /// Decode `data` as an Ethernet II frame carrying IPv4 and UDP
    ///
    /// # Errors
    ///
    /// - [`Error::Format`] when any header is truncated or a length field is
    ///   inconsistent with the buffer
    /// - [`Error::ProtocolMismatch`] when the EtherType is not IPv4 or the IP
    ///   protocol is not UDP
    /// - [`Error::ChecksumMismatch`] when verification is enabled and the IPv4
    ///   header checksum is wrong
    pub fn decapsulate(&self, data: &[u8]) -> Result<DecodedPacket> {
        let ethernet = EthernetFrame::from_bytes(data)?;
        if !ethernet.is_ipv4() {
            return Err(Error::protocol_mismatch(
                "EtherType",
                format!("IPv4 (0x{:04X})", EtherType::IPv4.to_u16()),
                format!("0x{:04X}", ethernet.header.ethertype.to_u16()),
            ));
        }

        let ipv4 = Ipv4Packet::from_bytes(&ethernet.payload)?;
        if self.options.verify_checksum && !ipv4.verify_checksum() {
            return Err(Error::ChecksumMismatch {
                expected: ipv4.compute_checksum(),
                found: ipv4.header.checksum,
            });
        }
        if !ipv4.is_udp() {
            return Err(Error::protocol_mismatch(
                "Protocol",
                format!("UDP ({})", IpProtocol::UDP.to_u8()),
                ipv4.header.protocol.to_u8().to_string(),
            ));
        }

        let udp = UdpDatagram::from_bytes(&ipv4.payload)?;
        let application = ApplicationData::new(udp.payload.clone());

        Ok(DecodedPacket {
            ethernet,
            ipv4,
            udp,
            application,
        })
    }

}

/// Decapsulate `data` with default options (checksum not verified)
pub fn decapsulate(data: &[u8]) -> Result<DecodedPacket> {
    Decapsulator::default().decapsulate(data)
}
