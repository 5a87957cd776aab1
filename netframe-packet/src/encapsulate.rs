//! Encapsulation: application bytes to a complete Ethernet frame
//!
//! Layers are built bottom-up. Each step's encoded bytes are moved into the
//! next layer as its opaque payload: UDP, then IPv4 (protocol 17), then
//! Ethernet (EtherType 0x0800).

use crate::application::ApplicationData;
use crate::config::EncapsulationConfig;
use crate::ethernet::{EtherType, EthernetFrame, EthernetHeader};
use crate::ip::{IpProtocol, Ipv4Header, Ipv4Packet};
use crate::udp::UdpDatagram;
use netframe_core::Result;

/// Wraps application data in UDP, IPv4 and Ethernet headers
///
/// # Examples
///
/// ```
/// use netframe_packet::{ApplicationData, EncapsulationConfig, Encapsulator};
///
/// let encapsulator = Encapsulator::new(EncapsulationConfig::default());
/// let frame = encapsulator
///     .encapsulate(&ApplicationData::from("Hello Teacher"))
///     .unwrap();
/// assert_eq!(frame.len(), 55);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Encapsulator {
    config: EncapsulationConfig,
}

impl Encapsulator {
    pub fn new(config: EncapsulationConfig) -> Self {
        Encapsulator { config }
    }

    pub fn config(&self) -> &EncapsulationConfig {
        &self.config
    }

    /// Build the complete frame
    ///
    /// # Errors
    ///
    /// Returns a format error when the payload would push the UDP length or
    /// the IPv4 total length past 65535. Nothing is returned in that case.
    pub fn encapsulate(&self, data: &ApplicationData) -> Result<Vec<u8>> {
        let config = &self.config;

        let segment = UdpDatagram::encode(config.src_port, config.dst_port, data.as_bytes())?;

        let ip_header = Ipv4Header::new(config.src_ip, config.dst_ip, IpProtocol::UDP);
        let packet = Ipv4Packet::encode(&ip_header, &segment)?;

        let eth_header = EthernetHeader::new(config.dst_mac, config.src_mac, EtherType::IPv4);
        Ok(EthernetFrame::encode(&eth_header, &packet))
    }

    /// Build the frame and hand it to `tx`
    ///
    /// `tx` is only called once the whole frame has been built.
    pub fn send<F>(&self, data: &ApplicationData, mut tx: F) -> Result<()>
    where
        F: FnMut(&[u8]) -> Result<()>,
    {
        let frame = self.encapsulate(data)?;
        tx(&frame)
    }
}

/// Encapsulate `payload` with `config`
pub fn encapsulate(payload: &[u8], config: &EncapsulationConfig) -> Result<Vec<u8>> {
    Encapsulator::new(*config).encapsulate(&ApplicationData::from(payload))
}
