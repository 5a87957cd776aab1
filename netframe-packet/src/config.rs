//! Addressing used when encapsulating application data

use netframe_core::MacAddress;
use std::net::Ipv4Addr;

use crate::udp::UdpPort;

/// Default source port
pub const DEFAULT_SRC_PORT: u16 = 12345;

/// Default destination port
pub const DEFAULT_DST_PORT: u16 = 80;

/// Default source address (192.168.1.100)
pub const DEFAULT_SRC_IP: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 100);

/// Default destination address (192.168.1.1)
pub const DEFAULT_DST_IP: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 1);

/// Default source MAC (00:11:22:33:44:55)
pub const DEFAULT_SRC_MAC: MacAddress = MacAddress([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);

/// Default destination MAC (66:77:88:99:aa:bb)
pub const DEFAULT_DST_MAC: MacAddress = MacAddress([0x66, 0x77, 0x88, 0x99, 0xAA, 0xBB]);

/// Ports and addresses for each layer of an encapsulated frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncapsulationConfig {
    pub src_port: UdpPort,
    pub dst_port: UdpPort,
    pub src_ip: Ipv4Addr,
    pub dst_ip: Ipv4Addr,
    pub src_mac: MacAddress,
    pub dst_mac: MacAddress,
}

impl Default for EncapsulationConfig {
    fn default() -> Self {
        Self {
            src_port: UdpPort(DEFAULT_SRC_PORT),
            dst_port: UdpPort(DEFAULT_DST_PORT),
            src_ip: DEFAULT_SRC_IP,
            dst_ip: DEFAULT_DST_IP,
            src_mac: DEFAULT_SRC_MAC,
            dst_mac: DEFAULT_DST_MAC,
        }
    }
}

impl EncapsulationConfig {
    pub fn with_ports(mut self, src: u16, dst: u16) -> Self {
        self.src_port = UdpPort(src);
        self.dst_port = UdpPort(dst);
        self
    }

    pub fn with_ips(mut self, src: Ipv4Addr, dst: Ipv4Addr) -> Self {
        self.src_ip = src;
        self.dst_ip = dst;
        self
    }

    pub fn with_macs(mut self, src: MacAddress, dst: MacAddress) -> Self {
        self.src_mac = src;
        self.dst_mac = dst;
        self
    }
}
