//! Layered frame codec for netframe
//!
//! This crate encodes application bytes into an Ethernet II / IPv4 / UDP
//! frame and decodes such frames back into their layers, entirely in memory.
//! The "wire" is a byte buffer.
//!
//! # Architecture
//!
//! - [`ethernet`] - Ethernet II header (14 bytes)
//! - [`ip`] - IPv4 fixed header (20 bytes) with header checksum
//! - [`udp`] - UDP header (8 bytes), checksum left at zero
//! - [`checksum`] - Internet checksum (RFC 1071)
//! - [`application`] - application payload with a text view
//! - [`encapsulate`] / [`decapsulate`] - the two pipelines
//!
//! The layer codecs know nothing about each other; the pipelines compose
//! them by explicit sequencing and pass owned byte buffers between stages.
//!
//! # Quick Start
//!
//! ```rust
//! use netframe_packet::{decapsulate, encapsulate, EncapsulationConfig};
//!
//! let config = EncapsulationConfig::default();
//! let frame = encapsulate(b"Hello Teacher", &config).unwrap();
//! assert_eq!(frame.len(), 55);
//!
//! let packet = decapsulate(&frame).unwrap();
//! assert_eq!(packet.application.as_text(), "Hello Teacher");
//! assert_eq!(packet.udp.header.destination_port.0, 80);
//! ```
//!
//! # Errors
//!
//! Every operation either returns a complete value or a
//! [`netframe_core::Error`]: `Format` for truncated or inconsistent input,
//! `ProtocolMismatch` when a layer tag names the wrong next layer.

pub mod application;
pub mod checksum;
pub mod config;
pub mod decapsulate;
pub mod encapsulate;
pub mod ethernet;
pub mod ip;
pub mod udp;

// Re-export commonly used types for convenience
pub use application::ApplicationData;
pub use checksum::{internet_checksum, validate_checksum};
pub use config::EncapsulationConfig;
pub use decapsulate::{decapsulate, DecapsulateOptions, Decapsulator, DecodedPacket};
pub use encapsulate::{encapsulate, Encapsulator};
pub use ethernet::{EtherType, EthernetFrame, EthernetHeader};
pub use ip::{IpFlags, IpProtocol, Ipv4Header, Ipv4Packet};
pub use netframe_core::{Error, MacAddress, Result};
pub use udp::{UdpDatagram, UdpHeader, UdpPort};
