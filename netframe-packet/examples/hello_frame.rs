//! Example: encapsulating and decoding a message
//!
//! Builds a complete Ethernet/IPv4/UDP frame around "Hello Teacher" with the
//! default addressing, prints the header bytes, and decodes it again.

use netframe_packet::{decapsulate, ApplicationData, EncapsulationConfig, Encapsulator};

fn main() {
    let encapsulator = Encapsulator::new(EncapsulationConfig::default());

    let frame = encapsulator
        .encapsulate(&ApplicationData::from("Hello Teacher"))
        .expect("Failed to build frame");

    println!("Frame built successfully!");
    println!("Total size: {} bytes", frame.len());
    println!("Ethernet header: {:02X?}", &frame[..14]);
    println!("IPv4 header: {:02X?}", &frame[14..34]);
    println!("UDP header: {:02X?}", &frame[34..42]);

    let packet = decapsulate(&frame).expect("Failed to decode frame");
    println!(
        "UDP {} -> {}, payload: {}",
        packet.udp.header.source_port,
        packet.udp.header.destination_port,
        packet.application.as_text()
    );
}
