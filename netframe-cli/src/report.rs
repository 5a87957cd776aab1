//! Layer-by-layer console narration
//!
//! Everything here renders header fields that the codecs already expose; no
//! decoding happens in this module.

use netframe_packet::{
    ApplicationData, DecodedPacket, EncapsulationConfig, EthernetFrame, Ipv4Packet, UdpDatagram,
};
use std::io::{self, Write};

const RULE: &str = "========================================";

/// Print a boxed section title
pub fn write_banner<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "{RULE}")?;
    writeln!(out, "{title:^40}")?;
    writeln!(out, "{RULE}")?;
    writeln!(out)
}

/// Describe each layer added while encapsulating `data` into `frame`
pub fn write_encapsulation<W: Write>(
    out: &mut W,
    config: &EncapsulationConfig,
    data: &ApplicationData,
    frame: &[u8],
) -> io::Result<()> {
    let payload_len = data.len();
    let udp_len = UdpDatagram::HEADER_SIZE + payload_len;
    let ip_len = Ipv4Packet::HEADER_SIZE + udp_len;

    writeln!(
        out,
        "Application Layer - Data: {} ({} bytes)",
        data.as_text(),
        payload_len
    )?;

    writeln!(out, "\nTransport Layer (UDP):")?;
    writeln!(out, "  Source Port: {}", config.src_port)?;
    writeln!(out, "  Dest Port: {}", config.dst_port)?;
    writeln!(
        out,
        "  UDP Length: {} bytes (header: {} + data: {})",
        udp_len,
        UdpDatagram::HEADER_SIZE,
        payload_len
    )?;

    writeln!(out, "\nNetwork Layer (IPv4):")?;
    writeln!(out, "  Source IP: {}", config.src_ip)?;
    writeln!(out, "  Dest IP: {}", config.dst_ip)?;
    writeln!(out, "  Protocol: UDP (17)")?;
    writeln!(
        out,
        "  Total Length: {} bytes (header: {} + UDP: {})",
        ip_len,
        Ipv4Packet::HEADER_SIZE,
        udp_len
    )?;

    writeln!(out, "\nData Link Layer (Ethernet II):")?;
    writeln!(out, "  Source MAC: {}", config.src_mac)?;
    writeln!(out, "  Dest MAC: {}", config.dst_mac)?;
    writeln!(out, "  EtherType: 0x0800 (IPv4)")?;
    writeln!(
        out,
        "  Frame Size: {} bytes (header: {} + IP: {})",
        frame.len(),
        EthernetFrame::HEADER_SIZE,
        ip_len
    )
}

/// Describe every layer of a decoded frame, top-down
pub fn write_decapsulation<W: Write>(
    out: &mut W,
    total_bytes: usize,
    packet: &DecodedPacket,
) -> io::Result<()> {
    writeln!(out, "=== Starting Decapsulation ===")?;
    writeln!(out, "Total bytes received: {}\n", total_bytes)?;

    let eth = &packet.ethernet.header;
    writeln!(out, "--- Data Link Layer (Ethernet II) ---")?;
    writeln!(out, "  Dest MAC: {}", eth.destination)?;
    writeln!(out, "  Source MAC: {}", eth.source)?;
    writeln!(
        out,
        "  EtherType: 0x{:04X} ({})",
        eth.ethertype.to_u16(),
        eth.ethertype
    )?;

    let ip = &packet.ipv4.header;
    writeln!(out, "\n--- Network Layer (IPv4) ---")?;
    writeln!(out, "  Version: {}", ip.version)?;
    writeln!(out, "  Header Length: {} bytes", ip.header_len())?;
    writeln!(out, "  Total Length: {} bytes", ip.total_length)?;
    writeln!(out, "  TTL: {}", ip.ttl)?;
    writeln!(out, "  Protocol: {}", ip.protocol)?;
    writeln!(
        out,
        "  Header Checksum: 0x{:04X} ({})",
        ip.checksum,
        if packet.ipv4.verify_checksum() {
            "valid"
        } else {
            "invalid"
        }
    )?;
    writeln!(out, "  Source IP: {}", ip.source)?;
    writeln!(out, "  Dest IP: {}", ip.destination)?;

    let udp = &packet.udp.header;
    writeln!(out, "\n--- Transport Layer (UDP) ---")?;
    writeln!(out, "  Source Port: {}", udp.source_port)?;
    writeln!(out, "  Dest Port: {}", udp.destination_port)?;
    writeln!(out, "  UDP Length: {} bytes", udp.length)?;
    writeln!(out, "  Checksum: 0x{:04X}", udp.checksum)?;

    writeln!(out, "\n--- Application Layer ---")?;
    writeln!(out, "  Data: {}", packet.application.as_text())?;
    writeln!(out, "  Size: {} bytes", packet.application.len())?;

    writeln!(out, "\n=== Decapsulation Complete ===")
}

#[cfg(test)]
mod tests {
    use super::*;
    use netframe_packet::{decapsulate, internet_checksum, Encapsulator};

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_encapsulation_report() {
        let config = EncapsulationConfig::default();
        let data = ApplicationData::from("Hello Teacher");
        let frame = Encapsulator::new(config).encapsulate(&data).unwrap();

        let text = render(|out| write_encapsulation(out, &config, &data, &frame));
        assert!(text.contains("Application Layer - Data: Hello Teacher (13 bytes)"));
        assert!(text.contains("UDP Length: 21 bytes (header: 8 + data: 13)"));
        assert!(text.contains("Total Length: 41 bytes (header: 20 + UDP: 21)"));
        assert!(text.contains("Frame Size: 55 bytes (header: 14 + IP: 41)"));
        assert!(text.contains("Dest MAC: 66:77:88:99:aa:bb"));
    }

    #[test]
    fn test_decapsulation_report() {
        let data = ApplicationData::from("Hello Teacher");
        let frame = Encapsulator::default().encapsulate(&data).unwrap();
        let packet = decapsulate(&frame).unwrap();

        let text = render(|out| write_decapsulation(out, frame.len(), &packet));
        assert!(text.contains("Total bytes received: 55"));
        assert!(text.contains("EtherType: 0x0800 (IPv4)"));
        assert!(text.contains("Protocol: UDP (17)"));
        assert!(text.contains("Header Checksum: 0xF70E (valid)"));
        assert!(text.contains("Source IP: 192.168.1.100"));
        assert!(text.contains("Source Port: 12345"));
        assert!(text.contains("Data: Hello Teacher"));
    }

    #[test]
    fn test_decapsulation_report_with_ip_options() {
        let mut frame = Encapsulator::default()
            .encapsulate(&ApplicationData::from("opts"))
            .unwrap();
        frame[14] = 0x46;
        frame.splice(34..34, [0x94, 0x04, 0x00, 0x00]);
        frame[16..18].copy_from_slice(&36u16.to_be_bytes());
        frame[24..26].copy_from_slice(&[0, 0]);
        let checksum = internet_checksum(&frame[14..38]);
        frame[24..26].copy_from_slice(&checksum.to_be_bytes());

        let packet = decapsulate(&frame).unwrap();
        let text = render(|out| write_decapsulation(out, frame.len(), &packet));
        assert!(text.contains("Header Length: 24 bytes"));
        assert!(text.contains(&format!("Header Checksum: 0x{:04X} (valid)", checksum)));
    }

    #[test]
    fn test_banner() {
        let text = render(|out| write_banner(out, "Demo"));
        assert_eq!(text.lines().count(), 4);
        assert!(text.lines().nth(1).unwrap().trim() == "Demo");
    }
}
