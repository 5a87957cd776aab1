//! End-to-end properties of the encapsulation and decapsulation pipelines

use netframe_core::{parse_ipv4, parse_mac, Error, MacAddress};
use netframe_packet::checksum::checksum_accumulate;
use netframe_packet::{
    decapsulate, encapsulate, ApplicationData, Decapsulator, EncapsulationConfig, Encapsulator,
    EtherType, EthernetFrame, IpProtocol, Ipv4Packet, UdpDatagram, UdpPort,
};
use std::net::Ipv4Addr;

fn configs() -> Vec<EncapsulationConfig> {
    vec![
        EncapsulationConfig::default(),
        EncapsulationConfig::default()
            .with_ports(0, 65535)
            .with_ips(Ipv4Addr::UNSPECIFIED, Ipv4Addr::BROADCAST)
            .with_macs(MacAddress::ZERO, MacAddress::BROADCAST),
        EncapsulationConfig::default()
            .with_ports(53, 5353)
            .with_ips(Ipv4Addr::new(10, 1, 2, 3), Ipv4Addr::new(172, 16, 254, 1)),
    ]
}

fn payloads() -> Vec<Vec<u8>> {
    vec![
        Vec::new(),
        b"Hello Teacher".to_vec(),
        vec![0xFF, 0x00, 0xFE],
        (0..=255u8).cycle().take(1500).collect(),
    ]
}

#[test]
fn roundtrip_recovers_payload() {
    for config in configs() {
        for payload in payloads() {
            let frame = encapsulate(&payload, &config).unwrap();
            let packet = decapsulate(&frame).unwrap();

            assert_eq!(packet.application.as_bytes(), &payload[..]);
            assert_eq!(packet.udp.header.source_port, config.src_port);
            assert_eq!(packet.udp.header.destination_port, config.dst_port);
            assert_eq!(packet.ipv4.header.source, config.src_ip);
            assert_eq!(packet.ipv4.header.destination, config.dst_ip);
            assert_eq!(packet.ethernet.header.source, config.src_mac);
            assert_eq!(packet.ethernet.header.destination, config.dst_mac);
        }
    }
}

#[test]
fn length_fields_are_consistent() {
    for payload in payloads() {
        let frame = encapsulate(&payload, &EncapsulationConfig::default()).unwrap();
        let packet = decapsulate(&frame).unwrap();

        assert_eq!(packet.udp.header.length as usize, 8 + payload.len());
        assert_eq!(packet.ipv4.header.total_length as usize, 20 + 8 + payload.len());
        assert_eq!(frame.len(), 14 + 20 + 8 + payload.len());
    }
}

#[test]
fn encoded_header_checksum_sums_to_ffff() {
    let frame = encapsulate(b"Hello Teacher", &EncapsulationConfig::default()).unwrap();
    assert_eq!(checksum_accumulate(&frame[14..34]), 0xFFFF);

    let packet = decapsulate(&frame).unwrap();
    assert!(packet.ipv4.verify_checksum());
}

#[test]
fn hello_teacher_scenario() {
    let frame = Encapsulator::new(EncapsulationConfig::default())
        .encapsulate(&ApplicationData::from("Hello Teacher"))
        .unwrap();
    assert_eq!(frame.len(), 55);

    let packet = Decapsulator::default()
        .with_checksum_verification(true)
        .decapsulate(&frame)
        .unwrap();
    assert_eq!(packet.application.as_text(), "Hello Teacher");
    assert_eq!(packet.udp.header.source_port, UdpPort(12345));
    assert_eq!(packet.udp.header.destination_port, UdpPort(80));
    assert_eq!(packet.ipv4.header.protocol, IpProtocol::UDP);
    assert_eq!(packet.ethernet.header.ethertype, EtherType::IPv4);
}

#[test]
fn layers_compose_by_hand() {
    // Building each layer separately gives the same bytes as the pipeline
    let config = EncapsulationConfig::default();
    let udp = UdpDatagram::new(config.src_port, config.dst_port, b"abc".to_vec())
        .unwrap()
        .to_bytes()
        .unwrap();
    let ip = Ipv4Packet::udp(config.src_ip, config.dst_ip, udp)
        .unwrap()
        .to_bytes()
        .unwrap();
    let frame = EthernetFrame::ipv4(config.dst_mac, config.src_mac, ip).to_bytes();

    assert_eq!(frame, encapsulate(b"abc", &config).unwrap());
}

#[test]
fn rejection_cases() {
    let frame = encapsulate(b"x", &EncapsulationConfig::default()).unwrap();

    assert!(matches!(
        EthernetFrame::from_bytes(&frame[..13]),
        Err(Error::Format(_))
    ));

    let mut bad_version = frame.clone();
    bad_version[14] = 0x55;
    assert!(matches!(decapsulate(&bad_version), Err(Error::Format(_))));

    let mut arp = frame.clone();
    arp[12..14].copy_from_slice(&[0x08, 0x06]);
    assert!(matches!(
        decapsulate(&arp),
        Err(Error::ProtocolMismatch { .. })
    ));

    let mut icmp = frame;
    icmp[23] = 1;
    assert!(matches!(
        decapsulate(&icmp),
        Err(Error::ProtocolMismatch { .. })
    ));
}

#[test]
fn oversized_payload_is_rejected_not_truncated() {
    let config = EncapsulationConfig::default();
    assert!(encapsulate(&vec![0u8; 65507], &config).is_ok());
    assert!(matches!(
        encapsulate(&vec![0u8; 65508], &config),
        Err(Error::Format(_))
    ));
}

#[test]
fn address_text_roundtrip() {
    let config = EncapsulationConfig::default();
    assert_eq!(parse_mac(&config.src_mac.to_string()).unwrap(), config.src_mac);
    assert_eq!(parse_mac(&config.dst_mac.to_string()).unwrap(), config.dst_mac);
    assert_eq!(parse_ipv4(&config.src_ip.to_string()).unwrap(), config.src_ip);
    assert_eq!(parse_ipv4(&config.dst_ip.to_string()).unwrap(), config.dst_ip);
}
