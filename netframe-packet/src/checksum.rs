//! Internet checksum (RFC 1071) used by the IPv4 header
//!
//! The data is treated as a sequence of big-endian 16-bit words, summed into a
//! 32-bit accumulator with the carries folded back in, and complemented.

/// Calculates the Internet Checksum as defined in RFC 1071.
///
/// A trailing odd byte is padded with a zero low byte. The IPv4 codec only
/// ever passes its 20-byte header, so the padding path exists for generality.
///
/// # Examples
///
/// ```
/// use netframe_packet::checksum::internet_checksum;
///
/// let header = [
///     0x45, 0x00, 0x00, 0x73, 0x00, 0x00, 0x40, 0x00, 0x40, 0x11,
///     0x00, 0x00, 0xC0, 0xA8, 0x00, 0x01, 0xC0, 0xA8, 0x00, 0xC7,
/// ];
/// assert_eq!(internet_checksum(&header), 0xB861);
/// ```
pub fn internet_checksum(data: &[u8]) -> u16 {
    !(checksum_accumulate(data) as u16)
}

/// Validates data that already carries its checksum.
///
/// Summing a header together with a correct checksum yields `0xFFFF`, whose
/// complement is zero.
pub fn validate_checksum(data: &[u8]) -> bool {
    checksum_accumulate(data) == 0xFFFF
}

/// Returns the folded one's-complement sum before the final complement.
pub fn checksum_accumulate(data: &[u8]) -> u32 {
    let mut sum: u32 = 0;

    let mut chunks = data.chunks_exact(2);
    for chunk in &mut chunks {
        sum += u16::from_be_bytes([chunk[0], chunk[1]]) as u32;
    }

    if let Some(&byte) = chunks.remainder().first() {
        sum += (byte as u32) << 8;
    }

    while (sum >> 16) != 0 {
        sum = (sum & 0xFFFF) + (sum >> 16);
    }

    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internet_checksum_empty() {
        assert_eq!(internet_checksum(&[]), 0xFFFF);
    }

    #[test]
    fn test_rfc1071_sample() {
        // Sample words from RFC 1071 section 3
        let data = [0x00, 0x01, 0xf2, 0x03, 0xf4, 0xf5, 0xf6, 0xf7];
        assert_eq!(checksum_accumulate(&data), 0xDDF2);
        assert_eq!(internet_checksum(&data), 0x220D);
    }

    #[test]
    fn test_known_ipv4_header() {
        // 192.168.1.100 -> 192.168.1.1, UDP, total length 41
        let header = [
            0x45, 0x00, 0x00, 0x29, 0x00, 0x00, 0x00, 0x00, 0x40, 0x11, 0x00, 0x00, 0xC0, 0xA8,
            0x01, 0x64, 0xC0, 0xA8, 0x01, 0x01,
        ];
        assert_eq!(internet_checksum(&header), 0xF70E);
    }

    #[test]
    fn test_odd_length_pads_low_byte() {
        assert_eq!(checksum_accumulate(&[0x12]), 0x1200);
        assert_eq!(checksum_accumulate(&[0x00, 0x01, 0x02]), 0x0201);
    }

    #[test]
    fn test_carry_folding() {
        // 0xFFFF + 0x0002 = 0x10001 -> 0x0002
        assert_eq!(checksum_accumulate(&[0xFF, 0xFF, 0x00, 0x02]), 0x0002);
    }

    #[test]
    fn test_self_verification() {
        let mut header = [
            0x45, 0x00, 0x00, 0x29, 0x00, 0x00, 0x00, 0x00, 0x40, 0x11, 0x00, 0x00, 0xC0, 0xA8,
            0x01, 0x64, 0xC0, 0xA8, 0x01, 0x01,
        ];
        let checksum = internet_checksum(&header);
        header[10..12].copy_from_slice(&checksum.to_be_bytes());

        assert_eq!(checksum_accumulate(&header), 0xFFFF);
        assert!(validate_checksum(&header));

        header[15] ^= 0x01;
        assert!(!validate_checksum(&header));
    }
}
