use crate::craft::checksums::internet_checksum;
use crate::packet::classify::EchoReplyLayout;
use crate::packet::views::IcmpHeaderMut;

/// Rewrites a classified Echo Reply in place: tampers with the payload and
/// recomputes the ICMP checksum over header and payload.
///
/// Returns the checksum written into the packet, or `None` (leaving the packet
/// untouched) if `layout` does not describe `packet`.
pub fn mutate(packet: &mut [u8], layout: EchoReplyLayout) -> Option<u16> {
    if !layout.fits(packet.len()) {
        return None;
    }

    tamper_payload(&mut packet[layout.payload_offset..]);
    recompute_icmp_checksum(&mut packet[layout.icmp_header_offset..])
}

/// Increments the first payload byte, wrapping at 0xff. No other byte is touched.
pub fn tamper_payload(payload: &mut [u8]) {
    if let Some(first) = payload.first_mut() {
        *first = first.wrapping_add(1);
    }
}

/// Zeroes the checksum field of `icmp_segment` (ICMP header followed by its payload),
/// recomputes it over the whole segment, and writes it back in network byte order.
///
/// Returns the checksum written, or `None` if the segment is shorter than an ICMP
/// header, in which case nothing is written.
pub fn recompute_icmp_checksum(icmp_segment: &mut [u8]) -> Option<u16> {
    IcmpHeaderMut::new(icmp_segment)?.set_checksum(0);
    let checksum = internet_checksum(icmp_segment);
    IcmpHeaderMut::new(icmp_segment)?.set_checksum(checksum);
    Some(checksum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::classify::{classify, Classification};

    #[rustfmt::skip]
    fn echo_reply(payload: &[u8]) -> Vec<u8> {
        let mut packet = vec![
            // ipv4 header
            0x45, 0x00, 0x00, 0x00,     // version, header length, length (not checked)
            0x1c, 0x46, 0x40, 0x00,     // identification, fragmentation
            0x40, 0x01, 0xb1, 0xe6,     // ttl, protocol, header checksum
            10, 0, 0, 2,                // source
            10, 0, 0, 1,                // dest
            // icmp header
            0x00, 0x00, 0x00, 0x00,     // type, code, checksum (set below)
            0x0b, 0xad, 0x00, 0x2a,     // identifier, sequence
        ];
        packet.extend_from_slice(payload);
        let checksum = internet_checksum(&packet[20..]);
        packet[22..24].copy_from_slice(&checksum.to_be_bytes());
        packet
    }

    fn layout_of(packet: &[u8]) -> EchoReplyLayout {
        match classify(packet) {
            Classification::Matched(layout) => layout,
            Classification::NotMatched => panic!("expected a match"),
        }
    }

    #[test]
    fn test_tamper_payload_increments_first_byte_only() {
        let mut payload = [0x05, 0x05, 0x05];
        tamper_payload(&mut payload);
        assert_eq!(payload, [0x06, 0x05, 0x05]);
    }

    #[test]
    fn test_tamper_payload_wraps_around() {
        let mut payload = [0xff, 0x10];
        tamper_payload(&mut payload);
        assert_eq!(payload, [0x00, 0x10]);
    }

    #[test]
    fn test_tamper_empty_payload_is_noop() {
        let mut payload: [u8; 0] = [];
        tamper_payload(&mut payload);
    }

    #[test]
    fn test_recompute_reproduces_valid_checksum() {
        let packet = echo_reply(b"abcdefgh");
        let original = u16::from_be_bytes([packet[22], packet[23]]);
        let mut segment = packet[20..].to_vec();
        assert_eq!(recompute_icmp_checksum(&mut segment), Some(original));
        assert_eq!(&segment[..], &packet[20..]);
    }

    #[test]
    fn test_recompute_on_truncated_segment_is_noop() {
        let mut segment = [0x00, 0x00, 0xaa, 0xbb];
        assert_eq!(recompute_icmp_checksum(&mut segment), None);
        assert_eq!(segment, [0x00, 0x00, 0xaa, 0xbb]);
    }

    #[test]
    fn test_recompute_distinguishes_zero_checksum_from_failure() {
        // this segment sums to 0xffff, so its checksum is a genuine 0x0000
        let mut segment = [0x00, 0x00, 0x00, 0x00, 0x12, 0x34, 0xed, 0xcb];
        assert_eq!(recompute_icmp_checksum(&mut segment), Some(0x0000));
        assert_eq!(&segment[2..4], &[0x00, 0x00]);
    }

    #[test]
    fn test_mutation_effect() {
        let mut packet = echo_reply(&[0x05, 0x61, 0x62, 0x63]);
        let layout = layout_of(&packet);

        let written = mutate(&mut packet, layout).unwrap();

        assert_eq!(packet[28], 0x06);
        let mut expected_segment = packet[20..].to_vec();
        expected_segment[2..4].copy_from_slice(&[0, 0]);
        let expected = internet_checksum(&expected_segment);
        assert_eq!(written, expected);
        assert_eq!(u16::from_be_bytes([packet[22], packet[23]]), expected);
        assert_eq!(internet_checksum(&packet[20..]), 0);
    }

    #[test]
    fn test_mutation_wraps_first_byte() {
        let mut packet = echo_reply(&[0xff, 0x01]);
        let layout = layout_of(&packet);
        mutate(&mut packet, layout).unwrap();
        assert_eq!(packet[28], 0x00);
        assert_eq!(packet[29], 0x01);
        assert_eq!(internet_checksum(&packet[20..]), 0);
    }

    #[test]
    fn test_mutation_odd_payload() {
        let mut packet = echo_reply(&[0x10, 0x20, 0x30]);
        let layout = layout_of(&packet);
        mutate(&mut packet, layout).unwrap();
        assert_eq!(internet_checksum(&packet[20..]), 0);
    }

    #[test]
    fn test_no_collateral_mutation() {
        let payload: Vec<u8> = (0..=255).collect();
        let original = echo_reply(&payload);
        let mut packet = original.clone();
        let layout = layout_of(&packet);
        mutate(&mut packet, layout).unwrap();

        let changed: Vec<usize> = (0..packet.len())
            .filter(|&i| packet[i] != original[i])
            .collect();
        assert!(changed.iter().all(|i| [22, 23, 28].contains(i)), "{changed:?}");
        assert!(changed.contains(&28));
    }

    #[test]
    fn test_ip_header_untouched_and_not_summed() {
        let mut packet_a = echo_reply(b"same payload");
        let mut packet_b = packet_a.clone();
        // different IP header, including its own checksum
        packet_b[8] = 0x01;
        packet_b[10..12].copy_from_slice(&[0xde, 0xad]);
        packet_b[12..16].copy_from_slice(&[192, 168, 7, 7]);
        let header_b = packet_b[..20].to_vec();

        let layout = layout_of(&packet_a);
        let checksum_a = mutate(&mut packet_a, layout).unwrap();
        let checksum_b = mutate(&mut packet_b, layout).unwrap();

        assert_eq!(checksum_a, checksum_b);
        assert_eq!(&packet_b[..20], &header_b[..]);
    }

    #[test]
    fn test_mismatched_layout_leaves_packet_untouched() {
        let packet = echo_reply(b"abc");
        let layout = layout_of(&packet);

        let mut shorter = packet[..30].to_vec();
        let before = shorter.clone();
        assert_eq!(mutate(&mut shorter, layout), None);
        assert_eq!(shorter, before);
    }

    #[test]
    fn test_overflowing_layout_is_rejected() {
        let mut packet = [0u8; 40];
        let layout = EchoReplyLayout {
            ip_header_offset: usize::MAX,
            icmp_header_offset: 19,
            payload_offset: 27,
            payload_len: 13,
        };
        assert_eq!(mutate(&mut packet, layout), None);
        assert_eq!(packet, [0u8; 40]);

        let layout = EchoReplyLayout {
            ip_header_offset: usize::MAX - 23,
            icmp_header_offset: usize::MAX - 3,
            payload_offset: 27,
            payload_len: 13,
        };
        assert_eq!(mutate(&mut packet, layout), None);
        assert_eq!(packet, [0u8; 40]);
    }

    #[test]
    fn test_checksum_covers_trailing_bytes() {
        // trailing bytes after the echo data are summed like any other payload byte
        let mut with_padding = echo_reply(&[0x01, 0x00, 0x00, 0x00, 0xaa]);
        let layout = layout_of(&with_padding);
        let checksum = mutate(&mut with_padding, layout).unwrap();

        let mut segment = with_padding[20..].to_vec();
        segment[2..4].copy_from_slice(&[0, 0]);
        assert_eq!(checksum, internet_checksum(&segment));
        assert_ne!(checksum, internet_checksum(&segment[..segment.len() - 1]));
    }
}
