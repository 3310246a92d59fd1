use crate::packet::views::{
    IcmpHeaderView, Ipv4HeaderView, ICMP_ECHO_REPLY, ICMP_HEADER_LEN, IPPROTO_ICMP,
    IPV4_HEADER_LEN,
};

/// Location of the parts of an ICMP Echo Reply inside its packet buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EchoReplyLayout {
    pub ip_header_offset: usize,
    pub icmp_header_offset: usize,
    pub payload_offset: usize,
    pub payload_len: usize,
}

impl EchoReplyLayout {
    /// Checks that the layout describes a packet of exactly `packet_len` bytes
    /// with a non-empty payload.
    pub fn fits(&self, packet_len: usize) -> bool {
        self.ip_header_offset.checked_add(IPV4_HEADER_LEN) == Some(self.icmp_header_offset)
            && self.icmp_header_offset.checked_add(ICMP_HEADER_LEN) == Some(self.payload_offset)
            && self.payload_len > 0
            && self.payload_offset.checked_add(self.payload_len) == Some(packet_len)
    }
}

/// Outcome of inspecting a packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// IPv4/ICMP Echo Reply carrying at least one payload byte.
    Matched(EchoReplyLayout),
    /// Anything else, including packets too short to be inspected.
    NotMatched,
}

/// Decides whether `packet` is an ICMP Echo Reply with a non-empty payload.
///
/// The checks short-circuit in this order: minimal IP header present,
/// header without options, protocol is ICMP, ICMP header present, type is
/// Echo Reply, payload not empty.
/// Never mutates or allocates.
pub fn classify(packet: &[u8]) -> Classification {
    let Some(ip_header) = Ipv4HeaderView::new(packet) else {
        return Classification::NotMatched;
    };
    if ip_header.header_len() != IPV4_HEADER_LEN || ip_header.protocol() != IPPROTO_ICMP {
        return Classification::NotMatched;
    }

    let icmp_header_offset = IPV4_HEADER_LEN;
    let Some(icmp_header) = IcmpHeaderView::new(&packet[icmp_header_offset..]) else {
        // truncated ICMP header: ignore the packet
        return Classification::NotMatched;
    };
    if icmp_header.icmp_type() != ICMP_ECHO_REPLY {
        return Classification::NotMatched;
    }

    let payload_offset = icmp_header_offset + ICMP_HEADER_LEN;
    let payload_len = packet.len() - payload_offset;
    if payload_len == 0 {
        return Classification::NotMatched;
    }

    Classification::Matched(EchoReplyLayout {
        ip_header_offset: 0,
        icmp_header_offset,
        payload_offset,
        payload_len,
    })
}
