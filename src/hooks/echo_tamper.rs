use crate::craft::mutate::mutate;
use crate::hooks::{PacketHook, Verdict};
use crate::packet::classify::{classify, Classification};
use crate::packet::views::IcmpHeaderView;

/// Tampers with outgoing ICMP Echo Replies: the first payload byte is
/// incremented and the ICMP checksum recomputed. Every other packet is left as is.
///
/// Always accepts the packet.
#[derive(Debug, Default, Clone, Copy)]
pub struct EchoTamper;

impl PacketHook for EchoTamper {
    fn name(&self) -> &str {
        "echo-tamper"
    }

    fn process(&self, packet: &mut [u8]) -> Verdict {
        let Classification::Matched(layout) = classify(packet) else {
            return Verdict::Accept;
        };

        if let Some(icmp_header) = IcmpHeaderView::new(&packet[layout.icmp_header_offset..]) {
            log::info!(
                "Received ICMP packet: id = {}, seq = {}, data_size = {}",
                icmp_header.identifier(),
                icmp_header.sequence(),
                layout.payload_len
            );
        }

        if let Some(checksum) = mutate(packet, layout) {
            log::trace!("ICMP checksum rewritten to {checksum:#06x}");
        }

        Verdict::Accept
    }
}
