use etherparse::Ipv4HeaderSlice;

use crate::hooks::{PacketHook, Verdict};

/// Logs a one-line summary of every IPv4 packet at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct PacketTrace;

impl PacketHook for PacketTrace {
    fn name(&self) -> &str {
        "packet-trace"
    }

    fn process(&self, packet: &mut [u8]) -> Verdict {
        if log::log_enabled!(log::Level::Debug) {
            log::debug!("{}", summary(packet));
        }
        Verdict::Accept
    }
}

fn summary(packet: &[u8]) -> String {
    match Ipv4HeaderSlice::from_slice(packet) {
        Ok(header) => format!(
            "{} -> {} proto {} ({} bytes)",
            header.source_addr(),
            header.destination_addr(),
            header.protocol().0,
            packet.len()
        ),
        Err(e) => format!("unparsable packet ({} bytes): {e}", packet.len()),
    }
}
