use crate::hooks::table::HookTable;
use crate::hooks::{HookPoint, ProtocolFamily, Verdict};

pub mod frame;
pub mod receive;
pub mod send;

/// Runs the hooks of `point` on `packet`.
/// Packets that are neither IPv4 nor IPv6 are accepted untouched.
fn filter(hooks: &HookTable, point: HookPoint, packet: &mut [u8]) -> Verdict {
    match ProtocolFamily::of(packet) {
        Some(family) => hooks.run(point, family, packet),
        None => Verdict::Accept,
    }
}
