use std::sync::Arc;

use crate::error::Error;
use crate::hooks::{
    HookHandle, HookOps, HookPoint, PacketHook, Priority, ProtocolFamily, Verdict,
};

struct HookEntry {
    handle: HookHandle,
    ops: HookOps,
    hook: Arc<dyn PacketHook>,
}

/// Registered hooks, kept sorted by priority.
///
/// Hooks with the same priority run in registration order.
#[derive(Default)]
pub struct HookTable {
    entries: Vec<HookEntry>,
    next_handle: u64,
}

impl HookTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `hook` and returns the handle needed to remove it.
    ///
    /// Fails if `ops.priority` is [`Priority::FIRST`] and another hook already
    /// runs first at the same point for the same family.
    pub fn register(
        &mut self,
        hook: Arc<dyn PacketHook>,
        ops: HookOps,
    ) -> Result<HookHandle, Error> {
        if ops.priority == Priority::FIRST {
            if let Some(holder) = self.entries.iter().find(|e| {
                e.ops.priority == Priority::FIRST
                    && e.ops.point == ops.point
                    && e.ops.family == ops.family
            }) {
                return Err(Error::PriorityTaken {
                    point: ops.point,
                    family: ops.family,
                    holder: holder.hook.name().to_string(),
                });
            }
        }

        let handle = HookHandle(self.next_handle);
        self.next_handle += 1;

        let position = self
            .entries
            .partition_point(|e| e.ops.priority <= ops.priority);
        log::debug!(
            "Hook '{}' registered at {} for {} with priority {} ({handle})",
            hook.name(),
            ops.point,
            ops.family,
            ops.priority
        );
        self.entries.insert(position, HookEntry { handle, ops, hook });

        Ok(handle)
    }

    /// Removes the hook identified by `handle`.
    pub fn unregister(&mut self, handle: HookHandle) -> Result<(), Error> {
        let index = self
            .entries
            .iter()
            .position(|e| e.handle == handle)
            .ok_or(Error::UnknownHandle(handle))?;
        let entry = self.entries.remove(index);
        log::debug!("Hook '{}' unregistered ({handle})", entry.hook.name());
        Ok(())
    }

    /// Runs every hook registered at `point` for `family`, in priority order.
    ///
    /// Stops at the first hook returning [`Verdict::Drop`].
    pub fn run(&self, point: HookPoint, family: ProtocolFamily, packet: &mut [u8]) -> Verdict {
        for entry in self
            .entries
            .iter()
            .filter(|e| e.ops.point == point && e.ops.family == family)
        {
            if entry.hook.process(packet) == Verdict::Drop {
                return Verdict::Drop;
            }
        }
        Verdict::Accept
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
