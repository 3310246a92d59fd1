use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::HookConfig;
use crate::error::Error;
use crate::hooks::echo_tamper::EchoTamper;
use crate::hooks::table::HookTable;
use crate::hooks::trace::PacketTrace;
use crate::hooks::{HookHandle, HookOps, Priority};

/// Installs the tamper hook (and the trace hook, if enabled).
/// Failing to install the tamper hook makes the whole feature unavailable.
pub fn register_hooks(
    table: &mut HookTable,
    config: &HookConfig,
) -> Result<Vec<HookHandle>, Error> {
    log::info!("Loading ICMP hook");
    let ops = config.ops();
    let mut handles = vec![table.register(Arc::new(EchoTamper), ops)?];
    if config.trace {
        let trace_ops = HookOps {
            priority: Priority::LAST,
            ..ops
        };
        handles.push(table.register(Arc::new(PacketTrace), trace_ops)?);
    }
    log::info!("Loaded ICMP hook at {} with priority {}", ops.point, ops.priority);
    Ok(handles)
}

/// Removes the hooks installed by [`register_hooks`] from the shared table.
pub async fn unregister_hooks(
    hooks: &RwLock<HookTable>,
    handles: Vec<HookHandle>,
) -> Result<(), Error> {
    log::info!("Removing ICMP hook");
    let mut table = hooks.write().await;
    for handle in handles {
        table.unregister(handle)?;
    }
    log::info!("Removed ICMP hook");
    Ok(())
}
