use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::net::UdpSocket;
use tokio::sync::RwLock;

use crate::error::Error;
use crate::forward::filter;
use crate::forward::frame::Frame;
use crate::hooks::table::HookTable;
use crate::hooks::{HookPoint, Verdict};

/// Handles outgoing network packets (reads packets leaving the local stack from the TUN
/// and sends them to the peer), running the post-routing hooks on each of them.
///
/// Runs until the device can no longer be read, and returns the reason.
pub async fn send<R: AsyncRead + Unpin>(
    mut device: R,
    socket: Arc<UdpSocket>,
    hooks: Arc<RwLock<HookTable>>,
    peer: SocketAddr,
) -> Error {
    let mut frame = Frame::new();
    loop {
        // wait until there is a packet outgoing from kernel
        frame.size = match device.read(&mut frame.frame).await {
            Ok(0) => return Error::Device("TUN device closed".to_string()),
            Ok(size) => size,
            Err(e) => return Error::Device(format!("could not read from TUN device: {e}")),
        };

        let pkt_data = frame.pkt_data_mut();
        let verdict = filter(&*hooks.read().await, HookPoint::PostRouting, pkt_data);
        match verdict {
            Verdict::Accept => {
                if let Err(e) = socket.send_to(pkt_data, peer).await {
                    log::warn!("Could not send packet to {peer}: {e}");
                }
            }
            Verdict::Drop => {}
        }
    }
}
