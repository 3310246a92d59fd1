use std::sync::Arc;

use tokio::io::{AsyncWriteExt, WriteHalf};
use tokio::net::UdpSocket;
use tokio::sync::RwLock;
use tun2::AsyncDevice;

use crate::forward::filter;
use crate::forward::frame::Frame;
use crate::hooks::table::HookTable;
use crate::hooks::{HookPoint, Verdict};

/// Handles incoming network packets (receives packets from the socket and writes them
/// to the TUN interface), running the pre-routing hooks on each of them.
pub async fn receive(
    mut device: WriteHalf<AsyncDevice>,
    socket: Arc<UdpSocket>,
    hooks: Arc<RwLock<HookTable>>,
) {
    let mut frame = Frame::new();
    loop {
        // wait until there is an incoming packet on the socket (packets on the socket are raw IP)
        frame.size = match socket.recv_from(&mut frame.frame).await {
            Ok((size, _)) => size,
            Err(e) => {
                log::warn!("Could not receive from socket: {e}");
                continue;
            }
        };

        if frame.size > 0 {
            let pkt_data = frame.pkt_data_mut();
            let verdict = filter(&*hooks.read().await, HookPoint::PreRouting, pkt_data);
            match verdict {
                Verdict::Accept => {
                    // write packet to the kernel
                    if let Err(e) = device.write_all(pkt_data).await {
                        log::warn!("Could not write to TUN device: {e}");
                    }
                }
                Verdict::Drop => {}
            }
        }
    }
}
