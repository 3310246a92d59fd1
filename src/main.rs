use std::process;
use std::sync::Arc;

use clap::Parser;
use tokio::net::UdpSocket;
use tokio::sync::RwLock;

use echo_tamper::cli::Args;
use echo_tamper::config::Config;
use echo_tamper::device::start_device;
use echo_tamper::error::Error;
use echo_tamper::forward::receive::receive;
use echo_tamper::forward::send::send;
use echo_tamper::hooks::install::{register_hooks, unregister_hooks};
use echo_tamper::hooks::table::HookTable;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .format_timestamp_secs()
        .init();

    if let Err(e) = run(args).await {
        log::error!("{e}");
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Error> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let mut table = HookTable::new();
    let handles = register_hooks(&mut table, &config.hook)?;
    let hooks = Arc::new(RwLock::new(table));

    let device = start_device(&config.tun)?;
    log::info!("TUN device {} started ({})", config.tun.name, config.tun.address);
    let (device_reader, device_writer) = tokio::io::split(device);

    let socket = Arc::new(UdpSocket::bind(config.tunnel.bind).await?);
    log::info!("Forward socket bound to {}", config.tunnel.bind);

    let mut receive_task = tokio::spawn(receive(device_writer, socket.clone(), hooks.clone()));
    let mut send_task = tokio::spawn(send(
        device_reader,
        socket,
        hooks.clone(),
        config.tunnel.peer,
    ));

    let outcome = tokio::select! {
        signal = tokio::signal::ctrl_c() => signal.map_err(Error::from),
        ended = &mut send_task => Err(match ended {
            Ok(e) => e,
            Err(e) => Error::Forwarding(format!("send task failed: {e}")),
        }),
        ended = &mut receive_task => Err(Error::Forwarding(match ended {
            Ok(()) => "receive task ended".to_string(),
            Err(e) => format!("receive task failed: {e}"),
        })),
    };

    receive_task.abort();
    send_task.abort();
    let removed = unregister_hooks(&hooks, handles).await;
    outcome.and(removed)
}
