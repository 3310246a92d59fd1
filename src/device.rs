use crate::config::TunConfig;
use crate::error::Error;

/// Creates the TUN device and brings it up.
pub fn start_device(tun: &TunConfig) -> Result<tun2::AsyncDevice, Error> {
    let mut config = tun2::Configuration::default();

    config
        .tun_name(&tun.name)
        .address(tun.address)
        .netmask(tun.netmask)
        .up();

    tun2::create_as_async(&config).map_err(|e| Error::Device(e.to_string()))
}
