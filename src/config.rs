use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;

use serde::Deserialize;

use crate::error::Error;
use crate::hooks::{HookOps, HookPoint, Priority, ProtocolFamily};

/// Runtime configuration, read from a TOML file.
/// Missing sections and fields take their default value.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub tun: TunConfig,
    pub tunnel: TunnelConfig,
    pub hook: HookConfig,
}

/// TUN device carrying the local stack's traffic.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TunConfig {
    pub name: String,
    pub address: Ipv4Addr,
    pub netmask: Ipv4Addr,
}

impl Default for TunConfig {
    fn default() -> Self {
        Self {
            name: String::from("tamper0"),
            address: Ipv4Addr::new(10, 0, 0, 1),
            netmask: Ipv4Addr::new(255, 255, 255, 0),
        }
    }
}

/// UDP endpoints used to exchange raw IP packets with the peer.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TunnelConfig {
    pub bind: SocketAddr,
    pub peer: SocketAddr,
}

impl Default for TunnelConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 9999)),
            peer: SocketAddr::from(([127, 0, 0, 1], 9998)),
        }
    }
}

/// Placement of the tamper hook.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct HookConfig {
    pub point: HookPoint,
    pub priority: Priority,
    /// Also register the packet trace hook.
    pub trace: bool,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            point: HookPoint::PostRouting,
            priority: Priority::FIRST,
            trace: false,
        }
    }
}

impl HookConfig {
    pub fn ops(&self) -> HookOps {
        HookOps {
            priority: self.priority,
            family: ProtocolFamily::Inet,
            point: self.point,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, Error> {
        Ok(toml::from_str(content)?)
    }
}
