use std::fmt;

use crate::hooks::{HookHandle, HookPoint, ProtocolFamily};

/// Errors raised while configuring and running the interceptor.
///
/// Per-packet processing never fails; these concern setup, teardown and the
/// forwarding tasks themselves.
#[derive(Debug)]
pub enum Error {
    /// I/O error on the configuration file or the tunnel socket.
    Io(std::io::Error),
    /// Configuration file could not be parsed.
    Config(String),
    /// TUN device could not be created, or stopped delivering packets.
    Device(String),
    /// A forwarding task ended before shutdown was requested.
    Forwarding(String),
    /// Another hook already holds the first position at this point.
    PriorityTaken {
        point: HookPoint,
        family: ProtocolFamily,
        holder: String,
    },
    /// Handle was never issued or was already unregistered.
    UnknownHandle(HookHandle),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::Config(msg) => write!(f, "configuration error: {msg}"),
            Error::Device(msg) => write!(f, "TUN device error: {msg}"),
            Error::Forwarding(msg) => write!(f, "forwarding stopped: {msg}"),
            Error::PriorityTaken {
                point,
                family,
                holder,
            } => write!(
                f,
                "cannot register hook: '{holder}' already runs first at {point} for {family}"
            ),
            Error::UnknownHandle(handle) => write!(f, "no hook registered with handle {handle}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}
