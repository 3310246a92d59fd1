//! Userspace packet hook framework, modelled after netfilter: hooks are
//! registered at a point of the packet path for a protocol family, and run in
//! priority order on every packet crossing that point.

use std::fmt::{Display, Formatter};

use serde::de::Unexpected;
use serde::{Deserialize, Deserializer};

pub mod echo_tamper;
pub mod install;
pub mod table;
pub mod trace;

/// Disposition of a packet after a hook has seen it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Continue normal delivery.
    Accept,
    /// Discard the packet; later hooks do not run.
    Drop,
}

/// A packet transformation or inspection step.
///
/// Hooks are invoked synchronously on the forwarding path and must not block.
pub trait PacketHook: Send + Sync {
    fn name(&self) -> &str;

    /// Inspects and possibly rewrites `packet` in place.
    fn process(&self, packet: &mut [u8]) -> Verdict;
}

/// Points of the packet path where hooks can be attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HookPoint {
    PreRouting,
    LocalIn,
    Forward,
    LocalOut,
    PostRouting,
}

impl Display for HookPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            HookPoint::PreRouting => "pre-routing",
            HookPoint::LocalIn => "local-in",
            HookPoint::Forward => "forward",
            HookPoint::LocalOut => "local-out",
            HookPoint::PostRouting => "post-routing",
        };
        write!(f, "{name}")
    }
}

/// Network protocol family of a packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolFamily {
    Inet,
    Inet6,
}

impl ProtocolFamily {
    /// Reads the family from the IP version nibble of a raw IP packet.
    pub fn of(packet: &[u8]) -> Option<Self> {
        match packet.first().map(|b| b >> 4) {
            Some(4) => Some(ProtocolFamily::Inet),
            Some(6) => Some(ProtocolFamily::Inet6),
            _ => None,
        }
    }
}

impl Display for ProtocolFamily {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ProtocolFamily::Inet => write!(f, "IPv4"),
            ProtocolFamily::Inet6 => write!(f, "IPv6"),
        }
    }
}

/// Position of a hook in the traversal order; lower values run first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(pub i32);

impl Priority {
    pub const FIRST: Priority = Priority(i32::MIN);
    pub const LAST: Priority = Priority(i32::MAX);
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            Priority::FIRST => write!(f, "first"),
            Priority::LAST => write!(f, "last"),
            Priority(value) => write!(f, "{value}"),
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::FIRST
    }
}

impl<'de> Deserialize<'de> for Priority {
    /// Accepts `"first"`, `"last"`, or an integer.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawPriority {
            Named(String),
            Value(i32),
        }

        match RawPriority::deserialize(deserializer)? {
            RawPriority::Value(value) => Ok(Priority(value)),
            RawPriority::Named(name) => match name.as_str() {
                "first" => Ok(Priority::FIRST),
                "last" => Ok(Priority::LAST),
                _ => Err(serde::de::Error::invalid_value(
                    Unexpected::Str(&name),
                    &"\"first\", \"last\" or an integer",
                )),
            },
        }
    }
}

/// Where and when a hook runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookOps {
    pub priority: Priority,
    pub family: ProtocolFamily,
    pub point: HookPoint,
}

/// Token returned on registration, needed to unregister the hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HookHandle(u64);

impl Display for HookHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_test::{assert_de_tokens, assert_de_tokens_error, Token};

    #[test]
    fn test_protocol_family_of_packet() {
        assert_eq!(ProtocolFamily::of(&[0x45, 0x00]), Some(ProtocolFamily::Inet));
        assert_eq!(ProtocolFamily::of(&[0x60, 0x00]), Some(ProtocolFamily::Inet6));
        assert_eq!(ProtocolFamily::of(&[0x00]), None);
        assert_eq!(ProtocolFamily::of(&[]), None);
    }

    #[test]
    fn test_priority_order() {
        assert!(Priority::FIRST < Priority(-100));
        assert!(Priority(-100) < Priority(0));
        assert!(Priority(0) < Priority::LAST);
    }

    #[test]
    fn test_deserialize_named_priority() {
        assert_de_tokens(&Priority::FIRST, &[Token::Str("first")]);
        assert_de_tokens(&Priority::LAST, &[Token::Str("last")]);
    }

    #[test]
    fn test_deserialize_numeric_priority() {
        assert_de_tokens(&Priority(-150), &[Token::I32(-150)]);
        assert_de_tokens(&Priority(300), &[Token::I64(300)]);
    }

    #[test]
    fn test_deserialize_invalid_priority() {
        assert_de_tokens_error::<Priority>(
            &[Token::Str("middle")],
            "invalid value: string \"middle\", expected \"first\", \"last\" or an integer",
        );
    }

    #[test]
    fn test_deserialize_hook_point() {
        assert_de_tokens(
            &HookPoint::PostRouting,
            &[Token::UnitVariant {
                name: "HookPoint",
                variant: "post-routing",
            }],
        );
        assert_de_tokens(
            &HookPoint::PreRouting,
            &[Token::UnitVariant {
                name: "HookPoint",
                variant: "pre-routing",
            }],
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(HookPoint::PostRouting.to_string(), "post-routing");
        assert_eq!(ProtocolFamily::Inet.to_string(), "IPv4");
        assert_eq!(Priority::FIRST.to_string(), "first");
        assert_eq!(Priority(-5).to_string(), "-5");
    }
}
