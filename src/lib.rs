//! Userspace interceptor that rewrites outgoing ICMP Echo Replies.
//!
//! Packets leaving the local stack through a TUN device cross a netfilter-like
//! hook table; the [`hooks::echo_tamper::EchoTamper`] hook increments the first
//! payload byte of every Echo Reply and recomputes its ICMP checksum.

pub mod cli;
pub mod config;
pub mod craft;
pub mod device;
pub mod error;
pub mod forward;
pub mod hooks;
pub mod packet;
