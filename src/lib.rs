//! peerdial - Bitcoin P2P handshake probe
//!
//! This crate implements the wire-format layer needed to initiate a Bitcoin
//! P2P handshake: the fixed 24-byte message header (magic, command, payload
//! length, checksum), the double SHA256 checksum primitive, the "version"
//! payload, and a thin TCP transport that sends the framed message and logs
//! whatever the peer returns.
//!
//! Message construction is pure and synchronous; only the transport layer
//! suspends. The framing layer treats every payload as an opaque byte
//! sequence, so header correctness never depends on a message type's
//! internal layout.

pub mod config;
pub mod hashing;
pub mod network;
pub mod wire;

pub use config::NodeConfig;
pub use network::{HandshakeClient, TcpTransport};
pub use wire::{build_message, decode_message, DecodeError, EncodingError, MessageHeader};
