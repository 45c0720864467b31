//! Network layer for peerdial
//!
//! Thin transport plumbing around the wire format: connections carry
//! opaque, already-framed byte sequences, and the handshake probe drives a
//! single outbound exchange.

pub mod handshake;
pub mod tcp_transport;
pub mod transport;

pub use handshake::HandshakeClient;
pub use tcp_transport::TcpTransport;
pub use transport::{Transport, TransportConnection};
