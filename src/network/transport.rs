//! Transport abstraction
//!
//! Connections deliver and receive opaque byte sequences; framing and
//! payload semantics live in the wire module. Connection-level failures
//! (refused, reset, timeout) surface as errors; peer-initiated close
//! surfaces as an empty read.

use anyhow::Result;
use std::net::SocketAddr;

/// A transport capable of opening outbound connections
#[async_trait::async_trait]
pub trait Transport {
    type Connection: TransportConnection;

    /// Open an outbound connection to the given address
    async fn connect(&self, addr: SocketAddr) -> Result<Self::Connection>;
}

/// A single established connection
#[async_trait::async_trait]
pub trait TransportConnection: Send {
    /// Send a fully framed message
    async fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Receive the next chunk of bytes from the peer, in arrival order
    ///
    /// Returns an empty vector on clean peer-initiated close. Chunk
    /// boundaries carry no meaning; reassembly is the caller's concern.
    async fn recv(&mut self) -> Result<Vec<u8>>;

    /// Address of the remote peer
    fn peer_addr(&self) -> SocketAddr;

    /// Whether the connection is still open
    fn is_connected(&self) -> bool;

    /// Close the connection
    async fn close(&mut self) -> Result<()>;
}
