//! TCP transport implementation
//!
//! Outbound TCP connections carrying framed wire messages as opaque byte
//! chunks.

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt, ReadHalf, WriteHalf};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio::time::{timeout, Duration};
use tracing::{debug, info};

use super::transport::{Transport, TransportConnection};

/// Maximum bytes returned by a single recv call
const RECV_CHUNK_BYTES: usize = 64 * 1024;

/// TCP transport
#[derive(Debug, Clone)]
pub struct TcpTransport {
    connect_timeout: Duration,
}

impl TcpTransport {
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }
}

impl Default for TcpTransport {
    fn default() -> Self {
        // 10 second connection timeout - prevents blocking on unresponsive peers
        Self::new(Duration::from_secs(10))
    }
}

#[async_trait::async_trait]
impl Transport for TcpTransport {
    type Connection = TcpConnection;

    async fn connect(&self, addr: SocketAddr) -> Result<Self::Connection> {
        info!("Connecting to peer at {}", addr);

        let stream = timeout(self.connect_timeout, TcpStream::connect(addr))
            .await
            .map_err(|_| anyhow::anyhow!("Connection timeout to {}", addr))?
            .map_err(|e| anyhow::anyhow!("Connection failed to {}: {}", addr, e))?;
        let peer_addr = stream.peer_addr()?;

        Ok(TcpConnection::new(stream, peer_addr))
    }
}

/// TCP connection with split read/write halves
/// to allow concurrent read and write operations without deadlock.
pub struct TcpConnection {
    reader: Arc<Mutex<ReadHalf<TcpStream>>>,
    writer: Arc<Mutex<WriteHalf<TcpStream>>>,
    peer_addr: SocketAddr,
    connected: AtomicBool,
}

impl TcpConnection {
    /// Create a new TCP connection from a stream
    pub fn new(stream: TcpStream, peer_addr: SocketAddr) -> Self {
        let (reader, writer) = tokio::io::split(stream);
        Self {
            reader: Arc::new(Mutex::new(reader)),
            writer: Arc::new(Mutex::new(writer)),
            peer_addr,
            connected: AtomicBool::new(true),
        }
    }
}

#[async_trait::async_trait]
impl TransportConnection for TcpConnection {
    async fn send(&mut self, data: &[u8]) -> Result<()> {
        if !self.connected.load(Ordering::Relaxed) {
            return Err(anyhow::anyhow!("Connection closed"));
        }

        // Lock writer half (doesn't block reader)
        let mut writer = self.writer.lock().await;

        // Data is already in wire format (magic + command + length + checksum + payload)
        writer.write_all(data).await?;
        writer.flush().await?;

        debug!("Sent {} bytes to {}", data.len(), self.peer_addr);
        Ok(())
    }

    async fn recv(&mut self) -> Result<Vec<u8>> {
        if !self.connected.load(Ordering::Relaxed) {
            return Ok(Vec::new()); // Graceful close
        }

        // Lock reader half (doesn't block writer)
        let mut reader = self.reader.lock().await;

        let mut chunk = vec![0u8; RECV_CHUNK_BYTES];
        let n = reader
            .read(&mut chunk)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to read from peer: {}", e))?;

        if n == 0 {
            self.connected.store(false, Ordering::Relaxed);
            return Ok(Vec::new()); // Graceful close
        }

        chunk.truncate(n);
        Ok(chunk)
    }

    fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }

    async fn close(&mut self) -> Result<()> {
        if self.connected.load(Ordering::Relaxed) {
            // Shutdown the writer half to signal end of connection
            let mut writer = self.writer.lock().await;
            writer.shutdown().await?;
            self.connected.store(false, Ordering::Relaxed);
        }
        Ok(())
    }
}
