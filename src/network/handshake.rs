//! Handshake probe
//!
//! Dials a single peer, sends the initial "version" message, and logs
//! whatever the peer sends back until it disconnects or the read window
//! elapses. No verack exchange, no retry; one message out, raw bytes in.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tokio::time::{timeout, Duration};
use tracing::{debug, info, warn};

use crate::config::NodeConfig;
use crate::network::tcp_transport::TcpTransport;
use crate::network::transport::{Transport, TransportConnection};
use crate::wire::version::{VersionPayload, VERSION_COMMAND};
use crate::wire::{build_message, decode_message, DecodeError, HEADER_LEN};

/// How many leading bytes of a received chunk to show in debug logs
const LOG_PREVIEW_BYTES: usize = 64;

/// Single-shot handshake client
pub struct HandshakeClient {
    config: NodeConfig,
}

impl HandshakeClient {
    pub fn new(config: NodeConfig) -> Self {
        Self { config }
    }

    /// Resolve the configured peer endpoint to a socket address
    pub async fn resolve_peer(&self) -> Result<SocketAddr> {
        let endpoint = self.config.peer_endpoint();
        let resolved = tokio::net::lookup_host(&endpoint)
            .await
            .with_context(|| format!("Failed to resolve {}", endpoint))?
            .next()
            .ok_or_else(|| anyhow::anyhow!("No addresses for {}", endpoint));
        resolved
    }

    /// Dial the peer, send the version message, and log responses
    pub async fn run(&self) -> Result<()> {
        let addr = self.resolve_peer().await?;

        let payload = VersionPayload::new(self.config.protocol_version, self.config.services);
        debug!(
            "Version payload: version={} services={:#x} nonce={:#018x}",
            payload.version, payload.services, payload.nonce
        );
        let message = build_message(self.config.magic, VERSION_COMMAND, &payload.encode())?;

        let transport = TcpTransport::new(Duration::from_secs(self.config.connect_timeout_seconds));
        let mut conn = transport.connect(addr).await?;

        conn.send(&message).await?;
        info!(
            "Sent {} message ({} bytes) to {}",
            VERSION_COMMAND,
            message.len(),
            addr
        );

        self.log_responses(&mut conn).await;

        conn.close().await?;
        Ok(())
    }

    /// Read peer chunks until close, error, or an idle read window elapses
    async fn log_responses<C: TransportConnection>(&self, conn: &mut C) {
        let window = Duration::from_secs(self.config.read_timeout_seconds);
        let addr = conn.peer_addr();
        let mut pending: Vec<u8> = Vec::new();

        loop {
            let chunk = match timeout(window, conn.recv()).await {
                Ok(Ok(chunk)) => chunk,
                Ok(Err(e)) => {
                    warn!("Error reading from {}: {}", addr, e);
                    break;
                }
                Err(_) => {
                    info!(
                        "No data from {} for {}s, closing",
                        addr, self.config.read_timeout_seconds
                    );
                    break;
                }
            };

            if chunk.is_empty() {
                info!("Peer {} closed the connection", addr);
                break;
            }

            let preview_len = chunk.len().min(LOG_PREVIEW_BYTES);
            debug!(
                "Received {} bytes from {}: {}{}",
                chunk.len(),
                addr,
                hex::encode(&chunk[..preview_len]),
                if chunk.len() > preview_len { ".." } else { "" }
            );

            pending.extend_from_slice(&chunk);
            self.log_complete_frames(&mut pending, addr);
        }
    }

    /// Log every complete, checksum-valid frame at the front of `pending`
    ///
    /// Envelope validation only; payloads are not interpreted. On anything
    /// other than a short read the buffer is dropped, since resynchronizing
    /// a corrupt stream is not this client's business.
    fn log_complete_frames(&self, pending: &mut Vec<u8>, addr: SocketAddr) {
        loop {
            let consumed = match decode_message(self.config.magic, pending) {
                Ok((header, payload)) => {
                    info!(
                        "Peer {} frame: command={:?} payload={} bytes, checksum ok",
                        addr,
                        header.command(),
                        payload.len()
                    );
                    HEADER_LEN + payload.len()
                }
                Err(DecodeError::Truncated { .. }) => return,
                Err(e) => {
                    warn!("Undecodable bytes from {}: {}", addr, e);
                    pending.clear();
                    return;
                }
            };
            pending.drain(..consumed);
        }
    }
}
