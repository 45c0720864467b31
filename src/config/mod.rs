//! Configuration management for peerdial
//!
//! Handles configuration loading and validation. All fields have defaults,
//! so a config file only needs to name what it overrides.

use serde::{Deserialize, Serialize};

/// Node configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Peer host to dial (IP address or hostname)
    #[serde(default = "default_peer_host")]
    pub peer_host: String,

    /// Peer port
    #[serde(default = "default_peer_port")]
    pub peer_port: u16,

    /// Network magic written into every message header
    #[serde(default = "default_magic")]
    pub magic: u32,

    /// Protocol version advertised in the version payload
    #[serde(default = "default_protocol_version")]
    pub protocol_version: u32,

    /// Supported-services bitmask advertised in the version payload
    #[serde(default)]
    pub services: u64,

    /// Connection timeout (seconds)
    #[serde(default = "default_connect_timeout_seconds")]
    pub connect_timeout_seconds: u64,

    /// How long to keep waiting for peer data before closing (seconds)
    #[serde(default = "default_read_timeout_seconds")]
    pub read_timeout_seconds: u64,
}

fn default_peer_host() -> String {
    "127.0.0.1".to_string()
}

fn default_peer_port() -> u16 {
    8333
}

fn default_magic() -> u32 {
    crate::wire::MAGIC_MAINNET
}

fn default_protocol_version() -> u32 {
    70001
}

fn default_connect_timeout_seconds() -> u64 {
    10
}

fn default_read_timeout_seconds() -> u64 {
    30
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            peer_host: default_peer_host(),
            peer_port: default_peer_port(),
            magic: default_magic(),
            protocol_version: default_protocol_version(),
            services: 0,
            connect_timeout_seconds: default_connect_timeout_seconds(),
            read_timeout_seconds: default_read_timeout_seconds(),
        }
    }
}

impl NodeConfig {
    /// Load configuration from file (supports JSON and TOML)
    pub fn from_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;

        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            let config: NodeConfig = toml::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse TOML config: {}", e))?;
            Ok(config)
        } else {
            let config: NodeConfig = serde_json::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse JSON config: {}", e))?;
            Ok(config)
        }
    }

    /// Load configuration from TOML file
    pub fn from_toml_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: NodeConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse TOML config: {}", e))?;
        Ok(config)
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: NodeConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.peer_host.is_empty() {
            return Err(anyhow::anyhow!("peer_host must not be empty"));
        }
        if self.peer_port == 0 {
            return Err(anyhow::anyhow!("peer_port must be non-zero"));
        }
        if self.connect_timeout_seconds == 0 {
            return Err(anyhow::anyhow!("connect_timeout_seconds must be non-zero"));
        }
        if self.read_timeout_seconds == 0 {
            return Err(anyhow::anyhow!("read_timeout_seconds must be non-zero"));
        }
        Ok(())
    }

    /// Peer endpoint as a `host:port` string suitable for DNS resolution
    pub fn peer_endpoint(&self) -> String {
        format!("{}:{}", self.peer_host, self.peer_port)
    }
}
