//! Gateway configuration

use serde::{Deserialize, Serialize};

use crate::auth::AuthConfig;
use crate::error::ConfigError;

/// Default port the gateway listens on
pub const DEFAULT_GATEWAY_PORT: u16 = 18789;

/// Configuration for the gateway daemon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Host or address the HTTP listener binds to (may be a wildcard)
    pub bind_host: String,

    /// Listener port
    pub port: u16,

    /// Proxy addresses allowed to assert a forwarded client origin
    pub trusted_proxies: Vec<String>,

    /// TLS settings advertised to paired clients
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<TlsConfig>,

    /// Shared secrets
    pub auth: AuthConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_host: "127.0.0.1".to_string(),
            port: DEFAULT_GATEWAY_PORT,
            trusted_proxies: Vec::new(),
            tls: None,
            auth: AuthConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Whether clients should connect with TLS
    pub fn tls_enabled(&self) -> bool {
        self.tls.map(|tls| tls.enabled).unwrap_or(false)
    }

    /// Socket address string for the listener (`host:port`, IPv6 bracketed)
    pub fn bind_address(&self) -> String {
        if self.bind_host.contains(':') && !self.bind_host.starts_with('[') {
            format!("[{}]:{}", self.bind_host, self.port)
        } else {
            format!("{}:{}", self.bind_host, self.port)
        }
    }

    /// Whether the listener only accepts same-machine connections
    pub fn is_loopback_bind(&self) -> bool {
        matches!(self.bind_host.as_str(), "127.0.0.1" | "::1" | "localhost")
    }

    /// Check the values the listener cannot work without
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bind_host.trim().is_empty() {
            return Err(ConfigError::Invalid("bind_host must not be empty".to_string()));
        }
        if self.port == 0 {
            return Err(ConfigError::Invalid("port must not be 0".to_string()));
        }
        Ok(())
    }
}

/// TLS flag for the gateway listener
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlsConfig {
    pub enabled: bool,
}
