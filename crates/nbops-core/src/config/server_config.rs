//! HTTP server configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Identity and bind address of the HTTP service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Service name reported by the health probe.
    pub app_name: String,
    /// Service version reported by the health probe.
    pub version: String,
    pub host: String,
    pub port: u16,
    /// Enables debug-level logging when no explicit filter is set.
    pub debug: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            app_name: constants::DEFAULT_APP_NAME.to_string(),
            version: constants::DEFAULT_VERSION.to_string(),
            host: constants::DEFAULT_HOST.to_string(),
            port: constants::DEFAULT_PORT,
            debug: constants::DEFAULT_DEBUG,
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for `SocketAddr` parsing.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
