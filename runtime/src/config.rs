//! Server configuration.

use std::net::SocketAddr;

/// Default port when none is given on the command line.
pub const DEFAULT_PORT: u16 = 8000;

/// Default bind host.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Where the extract endpoint listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Socket address to bind, e.g. `127.0.0.1:8000`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Public URL of the extract endpoint on a bound address.
    pub fn endpoint_url(addr: SocketAddr) -> String {
        format!("http://{addr}/extract")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr(), "127.0.0.1:8000");
    }

    #[test]
    fn test_endpoint_url() {
        let addr: SocketAddr = "127.0.0.1:9321".parse().unwrap();
        assert_eq!(
            ServerConfig::endpoint_url(addr),
            "http://127.0.0.1:9321/extract"
        );
    }
}
