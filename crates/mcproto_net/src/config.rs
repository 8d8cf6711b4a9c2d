//! Connection and server-wide configuration shared by both transports.

use std::net::SocketAddr;
use std::time::Duration;

use mcproto_protocol::CompressionThreshold;

/// Settings that apply to a single connection, independent of which
/// transport drives it.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Compression threshold to switch to once login completes.
    /// [`CompressionThreshold::DEFAULT`] leaves compression disabled.
    pub compression_threshold: CompressionThreshold,
    /// How long a transport should wait for a complete packet frame before
    /// giving up on the connection. Transports are responsible for applying
    /// this; [`ConnectionConfig`] only carries the value.
    pub read_timeout: Duration,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            compression_threshold: CompressionThreshold::DEFAULT,
            read_timeout: Duration::from_secs(30),
        }
    }
}

/// Settings for accepting connections, shared by [`crate::packet_io::serve`]
/// and [`crate::blocking::serve`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The address to bind the listener to.
    pub address: SocketAddr,
    /// The maximum number of connections handled concurrently. The
    /// cooperative transport enforces this with a semaphore; the blocking
    /// transport enforces it by refusing to spawn beyond this many threads.
    pub max_connections: usize,
    /// Applied to every accepted connection.
    pub connection: ConnectionConfig,
}

impl ServerConfig {
    pub fn new(address: SocketAddr) -> Self {
        Self {
            address,
            max_connections: 1024,
            connection: ConnectionConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_connection_config_has_no_compression() {
        let cfg = ConnectionConfig::default();
        assert_eq!(cfg.compression_threshold, CompressionThreshold::DEFAULT);
    }

    #[test]
    fn server_config_new_sets_address() {
        let addr: SocketAddr = "127.0.0.1:25565".parse().unwrap();
        let cfg = ServerConfig::new(addr);
        assert_eq!(cfg.address, addr);
        assert_eq!(cfg.max_connections, 1024);
    }
}
