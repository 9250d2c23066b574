//! Receiver configuration for the live-view engine.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Well-known UDP port the camera streams live-view datagrams to.
pub const DEFAULT_LIVE_VIEW_PORT: u16 = 6666;

/// Receive timeout used as the cooperative cancellation checkpoint.
pub const DEFAULT_RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// Receive buffer sized for the largest transfer unit the camera sends.
pub const DEFAULT_RECV_BUFFER_LEN: usize = 1_024_000;

/// Bound wait for the worker task to exit during shutdown.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(1);

/// Configuration for the live-view receiver.
///
/// The defaults match the camera's wire protocol; tests typically override
/// `port` with 0 to bind an ephemeral port and read it back via
/// [`LiveView::local_addr`](crate::LiveView::local_addr).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveViewConfig {
    /// Local address to bind; the camera broadcasts to any listener.
    pub bind_addr: IpAddr,

    /// UDP port to bind (0 for ephemeral).
    pub port: u16,

    /// Socket receive timeout; expiry is a cancellation checkpoint, not an error.
    pub recv_timeout: Duration,

    /// Receive buffer length per datagram.
    pub recv_buffer_len: usize,

    /// How long `stop()` waits for the worker before reporting a timeout.
    pub shutdown_timeout: Duration,
}

impl Default for LiveViewConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_LIVE_VIEW_PORT,
            recv_timeout: DEFAULT_RECV_TIMEOUT,
            recv_buffer_len: DEFAULT_RECV_BUFFER_LEN,
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
        }
    }
}

impl LiveViewConfig {
    /// The socket address the receiver binds.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }

    /// Configuration bound to an ephemeral loopback port, for tests and
    /// co-located tooling.
    pub fn ephemeral() -> Self {
        Self { bind_addr: IpAddr::V4(Ipv4Addr::LOCALHOST), port: 0, ..Self::default() }
    }
}
