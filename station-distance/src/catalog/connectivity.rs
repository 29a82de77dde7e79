//! Network reachability checks.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;

/// Answers whether the remote API is currently reachable.
///
/// Consulted once at the start of each sync, never polled.
#[async_trait]
pub trait Connectivity: Send + Sync {
    async fn is_connected(&self) -> bool;
}

/// Connectivity flag set by the caller.
#[derive(Debug)]
pub struct FixedConnectivity {
    online: AtomicBool,
}

impl FixedConnectivity {
    pub fn new(online: bool) -> Self {
        Self {
            online: AtomicBool::new(online),
        }
    }

    /// Change the reported state.
    pub fn set(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }
}

#[async_trait]
impl Connectivity for FixedConnectivity {
    async fn is_connected(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }
}

/// Probe that opens a TCP connection to a host.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    addr: String,
    timeout: Duration,
}

impl TcpProbe {
    /// Create a probe for `addr` (`host:port`).
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            timeout: Duration::from_secs(2),
        }
    }

    /// Set a custom connect timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl Connectivity for TcpProbe {
    async fn is_connected(&self) -> bool {
        matches!(
            tokio::time::timeout(self.timeout, TcpStream::connect(self.addr.as_str())).await,
            Ok(Ok(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixed_can_be_toggled() {
        let connectivity = FixedConnectivity::new(false);
        assert!(!connectivity.is_connected().await);
        connectivity.set(true);
        assert!(connectivity.is_connected().await);
    }

    #[tokio::test]
    async fn probe_reaches_listener() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let probe = TcpProbe::new(addr.to_string());
        assert!(probe.is_connected().await);
    }

    #[tokio::test]
    async fn probe_fails_on_closed_port() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let probe = TcpProbe::new(addr.to_string()).with_timeout(Duration::from_millis(500));
        assert!(!probe.is_connected().await);
    }
}
