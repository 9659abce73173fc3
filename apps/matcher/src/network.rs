//! Connectivity probe consulted by the upload step before and after a transfer.

use async_trait::async_trait;
use tracing::debug;

#[async_trait]
pub trait NetworkStatus: Send + Sync {
    async fn is_online(&self) -> bool;
}

/// Reports online when the API host resolves.
pub struct DnsProbe {
    host_port: String,
}

impl DnsProbe {
    /// Derives `host:port` from the API base URL. Returns `None` for URLs without a host.
    pub fn from_base_url(base_url: &str) -> Option<Self> {
        let url = reqwest::Url::parse(base_url).ok()?;
        let host = url.host_str()?.to_string();
        let port = url.port_or_known_default()?;
        Some(Self {
            host_port: format!("{host}:{port}"),
        })
    }

    pub fn host_port(&self) -> &str {
        &self.host_port
    }
}

#[async_trait]
impl NetworkStatus for DnsProbe {
    async fn is_online(&self) -> bool {
        match tokio::net::lookup_host(self.host_port.as_str()).await {
            Ok(mut addrs) => addrs.next().is_some(),
            Err(e) => {
                debug!("Connectivity probe for {} failed: {e}", self.host_port);
                false
            }
        }
    }
}

/// Always reports the same status. Used when no probe can be derived.
pub struct FixedStatus(pub bool);

#[async_trait]
impl NetworkStatus for FixedStatus {
    async fn is_online(&self) -> bool {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_uses_default_port() {
        let probe = DnsProbe::from_base_url("https://api.example.com/v1").unwrap();
        assert_eq!(probe.host_port(), "api.example.com:443");
        let probe = DnsProbe::from_base_url("http://localhost:8000").unwrap();
        assert_eq!(probe.host_port(), "localhost:8000");
    }

    #[test]
    fn test_probe_requires_a_host() {
        assert!(DnsProbe::from_base_url("not a url").is_none());
    }

    #[tokio::test]
    async fn test_loopback_is_online() {
        let probe = DnsProbe::from_base_url("http://127.0.0.1:9").unwrap();
        assert!(probe.is_online().await);
    }
}
