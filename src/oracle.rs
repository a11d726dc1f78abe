/*!
 * External collaborators: reachability probe, tailnet discovery, hand-off
 *
 * The orchestrator only sees the three traits below. The concrete
 * implementations — an HTTP probe against Emby's public system-info endpoint
 * and a `tailscale status --json` walk over the peer table — live here so
 * tests can swap in scripted stand-ins.
 */

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::address;
use crate::error::{DiscoveryError, ProbeError};

/// Confirms whether a server is live and responding at an address.
///
/// `Ok(true)` means confirmed live; `Ok(false)` covers every
/// non-confirmation (down, wrong port, wrong protocol). `Err` means the
/// check itself could not be performed; its message is shown to the user.
#[async_trait]
pub trait ReachabilityOracle: Send + Sync {
    async fn check(&self, address: &str) -> Result<bool, ProbeError>;
}

/// Searches the tailnet and returns a single candidate address, or none
#[async_trait]
pub trait DiscoveryOracle: Send + Sync {
    async fn find(&self) -> Result<Option<String>, DiscoveryError>;
}

/// Hands control off to a confirmed server URL. No return path.
pub trait Navigator: Send + Sync {
    fn replace(&self, url: &str);
}

/// HTTP reachability probe against Emby's `/System/Info/Public` endpoint
#[derive(Debug, Clone)]
pub struct HttpReachability {
    client: reqwest::Client,
    port: u16,
    timeout: Duration,
}

impl HttpReachability {
    /// Create a probe assuming the given port for bare host addresses
    pub fn new(port: u16, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            port,
            timeout,
        }
    }
}

#[async_trait]
impl ReachabilityOracle for HttpReachability {
    async fn check(&self, addr: &str) -> Result<bool, ProbeError> {
        let url = address::probe_url(addr, self.port);
        debug!("probing {}", url);

        match self.client.get(&url).timeout(self.timeout).send().await {
            Ok(response) => {
                let live = response.status().is_success();
                debug!("probe of {} returned {} (live: {})", url, response.status(), live);
                Ok(live)
            }
            // A malformed request means the check never ran; surface it
            Err(e) if e.is_builder() => Err(ProbeError(e.to_string())),
            // Connect/timeout failures are non-confirmation, same as a down server
            Err(e) => {
                warn!("probe of {} failed: {}", url, e);
                Ok(false)
            }
        }
    }
}

/// Tailnet discovery via the Tailscale CLI.
///
/// Runs `tailscale status --json`, then probes each online peer's first
/// IPv4 address through the shared reachability oracle. Returns the first
/// peer that answers as a live server.
pub struct TailscaleDiscovery {
    probe: Arc<dyn ReachabilityOracle>,
}

/// Subset of `tailscale status --json` output we care about
#[derive(Debug, Deserialize)]
struct TailscaleStatus {
    #[serde(rename = "Peer", default)]
    peers: Option<HashMap<String, TailscalePeer>>,
}

#[derive(Debug, Deserialize)]
struct TailscalePeer {
    #[serde(rename = "HostName", default)]
    hostname: String,

    #[serde(rename = "TailscaleIPs", default)]
    ips: Vec<String>,

    #[serde(rename = "Online", default)]
    online: bool,
}

impl TailscaleDiscovery {
    /// Create a discovery oracle that validates candidates with `probe`
    pub fn new(probe: Arc<dyn ReachabilityOracle>) -> Self {
        Self { probe }
    }

    async fn peer_table(&self) -> Result<Vec<TailscalePeer>, DiscoveryError> {
        let output = Command::new("tailscale")
            .args(["status", "--json"])
            .output()
            .await
            .map_err(|e| DiscoveryError::ToolUnavailable(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(DiscoveryError::ToolUnavailable(stderr));
        }

        let status: TailscaleStatus = serde_json::from_slice(&output.stdout)
            .map_err(|e| DiscoveryError::Other(format!("unexpected tailscale status output: {}", e)))?;

        let peers: Vec<TailscalePeer> = status
            .peers
            .unwrap_or_default()
            .into_values()
            .collect();

        if peers.is_empty() {
            return Err(DiscoveryError::NoPeersFound);
        }

        Ok(peers)
    }
}

#[async_trait]
impl DiscoveryOracle for TailscaleDiscovery {
    async fn find(&self) -> Result<Option<String>, DiscoveryError> {
        let peers = self.peer_table().await?;
        debug!("tailnet has {} peer(s)", peers.len());

        for peer in &peers {
            if !peer.online {
                debug!("skipping offline peer {}", peer.hostname);
                continue;
            }

            // Tailscale lists the IPv4 address first, but don't rely on it
            let Some(ip) = peer.ips.iter().find(|ip| ip.contains('.')) else {
                continue;
            };

            match self.probe.check(ip).await {
                Ok(true) => {
                    debug!("peer {} ({}) is a live server", peer.hostname, ip);
                    return Ok(Some(ip.clone()));
                }
                Ok(false) => debug!("peer {} ({}) is not a server", peer.hostname, ip),
                Err(e) => warn!("probe of peer {} ({}) failed: {}", peer.hostname, ip, e),
            }
        }

        Ok(None)
    }
}
