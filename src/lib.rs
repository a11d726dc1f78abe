/*!
 * Berth - Connection bootstrap for a personal Emby server
 *
 * Decides how the client should reach its media server:
 * - re-validate the last remembered address on startup
 * - accept a manually entered address
 * - discover a server automatically on the Tailscale tailnet
 *
 * Every confirmed-reachable address is persisted and handed off to as a
 * fully-qualified web URL. Failures never crash the flow; they surface as
 * inline status messages and return the machine to an idle, retryable state.
 */

pub mod address;
pub mod cache;
pub mod config;
pub mod error;
pub mod logging;
pub mod oracle;
pub mod orchestrator;
pub mod status;

// Re-export commonly used types
pub use cache::AddressCache;
pub use config::{BootstrapConfig, LogLevel};
pub use error::{BootstrapError, DiscoveryError, ProbeError, Result};
pub use oracle::{DiscoveryOracle, HttpReachability, Navigator, ReachabilityOracle, TailscaleDiscovery};
pub use orchestrator::{ConnectionOrchestrator, ConnectionState};
pub use status::StatusMessage;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
