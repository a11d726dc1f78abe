/*!
 * Error types for berth
 */

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BootstrapError>;

/// Errors raised by the bootstrap machinery itself (config, cache, I/O).
///
/// Oracle failures are deliberately not part of this enum: the orchestrator
/// absorbs them at its boundary and converts them into status messages, so
/// they never propagate as `Err` out of a flow.
#[derive(Error, Debug)]
pub enum BootstrapError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Address cache read/write error
    #[error("address cache error: {0}")]
    Cache(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A reachability probe could not be dispatched at all.
///
/// Distinct from an unreachable server (which is the `Ok(false)` outcome of
/// the probe): this means the check itself failed, and its message text is
/// preserved for display.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct ProbeError(pub String);

/// Typed failure categories for tailnet discovery.
///
/// The orchestrator switches on the variant to pick user guidance instead of
/// substring-matching error text.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// The discovery tool is missing or not running
    #[error("discovery tool unavailable: {0}")]
    ToolUnavailable(String),

    /// The tailnet has no peer devices to probe
    #[error("no peer devices found on the tailnet")]
    NoPeersFound,

    /// Any other failure; the message is passed through verbatim
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_error_preserves_message() {
        let err = ProbeError("builder error: invalid URL".to_string());
        assert_eq!(err.to_string(), "builder error: invalid URL");
    }

    #[test]
    fn test_discovery_error_display() {
        let err = DiscoveryError::ToolUnavailable("tailscale: not found".to_string());
        assert!(err.to_string().contains("tailscale: not found"));

        let err = DiscoveryError::NoPeersFound;
        assert_eq!(err.to_string(), "no peer devices found on the tailnet");

        let err = DiscoveryError::Other("status output was not valid JSON".to_string());
        assert_eq!(err.to_string(), "status output was not valid JSON");
    }
}
