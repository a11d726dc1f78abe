/*!
 * User-facing status messages
 *
 * Pure mapping from flow outcomes to display text. Severity is an explicit
 * tag set at construction, never inferred from the message text, so the
 * wording can change without breaking presentation.
 */

use crate::error::DiscoveryError;

/// A status line shown to the user, with an explicit severity flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    /// Human-readable message text
    pub text: String,

    /// Whether this message should be styled as an error
    pub is_error: bool,
}

impl StatusMessage {
    /// A neutral/informational message
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    /// An error message
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }

    /// An empty placeholder, shown before any flow has produced output
    pub fn none() -> Self {
        Self::info("")
    }
}

/// First-run prompt, shown when no address has ever been cached
pub fn welcome() -> StatusMessage {
    StatusMessage::info("Welcome! Enter your Emby server address to get started.")
}

/// Prompt re-emitted when manual connect is submitted with a blank address
pub fn empty_input() -> StatusMessage {
    StatusMessage::info("Please enter a server address.")
}

/// Shown while the saved address is being re-validated on startup
pub fn checking_saved(addr: &str) -> StatusMessage {
    StatusMessage::info(format!("Checking saved server {}...", addr))
}

/// Shown while a manually entered address is being checked
pub fn checking_manual() -> StatusMessage {
    StatusMessage::info("Checking server connection...")
}

/// Shown while the tailnet is being searched
pub fn discovering() -> StatusMessage {
    StatusMessage::info("Searching the tailnet for an Emby server...")
}

/// The address was confirmed reachable; hand-off is imminent
pub fn server_found() -> StatusMessage {
    StatusMessage::info("Server found! Redirecting...")
}

/// Discovery produced a reachable candidate; hand-off follows a short delay
pub fn discovered(addr: &str) -> StatusMessage {
    StatusMessage::info(format!("Found server at {}! Redirecting...", addr))
}

/// The saved address no longer responds
pub fn saved_unreachable() -> StatusMessage {
    StatusMessage::error("Saved server is not accessible. Enter an address or search again.")
}

/// The saved-address re-check itself failed; the detail is preserved
pub fn saved_check_failed(detail: &str) -> StatusMessage {
    StatusMessage::error(format!("Error checking saved server: {}", detail))
}

/// A manually entered address is not a live server
pub fn unreachable() -> StatusMessage {
    StatusMessage::error("Server not accessible. Please check the address and try again.")
}

/// The reachability check itself failed; the raw detail is surfaced
pub fn probe_failed(detail: &str) -> StatusMessage {
    StatusMessage::error(format!("Error: {}", detail))
}

/// Discovery completed without finding any reachable server
pub fn nothing_discovered() -> StatusMessage {
    StatusMessage::info("No server found automatically. Enter an address manually.")
}

/// Map a typed discovery failure to actionable guidance
pub fn discovery_failed(err: &DiscoveryError) -> StatusMessage {
    match err {
        DiscoveryError::ToolUnavailable(_) => StatusMessage::error(
            "Tailscale is not available. Install Tailscale and make sure it is running, or enter an address manually.",
        ),
        DiscoveryError::NoPeersFound => StatusMessage::error(
            "No Tailscale devices found. Make sure this machine is connected to your tailnet.",
        ),
        DiscoveryError::Other(msg) => StatusMessage::error(msg.clone()),
    }
}
