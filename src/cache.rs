/*!
 * Persisted address cache
 *
 * A single-value key-value store holding the last confirmed-reachable server
 * address. Backed by a small JSON file (default ~/.berth/cache.json) keyed by
 * one well-known entry. There is no delete operation: a stale address stays
 * in storage until a later successful check overwrites it.
 */

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

use crate::error::{BootstrapError, Result};

/// Well-known key under which the server address is stored
pub const SERVER_ADDRESS_KEY: &str = "server_address";

/// File-backed single-value store for the last validated server address
#[derive(Debug, Clone)]
pub struct AddressCache {
    path: PathBuf,
}

impl AddressCache {
    /// Create a cache backed by the given file path
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default cache file path (~/.berth/cache.json)
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| BootstrapError::Cache("could not determine home directory".to_string()))?;
        Ok(home.join(".berth").join("cache.json"))
    }

    /// Read the cached address, if any.
    ///
    /// A missing file, unreadable file, or malformed entry is all treated
    /// identically to "no address cached"; the cause is logged at debug.
    pub fn read(&self) -> Option<String> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) => {
                debug!("cache read skipped ({}): {}", self.path.display(), e);
                return None;
            }
        };

        let entries: BTreeMap<String, String> = match serde_json::from_str(&contents) {
            Ok(m) => m,
            Err(e) => {
                debug!("cache file {} is malformed: {}", self.path.display(), e);
                return None;
            }
        };

        entries
            .get(SERVER_ADDRESS_KEY)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Persist an address, fully replacing any prior value.
    ///
    /// Write failures are returned to the caller; the orchestrator treats
    /// them as a non-fatal warning and continues with hand-off.
    pub fn write(&self, addr: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| BootstrapError::Cache(format!("failed to create {}: {}", parent.display(), e)))?;
        }

        let mut entries = BTreeMap::new();
        entries.insert(SERVER_ADDRESS_KEY.to_string(), addr.to_string());

        let contents = serde_json::to_string_pretty(&entries)
            .map_err(|e| BootstrapError::Cache(format!("failed to serialize cache: {}", e)))?;
        fs::write(&self.path, contents)
            .map_err(|e| BootstrapError::Cache(format!("failed to write {}: {}", self.path.display(), e)))?;

        Ok(())
    }

    /// Path of the backing file
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}
