/*!
 * Connection-establishment orchestrator
 *
 * A small state machine coordinating three mutually-exclusive flows against
 * one reachability check: re-validating the saved address on startup, manual
 * address entry, and automatic tailnet discovery. Every confirmed address is
 * persisted and handed off; every failure is absorbed into a status message
 * and returns the machine to `Idle`.
 *
 * # Concurrency
 *
 * Execution is single-threaded and event-driven. Each flow suspends at
 * exactly one await point (its oracle call) and runs to completion before
 * another flow can start: the methods take `&mut self`, and the state guard
 * rejects triggers unless the machine is `Idle`. The mutual exclusion of
 * `CheckingSaved` / `CheckingManual` / `Discovering` is therefore structural,
 * not maintained by flags or locks.
 */

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::address;
use crate::cache::AddressCache;
use crate::config::BootstrapConfig;
use crate::oracle::{DiscoveryOracle, Navigator, ReachabilityOracle};
use crate::status::{self, StatusMessage};

/// Phase of the connection bootstrap. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Reading the cache; user input is not yet accepted
    Initializing,
    /// Stable; accepts manual submit and discovery triggers
    Idle,
    /// Re-validating the remembered address from a previous session
    CheckingSaved,
    /// Checking a manually entered address
    CheckingManual,
    /// Searching the tailnet for a candidate server
    Discovering,
    /// Hand-off initiated; terminal, all further input is ignored
    Redirecting,
}

/// The connection-establishment state machine.
///
/// Owns the current state, the status line, and the address input field the
/// front end renders. Oracles and the navigator are injected behind traits so
/// tests can script their outcomes.
pub struct ConnectionOrchestrator {
    reachability: Arc<dyn ReachabilityOracle>,
    discovery: Arc<dyn DiscoveryOracle>,
    navigator: Arc<dyn Navigator>,
    cache: AddressCache,
    server_port: u16,
    redirect_delay: Duration,
    state: ConnectionState,
    status: StatusMessage,
    address_input: String,
}

impl ConnectionOrchestrator {
    /// Create an orchestrator in the `Initializing` state
    pub fn new(
        reachability: Arc<dyn ReachabilityOracle>,
        discovery: Arc<dyn DiscoveryOracle>,
        navigator: Arc<dyn Navigator>,
        cache: AddressCache,
        config: &BootstrapConfig,
    ) -> Self {
        Self {
            reachability,
            discovery,
            navigator,
            cache,
            server_port: config.server_port,
            redirect_delay: Duration::from_millis(config.redirect_delay_ms),
            state: ConnectionState::Initializing,
            status: StatusMessage::none(),
            address_input: String::new(),
        }
    }

    /// Current state
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Current status line
    pub fn status(&self) -> &StatusMessage {
        &self.status
    }

    /// Contents of the address input field. Pre-filled with the stale saved
    /// address after a failed startup re-check, and retained after a failed
    /// manual check, so the user never has to retype.
    pub fn address_input(&self) -> &str {
        &self.address_input
    }

    /// Startup flow: re-validate the remembered address before any user
    /// interaction. No-op unless the machine is still `Initializing`.
    pub async fn start(&mut self) {
        if self.state != ConnectionState::Initializing {
            debug!("start ignored in state {:?}", self.state);
            return;
        }

        let Some(saved) = self.cache.read() else {
            info!("no cached server address; awaiting first input");
            self.status = status::welcome();
            self.state = ConnectionState::Idle;
            return;
        };

        info!("re-validating saved server address {}", saved);
        self.address_input = saved.clone();
        self.state = ConnectionState::CheckingSaved;
        self.status = status::checking_saved(&saved);

        match self.reachability.check(&saved).await {
            Ok(true) => {
                // Persist unchanged so the write timestamp reflects this session
                self.persist(&saved);
                self.status = status::server_found();
                self.hand_off(&saved);
            }
            Ok(false) => {
                // The stale value stays in storage; it is only overwritten
                // by a later successful check
                info!("saved server {} is no longer reachable", saved);
                self.status = status::saved_unreachable();
                self.state = ConnectionState::Idle;
            }
            Err(e) => {
                warn!("re-check of saved server {} failed: {}", saved, e);
                self.status = status::saved_check_failed(&e.to_string());
                self.state = ConnectionState::Idle;
            }
        }
    }

    /// Manual-entry flow. Blank input is rejected locally without an oracle
    /// call; triggers outside `Idle` are no-ops.
    pub async fn submit_manual(&mut self, input: &str) {
        if self.state != ConnectionState::Idle {
            debug!("manual submit ignored in state {:?}", self.state);
            return;
        }

        let addr = input.trim();
        if addr.is_empty() {
            self.status = status::empty_input();
            return;
        }

        let addr = addr.to_string();
        self.address_input = addr.clone();
        self.state = ConnectionState::CheckingManual;
        self.status = status::checking_manual();

        match self.reachability.check(&addr).await {
            Ok(true) => {
                self.persist(&addr);
                self.status = status::server_found();
                self.hand_off(&addr);
            }
            Ok(false) => {
                info!("server at {} is not accessible", addr);
                self.status = status::unreachable();
                self.state = ConnectionState::Idle;
            }
            Err(e) => {
                warn!("reachability check of {} failed: {}", addr, e);
                self.status = status::probe_failed(&e.to_string());
                self.state = ConnectionState::Idle;
            }
        }
    }

    /// Discovery flow. On success the hand-off waits `redirect_delay` so the
    /// status message can be read; this is a presentation affordance, not a
    /// retry. Triggers outside `Idle` are no-ops.
    pub async fn trigger_discovery(&mut self) {
        if self.state != ConnectionState::Idle {
            debug!("discovery ignored in state {:?}", self.state);
            return;
        }

        self.state = ConnectionState::Discovering;
        self.status = status::discovering();

        match self.discovery.find().await {
            Ok(Some(addr)) => {
                info!("discovered server at {}", addr);
                self.persist(&addr);
                self.address_input = addr.clone();
                self.status = status::discovered(&addr);
                self.state = ConnectionState::Redirecting;
                tokio::time::sleep(self.redirect_delay).await;
                self.navigator.replace(&address::web_url(&addr, self.server_port));
            }
            Ok(None) => {
                info!("discovery found no reachable server");
                self.status = status::nothing_discovered();
                self.state = ConnectionState::Idle;
            }
            Err(e) => {
                warn!("discovery failed: {}", e);
                self.status = status::discovery_failed(&e);
                self.state = ConnectionState::Idle;
            }
        }
    }

    /// Persist a confirmed-reachable address. A write failure is a non-fatal
    /// warning; the session still hands off, the address just won't be
    /// remembered next time.
    fn persist(&self, addr: &str) {
        if let Err(e) = self.cache.write(addr) {
            warn!("failed to persist server address: {}", e);
        }
    }

    /// Transfer control to the server. Terminal: no state transitions follow.
    fn hand_off(&mut self, addr: &str) {
        let url = address::web_url(addr, self.server_port);
        info!("handing off to {}", url);
        self.state = ConnectionState::Redirecting;
        self.navigator.replace(&url);
    }
}
