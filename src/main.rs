/*!
 * Berth CLI - connection bootstrap for a personal Emby server
 *
 * On startup the orchestrator re-validates the remembered address; if that
 * does not hand off, the user is prompted to enter an address or search the
 * tailnet. Hand-off prints the confirmed server URL.
 */

use anyhow::Result;
use clap::Parser;
use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use berth::{
    cache::AddressCache,
    config::BootstrapConfig,
    logging,
    oracle::{HttpReachability, Navigator, TailscaleDiscovery},
    orchestrator::{ConnectionOrchestrator, ConnectionState},
    status::StatusMessage,
};

#[derive(Parser)]
#[command(name = "berth")]
#[command(version, about = "Connection bootstrap for a personal Emby server", long_about = None)]
struct Cli {
    /// Server address to check directly, skipping the interactive prompt
    #[arg(short = 'a', long = "address", value_name = "ADDR")]
    address: Option<String>,

    /// Search the tailnet immediately instead of prompting
    #[arg(long)]
    discover: bool,

    /// Configuration file (default: ~/.berth/berth.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Address cache file (default: ~/.berth/cache.json)
    #[arg(long = "cache-file", value_name = "PATH")]
    cache_file: Option<PathBuf>,

    /// Server port assumed for bare host addresses
    #[arg(long, value_name = "PORT")]
    port: Option<u16>,

    /// Delay before hand-off after discovery, in milliseconds
    #[arg(long = "redirect-delay", value_name = "MS")]
    redirect_delay: Option<u64>,

    /// Log file path (default: stderr)
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Hand-off for the CLI: print the confirmed URL. Opening it is left to the
/// surrounding environment (browser, wrapper script, desktop shell).
struct PrintNavigator;

impl Navigator for PrintNavigator {
    fn replace(&self, url: &str) {
        println!();
        println!("  {} {}", style("Server ready:").green().bold(), style(url).cyan());
        println!();
    }
}

fn load_config(cli: &Cli) -> Result<BootstrapConfig> {
    let mut config = match &cli.config {
        Some(path) => BootstrapConfig::from_file(path)?,
        None => {
            let path = BootstrapConfig::default_path()?;
            if path.exists() {
                BootstrapConfig::from_file(&path)?
            } else {
                BootstrapConfig::default()
            }
        }
    };

    // CLI flags override file values
    if let Some(port) = cli.port {
        config.server_port = port;
    }
    if let Some(delay) = cli.redirect_delay {
        config.redirect_delay_ms = delay;
    }
    if let Some(ref path) = cli.cache_file {
        config.cache_file = Some(path.clone());
    }
    if let Some(ref path) = cli.log_file {
        config.log_file = Some(path.clone());
    }
    if cli.verbose {
        config.verbose = true;
    }

    Ok(config)
}

fn print_status(msg: &StatusMessage) {
    if msg.text.is_empty() {
        return;
    }
    if msg.is_error {
        println!("  {}", style(&msg.text).red());
    } else {
        println!("  {}", style(&msg.text).cyan());
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    logging::init_logging(&config)?;

    let cache_path = match &config.cache_file {
        Some(path) => path.clone(),
        None => AddressCache::default_path()?,
    };
    let cache = AddressCache::new(cache_path);

    let probe = Arc::new(HttpReachability::new(
        config.server_port,
        Duration::from_secs(config.probe_timeout_secs),
    ));
    let discovery = Arc::new(TailscaleDiscovery::new(probe.clone()));
    let navigator = Arc::new(PrintNavigator);

    let mut orchestrator =
        ConnectionOrchestrator::new(probe, discovery, navigator, cache, &config);

    // Startup re-validation happens before any input is accepted
    orchestrator.start().await;
    print_status(orchestrator.status());

    if orchestrator.state() == ConnectionState::Redirecting {
        return Ok(());
    }

    // One-shot modes for scripted use
    if let Some(ref addr) = cli.address {
        orchestrator.submit_manual(addr).await;
        print_status(orchestrator.status());
        if orchestrator.state() != ConnectionState::Redirecting {
            std::process::exit(1);
        }
        return Ok(());
    }
    if cli.discover {
        orchestrator.trigger_discovery().await;
        print_status(orchestrator.status());
        if orchestrator.state() != ConnectionState::Redirecting {
            std::process::exit(1);
        }
        return Ok(());
    }

    // Interactive prompt loop
    let theme = ColorfulTheme::default();
    while orchestrator.state() != ConnectionState::Redirecting {
        let choice = Select::with_theme(&theme)
            .with_prompt("How should berth find your server?")
            .items(&["Enter a server address", "Find automatically", "Quit"])
            .default(0)
            .interact()?;

        match choice {
            0 => {
                let addr: String = Input::with_theme(&theme)
                    .with_prompt("Server address")
                    .with_initial_text(orchestrator.address_input().to_string())
                    .allow_empty(true)
                    .interact_text()?;
                orchestrator.submit_manual(&addr).await;
            }
            1 => orchestrator.trigger_discovery().await,
            _ => break,
        }

        print_status(orchestrator.status());
    }

    Ok(())
}
