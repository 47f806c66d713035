//! PowerMe booking service
//!
//! REST API for booking half-hour charging slots on PowerMe stations.
//!
//! ```sh
//! # Run with default config (~/.config/powerme-booking/config.toml)
//! powerme-booking
//!
//! # Custom config path, in-memory storage for a quick try
//! powerme-booking --config ./config.toml --memory
//!
//! # Validate config without starting
//! powerme-booking --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};

use powerme_booking::config::{AppConfig, ConfigError, DbDriver};
use powerme_booking::server::{init_tracing, ServerHandle, ServerOptions};

/// PowerMe booking service: slot booking for EV charging stations.
#[derive(Parser, Debug)]
#[command(
    name = "powerme-booking",
    version,
    about = "Slot booking engine for PowerMe charging stations",
    long_about = "PowerMe booking: REST API that books 30-minute charging slots, \
                  prices them and reports station availability.\n\n\
                  Default config: ~/.config/powerme-booking/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "POWERME_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Use volatile in-memory storage with demo data instead of SQLite.
    #[arg(long)]
    memory: bool,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .unwrap_or_else(powerme_booking::default_config_path);

    let (mut config, missing) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, false),
        Err(ConfigError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            (AppConfig::default(), true)
        }
        Err(e) => {
            eprintln!("Failed to load config from {}: {}", config_path.display(), e);
            return Err(e.into());
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if cli.memory {
        config.database.driver = DbDriver::Memory;
    }
    config.validate()?;

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.server.address());
        println!("   Storage     : {:?} ({})", config.database.driver, config.database.url);
        println!("   Time zone   : {}", config.booking.time_zone);
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    init_tracing(&config);
    if missing {
        warn!(
            "No config file at {}, using default configuration",
            config_path.display()
        );
    } else {
        info!("Configuration loaded from {}", config_path.display());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        seed_demo_data: true,
    })
    .await?;

    handle.install_signal_handler();
    info!("Press Ctrl+C to shutdown gracefully.");

    handle.wait().await;

    Ok(())
}
