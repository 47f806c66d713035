//! Reusable booking server runtime.
//!
//! Provides [`ServerHandle`] that encapsulates the full server lifecycle:
//! storage init, migrations, REST API, metrics, and graceful shutdown.

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use chrono::NaiveTime;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use crate::config::{AppConfig, DbDriver};
use crate::domain::scheduling::{OperatingWindow, SlotGrid};
use crate::domain::station::{PostalAddress, Station};
use crate::domain::user::User;
use crate::domain::RepositoryProvider;
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::{init_database, DatabaseConfig, InMemoryStorage, SeaOrmRepositoryProvider};
use crate::interfaces::http::{create_api_router, ApiState};
use crate::shared::shutdown::{run_with_timeout, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the booking server.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Seed a demo station and user into in-memory storage (default: true).
    pub seed_demo_data: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            seed_demo_data: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running booking server.
///
/// # Examples
///
/// ```rust,no_run
/// use powerme_booking::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Repository provider for data access.
    pub repos: Arc<dyn RepositoryProvider>,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the REST API is bound to.
    pub local_addr: SocketAddr,
    db: Option<DatabaseConnection>,
    shutdown: ShutdownSignal,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the booking server with the given options.
    ///
    /// This will:
    /// 1. Install the Prometheus metrics recorder
    /// 2. Open storage (SQLite with migrations, or in-memory)
    /// 3. Build the booking and station services
    /// 4. Start the REST API server (with Swagger UI)
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;
        app_cfg.validate()?;
        info!("Starting PowerMe booking service...");

        let prometheus_handle = prometheus_handle();

        // ── Storage ────────────────────────────────────────────
        let (repos, db): (Arc<dyn RepositoryProvider>, Option<DatabaseConnection>) =
            match app_cfg.database.driver {
                DbDriver::Sqlite => {
                    let db_config = DatabaseConfig {
                        url: app_cfg.database.url.clone(),
                    };
                    let db = init_database(&db_config).await?;

                    if opts.auto_migrate {
                        info!("Running database migrations...");
                        Migrator::up(&db, None).await?;
                        info!("Migrations completed");
                    }

                    let repos: Arc<dyn RepositoryProvider> =
                        Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
                    (repos, Some(db))
                }
                DbDriver::Memory => {
                    warn!("Using in-memory storage, bookings are lost on restart");
                    let storage = InMemoryStorage::new();
                    if opts.seed_demo_data {
                        seed_demo_data(&storage);
                    }
                    let repos: Arc<dyn RepositoryProvider> = Arc::new(storage);
                    (repos, None)
                }
            };

        // ── Services & router ──────────────────────────────────
        let tz = app_cfg.booking.tz()?;
        info!(time_zone = %tz, "Slot grid configured");
        let state = ApiState::new(repos.clone(), SlotGrid::new(tz), db.clone());
        let api_router = create_api_router(state, prometheus_handle);

        // ── REST API server ────────────────────────────────────
        let api_addr = app_cfg.server.address();
        let listener = tokio::net::TcpListener::bind(&api_addr).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let shutdown = ShutdownSignal::new();
        let api_shutdown = shutdown.clone();
        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            repos,
            config: app_cfg,
            local_addr,
            db,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.clone()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.listen_for_os_signals();
    }

    /// Trigger graceful shutdown (non-blocking).
    pub fn trigger_shutdown(&self) {
        self.shutdown.trigger();
    }

    /// Wait for the server to stop, then release storage.
    ///
    /// In-flight requests get `server.shutdown_timeout` seconds once
    /// shutdown has been triggered.
    pub async fn wait(self) {
        let timeout = Duration::from_secs(self.config.server.shutdown_timeout);
        let mut api_task = self.api_task;

        tokio::select! {
            result = &mut api_task => log_task_exit(result),
            _ = self.shutdown.wait() => {
                info!("Waiting for in-flight requests to complete...");
                let drained = run_with_timeout(timeout, async {
                    log_task_exit((&mut api_task).await);
                })
                .await;
                if !drained {
                    api_task.abort();
                }
            }
        }

        if let Some(db) = self.db {
            if let Err(e) = db.close().await {
                warn!("Error closing database connection: {}", e);
            } else {
                info!("Database connection closed");
            }
        }

        info!("PowerMe booking service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down PowerMe booking service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    /// Check if the server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

fn log_task_exit(result: Result<(), tokio::task::JoinError>) {
    match result {
        Ok(()) => info!("REST API server stopped"),
        Err(e) => error!("REST API server task panicked: {}", e),
    }
}

/// The global recorder can only be installed once per process; restarts
/// within the same process reuse the first handle.
fn prometheus_handle() -> Option<PrometheusHandle> {
    static PROM_HANDLE: OnceLock<Option<PrometheusHandle>> = OnceLock::new();

    PROM_HANDLE
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                info!("Prometheus metrics recorder installed");
                Some(handle)
            }
            Err(e) => {
                warn!("Prometheus recorder unavailable, /metrics disabled: {}", e);
                None
            }
        })
        .clone()
}

/// One station open 07:00-22:00 and one user, so a fresh in-memory
/// instance can take bookings right away.
fn seed_demo_data(storage: &InMemoryStorage) {
    let window = NaiveTime::from_hms_opt(7, 0, 0)
        .zip(NaiveTime::from_hms_opt(22, 0, 0))
        .map(|(from, to)| OperatingWindow::new(from, to));

    storage.upsert_station(Station {
        id: 1,
        name: "Borne Place Bellecour".into(),
        hourly_rate: Decimal::new(850, 2),
        is_active: true,
        operating_window: window,
        location_id: 1,
        address: PostalAddress {
            street: "Place Bellecour".into(),
            postal_code: "69002".into(),
            city: "Lyon".into(),
        },
    });
    storage.insert_user(User::new("demo-user", "demo@powerme.local", "Demo User"));

    info!("Seeded demo station 1 and user 'demo-user'");
}

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup (before [`ServerHandle::start`]).
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
