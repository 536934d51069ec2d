//! CLI command implementations
//!
//! Boot order for both commands: load config, open the store, build the
//! repositories, then act. Logging is initialized by [`run`] before any of it.

use std::path::Path;
use std::sync::Arc;

use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::bootstrap;
use crate::config::{AppConfig, StoreConfig};
use crate::http_server::HttpServer;
use crate::model::{Beer, Customer};
use crate::service::{BeerService, CustomerService};
use crate::store::{DocumentStore, Repository};

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Log filter used when `RUST_LOG` is unset
const DEFAULT_LOG_FILTER: &str = "taproom=info,tower_http=info";

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    init_logging();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port, seed } => serve(config.as_deref(), port, seed),
        Command::Seed { config } => seed(config.as_deref()),
    }
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn runtime() -> CliResult<Runtime> {
    Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))
}

/// Both typed repositories over one opened store
struct Repositories {
    beers: Repository<Beer>,
    customers: Repository<Customer>,
}

impl Repositories {
    async fn open(config: &StoreConfig) -> CliResult<Self> {
        let store: Arc<dyn DocumentStore> = config.open_store().await?;
        Ok(Self {
            beers: Repository::new(store.clone(), config.beer_collection.clone()),
            customers: Repository::new(store, config.customer_collection.clone()),
        })
    }

    async fn seed(&self) -> CliResult<()> {
        bootstrap::seed(&self.beers, &self.customers).await?;
        Ok(())
    }
}

/// Start the HTTP server
///
/// 1. Load configuration (defaults when no path is given)
/// 2. Open the configured store
/// 3. Optionally replace stored data with the samples
/// 4. Serve until Ctrl-C
pub fn serve(config_path: Option<&Path>, port: Option<u16>, seed: bool) -> CliResult<()> {
    let mut config = AppConfig::load(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
    }

    let rt = runtime()?;
    rt.block_on(async move {
        let repositories = Repositories::open(&config.store).await?;
        if seed {
            repositories.seed().await?;
        }

        let server = HttpServer::new(
            config.http,
            BeerService::new(repositories.beers),
            CustomerService::new(repositories.customers),
        );

        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Replace stored beers and customers with sample data, then exit
pub fn seed(config_path: Option<&Path>) -> CliResult<()> {
    let config = AppConfig::load(config_path)?;

    let rt = runtime()?;
    rt.block_on(async {
        let repositories = Repositories::open(&config.store).await?;
        repositories.seed().await
    })
}
