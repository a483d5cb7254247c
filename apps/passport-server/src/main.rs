use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use api_ingress::{ApiIngress, ApiIngressConfig};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use modkit_db::{redact_credentials_in_dsn, resolve_sqlite_dsn, ConnectOpts, DbHandle};
use passports::config::PassportsConfig;
use passports::Passports;
use runtime::{AppConfig, DatabaseConfig};
use tokio_util::sync::CancellationToken;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const API_INGRESS_MODULE: &str = "api_ingress";
const MOCK_DSN: &str = "sqlite::memory:";

/// Passport Desk Server - passport application records for a travel agency
#[derive(Parser)]
#[command(name = "passport-server")]
#[command(about = "Passport Desk Server - passport application records for a travel agency")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory SQLite database instead of the configured one
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(cli.port, cli.verbose);

    // Print config and exit if requested
    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    let logging_config = config.logging.as_ref().cloned().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("Passport Desk Server starting");

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config, cli.mock).await,
        Commands::Check => check_config(config, cli.mock),
    }
}

/// Effective DSN: in-memory SQLite under `--mock`, otherwise the configured
/// URL with relative SQLite paths resolved under `home_dir`.
fn database_dsn(config: &AppConfig, mock: bool) -> Result<String> {
    if mock {
        return Ok(MOCK_DSN.to_string());
    }
    let url = config
        .database
        .as_ref()
        .map(|db| db.url.trim())
        .filter(|url| !url.is_empty())
        .ok_or_else(|| anyhow!("Database URL not configured (use --mock for an in-memory database)"))?;
    DbHandle::detect(url).with_context(|| format!("Invalid database DSN '{}'", redact_credentials_in_dsn(url)))?;
    Ok(resolve_sqlite_dsn(url, Path::new(&config.server.home_dir)))
}

fn connect_opts(db_config: Option<&DatabaseConfig>) -> ConnectOpts {
    let mut opts = ConnectOpts {
        acquire_timeout: Some(Duration::from_secs(5)),
        create_sqlite_dirs: true,
        ..Default::default()
    };
    if let Some(cfg) = db_config {
        if cfg.max_conns.is_some() {
            opts.max_conns = cfg.max_conns;
        }
        if let Some(ms) = cfg.busy_timeout_ms {
            opts.busy_timeout_ms = u64::from(ms);
        }
    }
    opts
}

async fn run_server(config: AppConfig, mock: bool) -> Result<()> {
    tracing::info!("Initializing modules...");

    let passports_cfg: PassportsConfig = config.module_config(Passports::NAME)?;
    let ingress_cfg: ApiIngressConfig = config.module_config(API_INGRESS_MODULE)?;

    let dsn = database_dsn(&config, mock)?;
    tracing::info!("Connecting to database: {}", redact_credentials_in_dsn(&dsn));
    let db = DbHandle::connect(&dsn, connect_opts(config.database.as_ref())).await?;
    tracing::info!("Connected DB backend: {:?}", db.engine());

    Passports::migrate(&db.sea()).await?;
    let passports = Passports::init(db.sea(), passports_cfg)?;

    let ingress = ApiIngress::new(ingress_cfg);
    let api = passports.register_rest(axum::Router::new())?;
    let router = ingress.build_router(api, Some(passports.openapi()))?;
    let addr = ingress
        .config()
        .bind_addr_or(&config.server.host, config.server.port);

    let cancel = CancellationToken::new();
    runtime::shutdown::cancel_on_signal(cancel.clone());

    let served = ingress.serve(&addr, router, cancel).await;

    db.close().await;
    tracing::info!("Passport Desk Server stopped");
    served
}

fn check_config(config: AppConfig, mock: bool) -> Result<()> {
    tracing::info!("Checking configuration...");

    let _: PassportsConfig = config.module_config(Passports::NAME)?;
    let _: ApiIngressConfig = config.module_config(API_INGRESS_MODULE)?;
    let dsn = database_dsn(&config, mock)?;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("Database: {}", redact_credentials_in_dsn(&dsn));
    println!("Server config:");
    println!("{}", config.to_yaml()?);

    Ok(())
}
