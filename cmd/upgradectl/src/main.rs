mod args;

use args::StartClusterUpgradeArgs;
use clap::{Parser, Subcommand};
use pkg_client::UpgradeClient;
use pkg_constants::network::{DEFAULT_ENDPOINT, DEFAULT_SERVER_TIMEOUT_SECS};
use pkg_constants::paths::DEFAULT_CLI_CONFIG;
use pkg_constants::upgrade::DEFAULT_MAX_REPLICA_SET_CHECK_TIMEOUT_SECS;
use pkg_types::UpgradeRequestBuilder;
use pkg_types::config::{CliConfigFile, load_config_file};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "upgradectl", about = "CLI tool for starting cluster upgrades")]
struct Cli {
    /// Path to YAML config file
    #[arg(long, short, default_value = DEFAULT_CLI_CONFIG)]
    config: String,

    /// Cluster management endpoint
    #[arg(long)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start upgrading the code or configuration version of the cluster
    StartClusterUpgrade(Box<StartClusterUpgradeArgs>),
}

/// Connection settings after merging CLI args > config file > defaults.
#[derive(Debug, PartialEq)]
struct Settings {
    endpoint: String,
    server_timeout: u64,
    max_replica_set_check_timeout: u64,
}

fn resolve_settings(
    cli_endpoint: Option<&str>,
    args: &StartClusterUpgradeArgs,
    file_cfg: &CliConfigFile,
) -> Settings {
    Settings {
        endpoint: cli_endpoint
            .or(file_cfg.endpoint.as_deref())
            .unwrap_or(DEFAULT_ENDPOINT)
            .to_string(),
        server_timeout: args
            .server_timeout
            .or(file_cfg.server_timeout)
            .unwrap_or(DEFAULT_SERVER_TIMEOUT_SECS),
        max_replica_set_check_timeout: args
            .max_replica_set_check_timeout
            .or(file_cfg.max_replica_set_check_timeout)
            .unwrap_or(DEFAULT_MAX_REPLICA_SET_CHECK_TIMEOUT_SECS),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so --dry-run output on stdout stays clean JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    // Load config file (returns defaults if file not found)
    let file_cfg: CliConfigFile = load_config_file(&cli.config)?;
    info!("Config file: {}", cli.config);

    match cli.command {
        Commands::StartClusterUpgrade(args) => {
            let settings = resolve_settings(cli.endpoint.as_deref(), &args, &file_cfg);
            if settings.max_replica_set_check_timeout > u32::MAX as u64 {
                warn!(
                    "Replica set check timeout bound {} exceeds the 32-bit field width",
                    settings.max_replica_set_check_timeout
                );
            }

            let request = match UpgradeRequestBuilder::from_input(args.to_input())
                .max_replica_set_check_timeout(settings.max_replica_set_check_timeout)
                .build()
            {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };

            if args.dry_run {
                println!("{}", serde_json::to_string_pretty(&request)?);
                return Ok(());
            }

            info!("Endpoint:       {}", settings.endpoint);
            info!("Server timeout: {}s", settings.server_timeout);

            let cancel = CancellationToken::new();
            let on_interrupt = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("Interrupted, cancelling upgrade request");
                    on_interrupt.cancel();
                }
            });

            let client = UpgradeClient::new(settings.endpoint)?;
            if let Err(e) = client
                .start_cluster_upgrade(&request, Some(settings.server_timeout), &cancel)
                .await
            {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }

            println!("Success!");
        }
    }

    Ok(())
}
