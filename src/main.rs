/// kube-sync - pull live Kubernetes state into local manifests
///
/// Reads a multi-document YAML manifest, fetches each resource from the
/// cluster and writes the merged result back to the same file.
mod config;
mod error;
mod k8s;
mod manifest;
mod merge;
mod sync;
mod utils;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::SyncConfig;
use crate::k8s::KubernetesClient;
use crate::sync::{ManifestSynchronizer, SyncMode};

#[derive(Parser)]
#[command(name = "kube-sync")]
#[command(about = "Merge live Kubernetes resources back into local manifests", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "kube-sync.yaml", global = true)]
    config: PathBuf,

    /// Kubeconfig file (overrides the configuration file)
    #[arg(long, global = true)]
    kubeconfig: Option<PathBuf>,

    /// Kubeconfig context (overrides the configuration file)
    #[arg(long, global = true)]
    context: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge whole online resources into the manifest
    Resources {
        /// Manifest file to update
        #[arg(short = 'f', long = "file")]
        file: PathBuf,

        /// Print the merged manifest instead of writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Sync only container image, env and command of workloads
    Containers {
        /// Manifest file to update
        #[arg(short = 'f', long = "file")]
        file: PathBuf,

        /// Print the merged manifest instead of writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Generate example configuration file
    Init,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so dry-run output can be piped
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("kube_sync={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match cli.command {
        Commands::Resources { ref file, dry_run } => {
            sync_manifest(&cli, file, SyncMode::Resources, dry_run).await
        }
        Commands::Containers { ref file, dry_run } => {
            sync_manifest(&cli, file, SyncMode::Containers, dry_run).await
        }
        Commands::Init => init_config(&cli).await,
    };

    if let Err(e) = result {
        error!("Failed to sync Kubernetes resources: {:#}", e);
        std::process::exit(1);
    }
}

/// Merge online resources into the manifest at `file`
async fn sync_manifest(cli: &Cli, file: &Path, mode: SyncMode, dry_run: bool) -> Result<()> {
    let config = SyncConfig::resolve(&cli.config, cli.kubeconfig.clone(), cli.context.clone())
        .context("Failed to load configuration")?;

    let client = KubernetesClient::connect(&config.kube).await?;
    let synchronizer = ManifestSynchronizer::new(client);

    let rendered = synchronizer
        .sync_file(file, mode, dry_run)
        .await
        .with_context(|| format!("Failed to merge and update {}", file.display()))?;

    if dry_run {
        print!("{}", rendered);
    }

    Ok(())
}

/// Initialize example configuration file
async fn init_config(cli: &Cli) -> Result<()> {
    if cli.config.exists() {
        anyhow::bail!(
            "Configuration file already exists: {}",
            cli.config.display()
        );
    }

    let yaml = SyncConfig::example_yaml()?;

    tokio::fs::write(&cli.config, yaml)
        .await
        .context("Failed to write configuration file")?;

    info!("Example configuration created: {}", cli.config.display());
    info!("");
    info!("Next steps:");
    info!("  1. Point kube.kubeconfig / kube.context at your cluster (optional)");
    info!("  2. Pull live state into a manifest:");
    info!("     kube-sync resources -f app.yaml");
    info!("  3. Or only refresh container images, env and commands:");
    info!("     kube-sync containers -f app.yaml");

    Ok(())
}
