// Main entry point - Dashboard lookup, generation and publishing
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use grafana_dashgen::application::dashboard_uploader::DashboardUploader;
use grafana_dashgen::application::publisher::DEFAULT_OUTPUT_DIR;
use grafana_dashgen::application::registry::DashboardRegistry;
use grafana_dashgen::application::runner::run;
use grafana_dashgen::infrastructure::config::load_grafana_settings;
use grafana_dashgen::infrastructure::grafana_client::GrafanaClient;

/// Generate a Grafana dashboard into dist/<name>.json and push a debug copy
/// when GRAFANA_URL is set
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// Dashboard to generate, e.g. cert-manager
    name: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let settings = load_grafana_settings()?;
    let uploader = GrafanaClient::from_settings(&settings)
        .map(|client| Arc::new(client) as Arc<dyn DashboardUploader>);

    run(
        &DashboardRegistry::builtin(),
        &cli.name,
        uploader,
        Path::new(DEFAULT_OUTPUT_DIR),
    )
    .await?;

    Ok(())
}
