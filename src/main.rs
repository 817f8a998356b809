use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sme_intake_client::config::Config;
use sme_intake_client::intake_client::IntakeApiClient;
use sme_intake_client::wizard;

/// Main entry point for the intake wizard.
///
/// Initializes logging and configuration, builds the intake API client, and
/// hands control to the interactive wizard.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sme_intake_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize the intake API client
    let client = match IntakeApiClient::from_config(&config) {
        Ok(client) => {
            tracing::info!("Intake API client initialized: {}", config.api_base_url);
            client
        }
        Err(e) => {
            tracing::error!("Failed to initialize intake client: {}", e);
            anyhow::bail!("could not initialize intake client: {}", e);
        }
    };

    wizard::run(client).await?;

    Ok(())
}
