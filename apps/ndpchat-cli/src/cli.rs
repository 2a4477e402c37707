use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use ndpchat_catalog::{CatalogSearch, HttpCatalogClient, HttpCatalogClientConfig};
use ndpchat_config::{load_config, AssistantConfig};
use ndpchat_model::{GeminiClient, GeminiClientConfig, ModelClient};
use ndpchat_session::DialogueSession;

#[derive(Debug, Parser)]
#[command(name = "ndpchat", about = "Chat with the NDP catalog")]
pub struct Cli {
    /// Path to the assistant configuration file.
    #[arg(long, default_value = "config/ndpchat.yaml")]
    config: PathBuf,
    #[arg(long)]
    verbose: bool,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        ensure_log_filter(self.verbose);

        let config = if self.config.exists() {
            load_config(&self.config)
                .with_context(|| format!("load config from {}", self.config.display()))?
        } else {
            AssistantConfig::default()
        };

        init_tracing(&config);
        info!(app = %config.app.name, model = %config.model.model, "starting session");

        let api_key = config
            .model
            .resolve_api_key()
            .context("resolve model API key")?;

        let model: Arc<dyn ModelClient> = Arc::new(
            GeminiClient::new(GeminiClientConfig {
                api_key,
                model: config.model.model.clone(),
                endpoint: config.model.endpoint.clone(),
                temperature: config.model.temperature,
                timeout_secs: config.model.timeout_secs,
            })
            .context("initialize model client")?,
        );

        let catalog: Arc<dyn CatalogSearch> = Arc::new(
            HttpCatalogClient::new(HttpCatalogClientConfig {
                endpoint: config.catalog.endpoint.clone(),
                timeout_secs: config.catalog.timeout_secs,
            })
            .context("initialize catalog client")?,
        );

        let session = DialogueSession::new(model, catalog);
        crate::chat::run_chat(session).await
    }
}

fn ensure_log_filter(verbose: bool) {
    if verbose {
        env::set_var("RUST_LOG", "debug");
        return;
    }
    if env::var("RUST_LOG").is_ok() {
        return;
    }
    env::set_var("RUST_LOG", "info");
}

fn init_tracing(config: &AssistantConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&config.observability.log_level))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // Logs go to stderr so they never interleave with the rendered chat.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
