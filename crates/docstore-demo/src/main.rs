//! Document Repository Demo CLI
//!
//! Runs the repository demo once against the configured document store.

use anyhow::Result;
use clap::Parser;
use docstore_demo::{Config, LogFormat};
use docstore_persistence::StoreBackend;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "docstore-demo")]
#[command(about = "Exercise the deferred document repositories")]
struct Args {
    /// Document store backend (memory or redis); overrides STORE_BACKEND
    #[arg(short, long)]
    backend: Option<StoreBackend>,

    /// Redis URL; overrides REDIS_URL
    #[arg(long)]
    redis_url: Option<String>,

    /// Key namespace; overrides DOCSTORE_NAMESPACE
    #[arg(long)]
    namespace: Option<String>,
}

impl Args {
    fn apply(self, config: &mut Config) {
        if let Some(backend) = self.backend {
            config.store.backend = backend;
        }
        if let Some(url) = self.redis_url {
            config.store.url = url;
        }
        if let Some(namespace) = self.namespace {
            config.store.namespace = namespace;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let mut config = Config::from_env()?;
    args.apply(&mut config);

    // Initialize tracing
    let json = config.log_format == LogFormat::Json;
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();

    info!(
        version = docstore_demo::VERSION,
        backend = config.store.backend.as_str(),
        namespace = %config.store.namespace,
        "Starting document repository demo"
    );

    let report = docstore_demo::run(&config).await?;

    info!(
        customers = report.customers_listed,
        smiths = report.last_name_matches,
        "Demo complete"
    );
    Ok(())
}
