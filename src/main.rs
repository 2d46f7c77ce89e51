use anyhow::Context;
use snooze_agent::{api, config::LoggingConfig, Config, IntelligenceConfig};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.clone()));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();

    let config_path = std::env::var("SNOOZE_CONFIG")
        .unwrap_or_else(|_| snooze_agent::config::DEFAULT_CONFIG_FILE.to_string());
    let config = Config::load(&config_path).context("failed to load configuration")?;

    init_tracing(&config.logging);

    if let Err(e) = dotenv {
        info!(".env not loaded ({}), using process environment", e);
    }

    let intelligence = IntelligenceConfig::from_env();
    if intelligence.is_usable() {
        info!("Remote generation enabled: model={}", intelligence.model);
    } else if intelligence.use_remote {
        warn!("USE_OPENAI is set but OPENAI_API_KEY is empty; using offline heuristics");
    } else {
        info!("Remote generation disabled; using offline heuristics");
    }

    let router = api::init_router(&config, intelligence).context("failed to build router")?;

    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;

    info!("Server listening on {}", address);
    axum::serve(listener, router).await?;

    Ok(())
}
