use clap::Parser;
use launchpad_client::{AccessTokenSource, GcpTokenSource};
use launchpad_orchestrator::{api, config::Config, state::AppState};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Cron-triggered production deploy service
#[derive(Parser)]
#[command(name = "launchpad-orchestrator")]
#[command(version, about)]
struct Args {
    /// Path to the JSON config file
    #[arg(long, env = "LAUNCHPAD_CONFIG", default_value = "config.json")]
    config: PathBuf,

    /// Address to listen on
    #[arg(long, env = "LAUNCHPAD_BIND_ADDR", default_value = "0.0.0.0:8080")]
    bind: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "launchpad_orchestrator=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    tracing::info!("Starting Launchpad Orchestrator...");

    let config = Config::from_file(&args.config)?;
    config.validate()?;

    let tokens: Arc<dyn AccessTokenSource> = Arc::new(GcpTokenSource::from_environment().await?);
    let token = config.obfuscated_token();
    let state = AppState::from_config(config, tokens);

    // Build router with all API endpoints
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", args.bind, e))?;

    tracing::info!(
        "Listening on port {} with CircleCI token {}",
        listener.local_addr()?.port(),
        token
    );

    axum::serve(listener, app).await?;

    Ok(())
}
