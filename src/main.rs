use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use likeadmin_api::config::Settings;
use likeadmin_api::database::DatabaseManager;
use likeadmin_api::{router, AppState};

#[derive(Parser)]
#[command(name = "likeadmin-api")]
#[command(about = "likeadmin admin backend")]
#[command(version)]
struct Args {
    #[arg(long, env = "HOST", default_value = "0.0.0.0", help = "Address to bind")]
    host: String,

    #[arg(long, env = "PORT", default_value_t = 8000, help = "Port to bind")]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Settings first: the env files may carry RUST_LOG and MODE
    let (settings, env_files) = Settings::load().context("invalid configuration")?;
    let args = Args::parse();

    let default_level = if settings.is_dev() { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    for file in &env_files {
        tracing::debug!("Loaded environment from {}", file);
    }
    tracing::info!(
        "Starting likeadmin-api {} in {:?} mode, timezone {}",
        settings.version,
        settings.mode,
        settings.timezone
    );

    let pool = DatabaseManager::connect(&settings)
        .await
        .context("failed to connect to database")?;
    let state = AppState::new(settings, pool).context("invalid response settings")?;
    let app = router(state);

    let bind_addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
