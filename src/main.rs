use anyhow::Context;
use tracing_subscriber::EnvFilter;

use salesrec_api::{
    api::{create_router, AppState},
    config::{Config, LogFormat},
    data::load_snapshot,
};

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_target(false).with_env_filter(filter);

    match format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config decides the log format, so it loads before logging is up
    let config = Config::from_env()?;
    init_logging(config.log_format);

    let snapshot = load_snapshot(&config.data_dir)?;
    let app = create_router(AppState::from(snapshot));

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
