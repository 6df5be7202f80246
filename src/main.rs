use anyhow::Result;
use creditsheet::config::Config;
use creditsheet::server::{self, AppContext};
use creditsheet::sheets::SheetsClient;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    // ─── 2) load config & build the sheet client ─────────────────────
    let config = Config::from_env()?;
    let sheets = SheetsClient::new(&config)?;
    info!(
        port = config.port,
        sheet = %config.sheet_name,
        mode = config.claim_mode.as_str(),
        "serving credit proxy"
    );

    // ─── 3) serve ────────────────────────────────────────────────────
    server::run(Arc::new(AppContext { config, sheets })).await;
    Ok(())
}
