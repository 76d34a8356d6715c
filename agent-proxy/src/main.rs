use tracing::info;
use warp::Filter;

use agent_proxy::{app, config::Config, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level))
        )
        .json()
        .init();

    info!("Starting Agent Engine proxy");

    match config.agent_url() {
        Some(url) => info!("Agent endpoint: {}", url),
        None => tracing::warn!("VERTEX_AGENT_ID is not set; proxy requests will fail with a configuration error"),
    }

    let port = config.port;
    let state = AppState::from_config(config)?;
    info!("Application state initialized");

    let routes = app(state).with(warp::log("api"));

    // Start server
    let addr = ([0, 0, 0, 0], port);
    info!("Server listening on {}", addr.1);

    warp::serve(routes)
        .run(addr)
        .await;

    Ok(())
}
