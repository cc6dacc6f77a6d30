use anyhow::Result;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

use translate_backend::build_app;
use translate_backend::config::Config;
use translate_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("translate_backend=debug,tower_http=debug")),
        )
        .init();

    let (config, loaded_path) = Config::load_first(&Config::search_paths())?;
    info!("Loaded configuration from: {}", loaded_path.display());

    let ip: std::net::IpAddr = config.system_config.host.parse()?;
    let addr = SocketAddr::from((ip, config.system_config.port));

    // Backend handle is created once and shared by every request
    let app_state = AppState::new(config)?;
    let app = build_app(app_state);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
