use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use station_server::config::AppConfig;
use station_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    let source = match config.source.build() {
        Ok(source) => source,
        Err(e) => {
            error!("failed to create station source: {e}");
            std::process::exit(1);
        }
    };

    // A missing bundled extract is a packaging defect; refuse to start.
    if let station_server::sources::ConfiguredSource::Local(local) = &source
        && let Err(e) = local.load_default()
    {
        error!("{e}");
        std::process::exit(1);
    }

    let state = AppState::new(source);
    let app = create_router(state);

    let addr = config.bind_addr;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    info!("Bike stations listening on http://{addr}");
    info!("  GET  /              - Station list");
    info!("  GET  /api/stations  - Station list as JSON");
    info!("  GET  /health        - Health check");

    axum::serve(listener, app).await.expect("Server error");
}
