use football_league_api::{app_router, build_state, config::Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting football league api server...");

    dotenvy::dotenv().ok();

    let config = Config::from_env().expect("Invalid configuration");

    let state = build_state(&config)
        .await
        .expect("Failed to initialize application state");

    let app = app_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", config.listen_addr);

    axum::serve(listener, app)
        .await
        .expect("Failed to start server.");
}
