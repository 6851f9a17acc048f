use std::sync::Arc;

use axum::{extract::FromRef, routing::get, Router};
use sqlx::sqlite::SqlitePool;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod db;
pub mod error;
pub mod football_api;
pub mod importer;
pub mod models;
pub mod routes;

use config::Config;
use error::StartupError;
use football_api::FootballApiClient;

/// Shared per-process state. Handlers that only need the pool extract
/// `State<SqlitePool>` directly.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub pool: SqlitePool,
    pub football_api: FootballApiClient,
    /// Held for the whole of an import so the existence check and the
    /// commit cannot interleave with another import.
    pub import_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(pool: SqlitePool, football_api: FootballApiClient) -> Self {
        AppState {
            pool,
            football_api,
            import_lock: Arc::new(Mutex::new(())),
        }
    }
}

/// Connect to the database, create the schema and build the API client.
pub async fn build_state(config: &Config) -> Result<AppState, StartupError> {
    let pool = db::connect(&config.database_url).await?;
    db::init_schema(&pool).await?;
    tracing::info!("Database connection established.");

    let football_api = FootballApiClient::from_config(config)?;
    Ok(AppState::new(pool, football_api))
}

pub fn app_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Root and health
        .route("/", get(|| async { "Football League API - v1.0" }))
        .route("/health", get(routes::health::health_check))

        // Import endpoints
        .route("/import-league/{league_code}", get(routes::import::import_league))
        .route("/total-players/{league_code}", get(routes::import::total_players))

        // Competition endpoints
        .route(
            "/api/competitions",
            get(routes::competitions::get_competitions).post(routes::competitions::create_competition),
        )
        .route(
            "/api/competitions/{code}",
            get(routes::competitions::get_competition)
                .put(routes::competitions::update_competition)
                .delete(routes::competitions::delete_competition),
        )
        .route(
            "/api/competitions/{code}/team-players",
            get(routes::competitions::get_competition_team_players),
        )

        // Team endpoints
        .route("/api/teams", get(routes::teams::get_teams).post(routes::teams::create_team))
        .route(
            "/api/teams/{id}",
            get(routes::teams::get_team_by_id)
                .put(routes::teams::update_team)
                .delete(routes::teams::delete_team),
        )

        // Player endpoints
        .route("/api/players", get(routes::players::get_players).post(routes::players::create_player))
        .route(
            "/api/players/{id}",
            get(routes::players::get_player_by_id)
                .put(routes::players::update_player)
                .delete(routes::players::delete_player),
        )

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
