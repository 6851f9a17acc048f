use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use sqlx::sqlite::SqlitePool;
use crate::error::ApiError;
use crate::importer::{self, ImportOutcome};
use crate::models::{MessageResponse, TotalPlayersResponse};
use crate::{db, AppState};

// GET /import-league/:league_code - Import a league, its teams and squads from the football API
pub async fn import_league(
    State(state): State<AppState>,
    Path(league_code): Path<String>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let _guard = state.import_lock.lock().await;

    match importer::import_league(&state.pool, &state.football_api, &league_code).await? {
        ImportOutcome::Imported(_) => Ok((
            StatusCode::CREATED,
            Json(MessageResponse::new("Successfully imported")),
        )),
        ImportOutcome::AlreadyExists => Err(ApiError::Conflict("League already imported".to_string())),
        ImportOutcome::NotFound => Err(ApiError::NotFound),
    }
}

// GET /total-players/:league_code - Count players imported for a league
pub async fn total_players(
    State(pool): State<SqlitePool>,
    Path(league_code): Path<String>,
) -> Result<Json<TotalPlayersResponse>, ApiError> {
    let total = db::count_players(&pool, &league_code)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count players for league {}: {}", league_code, e);
            ApiError::GatewayTimeout
        })?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(TotalPlayersResponse { total }))
}
