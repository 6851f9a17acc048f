use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use sqlx::sqlite::SqlitePool;
use crate::db;
use crate::error::ApiError;
use crate::models::{Player, PlayerUpdate};
use crate::routes::ListQuery;

// GET /api/players - List all players
pub async fn get_players(
    State(pool): State<SqlitePool>,
    Query(params): Query<ListQuery>,
) -> Result<Json<Vec<Player>>, ApiError> {
    let players = db::get_players(&pool, params.limit(), params.offset()).await?;
    Ok(Json(players))
}

// GET /api/players/:id - Get player by ID
pub async fn get_player_by_id(
    State(pool): State<SqlitePool>,
    Path(player_id): Path<i64>,
) -> Result<Json<Player>, ApiError> {
    let player = db::get_player_by_id(&pool, player_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(player))
}

// POST /api/players
pub async fn create_player(
    State(pool): State<SqlitePool>,
    Json(player): Json<Player>,
) -> Result<(StatusCode, Json<Player>), ApiError> {
    db::insert_player(&pool, &player).await?;
    Ok((StatusCode::CREATED, Json(player)))
}

// PUT /api/players/:id
pub async fn update_player(
    State(pool): State<SqlitePool>,
    Path(player_id): Path<i64>,
    Json(update): Json<PlayerUpdate>,
) -> Result<Json<Player>, ApiError> {
    let player = Player::with_update(player_id, update);
    if !db::update_player(&pool, &player).await? {
        return Err(ApiError::NotFound);
    }
    Ok(Json(player))
}

// DELETE /api/players/:id
pub async fn delete_player(
    State(pool): State<SqlitePool>,
    Path(player_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !db::delete_player(&pool, player_id).await? {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}
