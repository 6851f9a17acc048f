use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use sqlx::sqlite::SqlitePool;
use crate::db;
use crate::error::ApiError;
use crate::models::{Team, TeamUpdate};
use crate::routes::ListQuery;

// GET /api/teams - List all teams
pub async fn get_teams(
    State(pool): State<SqlitePool>,
    Query(params): Query<ListQuery>,
) -> Result<Json<Vec<Team>>, ApiError> {
    let teams = db::get_teams(&pool, params.limit(), params.offset()).await?;
    Ok(Json(teams))
}

// GET /api/teams/:id - Get team by ID
pub async fn get_team_by_id(
    State(pool): State<SqlitePool>,
    Path(team_id): Path<i64>,
) -> Result<Json<Team>, ApiError> {
    let team = db::get_team_by_id(&pool, team_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(team))
}

// POST /api/teams
pub async fn create_team(
    State(pool): State<SqlitePool>,
    Json(team): Json<Team>,
) -> Result<(StatusCode, Json<Team>), ApiError> {
    db::insert_team(&pool, &team).await?;
    Ok((StatusCode::CREATED, Json(team)))
}

// PUT /api/teams/:id
pub async fn update_team(
    State(pool): State<SqlitePool>,
    Path(team_id): Path<i64>,
    Json(update): Json<TeamUpdate>,
) -> Result<Json<Team>, ApiError> {
    let team = Team::with_update(team_id, update);
    if !db::update_team(&pool, &team).await? {
        return Err(ApiError::NotFound);
    }
    Ok(Json(team))
}

// DELETE /api/teams/:id
pub async fn delete_team(
    State(pool): State<SqlitePool>,
    Path(team_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !db::delete_team(&pool, team_id).await? {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}
