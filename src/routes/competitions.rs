use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use sqlx::sqlite::SqlitePool;
use crate::db;
use crate::error::ApiError;
use crate::models::{Competition, CompetitionTeamPlayer, CompetitionUpdate};
use crate::routes::ListQuery;

// GET /api/competitions - List competitions
pub async fn get_competitions(
    State(pool): State<SqlitePool>,
    Query(params): Query<ListQuery>,
) -> Result<Json<Vec<Competition>>, ApiError> {
    let competitions = db::get_competitions(&pool, params.limit(), params.offset()).await?;
    Ok(Json(competitions))
}

// GET /api/competitions/:code - Get competition by league code
pub async fn get_competition(
    State(pool): State<SqlitePool>,
    Path(code): Path<String>,
) -> Result<Json<Competition>, ApiError> {
    let competition = db::get_competition(&pool, &code)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(competition))
}

// POST /api/competitions - Create a competition
pub async fn create_competition(
    State(pool): State<SqlitePool>,
    Json(competition): Json<Competition>,
) -> Result<(StatusCode, Json<Competition>), ApiError> {
    if competition.code.trim().is_empty() {
        return Err(ApiError::BadRequest("code must not be empty".to_string()));
    }
    db::insert_competition(&pool, &competition).await?;
    Ok((StatusCode::CREATED, Json(competition)))
}

// PUT /api/competitions/:code - Replace a competition's attributes
pub async fn update_competition(
    State(pool): State<SqlitePool>,
    Path(code): Path<String>,
    Json(update): Json<CompetitionUpdate>,
) -> Result<Json<Competition>, ApiError> {
    let competition = Competition::with_update(code, update);
    if !db::update_competition(&pool, &competition).await? {
        return Err(ApiError::NotFound);
    }
    Ok(Json(competition))
}

// DELETE /api/competitions/:code
pub async fn delete_competition(
    State(pool): State<SqlitePool>,
    Path(code): Path<String>,
) -> Result<StatusCode, ApiError> {
    if !db::delete_competition(&pool, &code).await? {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/competitions/:code/team-players - Association rows recorded for a competition
pub async fn get_competition_team_players(
    State(pool): State<SqlitePool>,
    Path(code): Path<String>,
) -> Result<Json<Vec<CompetitionTeamPlayer>>, ApiError> {
    if !db::league_exists(&pool, &code).await? {
        return Err(ApiError::NotFound);
    }

    let rows = db::get_competition_team_players(&pool, &code).await?;
    Ok(Json(rows))
}
