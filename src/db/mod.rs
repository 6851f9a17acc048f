use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::SqliteExecutor;
use crate::models::*;

const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS competitions (
           code TEXT PRIMARY KEY NOT NULL,
           name TEXT NOT NULL UNIQUE,
           area_name TEXT NOT NULL
       )"#,
    r#"CREATE TABLE IF NOT EXISTS teams (
           id INTEGER PRIMARY KEY NOT NULL,
           name TEXT NOT NULL,
           tla TEXT,
           short_name TEXT NOT NULL,
           area_name TEXT NOT NULL,
           email TEXT
       )"#,
    r#"CREATE TABLE IF NOT EXISTS players (
           id INTEGER PRIMARY KEY NOT NULL,
           name TEXT NOT NULL UNIQUE,
           position TEXT,
           date_of_birth TEXT,
           country_of_birth TEXT,
           nationality TEXT
       )"#,
    // No uniqueness on the triple: every import pass records its own rows
    r#"CREATE TABLE IF NOT EXISTS competition_team_players (
           id INTEGER PRIMARY KEY AUTOINCREMENT,
           competition_code TEXT NOT NULL REFERENCES competitions(code),
           team_id INTEGER NOT NULL REFERENCES teams(id),
           player_id INTEGER NOT NULL REFERENCES players(id)
       )"#,
    r#"CREATE INDEX IF NOT EXISTS idx_ctp_competition
           ON competition_team_players (competition_code)"#,
];

/// Open the pool, creating the database file if needed. Foreign keys are enforced.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new().connect_with(options).await
}

pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

// Query service

pub async fn league_exists<'e, E>(executor: E, code: &str) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_scalar::<_, bool>(
        r#"SELECT EXISTS(SELECT 1 FROM competitions WHERE code = ?)"#
    )
    .bind(code)
    .fetch_one(executor)
    .await
}

/// Distinct (team, player) pairs recorded for a competition.
/// `None` when the competition was never imported.
pub async fn count_players(pool: &SqlitePool, code: &str) -> Result<Option<i64>, sqlx::Error> {
    if !league_exists(pool, code).await? {
        return Ok(None);
    }

    let total = sqlx::query_scalar::<_, i64>(
        r#"SELECT COUNT(*) FROM (
               SELECT DISTINCT team_id, player_id
               FROM competition_team_players
               WHERE competition_code = ?
           )"#
    )
    .bind(code)
    .fetch_one(pool)
    .await?;

    Ok(Some(total))
}

pub async fn team_exists<'e, E>(executor: E, team_id: i64) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_scalar::<_, bool>(
        r#"SELECT EXISTS(SELECT 1 FROM teams WHERE id = ?)"#
    )
    .bind(team_id)
    .fetch_one(executor)
    .await
}

pub async fn player_exists<'e, E>(executor: E, player_id: i64) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_scalar::<_, bool>(
        r#"SELECT EXISTS(SELECT 1 FROM players WHERE id = ?)"#
    )
    .bind(player_id)
    .fetch_one(executor)
    .await
}

// Inserts

pub async fn insert_competition<'e, E>(executor: E, competition: &Competition) -> Result<(), sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query(
        r#"INSERT INTO competitions (code, name, area_name) VALUES (?, ?, ?)"#
    )
    .bind(&competition.code)
    .bind(&competition.name)
    .bind(&competition.area_name)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn insert_team<'e, E>(executor: E, team: &Team) -> Result<(), sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query(
        r#"INSERT INTO teams (id, name, tla, short_name, area_name, email)
           VALUES (?, ?, ?, ?, ?, ?)"#
    )
    .bind(team.id)
    .bind(&team.name)
    .bind(&team.tla)
    .bind(&team.short_name)
    .bind(&team.area_name)
    .bind(&team.email)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn insert_player<'e, E>(executor: E, player: &Player) -> Result<(), sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query(
        r#"INSERT INTO players (id, name, position, date_of_birth, country_of_birth, nationality)
           VALUES (?, ?, ?, ?, ?, ?)"#
    )
    .bind(player.id)
    .bind(&player.name)
    .bind(&player.position)
    .bind(player.date_of_birth)
    .bind(&player.country_of_birth)
    .bind(&player.nationality)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn insert_competition_team_player<'e, E>(
    executor: E,
    competition_code: &str,
    team_id: i64,
    player_id: i64,
) -> Result<(), sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query(
        r#"INSERT INTO competition_team_players (competition_code, team_id, player_id)
           VALUES (?, ?, ?)"#
    )
    .bind(competition_code)
    .bind(team_id)
    .bind(player_id)
    .execute(executor)
    .await?;
    Ok(())
}

// Competition queries
pub async fn get_competitions(pool: &SqlitePool, limit: i64, offset: i64) -> Result<Vec<Competition>, sqlx::Error> {
    sqlx::query_as::<_, Competition>(
        r#"SELECT * FROM competitions ORDER BY code LIMIT ? OFFSET ?"#
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn get_competition(pool: &SqlitePool, code: &str) -> Result<Option<Competition>, sqlx::Error> {
    sqlx::query_as::<_, Competition>(
        r#"SELECT * FROM competitions WHERE code = ?"#
    )
    .bind(code)
    .fetch_optional(pool)
    .await
}

pub async fn update_competition(pool: &SqlitePool, competition: &Competition) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"UPDATE competitions SET name = ?, area_name = ? WHERE code = ?"#
    )
    .bind(&competition.name)
    .bind(&competition.area_name)
    .bind(&competition.code)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_competition(pool: &SqlitePool, code: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM competitions WHERE code = ?"#)
        .bind(code)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn get_competition_team_players(
    pool: &SqlitePool,
    code: &str,
) -> Result<Vec<CompetitionTeamPlayer>, sqlx::Error> {
    sqlx::query_as::<_, CompetitionTeamPlayer>(
        r#"SELECT * FROM competition_team_players
           WHERE competition_code = ?
           ORDER BY team_id, player_id, id"#
    )
    .bind(code)
    .fetch_all(pool)
    .await
}

// Team queries
pub async fn get_teams(pool: &SqlitePool, limit: i64, offset: i64) -> Result<Vec<Team>, sqlx::Error> {
    sqlx::query_as::<_, Team>(
        r#"SELECT * FROM teams ORDER BY name LIMIT ? OFFSET ?"#
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn get_team_by_id(pool: &SqlitePool, team_id: i64) -> Result<Option<Team>, sqlx::Error> {
    sqlx::query_as::<_, Team>(
        r#"SELECT * FROM teams WHERE id = ?"#
    )
    .bind(team_id)
    .fetch_optional(pool)
    .await
}

pub async fn update_team(pool: &SqlitePool, team: &Team) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"UPDATE teams
           SET name = ?, tla = ?, short_name = ?, area_name = ?, email = ?
           WHERE id = ?"#
    )
    .bind(&team.name)
    .bind(&team.tla)
    .bind(&team.short_name)
    .bind(&team.area_name)
    .bind(&team.email)
    .bind(team.id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_team(pool: &SqlitePool, team_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM teams WHERE id = ?"#)
        .bind(team_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

// Player queries
pub async fn get_players(pool: &SqlitePool, limit: i64, offset: i64) -> Result<Vec<Player>, sqlx::Error> {
    sqlx::query_as::<_, Player>(
        r#"SELECT * FROM players ORDER BY name LIMIT ? OFFSET ?"#
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn get_player_by_id(pool: &SqlitePool, player_id: i64) -> Result<Option<Player>, sqlx::Error> {
    sqlx::query_as::<_, Player>(
        r#"SELECT * FROM players WHERE id = ?"#
    )
    .bind(player_id)
    .fetch_optional(pool)
    .await
}

pub async fn update_player(pool: &SqlitePool, player: &Player) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"UPDATE players
           SET name = ?, position = ?, date_of_birth = ?, country_of_birth = ?, nationality = ?
           WHERE id = ?"#
    )
    .bind(&player.name)
    .bind(&player.position)
    .bind(player.date_of_birth)
    .bind(&player.country_of_birth)
    .bind(&player.nationality)
    .bind(player.id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_player(pool: &SqlitePool, player_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM players WHERE id = ?"#)
        .bind(player_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
