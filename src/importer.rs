//! League import: competition, teams and squads from the Football Data API,
//! persisted in one transaction.

use serde::Serialize;
use sqlx::sqlite::SqlitePool;

use crate::db;
use crate::error::{ImportError, ProviderError};
use crate::football_api::FootballApiClient;
use crate::models::{Player, Team};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub teams_created: usize,
    pub players_created: usize,
    pub associations_created: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    Imported(ImportSummary),
    AlreadyExists,
    /// The provider does not know the league code
    NotFound,
}

/// One team and its squad, fetched and converted before any row is written
struct FetchedTeam {
    team: Team,
    players: Vec<Player>,
}

/// Import one league. Every provider call (including any rate-limit wait)
/// finishes before the transaction opens, so the SQLite write lock is only
/// held for the inserts. Nothing is written unless every insert succeeds;
/// the transaction is rolled back when dropped on an error path.
///
/// Callers must serialize imports (see `AppState::import_lock`).
pub async fn import_league(
    pool: &SqlitePool,
    api: &FootballApiClient,
    league_code: &str,
) -> Result<ImportOutcome, ImportError> {
    let league_code = league_code.trim();
    if league_code.is_empty() {
        return Err(ImportError::EmptyLeagueCode);
    }

    if db::league_exists(pool, league_code).await? {
        tracing::info!("League {} already imported", league_code);
        return Ok(ImportOutcome::AlreadyExists);
    }

    let api_competition = match api.fetch_competition(league_code).await {
        Ok(competition) => competition,
        Err(ProviderError::NotFound { .. }) => {
            tracing::info!("League {} not found on football API", league_code);
            return Ok(ImportOutcome::NotFound);
        }
        Err(e) => return Err(e.into()),
    };
    let competition = api_competition.to_competition(league_code);

    let api_teams = api.fetch_teams(api_competition.id).await?;
    tracing::info!("Fetching squads of {} teams for league {}", api_teams.len(), league_code);

    let mut fetched = Vec::with_capacity(api_teams.len());
    for api_team in &api_teams {
        let squad = api.fetch_squad(api_team.id).await?;
        tracing::debug!("Team {} has {} players", api_team.id, squad.len());

        let players = squad
            .iter()
            .map(|member| {
                member.to_player().map_err(|e| {
                    ProviderError::Decode(format!("dateOfBirth of player {}: {}", member.id, e))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        fetched.push(FetchedTeam {
            team: api_team.to_team(),
            players,
        });
    }

    let mut tx = pool.begin().await?;

    // The primary key is the atomic guard against a concurrent import of the same code
    if let Err(e) = db::insert_competition(&mut *tx, &competition).await {
        let unique_violation = e
            .as_database_error()
            .map(|db_err| db_err.is_unique_violation())
            .unwrap_or(false);
        tx.rollback().await?;

        // A unique clash can also be on the name; only a stored code means "already imported"
        if unique_violation && db::league_exists(pool, league_code).await? {
            tracing::info!("League {} imported concurrently", league_code);
            return Ok(ImportOutcome::AlreadyExists);
        }
        return Err(e.into());
    }

    let mut summary = ImportSummary::default();
    for FetchedTeam { team, players } in &fetched {
        if !db::team_exists(&mut *tx, team.id).await? {
            db::insert_team(&mut *tx, team).await?;
            summary.teams_created += 1;
        }

        for player in players {
            if !db::player_exists(&mut *tx, player.id).await? {
                db::insert_player(&mut *tx, player).await?;
                summary.players_created += 1;
            }

            db::insert_competition_team_player(&mut *tx, league_code, team.id, player.id).await?;
            summary.associations_created += 1;
        }
    }

    tx.commit().await?;

    tracing::info!(
        "Imported league {}: {} new teams, {} new players, {} associations",
        league_code,
        summary.teams_created,
        summary.players_created,
        summary.associations_created
    );

    Ok(ImportOutcome::Imported(summary))
}
