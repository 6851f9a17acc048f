use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp layout the provider uses for `dateOfBirth`.
pub const PROVIDER_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Competition row, keyed by league code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Competition {
    pub code: String,
    pub name: String,
    pub area_name: String,
}

/// Team row, keyed by the provider's team id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub tla: Option<String>,
    pub short_name: String,
    pub area_name: String,
    pub email: Option<String>,
}

/// Player row, keyed by the provider's person id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub position: Option<String>,
    pub date_of_birth: Option<NaiveDateTime>,
    pub country_of_birth: Option<String>,
    pub nationality: Option<String>,
}

/// One (competition, team, player) observation recorded by an import.
/// `id` is a surrogate key; the triple itself is not unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionTeamPlayer {
    pub id: i64,
    pub competition_code: String,
    pub team_id: i64,
    pub player_id: i64,
}

// Request bodies for updates. The key comes from the path.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionUpdate {
    pub name: String,
    pub area_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamUpdate {
    pub name: String,
    #[serde(default)]
    pub tla: Option<String>,
    pub short_name: String,
    pub area_name: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerUpdate {
    pub name: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDateTime>,
    #[serde(default)]
    pub country_of_birth: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
}

impl Competition {
    pub fn with_update(code: String, update: CompetitionUpdate) -> Self {
        Competition {
            code,
            name: update.name,
            area_name: update.area_name,
        }
    }
}

impl Team {
    pub fn with_update(id: i64, update: TeamUpdate) -> Self {
        Team {
            id,
            name: update.name,
            tla: update.tla,
            short_name: update.short_name,
            area_name: update.area_name,
            email: update.email,
        }
    }
}

impl Player {
    pub fn with_update(id: i64, update: PlayerUpdate) -> Self {
        Player {
            id,
            name: update.name,
            position: update.position,
            date_of_birth: update.date_of_birth,
            country_of_birth: update.country_of_birth,
            nationality: update.nationality,
        }
    }
}

// Football Data API payloads

#[derive(Debug, Clone, Deserialize)]
pub struct ApiArea {
    pub name: String,
}

/// GET /competitions/{code}
#[derive(Debug, Clone, Deserialize)]
pub struct ApiCompetition {
    pub id: i64,
    pub name: String,
    pub area: ApiArea,
}

/// GET /competitions/{id}/teams
#[derive(Debug, Clone, Deserialize)]
pub struct ApiTeamsResponse {
    pub teams: Vec<ApiTeam>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTeam {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub tla: Option<String>,
    pub short_name: String,
    pub area: ApiArea,
    #[serde(default)]
    pub email: Option<String>,
}

/// GET /teams/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct ApiTeamDetail {
    pub squad: Vec<ApiSquadMember>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSquadMember {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub country_of_birth: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
}

impl ApiCompetition {
    pub fn to_competition(&self, code: &str) -> Competition {
        Competition {
            code: code.to_string(),
            name: self.name.clone(),
            area_name: self.area.name.clone(),
        }
    }
}

impl ApiTeam {
    pub fn to_team(&self) -> Team {
        Team {
            id: self.id,
            name: self.name.clone(),
            tla: self.tla.clone(),
            short_name: self.short_name.clone(),
            area_name: self.area.name.clone(),
            email: self.email.clone(),
        }
    }
}

impl ApiSquadMember {
    /// Convert to a player row, parsing `dateOfBirth` when present
    pub fn to_player(&self) -> Result<Player, chrono::ParseError> {
        let date_of_birth = self
            .date_of_birth
            .as_deref()
            .map(|dob| NaiveDateTime::parse_from_str(dob, PROVIDER_DATE_FORMAT))
            .transpose()?;

        Ok(Player {
            id: self.id,
            name: self.name.clone(),
            position: self.position.clone(),
            date_of_birth,
            country_of_birth: self.country_of_birth.clone(),
            nationality: self.nationality.clone(),
        })
    }
}

// Response bodies

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TotalPlayersResponse {
    pub total: i64,
}
