//! Shared test harness: a scripted football-data provider served by axum on
//! an ephemeral port, and a temp-file SQLite database.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;

use football_league_api::{app_router, db, football_api::FootballApiClient, AppState};

pub const TEST_TOKEN: &str = "test-token";

#[derive(Default)]
struct ProviderState {
    responses: HashMap<String, Value>,
    /// path -> (remaining 429 responses, X-RequestCounter-Reset value)
    rate_limits: Mutex<HashMap<String, (usize, String)>>,
    failures: HashSet<String>,
    hits: Mutex<HashMap<String, usize>>,
}

#[derive(Default)]
pub struct ProviderFixture {
    responses: HashMap<String, Value>,
    rate_limits: HashMap<String, (usize, String)>,
    failures: HashSet<String>,
}

impl ProviderFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn competition(mut self, code: &str, id: i64, name: &str, area: &str) -> Self {
        self.responses.insert(
            format!("/competitions/{code}"),
            json!({ "id": id, "name": name, "code": code, "area": { "id": 2072, "name": area } }),
        );
        self
    }

    pub fn teams(mut self, competition_id: i64, teams: Vec<Value>) -> Self {
        self.responses.insert(
            format!("/competitions/{competition_id}/teams"),
            json!({ "count": teams.len(), "teams": teams }),
        );
        self
    }

    pub fn squad(mut self, team_id: i64, players: Vec<Value>) -> Self {
        self.responses.insert(
            format!("/teams/{team_id}"),
            json!({ "id": team_id, "squad": players }),
        );
        self
    }

    /// Answer `times` requests on `path` with 429 before serving normally
    pub fn rate_limited(mut self, path: &str, times: usize, reset_secs: &str) -> Self {
        self.rate_limits.insert(path.to_string(), (times, reset_secs.to_string()));
        self
    }

    pub fn failing(mut self, path: &str) -> Self {
        self.failures.insert(path.to_string());
        self
    }

    pub async fn start(self) -> MockProvider {
        let state = Arc::new(ProviderState {
            responses: self.responses,
            rate_limits: Mutex::new(self.rate_limits),
            failures: self.failures,
            hits: Mutex::new(HashMap::new()),
        });

        let app = Router::new().fallback(serve).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        MockProvider {
            base_url: format!("http://{addr}/v2"),
            state,
        }
    }
}

async fn serve(State(state): State<Arc<ProviderState>>, headers: HeaderMap, uri: Uri) -> Response {
    let path = uri.path().trim_start_matches("/v2").to_string();
    *state.hits.lock().unwrap().entry(path.clone()).or_insert(0) += 1;

    if headers.get("X-Auth-Token").and_then(|v| v.to_str().ok()) != Some(TEST_TOKEN) {
        return (StatusCode::FORBIDDEN, Json(json!({ "message": "bad token" }))).into_response();
    }

    if let Some((remaining, reset)) = state.rate_limits.lock().unwrap().get_mut(&path) {
        if *remaining > 0 {
            *remaining -= 1;
            return (
                StatusCode::TOO_MANY_REQUESTS,
                [("X-RequestCounter-Reset", reset.clone())],
                Json(json!({ "message": "You reached your request limit." })),
            )
                .into_response();
        }
    }

    if state.failures.contains(&path) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    match state.responses.get(&path) {
        Some(body) => Json(body.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "message": "not found" }))).into_response(),
    }
}

pub struct MockProvider {
    pub base_url: String,
    state: Arc<ProviderState>,
}

impl MockProvider {
    pub fn hits(&self, path: &str) -> usize {
        self.state.hits.lock().unwrap().get(path).copied().unwrap_or(0)
    }

    pub fn client(&self) -> FootballApiClient {
        FootballApiClient::new(reqwest::Client::new(), &self.base_url, TEST_TOKEN).unwrap()
    }
}

pub fn team_json(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "tla": name.chars().take(3).collect::<String>().to_uppercase(),
        "shortName": name,
        "area": { "id": 2072, "name": "England" },
        "email": null
    })
}

pub fn player_json(id: i64, name: &str, date_of_birth: Option<&str>) -> Value {
    json!({
        "id": id,
        "name": name,
        "position": "Midfielder",
        "dateOfBirth": date_of_birth,
        "countryOfBirth": "England",
        "nationality": "England",
        "role": "PLAYER"
    })
}

/// Premier League with one team and one player
pub fn premier_league() -> ProviderFixture {
    ProviderFixture::new()
        .competition("PL", 2021, "Premier League", "England")
        .teams(2021, vec![team_json(57, "Arsenal FC")])
        .squad(57, vec![player_json(7784, "Bukayo Saka", Some("2001-09-05T00:00:00Z"))])
}

pub struct TestApp {
    pub pool: SqlitePool,
    pub provider: MockProvider,
    pub state: AppState,
    _dir: TempDir,
}

impl TestApp {
    pub async fn new(fixture: ProviderFixture) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("football.db").display());
        let pool = db::connect(&url).await.unwrap();
        db::init_schema(&pool).await.unwrap();

        let provider = fixture.start().await;
        let state = AppState::new(pool.clone(), provider.client());

        TestApp { pool, provider, state, _dir: dir }
    }

    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app_router(self.state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request("GET", uri, None).await
    }

    pub async fn table_count(&self, table: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }

    pub async fn row_counts(&self) -> [i64; 4] {
        [
            self.table_count("competitions").await,
            self.table_count("teams").await,
            self.table_count("players").await,
            self.table_count("competition_team_players").await,
        ]
    }
}
