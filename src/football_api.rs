//! Client for the Football Data API (https://www.football-data.org/documentation/api).
//!
//! Every call goes through [`FootballApiClient::get_json`], which honours the
//! provider's rate limit: on `429 Too Many Requests` it waits for the number of
//! seconds in `X-RequestCounter-Reset` and retries exactly once. Waits longer
//! than `max_retry_wait` (60s unless configured) fail with
//! [`ProviderError::RetryTooLong`] instead of sleeping.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::ProviderError;
use crate::models::{ApiCompetition, ApiSquadMember, ApiTeam, ApiTeamDetail, ApiTeamsResponse};

pub const AUTH_HEADER: &str = "X-Auth-Token";
pub const RESET_HEADER: &str = "X-RequestCounter-Reset";
pub const DEFAULT_MAX_RETRY_WAIT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct FootballApiClient {
    client: Client,
    base_url: Url,
    token: String,
    max_retry_wait: Duration,
}

impl FootballApiClient {
    pub fn new(client: Client, base_url: &str, token: impl Into<String>) -> Result<Self, ProviderError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| ProviderError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ProviderError::InvalidBaseUrl(base_url.to_string()));
        }

        Ok(FootballApiClient {
            client,
            base_url,
            token: token.into(),
            max_retry_wait: DEFAULT_MAX_RETRY_WAIT,
        })
    }

    pub fn with_max_retry_wait(mut self, max_retry_wait: Duration) -> Self {
        self.max_retry_wait = max_retry_wait;
        self
    }

    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.football_api_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self::new(client, &config.football_api_base_url, &config.football_api_token)?
            .with_max_retry_wait(config.football_api_max_retry_wait))
    }

    /// GET /competitions/{code}
    pub async fn fetch_competition(&self, league_code: &str) -> Result<ApiCompetition, ProviderError> {
        let url = self.endpoint(&["competitions", league_code])?;
        self.get_json(&url).await
    }

    /// GET /competitions/{id}/teams
    pub async fn fetch_teams(&self, competition_id: i64) -> Result<Vec<ApiTeam>, ProviderError> {
        let url = self.endpoint(&["competitions", &competition_id.to_string(), "teams"])?;
        let response: ApiTeamsResponse = self.get_json(&url).await?;
        Ok(response.teams)
    }

    /// GET /teams/{id}, returning only the squad
    pub async fn fetch_squad(&self, team_id: i64) -> Result<Vec<ApiSquadMember>, ProviderError> {
        let url = self.endpoint(&["teams", &team_id.to_string()])?;
        let response: ApiTeamDetail = self.get_json(&url).await?;
        Ok(response.squad)
    }

    /// Append path segments to the base URL. Each segment is percent-encoded,
    /// so a `/` inside a league code cannot reach another resource.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ProviderError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ProviderError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, ProviderError> {
        let mut response = self.send(url).await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            let wait = retry_after(&response);
            let headers = format!("{:?}", response.headers());
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                "Rate limited by football API on {}. body: {} headers: {}",
                url,
                body,
                headers
            );

            let wait = wait.ok_or_else(|| ProviderError::InvalidRetryHeader { url: url.to_string() })?;
            if wait > self.max_retry_wait {
                return Err(ProviderError::RetryTooLong {
                    url: url.to_string(),
                    wait_secs: wait.as_secs(),
                });
            }

            tracing::info!("Retrying {} in {}s", url, wait.as_secs());
            tokio::time::sleep(wait).await;
            response = self.send(url).await?;

            if response.status() == StatusCode::TOO_MANY_REQUESTS {
                return Err(ProviderError::RateLimited { url: url.to_string() });
            }
        }

        match response.status() {
            status if status.is_success() => {
                let bytes = response.bytes().await?;
                serde_json::from_slice(&bytes).map_err(|e| ProviderError::Decode(e.to_string()))
            }
            StatusCode::NOT_FOUND => Err(ProviderError::NotFound { url: url.to_string() }),
            status => Err(ProviderError::Status { status, url: url.to_string() }),
        }
    }

    async fn send(&self, url: &Url) -> Result<reqwest::Response, ProviderError> {
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .header(AUTH_HEADER, &self.token)
            .send()
            .await?;
        Ok(response)
    }
}

fn retry_after(response: &reqwest::Response) -> Option<Duration> {
    let seconds: u64 = response
        .headers()
        .get(RESET_HEADER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()?;
    Some(Duration::from_secs(seconds))
}
