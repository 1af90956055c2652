//! The Odds API v4 client.
//!
//! API docs: https://the-odds-api.com/liveapi/guides/v4/
//! Endpoint: `GET /v4/sports/{sport}/odds`
//! Auth: `apiKey` query parameter. Quota is reported in the
//! `x-requests-remaining` / `x-requests-used` response headers.
//!
//! One request per report. No retry, no pagination.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};

use super::{OddsEvent, OddsFormat, OddsSource};
use crate::config::OddsApiConfig;
use crate::types::{MarketKind, Region, Sport};

pub const SOURCE_NAME: &str = "the-odds-api";

/// Request parameters for the odds endpoint.
#[derive(Debug, Clone)]
pub struct OddsRequest {
    pub sport: Sport,
    pub region: Region,
    pub markets: Vec<MarketKind>,
    pub odds_format: OddsFormat,
}

impl From<&OddsApiConfig> for OddsRequest {
    fn from(cfg: &OddsApiConfig) -> Self {
        Self {
            sport: cfg.sport,
            region: cfg.region,
            markets: cfg.markets.clone(),
            odds_format: cfg.odds_format,
        }
    }
}

impl OddsRequest {
    /// Comma-joined market keys, e.g. "h2h,spreads,totals".
    pub fn markets_param(&self) -> String {
        self.markets
            .iter()
            .map(|m| m.as_key())
            .collect::<Vec<_>>()
            .join(",")
    }
}

pub struct TheOddsApiClient {
    http: Client,
    base_url: String,
    api_key: SecretString,
    request: OddsRequest,
}

impl TheOddsApiClient {
    pub fn new(cfg: &OddsApiConfig, api_key: SecretString) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(cfg.timeout_secs))
            .user_agent("ParlayAgent/0.1.0")
            .build()
            .context("Failed to build HTTP client for The Odds API")?;

        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            api_key,
            request: OddsRequest::from(cfg),
        })
    }

    /// Request URL without the API key (safe to log).
    pub fn redacted_url(&self) -> String {
        self.build_url("REDACTED")
    }

    fn build_url(&self, api_key: &str) -> String {
        format!(
            "{}/v4/sports/{}/odds?apiKey={}&regions={}&markets={}&oddsFormat={}",
            self.base_url,
            self.request.sport.as_key(),
            urlencoding::encode(api_key),
            self.request.region.as_key(),
            urlencoding::encode(&self.request.markets_param()),
            self.request.odds_format.as_key(),
        )
    }
}

#[async_trait]
impl OddsSource for TheOddsApiClient {
    async fn fetch_odds(&self) -> Result<Vec<OddsEvent>> {
        debug!(url = %self.redacted_url(), "Fetching odds");

        let resp = self
            .http
            .get(self.build_url(self.api_key.expose_secret()))
            .send()
            .await
            .context("The Odds API request failed")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("The Odds API error {status}: {body}");
        }

        let remaining = header_str(&resp, "x-requests-remaining");
        let used = header_str(&resp, "x-requests-used");

        let events: Vec<OddsEvent> = resp
            .json()
            .await
            .context("Failed to parse The Odds API odds response")?;

        info!(
            sport = %self.request.sport,
            events = events.len(),
            requests_remaining = remaining.as_deref().unwrap_or("?"),
            requests_used = used.as_deref().unwrap_or("?"),
            "Odds fetched"
        );

        Ok(events)
    }

    fn name(&self) -> &str {
        SOURCE_NAME
    }
}

fn header_str(resp: &reqwest::Response, name: &str) -> Option<String> {
    resp.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Router};

    fn config(base_url: &str) -> OddsApiConfig {
        OddsApiConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
            ..OddsApiConfig::default()
        }
    }

    /// Serve `router` on an ephemeral local port and return its base URL.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn test_url_contains_parameters() {
        let client = TheOddsApiClient::new(
            &config("https://api.the-odds-api.com/"),
            SecretString::new("secret key".into()),
        )
        .unwrap();
        let url = client.build_url("secret key");
        assert!(url.starts_with("https://api.the-odds-api.com/v4/sports/americanfootball_nfl/odds?"));
        assert!(url.contains("apiKey=secret%20key"));
        assert!(url.contains("regions=us"));
        assert!(url.contains("markets=h2h%2Cspreads%2Ctotals"));
        assert!(url.contains("oddsFormat=american"));
    }

    #[test]
    fn test_redacted_url_hides_key() {
        let client = TheOddsApiClient::new(
            &config("https://api.the-odds-api.com"),
            SecretString::new("abc123".into()),
        )
        .unwrap();
        let url = client.redacted_url();
        assert!(!url.contains("abc123"));
        assert!(url.contains("apiKey=REDACTED"));
    }

    #[test]
    fn test_markets_param() {
        let request = OddsRequest {
            sport: Sport::BasketballNba,
            region: Region::Eu,
            markets: vec![MarketKind::H2h, MarketKind::Totals],
            odds_format: OddsFormat::Decimal,
        };
        assert_eq!(request.markets_param(), "h2h,totals");
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let router = Router::new().route(
            "/v4/sports/americanfootball_nfl/odds",
            get(|| async {
                (
                    [("x-requests-remaining", "499")],
                    r#"[{"id":"e1","home_team":"H","away_team":"A","bookmakers":[]}]"#,
                )
            }),
        );
        let base = serve(router).await;
        let client = TheOddsApiClient::new(&config(&base), SecretString::new("k".into())).unwrap();

        let events = client.fetch_odds().await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "e1");
    }

    #[tokio::test]
    async fn test_fetch_non_success_is_error() {
        let router = Router::new().route(
            "/v4/sports/americanfootball_nfl/odds",
            get(|| async { (StatusCode::UNAUTHORIZED, "invalid api key") }),
        );
        let base = serve(router).await;
        let client = TheOddsApiClient::new(&config(&base), SecretString::new("bad".into())).unwrap();

        let err = client.fetch_odds().await.unwrap_err();
        assert!(err.to_string().contains("401"));
    }

    #[tokio::test]
    async fn test_fetch_malformed_body_is_error() {
        let router = Router::new().route(
            "/v4/sports/americanfootball_nfl/odds",
            get(|| async { "not json" }),
        );
        let base = serve(router).await;
        let client = TheOddsApiClient::new(&config(&base), SecretString::new("k".into())).unwrap();
        assert!(client.fetch_odds().await.is_err());
    }
}
