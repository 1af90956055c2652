//! Mock odds source for integration testing.
//!
//! Provides a deterministic `OddsSource` implementation that returns
//! known events and counts how often it was called — all in-memory with
//! no network access.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use parlay_agent::odds::{BookMarket, BookOutcome, Bookmaker, OddsEvent, OddsSource};

/// A mock odds source for deterministic testing.
#[derive(Clone)]
pub struct MockOddsSource {
    events: Vec<OddsEvent>,
    calls: Arc<Mutex<usize>>,
    /// If set, `fetch_odds` returns this error.
    force_error: Arc<Mutex<Option<String>>>,
}

impl MockOddsSource {
    /// A source returning the default NFL slate.
    pub fn new() -> Self {
        Self::with_events(Self::default_events())
    }

    pub fn with_events(events: Vec<OddsEvent>) -> Self {
        Self {
            events,
            calls: Arc::new(Mutex::new(0)),
            force_error: Arc::new(Mutex::new(None)),
        }
    }

    /// Force all subsequent fetches to fail, as a non-success status would.
    pub fn set_error(&self, msg: &str) {
        *self.force_error.lock().unwrap() = Some(msg.to_string());
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }

    fn default_events() -> Vec<OddsEvent> {
        vec![
            event(
                "NFL-001",
                "New York Giants",
                "Dallas Cowboys",
                vec![
                    market("h2h", vec![outcome("Dallas Cowboys", -140.0, None), outcome("New York Giants", 120.0, None)]),
                    market(
                        "spreads",
                        vec![
                            outcome("Dallas Cowboys", -110.0, Some(-2.5)),
                            outcome("New York Giants", -110.0, Some(2.5)),
                        ],
                    ),
                ],
            ),
            event(
                "NFL-002",
                "New England Patriots",
                "New York Jets",
                vec![market(
                    "totals",
                    vec![outcome("Over", -108.0, Some(44.5)), outcome("Under", -112.0, Some(44.5))],
                )],
            ),
        ]
    }
}

fn event(id: &str, home: &str, away: &str, markets: Vec<BookMarket>) -> OddsEvent {
    OddsEvent {
        id: id.to_string(),
        sport_key: "americanfootball_nfl".to_string(),
        commence_time: Some("2026-10-25T17:00:00Z".to_string()),
        home_team: home.to_string(),
        away_team: away.to_string(),
        bookmakers: vec![Bookmaker {
            key: "draftkings".to_string(),
            title: "DraftKings".to_string(),
            markets,
        }],
    }
}

fn market(key: &str, outcomes: Vec<BookOutcome>) -> BookMarket {
    BookMarket {
        key: key.to_string(),
        outcomes,
    }
}

fn outcome(name: &str, price: f64, point: Option<f64>) -> BookOutcome {
    BookOutcome {
        name: name.to_string(),
        price,
        point,
    }
}

#[async_trait]
impl OddsSource for MockOddsSource {
    async fn fetch_odds(&self) -> Result<Vec<OddsEvent>> {
        *self.calls.lock().unwrap() += 1;
        if let Some(err) = self.force_error.lock().unwrap().as_ref() {
            return Err(anyhow!("{}", err));
        }
        Ok(self.events.clone())
    }

    fn name(&self) -> &str {
        "mock-odds"
    }
}

// ---------------------------------------------------------------------------
// Tests of the mock itself
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_returns_default_events() {
        let source = MockOddsSource::new();
        let events = source.fetch_odds().await.unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_mock_forced_error() {
        let source = MockOddsSource::new();
        source.set_error("503 Service Unavailable");
        let err = source.fetch_odds().await.unwrap_err();
        assert!(err.to_string().contains("503"));
    }
}
