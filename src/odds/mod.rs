//! Odds sources.
//!
//! Defines the `OddsSource` trait, the provider's event schema, and the
//! flattening of events into `OddsQuote`s. The report makes exactly one
//! `fetch_odds` call per generation.

pub mod the_odds_api;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::strategy::odds::decimal_to_american;
use crate::types::{MarketKind, OddsQuote};

/// Abstraction over an odds data provider.
#[async_trait]
pub trait OddsSource: Send + Sync {
    /// Fetch the current events with their bookmaker lines. Any
    /// non-success response is an error.
    async fn fetch_odds(&self) -> Result<Vec<OddsEvent>>;

    /// Source name for logging and error reports.
    fn name(&self) -> &str {
        "odds-source"
    }
}

/// Price format the provider is asked to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OddsFormat {
    #[default]
    American,
    Decimal,
}

impl OddsFormat {
    pub fn as_key(&self) -> &'static str {
        match self {
            OddsFormat::American => "american",
            OddsFormat::Decimal => "decimal",
        }
    }
}

// ---------------------------------------------------------------------------
// Provider schema (The Odds API v4)
// ---------------------------------------------------------------------------

/// One sporting event with every bookmaker's lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OddsEvent {
    pub id: String,
    #[serde(default)]
    pub sport_key: String,
    #[serde(default)]
    pub commence_time: Option<String>,
    pub home_team: String,
    pub away_team: String,
    #[serde(default)]
    pub bookmakers: Vec<Bookmaker>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bookmaker {
    pub key: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub markets: Vec<BookMarket>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookMarket {
    pub key: String,
    #[serde(default)]
    pub outcomes: Vec<BookOutcome>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookOutcome {
    pub name: String,
    pub price: f64,
    /// Handicap for spreads, line for totals.
    #[serde(default)]
    pub point: Option<f64>,
}

impl OddsEvent {
    /// "Away @ Home".
    pub fn matchup(&self) -> String {
        format!("{} @ {}", self.away_team, self.home_team)
    }
}

// ---------------------------------------------------------------------------
// Flattening
// ---------------------------------------------------------------------------

/// Flatten events into one quote per bookmaker outcome.
///
/// Markets other than h2h/spreads/totals and prices that cannot be
/// expressed as a non-zero American price are skipped.
pub fn flatten_quotes(events: &[OddsEvent], format: OddsFormat) -> Vec<OddsQuote> {
    let mut quotes = Vec::new();

    for event in events {
        let matchup = event.matchup();
        for book in &event.bookmakers {
            for market in &book.markets {
                let Ok(kind) = market.key.parse::<MarketKind>() else {
                    debug!(market = %market.key, "Skipping unsupported market");
                    continue;
                };
                for outcome in &market.outcomes {
                    let Some(price) = to_american(outcome.price, format) else {
                        warn!(
                            event = %event.id,
                            bookmaker = %book.key,
                            price = outcome.price,
                            "Skipping unusable price"
                        );
                        continue;
                    };
                    let quote = OddsQuote {
                        description: format!("{matchup}: {}", outcome_label(outcome, kind)),
                        american_price: price,
                        bookmaker: book.key.clone(),
                        market: kind,
                    };
                    debug!(quote = %quote, "Quote flattened");
                    quotes.push(quote);
                }
            }
        }
    }

    quotes
}

fn to_american(price: f64, format: OddsFormat) -> Option<i32> {
    match format {
        OddsFormat::American => {
            let rounded = price.round();
            (rounded.is_finite() && rounded != 0.0).then_some(rounded as i32)
        }
        OddsFormat::Decimal => decimal_to_american(price).ok(),
    }
}

fn outcome_label(outcome: &BookOutcome, kind: MarketKind) -> String {
    match (kind, outcome.point) {
        (MarketKind::Spreads, Some(point)) => format!("{} {point:+}", outcome.name),
        (MarketKind::Totals, Some(point)) => format!("{} {point}", outcome.name),
        (MarketKind::H2h, _) => format!("{} ML", outcome.name),
        (_, None) => outcome.name.clone(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
