//! Shared types for the Parlay Agent.
//!
//! These types form the data model handed between the odds source, the
//! EV calculator, and the renderers. Nothing here is persisted: every
//! value lives for a single report generation.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Odds API enums
// ---------------------------------------------------------------------------

/// Sport key understood by the odds provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sport {
    #[serde(rename = "americanfootball_nfl")]
    AmericanFootballNfl,
    #[serde(rename = "americanfootball_ncaaf")]
    AmericanFootballNcaaf,
    #[serde(rename = "basketball_nba")]
    BasketballNba,
    #[serde(rename = "baseball_mlb")]
    BaseballMlb,
    #[serde(rename = "icehockey_nhl")]
    IceHockeyNhl,
    #[serde(rename = "soccer_epl")]
    SoccerEpl,
}

impl Sport {
    /// The provider's path key for this sport.
    pub fn as_key(&self) -> &'static str {
        match self {
            Sport::AmericanFootballNfl => "americanfootball_nfl",
            Sport::AmericanFootballNcaaf => "americanfootball_ncaaf",
            Sport::BasketballNba => "basketball_nba",
            Sport::BaseballMlb => "baseball_mlb",
            Sport::IceHockeyNhl => "icehockey_nhl",
            Sport::SoccerEpl => "soccer_epl",
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_key())
    }
}

/// Bookmaker region filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Us,
    Us2,
    Uk,
    Eu,
    Au,
}

impl Region {
    pub fn as_key(&self) -> &'static str {
        match self {
            Region::Us => "us",
            Region::Us2 => "us2",
            Region::Uk => "uk",
            Region::Eu => "eu",
            Region::Au => "au",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_key())
    }
}

/// Betting market type requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketKind {
    /// Head-to-head (moneyline).
    H2h,
    Spreads,
    Totals,
}

impl MarketKind {
    /// All market kinds, in the order they are requested.
    pub const ALL: &'static [MarketKind] = &[MarketKind::H2h, MarketKind::Spreads, MarketKind::Totals];

    pub fn as_key(&self) -> &'static str {
        match self {
            MarketKind::H2h => "h2h",
            MarketKind::Spreads => "spreads",
            MarketKind::Totals => "totals",
        }
    }
}

impl fmt::Display for MarketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_key())
    }
}

/// Parse a provider market key (case-insensitive).
impl std::str::FromStr for MarketKind {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "h2h" | "moneyline" | "ml" => Ok(MarketKind::H2h),
            "spreads" | "spread" => Ok(MarketKind::Spreads),
            "totals" | "total" => Ok(MarketKind::Totals),
            other => Err(AgentError::Config(format!("Unknown market kind: {other}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Odds quote
// ---------------------------------------------------------------------------

/// A single betting line returned by the odds source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OddsQuote {
    /// Human-readable line, e.g. "Dallas Cowboys @ New York Giants: Dallas Cowboys -2.5".
    pub description: String,
    /// American-format price (never 0).
    pub american_price: i32,
    pub bookmaker: String,
    pub market: MarketKind,
}

impl fmt::Display for OddsQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:+} ({}, {})",
            self.description, self.american_price, self.market, self.bookmaker
        )
    }
}

// ---------------------------------------------------------------------------
// Probabilities
// ---------------------------------------------------------------------------

/// A win probability for a named outcome, strictly inside (0, 1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityEstimate {
    pub outcome: String,
    pub probability: f64,
}

impl ProbabilityEstimate {
    /// Build an estimate, rejecting probabilities outside (0, 1).
    pub fn new(outcome: impl Into<String>, probability: f64) -> Result<Self, AgentError> {
        let outcome = outcome.into();
        validate_probability(&outcome, probability)?;
        Ok(Self { outcome, probability })
    }
}

/// Expert and book estimates for the same outcome, joined by label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityPair {
    pub expert: f64,
    pub book: f64,
}

/// Reject anything that is not strictly inside (0, 1), NaN included.
pub fn validate_probability(label: &str, value: f64) -> Result<(), AgentError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(AgentError::InvalidProbability {
            label: label.to_string(),
            value,
        })
    }
}

/// Round an `f64` to `dp` decimal places as an exact `Decimal`, always
/// carrying exactly `dp` places (25 → 25.0).
///
/// Rounds the exact binary value half-to-even, so 5.3499999... stays 5.3
/// even though it prints as 5.35.
pub fn round_dp(value: f64, dp: u32) -> Decimal {
    let mut rounded = Decimal::from_f64_retain(value)
        .unwrap_or(Decimal::ZERO)
        .round_dp(dp);
    rounded.rescale(dp);
    rounded
}

// ---------------------------------------------------------------------------
// Edge result
// ---------------------------------------------------------------------------

/// Expert-vs-book comparison for one outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeResult {
    pub label: String,
    pub expert_prob: f64,
    pub book_prob: f64,
    /// expert − book, unscaled.
    pub edge: f64,
    /// Edge in percentage points, rounded to one decimal place.
    pub edge_pct: Decimal,
    /// True iff expert > book.
    pub positive_ev: bool,
}

impl fmt::Display for EdgeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.edge_pct > Decimal::ZERO { "+" } else { "" };
        write!(
            f,
            "{}: Agent {:.0}% vs Book {:.0}% | Edge: {sign}{}%",
            self.label,
            self.expert_prob * 100.0,
            self.book_prob * 100.0,
            self.edge_pct,
        )
    }
}

// ---------------------------------------------------------------------------
// Parlays
// ---------------------------------------------------------------------------

/// Which parlay policy produced a parlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParlayKind {
    /// First N +EV legs in discovery order.
    Capped,
    /// Every +EV leg.
    AllLegs,
}

/// One leg fed into the parlay builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParlayLeg {
    pub label: String,
    pub probability: f64,
}

/// A combined bet over two or more +EV legs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parlay {
    pub name: String,
    pub kind: ParlayKind,
    pub legs: Vec<String>,
    /// Product of every leg's expert probability.
    pub combined_probability: f64,
}

impl Parlay {
    /// Combined probability rounded to three decimal places.
    pub fn rounded_probability(&self) -> Decimal {
        round_dp(self.combined_probability, 3)
    }
}

impl fmt::Display for Parlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] combined {:.1}%",
            self.name,
            self.legs.join(", "),
            self.combined_probability * 100.0,
        )
    }
}

/// Result of the parlay builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ParlayOutcome {
    Built { parlays: Vec<Parlay> },
    /// Not enough +EV legs; no parlay was constructed.
    InsufficientLegs { available: usize, required: usize },
}

impl ParlayOutcome {
    /// Built parlays, empty when legs were insufficient.
    pub fn parlays(&self) -> &[Parlay] {
        match self {
            ParlayOutcome::Built { parlays } => parlays,
            ParlayOutcome::InsufficientLegs { .. } => &[],
        }
    }

    pub fn is_insufficient(&self) -> bool {
        matches!(self, ParlayOutcome::InsufficientLegs { .. })
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Everything a renderer needs for one report generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub report_date: NaiveDate,
    pub quotes_fetched: usize,
    pub outcomes: Vec<EdgeResult>,
    pub parlays: ParlayOutcome,
}

impl Report {
    /// Outcomes classified +EV, in discovery order.
    pub fn positive_ev(&self) -> impl Iterator<Item = &EdgeResult> {
        self.outcomes.iter().filter(|o| o.positive_ev)
    }

    /// True when fewer than two +EV legs were available.
    pub fn insufficient_legs(&self) -> bool {
        self.parlays.is_insufficient()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Report {}: quotes={} outcomes={} +EV={} parlays={}",
            self.report_date,
            self.quotes_fetched,
            self.outcomes.len(),
            self.positive_ev().count(),
            self.parlays.parlays().len(),
        )
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for the Parlay Agent.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("Odds source unavailable ({source_name}): {message}")]
    SourceUnavailable { source_name: String, message: String },

    #[error("Invalid American odds: {price}")]
    InvalidOdds { price: i32 },

    #[error("Invalid decimal odds: {0}")]
    InvalidDecimalOdds(f64),

    #[error("Invalid probability for {label}: {value} (must be in (0, 1))")]
    InvalidProbability { label: String, value: f64 },

    #[error("Configuration error: {0}")]
    Config(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
