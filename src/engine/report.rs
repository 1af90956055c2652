//! Report generation.
//!
//! Runs the three stages of a report with explicit handoffs:
//! odds fetch (`OddsQuote`s) → edge classification (`EdgeResult`s) →
//! parlay building (`Parlay`s). Rendering happens afterwards, elsewhere.

use chrono::{Local, Utc};
use tracing::{error, info};

use crate::estimates::ProbabilityProvider;
use crate::odds::{flatten_quotes, OddsFormat, OddsSource};
use crate::strategy::EvCalculator;
use crate::types::{AgentError, Report};

pub const DEFAULT_TITLE: &str = "Parlay Agent – Expert Betting Report";

pub struct ReportGenerator {
    source: Box<dyn OddsSource>,
    provider: Box<dyn ProbabilityProvider>,
    calculator: EvCalculator,
    odds_format: OddsFormat,
    title: String,
}

impl ReportGenerator {
    pub fn new(
        source: Box<dyn OddsSource>,
        provider: Box<dyn ProbabilityProvider>,
        calculator: EvCalculator,
    ) -> Self {
        Self {
            source,
            provider,
            calculator,
            odds_format: OddsFormat::default(),
            title: DEFAULT_TITLE.to_string(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Price format the source was asked to return.
    pub fn with_odds_format(mut self, format: OddsFormat) -> Self {
        self.odds_format = format;
        self
    }

    /// Generate one report.
    ///
    /// A failed fetch or an empty event list halts the report with
    /// `SourceUnavailable`; nothing is computed in that case.
    pub async fn generate(&self) -> Result<Report, AgentError> {
        let source_name = self.source.name().to_string();
        info!(source = %source_name, "Generating report");

        // 1. Fetch odds
        let events = match self.source.fetch_odds().await {
            Ok(events) => events,
            Err(e) => {
                error!(source = %source_name, error = %e, "Odds fetch failed");
                return Err(AgentError::SourceUnavailable {
                    source_name,
                    message: format!("{e:#}"),
                });
            }
        };

        if events.is_empty() {
            error!(source = %source_name, "Odds source returned no events");
            return Err(AgentError::SourceUnavailable {
                source_name,
                message: "no odds data returned".to_string(),
            });
        }

        let quotes = flatten_quotes(&events, self.odds_format);
        info!(events = events.len(), quotes = quotes.len(), "Odds flattened");

        // 2-3. Edges → parlays
        let evaluation = self.calculator.evaluate(self.provider.as_ref())?;

        let generated_at = Utc::now();
        let report = Report {
            title: self.title.clone(),
            generated_at,
            report_date: generated_at.with_timezone(&Local).date_naive(),
            quotes_fetched: quotes.len(),
            outcomes: evaluation.outcomes,
            parlays: evaluation.parlays,
        };

        info!(summary = %report, "Report generated");
        Ok(report)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
