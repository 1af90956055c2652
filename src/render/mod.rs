//! Console rendering of a finished report.
//!
//! Pure string building: the caller decides where the text goes.

use std::fmt::Write;

use crate::types::{AgentError, ParlayOutcome, Report};

const RULE: &str = "------------------------------------------------------------";

/// User-facing message for a report that could not be generated.
pub fn render_failure(err: &AgentError) -> String {
    match err {
        AgentError::SourceUnavailable { .. } => {
            format!("⚠️  Could not fetch odds data. Check API key or plan limits.\n   ({err})\n")
        }
        other => format!("⚠️  Report failed: {other}\n"),
    }
}

/// Full text report: picks, parlays, closing notes.
pub fn render_report(report: &Report) -> String {
    let mut out = String::new();

    // `write!` into a String cannot fail.
    let _ = writeln!(out, "🏈 {}", report.title);
    let _ = writeln!(out, "📅 Report Date: {}", report.report_date);
    let _ = writeln!(out, "   Lines fetched: {}", report.quotes_fetched);
    let _ = writeln!(out);

    let _ = writeln!(out, "🔥 Featured Expert Picks");
    let _ = writeln!(out, "{RULE}");
    for outcome in &report.outcomes {
        let mark = if outcome.positive_ev { "✅" } else { "❌" };
        let _ = writeln!(out, "{mark} {outcome}");
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "🎯 Recommended Parlays (Only +EV Legs)");
    let _ = writeln!(out, "{RULE}");
    match &report.parlays {
        ParlayOutcome::InsufficientLegs { available, required } => {
            let _ = writeln!(
                out,
                "Not enough +EV legs to build a strong parlay today ({available} of {required} needed)."
            );
        }
        ParlayOutcome::Built { parlays } => {
            for parlay in parlays {
                let _ = writeln!(out, "### {}", parlay.name);
                let _ = writeln!(out, "Legs: {}", parlay.legs.join(", "));
                let _ = writeln!(
                    out,
                    "✅ Combined Probability: {:.1}%",
                    parlay.combined_probability * 100.0
                );
                let _ = writeln!(out, "{RULE}");
            }
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "🧾 Agent Summary");
    let _ = writeln!(out, "- ✅ picks = bets where the expert estimate beats the sportsbook");
    let _ = writeln!(out, "- ❌ picks = avoid (no edge or negative EV)");
    let _ = writeln!(out, "- Parlays are only constructed from ✅ (+EV) legs");
    let _ = writeln!(out, "- Parlay probabilities assume independent legs");

    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
