//! Edge classification.
//!
//! Compares the expert probability to the book-implied probability for the
//! same outcome. An outcome is +EV only when the expert is strictly above
//! the book; ties carry no edge.

use rust_decimal::Decimal;
use tracing::debug;

use crate::types::{round_dp, validate_probability, AgentError, EdgeResult};

/// Classify a single outcome.
pub fn classify_edge(label: &str, expert: f64, book: f64) -> Result<EdgeResult, AgentError> {
    validate_probability(label, expert)?;
    validate_probability(label, book)?;

    let edge = expert - book;
    let positive_ev = expert > book;
    let edge_pct = round_dp(edge * 100.0, 1);

    debug!(
        label,
        expert = %format!("{:.1}%", expert * 100.0),
        book = %format!("{:.1}%", book * 100.0),
        edge_pct = %edge_pct,
        positive_ev,
        "Edge classified"
    );

    Ok(EdgeResult {
        label: label.to_string(),
        expert_prob: expert,
        book_prob: book,
        edge,
        edge_pct,
        positive_ev,
    })
}

/// Total displayed edge across the +EV outcomes (percentage points).
pub fn total_positive_edge(results: &[EdgeResult]) -> Decimal {
    results
        .iter()
        .filter(|r| r.positive_ev)
        .map(|r| r.edge_pct)
        .sum()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
