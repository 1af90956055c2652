//! Odds-to-probability conversion.
//!
//! American odds: positive prices are the profit on a 100 stake (underdog),
//! negative prices are the stake needed to win 100 (favourite). The implied
//! probability assumes no bookmaker margin.

use crate::types::AgentError;

/// Implied win probability of an American price.
///
/// `+p` → 100 / (p + 100), `-p` → p / (p + 100). A price of 0 is not a
/// valid American price and is rejected.
pub fn american_to_probability(price: i32) -> Result<f64, AgentError> {
    if price == 0 {
        return Err(AgentError::InvalidOdds { price });
    }

    let p = f64::from(price);
    let prob = if price > 0 {
        100.0 / (p + 100.0)
    } else {
        -p / (-p + 100.0)
    };
    Ok(prob)
}

/// Convert a decimal price (European format, stake included) to American.
///
/// Decimal prices must exceed 1.0; evens (2.0) maps to +100.
pub fn decimal_to_american(decimal: f64) -> Result<i32, AgentError> {
    if !decimal.is_finite() || decimal <= 1.0 {
        return Err(AgentError::InvalidDecimalOdds(decimal));
    }

    let american = if decimal >= 2.0 {
        (decimal - 1.0) * 100.0
    } else {
        -100.0 / (decimal - 1.0)
    };
    let american = american.round();
    if american < f64::from(i32::MIN) || american > f64::from(i32::MAX) {
        return Err(AgentError::InvalidDecimalOdds(decimal));
    }
    Ok(american as i32)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
