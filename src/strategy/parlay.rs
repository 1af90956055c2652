//! Parlay construction from +EV legs.
//!
//! Combined probability is the product of the legs' expert probabilities.
//! Legs are treated as independent: no correlation or mutual-exclusivity
//! check is made between them.

use tracing::{debug, info};

use crate::types::{Parlay, ParlayKind, ParlayLeg, ParlayOutcome};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Parlay policy.
#[derive(Debug, Clone)]
pub struct ParlayConfig {
    /// Minimum +EV legs before any parlay is built.
    pub min_legs: usize,
    /// Size of the capped parlay, built only when at least this many legs exist.
    pub capped_legs: usize,
    pub capped_name: String,
    pub all_legs_name: String,
}

impl Default for ParlayConfig {
    fn default() -> Self {
        Self {
            min_legs: 2,
            capped_legs: 3,
            capped_name: "Safe 3-Leg".to_string(),
            all_legs_name: "Aggressive All-Legs".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Product of the given probabilities (1.0 for an empty slice).
pub fn combined_probability(probabilities: &[f64]) -> f64 {
    probabilities.iter().product()
}

pub struct ParlayBuilder {
    config: ParlayConfig,
}

impl ParlayBuilder {
    pub fn new(config: ParlayConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParlayConfig {
        &self.config
    }

    /// Build named parlays from +EV legs, in the order given.
    ///
    /// The capped parlay (first `capped_legs` legs) comes first when it
    /// exists, followed by the all-legs parlay.
    pub fn build(&self, legs: &[ParlayLeg]) -> ParlayOutcome {
        let required = self.config.min_legs.max(2);
        if legs.len() < required {
            info!(
                available = legs.len(),
                required,
                "Not enough +EV legs to build a parlay"
            );
            return ParlayOutcome::InsufficientLegs {
                available: legs.len(),
                required,
            };
        }

        let mut parlays = Vec::with_capacity(2);

        if self.config.capped_legs >= required && legs.len() >= self.config.capped_legs {
            parlays.push(Self::make_parlay(
                &self.config.capped_name,
                ParlayKind::Capped,
                &legs[..self.config.capped_legs],
            ));
        }

        parlays.push(Self::make_parlay(
            &self.config.all_legs_name,
            ParlayKind::AllLegs,
            legs,
        ));

        ParlayOutcome::Built { parlays }
    }

    fn make_parlay(name: &str, kind: ParlayKind, legs: &[ParlayLeg]) -> Parlay {
        let probabilities: Vec<f64> = legs.iter().map(|l| l.probability).collect();
        let combined = combined_probability(&probabilities);

        debug!(
            name,
            legs = legs.len(),
            combined = %format!("{:.1}%", combined * 100.0),
            "Parlay built"
        );

        Parlay {
            name: name.to_string(),
            kind,
            legs: legs.iter().map(|l| l.label.clone()).collect(),
            combined_probability: combined,
        }
    }
}

impl Default for ParlayBuilder {
    fn default() -> Self {
        Self::new(ParlayConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
