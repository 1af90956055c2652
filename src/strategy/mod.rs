//! EV calculator — odds conversion, edge classification, and parlay building.
//!
//! Everything in this module is pure: no network, no rendering. The
//! calculator walks a `ProbabilityProvider` in its own order, classifies
//! each outcome, and hands the +EV legs to the parlay builder.

pub mod edge;
pub mod odds;
pub mod parlay;

use tracing::{info, warn};

use crate::estimates::ProbabilityProvider;
use crate::types::{AgentError, EdgeResult, ParlayLeg, ParlayOutcome};
use parlay::ParlayBuilder;

/// Output of one calculator pass.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub outcomes: Vec<EdgeResult>,
    pub parlays: ParlayOutcome,
}

pub struct EvCalculator {
    parlay_builder: ParlayBuilder,
}

impl EvCalculator {
    pub fn new(parlay_builder: ParlayBuilder) -> Self {
        Self { parlay_builder }
    }

    /// Classify every outcome the provider knows and build parlays from
    /// the +EV subset.
    pub fn evaluate(&self, provider: &dyn ProbabilityProvider) -> Result<Evaluation, AgentError> {
        let mut outcomes = Vec::new();

        for label in provider.outcomes() {
            let Some(pair) = provider.lookup(&label) else {
                warn!(label = %label, "Outcome listed but has no probabilities, skipping");
                continue;
            };
            outcomes.push(edge::classify_edge(&label, pair.expert, pair.book)?);
        }

        let legs: Vec<ParlayLeg> = outcomes
            .iter()
            .filter(|o| o.positive_ev)
            .map(|o| ParlayLeg {
                label: o.label.clone(),
                probability: o.expert_prob,
            })
            .collect();

        info!(
            outcomes = outcomes.len(),
            positive_ev = legs.len(),
            total_edge = %edge::total_positive_edge(&outcomes),
            "Outcomes evaluated"
        );

        let parlays = self.parlay_builder.build(&legs);

        Ok(Evaluation { outcomes, parlays })
    }
}

impl Default for EvCalculator {
    fn default() -> Self {
        Self::new(ParlayBuilder::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
