//! Probability providers.
//!
//! Defines the `ProbabilityProvider` trait the EV calculator reads from,
//! and a static implementation backed by the `[[picks]]` config table.
//! Mapping live odds onto the book side is deliberately not done here:
//! a pick either states its book probability or an American price.

use tracing::debug;

use crate::config::PickConfig;
use crate::strategy::odds::american_to_probability;
use crate::types::{validate_probability, AgentError, ProbabilityEstimate, ProbabilityPair};

/// Source of expert and book probabilities, keyed by outcome label.
pub trait ProbabilityProvider: Send + Sync {
    /// Outcome labels in evaluation order.
    fn outcomes(&self) -> Vec<String>;

    /// Expert and book probabilities for one outcome.
    fn lookup(&self, outcome: &str) -> Option<ProbabilityPair>;
}

/// The picks the report ships with when no `[[picks]]` are configured.
const DEFAULT_PICKS: &[(&str, f64, f64)] = &[
    ("Dallas Cowboys -2.5", 0.62, 0.52),
    ("Jets vs Patriots UNDER 44.5", 0.68, 0.52),
    ("Kansas City Chiefs ML", 0.74, 0.71),
    ("San Francisco 49ers -6.5", 0.59, 0.52),
];

/// Fixed, ordered table of expert/book probabilities.
#[derive(Debug, Clone)]
pub struct StaticProbabilities {
    entries: Vec<(String, ProbabilityPair)>,
}

impl StaticProbabilities {
    /// Build from ordered `(label, pair)` entries, validating every
    /// probability and rejecting duplicate labels.
    pub fn new(entries: Vec<(String, ProbabilityPair)>) -> Result<Self, AgentError> {
        for (i, (label, pair)) in entries.iter().enumerate() {
            validate_probability(label, pair.expert)?;
            validate_probability(label, pair.book)?;
            if entries[..i].iter().any(|(other, _)| other == label) {
                return Err(AgentError::Config(format!("Duplicate pick label: {label}")));
            }
        }
        Ok(Self { entries })
    }

    /// The built-in NFL picks.
    pub fn default_picks() -> Self {
        Self {
            entries: DEFAULT_PICKS
                .iter()
                .map(|(label, expert, book)| {
                    (label.to_string(), ProbabilityPair { expert: *expert, book: *book })
                })
                .collect(),
        }
    }

    /// Build from configured picks. A pick may give its book side as a
    /// probability or as an American price; `book_prob` wins if both are set.
    pub fn from_picks(picks: &[PickConfig]) -> Result<Self, AgentError> {
        let mut entries = Vec::with_capacity(picks.len());

        for pick in picks {
            let expert = ProbabilityEstimate::new(&pick.label, pick.expert_prob)?;
            let book = match (pick.book_prob, pick.american_price) {
                (Some(p), _) => p,
                (None, Some(price)) => american_to_probability(price)?,
                (None, None) => {
                    return Err(AgentError::Config(format!(
                        "Pick '{}' needs book_prob or american_price",
                        pick.label
                    )))
                }
            };
            let book = ProbabilityEstimate::new(&pick.label, book)?;

            debug!(
                label = %pick.label,
                expert = expert.probability,
                book = book.probability,
                "Pick loaded"
            );

            entries.push((
                expert.outcome,
                ProbabilityPair {
                    expert: expert.probability,
                    book: book.probability,
                },
            ));
        }

        Self::new(entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ProbabilityProvider for StaticProbabilities {
    fn outcomes(&self) -> Vec<String> {
        self.entries.iter().map(|(label, _)| label.clone()).collect()
    }

    fn lookup(&self, outcome: &str) -> Option<ProbabilityPair> {
        self.entries
            .iter()
            .find(|(label, _)| label == outcome)
            .map(|(_, pair)| *pair)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
