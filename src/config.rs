//! Configuration loading from TOML with environment variable resolution.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! The odds API key is referenced by env-var name in the config and
//! resolved at runtime into a `SecretString`. A missing config file
//! falls back to the built-in defaults.

use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::odds::OddsFormat;
use crate::strategy::parlay::ParlayConfig;
use crate::types::{MarketKind, Region, Sport};

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub odds_api: OddsApiConfig,
    #[serde(default)]
    pub parlay: ParlaySection,
    /// Expert picks. Empty means the built-in defaults.
    #[serde(default)]
    pub picks: Vec<PickConfig>,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ReportConfig {
    pub title: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "Parlay Agent – Expert Betting Report".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OddsApiConfig {
    /// Name of the env var holding the API key.
    pub api_key_env: String,
    pub sport: Sport,
    pub region: Region,
    pub markets: Vec<MarketKind>,
    pub odds_format: OddsFormat,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for OddsApiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "ODDS_API_KEY".to_string(),
            sport: Sport::AmericanFootballNfl,
            region: Region::Us,
            markets: MarketKind::ALL.to_vec(),
            odds_format: OddsFormat::American,
            base_url: "https://api.the-odds-api.com".to_string(),
            timeout_secs: 15,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ParlaySection {
    pub min_legs: usize,
    pub capped_legs: usize,
}

impl Default for ParlaySection {
    fn default() -> Self {
        let defaults = ParlayConfig::default();
        Self {
            min_legs: defaults.min_legs,
            capped_legs: defaults.capped_legs,
        }
    }
}

impl ParlaySection {
    /// Parlay policy for the builder. The capped parlay's name follows its size.
    pub fn to_parlay_config(&self) -> ParlayConfig {
        ParlayConfig {
            min_legs: self.min_legs,
            capped_legs: self.capped_legs,
            capped_name: format!("Safe {}-Leg", self.capped_legs),
            ..ParlayConfig::default()
        }
    }
}

/// One expert pick. The book side is given either directly or as an
/// American price.
#[derive(Debug, Deserialize, Clone)]
pub struct PickConfig {
    pub label: String,
    pub expert_prob: f64,
    #[serde(default)]
    pub book_prob: Option<f64>,
    #[serde(default)]
    pub american_price: Option<i32>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DashboardConfig {
    pub enabled: bool,
    pub port: u16,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            port: 8501,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse config file: {path}"))
    }

    /// Load from `path` if it exists, otherwise use defaults.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            let cfg = Self::load(path)?;
            info!(path, picks = cfg.picks.len(), "Config loaded");
            Ok(cfg)
        } else {
            info!(path, "No config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        Ok(config)
    }

    /// Resolve an environment variable name to its value.
    pub fn resolve_env(env_name: &str) -> Result<String> {
        std::env::var(env_name)
            .with_context(|| format!("Environment variable not set: {env_name}"))
    }

    /// The odds API key. An unset key is not fatal here: the request will
    /// be rejected upstream and reported as an unavailable source.
    pub fn odds_api_key(&self) -> SecretString {
        match Self::resolve_env(&self.odds_api.api_key_env) {
            Ok(key) => SecretString::new(key),
            Err(e) => {
                warn!(error = %e, "No odds API key configured");
                SecretString::new(String::new())
            }
        }
    }
}
