//! Parlay Agent — expert betting report.
//!
//! Entry point. Loads configuration, initialises structured logging,
//! generates one report (fetch → edges → parlays), prints it, and
//! optionally serves it on the local dashboard.

use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info};

use parlay_agent::config;
use parlay_agent::dashboard::{self, routes::DashboardState};
use parlay_agent::engine::report::ReportGenerator;
use parlay_agent::estimates::{ProbabilityProvider, StaticProbabilities};
use parlay_agent::odds::the_odds_api::TheOddsApiClient;
use parlay_agent::render;
use parlay_agent::strategy::parlay::ParlayBuilder;
use parlay_agent::strategy::EvCalculator;

const BANNER: &str = r#"
 ____            _               _                    _
|  _ \ __ _ _ __| | __ _ _   _  / \   __ _  ___ _ __ | |_
| |_) / _` | '__| |/ _` | | | |/ _ \ / _` |/ _ \ '_ \| __|
|  __/ (_| | |  | | (_| | |_| / ___ \ (_| |  __/ | | | |_
|_|   \__,_|_|  |_|\__,_|\__, /_/   \_\__, |\___|_| |_|\__|
                         |___/        |___/
  Expert picks vs the book — v0.1.0
"#;

/// Config path, overridable with `PARLAY_CONFIG`.
const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    init_logging();

    let config_path =
        std::env::var("PARLAY_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::AppConfig::load_or_default(&config_path)?;

    println!("{BANNER}");
    info!(
        sport = %cfg.odds_api.sport,
        region = %cfg.odds_api.region,
        markets = ?cfg.odds_api.markets,
        "Parlay Agent starting up"
    );

    // -- Initialise components -------------------------------------------

    let source = TheOddsApiClient::new(&cfg.odds_api, cfg.odds_api_key())?;

    let provider = if cfg.picks.is_empty() {
        StaticProbabilities::default_picks()
    } else {
        StaticProbabilities::from_picks(&cfg.picks)?
    };
    info!(picks = provider.outcomes().len(), "Expert picks loaded");

    let calculator = EvCalculator::new(ParlayBuilder::new(cfg.parlay.to_parlay_config()));

    let generator = ReportGenerator::new(Box::new(source), Box::new(provider), calculator)
        .with_title(cfg.report.title.clone())
        .with_odds_format(cfg.odds_api.odds_format);

    // -- Generate and render ---------------------------------------------

    let result = generator.generate().await;

    match &result {
        Ok(report) => print!("{}", render::render_report(report)),
        Err(e) => {
            error!(error = %e, "Report generation failed");
            eprint!("{}", render::render_failure(e));
        }
    }

    if cfg.dashboard.enabled {
        let state = Arc::new(DashboardState::new());
        state.publish(&result).await;
        dashboard::serve_dashboard(state, cfg.dashboard.port).await?;
    }

    info!("Parlay Agent done.");
    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("parlay_agent=info"));

    let json_logging = std::env::var("PARLAY_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
