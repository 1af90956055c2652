//! End-to-end report generation against the mock odds source.

use rust_decimal_macros::dec;

use parlay_agent::config::AppConfig;
use parlay_agent::engine::report::ReportGenerator;
use parlay_agent::estimates::StaticProbabilities;
use parlay_agent::render;
use parlay_agent::strategy::parlay::ParlayBuilder;
use parlay_agent::strategy::EvCalculator;
use parlay_agent::types::{AgentError, ParlayKind, ParlayOutcome};

use crate::mock_source::MockOddsSource;

const EXAMPLE_CONFIG: &str = r#"
[report]
title = "Week 8 Report"

[[picks]]
label = "A"
expert_prob = 0.62
book_prob = 0.52

[[picks]]
label = "B"
expert_prob = 0.68
book_prob = 0.52

[[picks]]
label = "C"
expert_prob = 0.74
book_prob = 0.71

[[picks]]
label = "D"
expert_prob = 0.59
book_prob = 0.52
"#;

fn generator_from_config(cfg: &AppConfig, source: MockOddsSource) -> ReportGenerator {
    let provider = StaticProbabilities::from_picks(&cfg.picks).unwrap();
    let calculator = EvCalculator::new(ParlayBuilder::new(cfg.parlay.to_parlay_config()));
    ReportGenerator::new(Box::new(source), Box::new(provider), calculator)
        .with_title(cfg.report.title.clone())
}

#[tokio::test]
async fn test_example_slate_end_to_end() {
    let cfg = AppConfig::parse(EXAMPLE_CONFIG).unwrap();
    let source = MockOddsSource::new();
    let report = generator_from_config(&cfg, source.clone())
        .generate()
        .await
        .unwrap();

    assert_eq!(source.calls(), 1);
    assert_eq!(report.title, "Week 8 Report");
    assert_eq!(report.quotes_fetched, 6);

    let labels: Vec<_> = report.outcomes.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, vec!["A", "B", "C", "D"]);
    let edges: Vec<_> = report.outcomes.iter().map(|o| o.edge_pct).collect();
    assert_eq!(edges, vec![dec!(10.0), dec!(16.0), dec!(3.0), dec!(7.0)]);
    assert_eq!(report.positive_ev().count(), 4);

    let parlays = report.parlays.parlays();
    assert_eq!(parlays.len(), 2);
    assert_eq!(parlays[0].kind, ParlayKind::Capped);
    assert_eq!(parlays[0].name, "Safe 3-Leg");
    assert_eq!(parlays[0].legs, vec!["A", "B", "C"]);
    assert_eq!(parlays[0].rounded_probability(), dec!(0.312));
    assert_eq!(parlays[1].kind, ParlayKind::AllLegs);
    assert_eq!(parlays[1].legs, vec!["A", "B", "C", "D"]);
    assert_eq!(parlays[1].rounded_probability(), dec!(0.184));
}

#[tokio::test]
async fn test_source_failure_yields_nothing() {
    let cfg = AppConfig::parse(EXAMPLE_CONFIG).unwrap();
    let source = MockOddsSource::new();
    source.set_error("The Odds API error 401 Unauthorized: invalid key");

    let result = generator_from_config(&cfg, source.clone()).generate().await;
    assert_eq!(source.calls(), 1);

    let err = result.unwrap_err();
    match &err {
        AgentError::SourceUnavailable { source_name, message } => {
            assert_eq!(source_name, "mock-odds");
            assert!(message.contains("401"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(render::render_failure(&err).contains("Could not fetch odds data"));
}

#[tokio::test]
async fn test_empty_slate_is_failure() {
    let cfg = AppConfig::parse(EXAMPLE_CONFIG).unwrap();
    let result = generator_from_config(&cfg, MockOddsSource::with_events(Vec::new()))
        .generate()
        .await;
    assert!(matches!(result, Err(AgentError::SourceUnavailable { .. })));
}

#[tokio::test]
async fn test_mixed_picks_with_american_prices() {
    let cfg = AppConfig::parse(
        r#"
[[picks]]
label = "Bills ML"
expert_prob = 0.65
american_price = -150

[[picks]]
label = "Bears +3.5"
expert_prob = 0.48
american_price = -110

[[picks]]
label = "Lions -1.5"
expert_prob = 0.58
book_prob = 0.58
"#,
    )
    .unwrap();

    let report = generator_from_config(&cfg, MockOddsSource::new())
        .generate()
        .await
        .unwrap();

    // -150 → 0.60, -110 → 0.5238; the Lions tie carries no edge.
    let flags: Vec<_> = report.outcomes.iter().map(|o| o.positive_ev).collect();
    assert_eq!(flags, vec![true, false, false]);
    assert_eq!(report.outcomes[0].edge_pct, dec!(5.0));
    assert_eq!(
        report.parlays,
        ParlayOutcome::InsufficientLegs { available: 1, required: 2 }
    );

    let text = render::render_report(&report);
    assert!(text.contains("Not enough +EV legs"));
}

#[test]
fn test_default_picks_blocking() {
    let generator = ReportGenerator::new(
        Box::new(MockOddsSource::new()),
        Box::new(StaticProbabilities::default_picks()),
        EvCalculator::default(),
    );
    let report = tokio_test::block_on(generator.generate()).unwrap();

    assert_eq!(report.outcomes.len(), 4);
    let text = render::render_report(&report);
    assert!(text.contains("Kansas City Chiefs ML"));
    assert!(text.contains("### Safe 3-Leg"));
}
