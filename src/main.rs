use anyhow::Context;
use chrono::Utc;
use momentum_scout::config::Config;
use momentum_scout::services::{
    momentum_screen, risk_alerts, top_opportunities, AlertEngine, FixtureSource, SetupScanner,
    SocialScanner,
};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "momentum_scout=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();

    let fixture_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| config.fixture_path.clone())
        .context("usage: momentum-scout <fixture.json> (or set SCAN_FIXTURE)")?;

    let source = FixtureSource::load(&fixture_path)
        .with_context(|| format!("loading fixture {}", fixture_path.display()))?;
    let watchlist = source.watchlist();
    info!(
        "Loaded {} symbols from {}",
        watchlist.len(),
        fixture_path.display()
    );

    let snapshots = watchlist
        .iter()
        .filter_map(|symbol| source.market_snapshot(symbol).ok())
        .collect();
    let candidates: Vec<String> = momentum_screen(snapshots, &config.screen)
        .into_iter()
        .map(|s| s.symbol)
        .collect();

    let settings = config.scan_settings();
    let setup_scanner = SetupScanner::new(source.clone(), &settings);
    let social_scanner = SocialScanner::new(source.clone(), &settings);

    let setups = setup_scanner.scan(&watchlist).await;
    let signals = social_scanner.scan(&watchlist).await;

    let engine = AlertEngine::new(config.alert_thresholds());
    let now = Utc::now();
    let mut alerts = Vec::new();
    for signal in &signals.results {
        let (sentiment, market) = match (
            source.sentiment_snapshot(&signal.symbol),
            source.market_snapshot(&signal.symbol),
        ) {
            (Ok(sentiment), Ok(market)) => (sentiment, market),
            (Err(e), _) | (_, Err(e)) => {
                warn!("Skipping alerts for {}: {}", signal.symbol, e);
                continue;
            }
        };
        alerts.extend(engine.entry_alerts(signal, &sentiment, &market, now));
        alerts.extend(engine.exit_alerts(signal, &sentiment, &market, now));
    }
    for alert in &alerts {
        info!("\n{}", alert.message());
    }

    let min_confidence = config.opportunity_min_confidence;
    let opportunities = top_opportunities(&signals.results, min_confidence);
    let at_risk = risk_alerts(&signals.results, min_confidence);
    let report = serde_json::json!({
        "generated_at": now.to_rfc3339(),
        "momentum_candidates": candidates,
        "setups": setups,
        "signals": signals,
        "opportunities": opportunities,
        "risk_alerts": at_risk,
        "alerts": alerts,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
