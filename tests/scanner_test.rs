//! Watchlist scanning tests against an in-memory fixture

use momentum_scout::error::{AppError, Result};
use momentum_scout::services::scanner::{
    MarketDataSource, ScanSettings, SentimentSource, SetupScanner, SocialScanner, SourceFuture,
};
use momentum_scout::services::{AlertEngine, FixtureSource};
use momentum_scout::types::{
    AlertKind, HistoricalSeries, MarketSnapshot, SentimentSnapshot, SetupType, SignalLabel,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

const WATCHLIST: &str = r#"{
    "symbols": {
        "GAPR": {
            "snapshot": {
                "current_price": 12.4, "previous_close": 11.5, "change_percent": 7.8,
                "gap_percent": 6.1, "volume": 4000000, "avg_volume": 1000000, "rvol": 4.0,
                "day_high": 12.6, "day_low": 11.9, "vwap": 12.1, "ema_9": 12.0, "ema_20": 11.6,
                "data_available": true
            },
            "sentiment": {"sentiment_score": 0.62, "total_mentions": 640}
        },
        "DOWN": {"error": "provider timeout"},
        "SLOW": {
            "snapshot": {
                "current_price": 40.3, "vwap": 39.6, "ema_9": 40.0, "ema_20": 38.8,
                "rvol": 1.8, "data_available": true
            },
            "sentiment": {"sentiment_score": 0.2, "total_mentions": 60}
        },
        "DARK": {
            "snapshot": {"data_available": false},
            "sentiment": {"sentiment_score": -0.55, "total_mentions": 220}
        }
    }
}"#;

fn fast_settings() -> ScanSettings {
    ScanSettings {
        request_delay: Duration::ZERO,
        ..Default::default()
    }
}

fn symbols(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Counts collaborator calls. The counter is shared so it can be read after
/// the source moves into a scanner.
struct CountingSource {
    inner: FixtureSource,
    calls: Arc<AtomicUsize>,
}

impl MarketDataSource for CountingSource {
    fn snapshot<'a>(&'a self, symbol: &'a str) -> SourceFuture<'a, MarketSnapshot> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.snapshot(symbol)
    }

    fn history<'a>(&'a self, symbol: &'a str) -> SourceFuture<'a, Option<HistoricalSeries>> {
        self.inner.history(symbol)
    }
}

impl SentimentSource for CountingSource {
    fn sentiment<'a>(&'a self, symbol: &'a str) -> SourceFuture<'a, SentimentSnapshot> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.sentiment(symbol)
    }
}

fn counting() -> CountingSource {
    CountingSource {
        inner: FixtureSource::from_json(WATCHLIST).unwrap(),
        calls: Arc::new(AtomicUsize::new(0)),
    }
}

#[test]
fn test_setup_scan_skips_failing_symbol() {
    let scanner = SetupScanner::new(counting(), &fast_settings());
    let report = tokio_test::block_on(scanner.scan(&symbols(&["SLOW", "DOWN", "GAPR", "DARK"])));

    let order: Vec<&str> = report.results.iter().map(|r| r.symbol.as_str()).collect();
    // GAPR high, SLOW high, DARK none; equal ranks keep watchlist order
    assert_eq!(order, vec!["SLOW", "GAPR", "DARK"]);
    assert_eq!(report.results[1].setup_type, SetupType::GapAndGo);
    assert_eq!(report.results[0].setup_type, SetupType::MicroPullback);
    assert_eq!(report.results[2].setup_type, SetupType::None);

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].symbol, "DOWN");
}

#[test]
fn test_social_scan_sorted_by_confidence() {
    let scanner = SocialScanner::new(counting(), &fast_settings());
    let report = tokio_test::block_on(scanner.scan(&symbols(&["SLOW", "DOWN", "DARK", "GAPR"])));

    let ranked: Vec<(&str, u8)> = report
        .results
        .iter()
        .map(|s| (s.symbol.as_str(), s.confidence))
        .collect();
    assert_eq!(ranked, vec![("GAPR", 65), ("DARK", 55), ("SLOW", 25)]);
    assert_eq!(report.results[1].label, SignalLabel::StrongSell);
    assert_eq!(report.failures[0].symbol, "DOWN");
}

#[test]
fn test_repeat_scan_uses_cache() {
    let source = counting();
    let calls = Arc::clone(&source.calls);
    let scanner = SocialScanner::new(source, &fast_settings());
    let watchlist = symbols(&["GAPR", "SLOW"]);

    let first = tokio_test::block_on(scanner.scan(&watchlist));
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    let second = tokio_test::block_on(scanner.scan(&watchlist));
    assert_eq!(first.results, second.results);
    assert_eq!(second.cache_hits, 2);
    // the collaborator was not asked again
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_failures_are_not_cached() {
    let source = counting();
    let calls = Arc::clone(&source.calls);
    let scanner = SetupScanner::new(source, &fast_settings());
    let watchlist = symbols(&["DOWN", "GAPR"]);

    for round in 1..=2 {
        let report = tokio_test::block_on(scanner.scan(&watchlist));
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].symbol, "DOWN");
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.cache_hits, round - 1);
    }
    // DOWN is retried on every scan, GAPR is fetched once
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn test_scan_waits_between_requests() {
    let settings = ScanSettings {
        request_delay: Duration::from_secs(3),
        cache_enabled: false,
        ..Default::default()
    };
    let scanner = SocialScanner::new(counting(), &settings);

    let started = tokio::time::Instant::now();
    let report = scanner.scan(&symbols(&["GAPR", "SLOW", "DARK"])).await;

    assert_eq!(report.results.len(), 3);
    // two gaps of three seconds between three calls
    assert!(started.elapsed() >= Duration::from_secs(6));
}

#[test]
fn test_top_opportunities_and_risk_alerts() {
    let scanner = SocialScanner::new(counting(), &fast_settings());
    let watchlist = symbols(&["GAPR", "SLOW", "DARK"]);

    let picks = tokio_test::block_on(scanner.top_opportunities(&watchlist, 60));
    assert_eq!(picks.len(), 1);
    assert_eq!(picks[0].symbol, "GAPR");

    let risks = tokio_test::block_on(scanner.risk_alerts(&watchlist, 50));
    assert_eq!(risks.len(), 1);
    assert_eq!(risks[0].symbol, "DARK");
}

#[test]
fn test_alerts_from_scan_results() {
    let source = FixtureSource::from_json(WATCHLIST).unwrap();
    let scanner = SocialScanner::new(source.clone(), &fast_settings());
    let report = tokio_test::block_on(scanner.scan(&symbols(&["GAPR"])));

    let engine = AlertEngine::default();
    let signal = &report.results[0];
    let sentiment = source.sentiment_snapshot("GAPR").unwrap();
    let market = source.market_snapshot("GAPR").unwrap();
    let now = chrono::Utc::now();

    let kinds: Vec<AlertKind> = engine
        .entry_alerts(signal, &sentiment, &market, now)
        .iter()
        .map(|a| a.kind)
        .collect();
    // confidence 65 is below the buy threshold; the price move is a breakout
    assert_eq!(kinds, vec![AlertKind::Breakout]);
}

#[test]
fn test_unknown_symbol_is_a_failure() -> Result<()> {
    let source = FixtureSource::from_json(WATCHLIST)?;
    match source.market_snapshot("NOPE") {
        Err(AppError::NotFound(message)) => assert!(message.contains("NOPE")),
        other => panic!("expected not found, got {:?}", other),
    }
    Ok(())
}
