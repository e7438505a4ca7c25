//! Social signal scoring tests

use momentum_scout::services::social::{risk_alerts, top_opportunities, SignalScorer};
use momentum_scout::types::{
    OverallSentiment, Platform, PlatformStats, SentimentSnapshot, SignalLabel,
    MAX_SIGNAL_CONFIDENCE,
};
use std::collections::BTreeMap;

fn snapshot(symbol: &str, score: f64, mentions: u64) -> SentimentSnapshot {
    SentimentSnapshot {
        symbol: symbol.to_string(),
        sentiment_score: score,
        total_mentions: mentions,
        platforms: BTreeMap::new(),
    }
}

#[test]
fn test_label_and_confidence_from_tiers() {
    let signal = SignalScorer::new().score(&snapshot("AMD", 0.45, 150));
    assert_eq!(signal.symbol, "AMD");
    assert_eq!(signal.label, SignalLabel::StrongBuy);
    // strong sentiment tier + high attention tier
    assert_eq!(signal.confidence, 25 + 15);
}

#[test]
fn test_empty_snapshot_is_neutral() {
    let signal = SignalScorer::new().score(&snapshot("QUIET", 0.0, 0));
    assert_eq!(signal.label, SignalLabel::Neutral);
    assert_eq!(signal.confidence, 0);

    let low_attention: Vec<&String> = signal
        .reasoning
        .iter()
        .filter(|r| r.starts_with("Low attention"))
        .collect();
    assert_eq!(low_attention.len(), 1);
}

#[test]
fn test_confidence_is_bounded() {
    let scorer = SignalScorer::new();
    let mut platforms = BTreeMap::new();
    platforms.insert(
        Platform::Reddit,
        PlatformStats {
            mentions: 5_000,
            sentiment_score: -0.9,
            ..Default::default()
        },
    );
    platforms.insert(
        Platform::StockTwits,
        PlatformStats::from_tagged(300, 10, 400),
    );

    for score in [-1.0, -0.45, -0.2, 0.0, 0.2, 0.45, 1.0] {
        let mut snap = SentimentSnapshot::from_platforms("MEME", platforms.clone());
        snap.sentiment_score = score;
        let signal = scorer.score(&snap);
        assert!(signal.confidence <= MAX_SIGNAL_CONFIDENCE);
    }
}

#[test]
fn test_bearish_ladder() {
    let scorer = SignalScorer::new();
    let cases = [
        (-0.6, 300, SignalLabel::StrongSell),
        (-0.35, 80, SignalLabel::Sell),
        (-0.35, 40, SignalLabel::WeakSell),
        (-0.1, 900, SignalLabel::Neutral),
    ];
    for (score, mentions, label) in cases {
        assert_eq!(scorer.score(&snapshot("X", score, mentions)).label, label);
    }
}

#[test]
fn test_snapshot_from_posts() {
    let reddit = PlatformStats::from_texts(&[
        "loading calls before earnings",
        "this is going to the moon",
        "bag holder here, total loss",
        "anyone watching?",
    ]);
    assert_eq!(reddit.mentions, 4);
    assert_eq!(reddit.bullish_count, 2);
    assert_eq!(reddit.bearish_count, 1);

    let mut platforms = BTreeMap::new();
    platforms.insert(Platform::Reddit, reddit);
    platforms.insert(Platform::StockTwits, PlatformStats::from_tagged(9, 1, 12));
    let snap = SentimentSnapshot::from_platforms("SOFI", platforms);

    assert_eq!(snap.total_mentions, 16);
    // mean of 0.25 and 0.8
    assert!((snap.sentiment_score - 0.525).abs() < 1e-9);
    assert_eq!(snap.overall(), OverallSentiment::Bullish);
}

#[test]
fn test_watchlist_filters() {
    let scorer = SignalScorer::new();
    let snapshots = [
        snapshot("HOT", 0.7, 600),
        snapshot("WARM", 0.2, 30),
        snapshot("COLD", -0.7, 600),
    ];
    let signals: Vec<_> = snapshots.iter().map(|s| scorer.score(s)).collect();

    let picks = top_opportunities(&signals, 60);
    assert_eq!(picks.len(), 1);
    assert_eq!(picks[0].symbol, "HOT");

    let risks = risk_alerts(&signals, 60);
    assert_eq!(risks.len(), 1);
    assert_eq!(risks[0].symbol, "COLD");
}
