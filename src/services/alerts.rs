//! Watchlist and position alerts derived from scored signals.
//!
//! The engine only decides which alerts to raise; delivery is left to the
//! caller. Alerts of the same kind for the same symbol are suppressed for a
//! cooldown window after one is emitted.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use tracing::{debug, info};

use crate::types::{
    Alert, AlertDetail, AlertKind, MarketSnapshot, SentimentSnapshot, Signal, SignalLabel,
};

/// Reasons carried by signal alerts.
pub const MAX_ALERT_REASONS: usize = 3;
pub const SHIFT_FROM_SENTIMENT: f64 = 0.3;

#[derive(Debug, Clone)]
pub struct AlertThresholds {
    pub buy_confidence: u8,
    pub sell_confidence: u8,
    pub price_change_percent: f64,
    pub volume_spike: f64,
    pub cooldown: Duration,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            buy_confidence: 75,
            sell_confidence: 70,
            price_change_percent: 3.0,
            volume_spike: 2.0,
            cooldown: Duration::minutes(30),
        }
    }
}

pub struct AlertEngine {
    thresholds: AlertThresholds,
    last_sent: DashMap<(String, AlertKind), DateTime<Utc>>,
    previous_sentiment: DashMap<String, f64>,
}

impl AlertEngine {
    pub fn new(thresholds: AlertThresholds) -> Self {
        Self {
            thresholds,
            last_sent: DashMap::new(),
            previous_sentiment: DashMap::new(),
        }
    }

    pub fn thresholds(&self) -> &AlertThresholds {
        &self.thresholds
    }

    /// Buy opportunities and volume breakouts for a watchlist symbol.
    pub fn entry_alerts(
        &self,
        signal: &Signal,
        sentiment: &SentimentSnapshot,
        market: &MarketSnapshot,
        now: DateTime<Utc>,
    ) -> Vec<Alert> {
        let mut alerts = Vec::new();

        let buy = matches!(signal.label, SignalLabel::StrongBuy | SignalLabel::Buy);
        if buy && signal.confidence >= self.thresholds.buy_confidence {
            let detail = signal_detail(signal, sentiment, market);
            alerts.extend(self.emit(AlertKind::EntrySignal, &signal.symbol, detail, now));
        }

        if market.data_available {
            let volume_ratio = market.volume_ratio();
            if market.change_percent.abs() >= self.thresholds.price_change_percent
                && volume_ratio >= self.thresholds.volume_spike
            {
                let detail = AlertDetail::Breakout {
                    price: market.current_price,
                    change_percent: market.change_percent,
                    volume_ratio,
                };
                alerts.extend(self.emit(AlertKind::Breakout, &signal.symbol, detail, now));
            }
        }

        alerts
    }

    /// Sell warnings and sentiment reversals for a held position.
    ///
    /// Records the current sentiment as the baseline for the next call.
    pub fn exit_alerts(
        &self,
        signal: &Signal,
        sentiment: &SentimentSnapshot,
        market: &MarketSnapshot,
        now: DateTime<Utc>,
    ) -> Vec<Alert> {
        let mut alerts = Vec::new();

        let sell = matches!(signal.label, SignalLabel::StrongSell | SignalLabel::Sell);
        if sell && signal.confidence >= self.thresholds.sell_confidence {
            let detail = signal_detail(signal, sentiment, market);
            alerts.extend(self.emit(AlertKind::ExitSignal, &signal.symbol, detail, now));
        }

        let current = sentiment.sentiment_score;
        let previous = self
            .previous_sentiment
            .insert(signal.symbol.clone(), current)
            .unwrap_or(0.0);
        if previous > SHIFT_FROM_SENTIMENT && current < 0.0 {
            let detail = AlertDetail::SentimentShift { previous, current };
            alerts.extend(self.emit(AlertKind::SentimentShift, &signal.symbol, detail, now));
        }

        alerts
    }

    /// Build the alert unless one of the same kind went out within the cooldown.
    fn emit(
        &self,
        kind: AlertKind,
        symbol: &str,
        detail: AlertDetail,
        now: DateTime<Utc>,
    ) -> Option<Alert> {
        let key = (symbol.to_string(), kind);
        if let Some(last) = self.last_sent.get(&key) {
            if now - *last < self.thresholds.cooldown {
                debug!("Skipping duplicate {:?} alert for {}", kind, symbol);
                return None;
            }
        }

        self.last_sent.insert(key, now);
        info!("{} alert for {}", kind.title(), symbol);
        Some(Alert::new(kind, symbol, detail, now.timestamp_millis()))
    }
}

impl Default for AlertEngine {
    fn default() -> Self {
        Self::new(AlertThresholds::default())
    }
}

fn signal_detail(
    signal: &Signal,
    sentiment: &SentimentSnapshot,
    market: &MarketSnapshot,
) -> AlertDetail {
    AlertDetail::Signal {
        label: signal.label,
        confidence: signal.confidence,
        price: market.current_price,
        sentiment: sentiment.sentiment_score,
        mentions: sentiment.total_mentions,
        reasoning: signal
            .reasoning
            .iter()
            .take(MAX_ALERT_REASONS)
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 8, 14, minute, 0).unwrap()
    }

    fn signal(label: SignalLabel, confidence: u8) -> Signal {
        Signal {
            symbol: "PLTR".to_string(),
            label,
            confidence,
            reasoning: vec![
                "one".to_string(),
                "two".to_string(),
                "three".to_string(),
                "four".to_string(),
            ],
        }
    }

    fn sentiment(score: f64) -> SentimentSnapshot {
        SentimentSnapshot {
            symbol: "PLTR".to_string(),
            sentiment_score: score,
            total_mentions: 320,
            ..Default::default()
        }
    }

    fn quiet_market() -> MarketSnapshot {
        MarketSnapshot {
            symbol: "PLTR".to_string(),
            current_price: 24.1,
            change_percent: 0.5,
            volume: 1_000_000.0,
            avg_volume: 1_000_000.0,
            data_available: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_entry_signal_needs_confidence() {
        let engine = AlertEngine::default();
        let alerts = engine.entry_alerts(
            &signal(SignalLabel::Buy, 74),
            &sentiment(0.35),
            &quiet_market(),
            at(0),
        );
        assert!(alerts.is_empty());

        let alerts = engine.entry_alerts(
            &signal(SignalLabel::StrongBuy, 75),
            &sentiment(0.45),
            &quiet_market(),
            at(0),
        );
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::EntrySignal);
        match &alerts[0].detail {
            AlertDetail::Signal { reasoning, mentions, .. } => {
                assert_eq!(reasoning.len(), 3);
                assert_eq!(*mentions, 320);
            }
            other => panic!("unexpected detail {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_suppressed_within_cooldown() {
        let engine = AlertEngine::default();
        let buy = signal(SignalLabel::Buy, 80);
        let sent = sentiment(0.35);
        let market = quiet_market();

        assert_eq!(engine.entry_alerts(&buy, &sent, &market, at(0)).len(), 1);
        assert!(engine.entry_alerts(&buy, &sent, &market, at(29)).is_empty());
        assert_eq!(engine.entry_alerts(&buy, &sent, &market, at(30)).len(), 1);
    }

    #[test]
    fn test_breakout_on_volume_spike() {
        let engine = AlertEngine::default();
        let mut market = quiet_market();
        market.change_percent = -3.2;
        market.volume = 2_500_000.0;

        let alerts = engine.entry_alerts(
            &signal(SignalLabel::Neutral, 10),
            &sentiment(0.0),
            &market,
            at(0),
        );
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::Breakout);
        assert!(alerts[0].message().contains("Direction: DOWN"));

        market.data_available = false;
        let alerts = engine.entry_alerts(
            &signal(SignalLabel::Neutral, 10),
            &sentiment(0.0),
            &market,
            at(45),
        );
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_exit_signal_and_sentiment_shift() {
        let engine = AlertEngine::default();
        let market = quiet_market();

        // first sighting only records the baseline
        let alerts = engine.exit_alerts(
            &signal(SignalLabel::Neutral, 20),
            &sentiment(0.42),
            &market,
            at(0),
        );
        assert!(alerts.is_empty());

        let alerts = engine.exit_alerts(
            &signal(SignalLabel::Sell, 70),
            &sentiment(-0.1),
            &market,
            at(5),
        );
        let kinds: Vec<AlertKind> = alerts.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![AlertKind::ExitSignal, AlertKind::SentimentShift]
        );

        // baseline is now negative, no second shift
        let alerts = engine.exit_alerts(
            &signal(SignalLabel::Neutral, 20),
            &sentiment(-0.3),
            &market,
            at(50),
        );
        assert!(alerts.is_empty());
    }
}
