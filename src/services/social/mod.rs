//! Social sentiment scoring.
//!
//! Posts are classified with a keyword list, aggregated into per-platform
//! statistics and scored into a [`Signal`] by the [`SignalScorer`].

pub mod keywords;
pub mod scorer;

pub use keywords::{classify_text, TextSentiment};
pub use scorer::{label_for, SignalScorer};

use crate::types::{Signal, SignalLabel};

/// BUY and STRONG_BUY signals at or above `min_confidence`, order preserved.
pub fn top_opportunities(signals: &[Signal], min_confidence: u8) -> Vec<Signal> {
    signals
        .iter()
        .filter(|s| matches!(s.label, SignalLabel::StrongBuy | SignalLabel::Buy))
        .filter(|s| s.confidence >= min_confidence)
        .cloned()
        .collect()
}

/// Any sell-side signal at or above `min_confidence`, order preserved.
pub fn risk_alerts(signals: &[Signal], min_confidence: u8) -> Vec<Signal> {
    signals
        .iter()
        .filter(|s| s.label.is_bearish() && s.confidence >= min_confidence)
        .cloned()
        .collect()
}
