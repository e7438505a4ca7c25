//! Sentiment/attention scoring into a directional signal.

use tracing::debug;

use crate::services::scoring::{first_tier, Tier};
use crate::types::{Platform, SentimentSnapshot, Signal, SignalLabel, MAX_SIGNAL_CONFIDENCE};

/// Sentiment strength tiers, checked against the absolute score.
pub const SENTIMENT_TIERS: [Tier; 3] = [
    Tier {
        threshold: 0.5,
        points: 35,
        label: "Very strong",
    },
    Tier {
        threshold: 0.3,
        points: 25,
        label: "Strong",
    },
    Tier {
        threshold: 0.15,
        points: 15,
        label: "Moderate",
    },
];

/// Attention tiers on total mentions.
pub const MENTION_TIERS: [Tier; 5] = [
    Tier {
        threshold: 500.0,
        points: 30,
        label: "Viral",
    },
    Tier {
        threshold: 200.0,
        points: 20,
        label: "Very high attention",
    },
    Tier {
        threshold: 100.0,
        points: 15,
        label: "High attention",
    },
    Tier {
        threshold: 50.0,
        points: 10,
        label: "Moderate attention",
    },
    Tier {
        threshold: 20.0,
        points: 5,
        label: "Some attention",
    },
];

pub const REDDIT_PRESENCE_MENTIONS: u64 = 50;
pub const REDDIT_PRESENCE_POINTS: u32 = 5;
pub const STOCKTWITS_MIN_MESSAGES: u64 = 30;
pub const STOCKTWITS_BULLISH_POINTS: u32 = 5;

/// Scores sentiment snapshots. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalScorer;

impl SignalScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, snapshot: &SentimentSnapshot) -> Signal {
        let sentiment = snapshot.sentiment_score;
        let mentions = snapshot.total_mentions;
        let mut points: u32 = 0;
        let mut reasoning = Vec::new();

        let direction = if sentiment >= 0.0 {
            "positive"
        } else {
            "negative"
        };
        if let Some(tier) = first_tier(&SENTIMENT_TIERS, sentiment.abs()) {
            points += tier.points;
            reasoning.push(format!("{} {} sentiment ({:.2})", tier.label, direction, sentiment));
        }

        match first_tier(&MENTION_TIERS, mentions as f64) {
            Some(tier) => {
                points += tier.points;
                reasoning.push(format!("{}: {} mentions", tier.label, mentions));
            }
            None => reasoning.push(format!("Low attention: {} mentions", mentions)),
        }

        if let Some(reddit) = snapshot.platform(Platform::Reddit) {
            if reddit.mentions > REDDIT_PRESENCE_MENTIONS {
                points += REDDIT_PRESENCE_POINTS;
                reasoning.push(format!("Strong Reddit presence: {} posts", reddit.mentions));
            }
        }

        if let Some(twits) = snapshot.platform(Platform::StockTwits) {
            if twits.total_messages >= STOCKTWITS_MIN_MESSAGES
                && twits.bullish_count > twits.bearish_count.saturating_mul(2)
            {
                points += STOCKTWITS_BULLISH_POINTS;
                reasoning.push(format!(
                    "StockTwits very bullish: {} vs {}",
                    twits.bullish_count, twits.bearish_count
                ));
            }
        }

        let label = label_for(sentiment, mentions);
        let confidence = points.min(MAX_SIGNAL_CONFIDENCE as u32) as u8;
        debug!(
            "{}: {} confidence={} sentiment={:.2} mentions={}",
            snapshot.symbol, label, confidence, sentiment, mentions
        );

        Signal {
            symbol: snapshot.symbol.clone(),
            label,
            confidence,
            reasoning,
        }
    }
}

/// Directional label from the raw score and mention count.
pub fn label_for(sentiment: f64, mentions: u64) -> SignalLabel {
    if sentiment > 0.4 && mentions > 100 {
        SignalLabel::StrongBuy
    } else if sentiment > 0.3 && mentions > 50 {
        SignalLabel::Buy
    } else if sentiment > 0.15 {
        SignalLabel::WeakBuy
    } else if sentiment < -0.4 && mentions > 100 {
        SignalLabel::StrongSell
    } else if sentiment < -0.3 && mentions > 50 {
        SignalLabel::Sell
    } else if sentiment < -0.15 {
        SignalLabel::WeakSell
    } else {
        SignalLabel::Neutral
    }
}
