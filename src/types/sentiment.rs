use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::services::social::{classify_text, TextSentiment};

/// Social platforms that contribute mention statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Reddit,
    StockTwits,
    Twitter,
    YouTube,
}

impl Platform {
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Reddit => "Reddit",
            Platform::StockTwits => "StockTwits",
            Platform::Twitter => "Twitter",
            Platform::YouTube => "YouTube",
        }
    }
}

/// Mention statistics for one platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformStats {
    pub mentions: u64,
    /// Normalized score in -1.0..=1.0.
    pub sentiment_score: f64,
    pub bullish_count: u64,
    pub bearish_count: u64,
    /// Raw message count (StockTwits).
    pub total_messages: u64,
}

impl PlatformStats {
    /// Score free-text posts with the keyword classifier.
    ///
    /// Each bullish post counts +1 and each bearish post -1; the score is
    /// the sum divided by the number of posts.
    pub fn from_texts<S: AsRef<str>>(texts: &[S]) -> Self {
        let mut bullish = 0u64;
        let mut bearish = 0u64;
        for text in texts {
            match classify_text(text.as_ref()) {
                TextSentiment::Bullish => bullish += 1,
                TextSentiment::Bearish => bearish += 1,
                TextSentiment::Neutral => {}
            }
        }

        let mentions = texts.len() as u64;
        let sentiment_score = if mentions > 0 {
            (bullish as f64 - bearish as f64) / mentions as f64
        } else {
            0.0
        };

        Self {
            mentions,
            sentiment_score,
            bullish_count: bullish,
            bearish_count: bearish,
            total_messages: mentions,
        }
    }

    /// Stats from messages already tagged bullish/bearish by their authors.
    ///
    /// Score is (bullish - bearish) over the tagged messages only.
    pub fn from_tagged(bullish: u64, bearish: u64, total_messages: u64) -> Self {
        let tagged = bullish as f64 + bearish as f64;
        let sentiment_score = if tagged > 0.0 {
            (bullish as f64 - bearish as f64) / tagged
        } else {
            0.0
        };

        Self {
            mentions: total_messages,
            sentiment_score,
            bullish_count: bullish,
            bearish_count: bearish,
            total_messages,
        }
    }
}

/// Coarse sentiment label for a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallSentiment {
    Bullish,
    Neutral,
    Bearish,
}

/// Current sentiment/attention state for one symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentSnapshot {
    pub symbol: String,
    /// Simple average of per-platform scores.
    pub sentiment_score: f64,
    pub total_mentions: u64,
    pub platforms: BTreeMap<Platform, PlatformStats>,
}

impl SentimentSnapshot {
    /// Aggregate per-platform stats into a snapshot.
    pub fn from_platforms(symbol: &str, platforms: BTreeMap<Platform, PlatformStats>) -> Self {
        let total_mentions = platforms
            .values()
            .fold(0u64, |total, p| total.saturating_add(p.mentions));
        let sentiment_score = if platforms.is_empty() {
            0.0
        } else {
            platforms.values().map(|p| p.sentiment_score).sum::<f64>() / platforms.len() as f64
        };

        Self {
            symbol: symbol.to_string(),
            sentiment_score,
            total_mentions,
            platforms,
        }
    }

    pub fn platform(&self, platform: Platform) -> Option<&PlatformStats> {
        self.platforms.get(&platform)
    }

    pub fn overall(&self) -> OverallSentiment {
        if self.sentiment_score > 0.3 {
            OverallSentiment::Bullish
        } else if self.sentiment_score < -0.3 {
            OverallSentiment::Bearish
        } else {
            OverallSentiment::Neutral
        }
    }
}
