//! File-backed market and sentiment provider.
//!
//! Lets the scanner run offline against a JSON watchlist:
//!
//! ```json
//! {
//!   "symbols": {
//!     "AAPL": {
//!       "bars": [{"open": 190.0, "high": 191.2, "low": 189.5, "close": 190.8, "volume": 120000}],
//!       "previous_close": 185.0,
//!       "history": [{"open": 180.0, "high": 182.0, "low": 179.0, "close": 181.0}],
//!       "posts": {"reddit": ["buying calls"], "twitter": ["this will dump"]},
//!       "stocktwits": {"bullish": 40, "bearish": 10, "total": 60}
//!     }
//!   }
//! }
//! ```
//!
//! A symbol may instead give a full `snapshot` and/or `sentiment`, or an
//! `error` to simulate a failing provider.

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::error::{AppError, Result};
use crate::services::scanner::{MarketDataSource, SentimentSource, SourceFuture};
use crate::types::{
    HistoricalSeries, MarketSnapshot, OhlcvBar, Platform, PlatformStats, SentimentSnapshot,
};

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct TaggedCounts {
    pub bullish: u64,
    pub bearish: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FixtureEntry {
    pub snapshot: Option<MarketSnapshot>,
    /// Intraday bars, used when no snapshot is given.
    pub bars: Vec<OhlcvBar>,
    pub previous_close: f64,
    pub history: Option<HistoricalSeries>,
    pub sentiment: Option<SentimentSnapshot>,
    /// Raw posts per platform, classified by keyword.
    pub posts: BTreeMap<Platform, Vec<String>>,
    /// Author-tagged StockTwits counts.
    pub stocktwits: Option<TaggedCounts>,
    /// Makes every call for this symbol fail with this message.
    pub error: Option<String>,
}

impl FixtureEntry {
    fn market_snapshot(&self, symbol: &str) -> MarketSnapshot {
        match &self.snapshot {
            Some(snapshot) => {
                let mut snapshot = snapshot.clone();
                if snapshot.symbol.is_empty() {
                    snapshot.symbol = symbol.to_string();
                }
                snapshot
            }
            None => MarketSnapshot::from_bars(symbol, &self.bars, self.previous_close),
        }
    }

    fn sentiment_snapshot(&self, symbol: &str) -> SentimentSnapshot {
        if let Some(sentiment) = &self.sentiment {
            let mut sentiment = sentiment.clone();
            if sentiment.symbol.is_empty() {
                sentiment.symbol = symbol.to_string();
            }
            return sentiment;
        }

        let mut platforms: BTreeMap<Platform, PlatformStats> = self
            .posts
            .iter()
            .map(|(platform, posts)| (*platform, PlatformStats::from_texts(posts.as_slice())))
            .collect();
        if let Some(counts) = self.stocktwits {
            platforms.insert(
                Platform::StockTwits,
                PlatformStats::from_tagged(counts.bullish, counts.bearish, counts.total),
            );
        }
        SentimentSnapshot::from_platforms(symbol, platforms)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixtureSource {
    symbols: HashMap<String, FixtureEntry>,
}

impl FixtureSource {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Symbols in the fixture, sorted.
    pub fn watchlist(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.symbols.keys().cloned().collect();
        symbols.sort();
        symbols
    }

    fn entry(&self, symbol: &str) -> Result<&FixtureEntry> {
        let entry = self
            .symbols
            .get(symbol)
            .ok_or_else(|| AppError::NotFound(format!("symbol {}", symbol)))?;
        match &entry.error {
            Some(message) => Err(AppError::collaborator(symbol, message.clone())),
            None => Ok(entry),
        }
    }

    pub fn market_snapshot(&self, symbol: &str) -> Result<MarketSnapshot> {
        Ok(self.entry(symbol)?.market_snapshot(symbol))
    }

    pub fn sentiment_snapshot(&self, symbol: &str) -> Result<SentimentSnapshot> {
        Ok(self.entry(symbol)?.sentiment_snapshot(symbol))
    }
}

impl MarketDataSource for FixtureSource {
    fn snapshot<'a>(&'a self, symbol: &'a str) -> SourceFuture<'a, MarketSnapshot> {
        Box::pin(async move { self.market_snapshot(symbol) })
    }

    fn history<'a>(&'a self, symbol: &'a str) -> SourceFuture<'a, Option<HistoricalSeries>> {
        Box::pin(async move { Ok(self.entry(symbol)?.history.clone()) })
    }
}

impl SentimentSource for FixtureSource {
    fn sentiment<'a>(&'a self, symbol: &'a str) -> SourceFuture<'a, SentimentSnapshot> {
        Box::pin(async move { self.sentiment_snapshot(symbol) })
    }
}
