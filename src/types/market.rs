use serde::{Deserialize, Serialize};

use crate::services::indicators;

/// One OHLCV bar (daily or intraday).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcvBar {
    /// Bar open time, unix milliseconds.
    #[serde(default)]
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
}

/// Ordered bars for one symbol, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoricalSeries {
    bars: Vec<OhlcvBar>,
}

impl HistoricalSeries {
    pub fn new(bars: Vec<OhlcvBar>) -> Self {
        Self { bars }
    }

    pub fn bars(&self) -> &[OhlcvBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Closing prices in bar order.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Highest high across the whole series.
    pub fn highest_high(&self) -> Option<f64> {
        self.bars.iter().map(|b| b.high).reduce(f64::max)
    }
}

impl From<Vec<OhlcvBar>> for HistoricalSeries {
    fn from(bars: Vec<OhlcvBar>) -> Self {
        Self::new(bars)
    }
}

/// Current market state for one symbol.
///
/// Missing numeric fields deserialize to `0.0` so that they simply fail
/// their threshold checks. `day_high` and `day_low` stay optional because
/// several setups fall back to a price multiple when they are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketSnapshot {
    pub symbol: String,
    pub current_price: f64,
    pub previous_close: f64,
    pub change_percent: f64,
    pub gap_percent: f64,
    pub volume: f64,
    pub avg_volume: f64,
    /// Relative volume: volume / avg_volume.
    pub rvol: f64,
    pub day_high: Option<f64>,
    pub day_low: Option<f64>,
    pub vwap: f64,
    pub ema_9: f64,
    pub ema_20: f64,
    pub data_available: bool,
}

impl MarketSnapshot {
    /// Snapshot returned when a provider has no data for the symbol.
    pub fn unavailable(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            data_available: false,
            ..Default::default()
        }
    }

    /// Derive a snapshot from the session's intraday bars.
    ///
    /// Returns [`MarketSnapshot::unavailable`] for an empty bar list or a
    /// non-positive previous close.
    pub fn from_bars(symbol: &str, bars: &[OhlcvBar], previous_close: f64) -> Self {
        let (first, last) = match (bars.first(), bars.last()) {
            (Some(first), Some(last)) if previous_close > 0.0 => (first, last),
            _ => return Self::unavailable(symbol),
        };

        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let current_price = last.close;
        let avg_volume = bars.iter().map(|b| b.volume).sum::<f64>() / bars.len() as f64;
        let rvol = if avg_volume > 0.0 {
            last.volume / avg_volume
        } else {
            0.0
        };

        Self {
            symbol: symbol.to_string(),
            current_price: round2(current_price),
            previous_close: round2(previous_close),
            change_percent: round2((current_price - previous_close) / previous_close * 100.0),
            gap_percent: round2((first.open - previous_close) / previous_close * 100.0),
            volume: last.volume,
            avg_volume: avg_volume.trunc(),
            rvol: round2(rvol),
            day_high: Some(round2(last.high)),
            day_low: Some(round2(last.low)),
            vwap: indicators::vwap(bars).map(round2).unwrap_or(0.0),
            ema_9: indicators::ema(&closes, 9).map(round2).unwrap_or(0.0),
            ema_20: indicators::ema(&closes, 20).map(round2).unwrap_or(0.0),
            data_available: true,
        }
    }

    /// Day low when known and positive.
    pub fn known_day_low(&self) -> Option<f64> {
        self.day_low.filter(|v| *v > 0.0)
    }

    /// Day high when known and positive.
    pub fn known_day_high(&self) -> Option<f64> {
        self.day_high.filter(|v| *v > 0.0)
    }

    /// Volume relative to its average, 0 when the average is unknown.
    pub fn volume_ratio(&self) -> f64 {
        if self.avg_volume > 0.0 {
            self.volume / self.avg_volume
        } else {
            0.0
        }
    }
}

/// Round to two decimal places (cents for prices).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
