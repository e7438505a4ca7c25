//! Moving-average and VWAP helpers used to build market snapshots.

use crate::types::OhlcvBar;

/// Exponential moving average of the final value in `values`.
///
/// Seeded with the SMA of the first `period` values, then smoothed with
/// multiplier `2 / (period + 1)`. Returns None with fewer than `period` values.
pub fn ema(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }

    let multiplier = 2.0 / (period as f64 + 1.0);

    // First EMA is SMA
    let sma: f64 = values.iter().take(period).sum::<f64>() / period as f64;

    let mut ema = sma;
    for value in values.iter().skip(period) {
        ema = (value - ema) * multiplier + ema;
    }

    Some(ema)
}

/// Typical price of a bar.
fn typical_price(bar: &OhlcvBar) -> f64 {
    (bar.high + bar.low + bar.close) / 3.0
}

/// Session VWAP: cumulative(typical price * volume) / cumulative(volume).
///
/// Falls back to the last close when no volume traded.
pub fn vwap(bars: &[OhlcvBar]) -> Option<f64> {
    let last = bars.last()?;

    let (cum_tp_vol, cum_vol) = bars.iter().fold((0.0, 0.0), |(tp_vol, vol), bar| {
        (tp_vol + typical_price(bar) * bar.volume, vol + bar.volume)
    });

    if cum_vol > 0.0 {
        Some(cum_tp_vol / cum_vol)
    } else {
        Some(last.close)
    }
}
