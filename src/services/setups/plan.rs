//! Position planning: entry, stop, targets and risk/reward.

use crate::types::{round2, TradePlan};

/// Risk/reward label for the second target, `"0:0"` when risk is not positive.
pub fn risk_reward(entry: f64, risk: f64, second_target: f64) -> String {
    if risk <= 0.0 {
        return "0:0".to_string();
    }
    format!("1:{:.1}", (second_target - entry) / risk)
}

/// Build a plan from raw entry/stop levels and risk multiples.
///
/// Prices are rounded to cents before risk is measured. Returns None when
/// the stop is not below the entry or rounding leaves the targets not
/// strictly increasing.
pub fn build_plan(entry: f64, stop: f64, multiples: [f64; 3]) -> Option<TradePlan> {
    let entry = round2(entry);
    let stop = round2(stop);
    let risk = entry - stop;
    if !(risk > 0.0) {
        return None;
    }

    let targets = multiples.map(|m| round2(entry + risk * m));
    let ascending = entry < targets[0] && targets[0] < targets[1] && targets[1] < targets[2];
    if !ascending {
        return None;
    }

    Some(TradePlan {
        entry,
        stop,
        targets,
        risk_reward: risk_reward(entry, risk, targets[1]),
    })
}
