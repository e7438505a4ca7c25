//! Micro Pullback: a shallow dip to EMA9 inside an established uptrend.

use super::{finish, SetupInput};
use crate::services::scoring::{tally, ScoreRule};
use crate::types::{SetupCheck, SetupConfidence, SetupType};

/// Maximum distance from EMA9, as a fraction of EMA9.
pub const MAX_EMA9_DISTANCE: f64 = 0.02;
pub const MIN_RVOL: f64 = 1.5;
pub const VALID_SCORE: u32 = 5;
pub const TARGET_MULTIPLES: [f64; 3] = [2.0, 3.0, 4.0];

fn near_ema9(input: &SetupInput<'_>) -> bool {
    let ema_9 = input.snapshot.ema_9;
    ema_9 > 0.0 && (input.price() - ema_9).abs() / ema_9 < MAX_EMA9_DISTANCE
}

pub fn rules<'a>() -> [ScoreRule<SetupInput<'a>>; 4] {
    [
        ScoreRule {
            points: 2,
            applies: |i| near_ema9(i),
            met: |_| "Near EMA9".to_string(),
            failed: Some(|_: &SetupInput<'a>| "Extended from EMA9".to_string()),
        },
        ScoreRule {
            points: 2,
            applies: |i| i.price() > i.snapshot.vwap,
            met: |_| "Above VWAP".to_string(),
            failed: Some(|_: &SetupInput<'a>| "Below VWAP".to_string()),
        },
        ScoreRule {
            points: 2,
            applies: |i| i.snapshot.ema_9 > i.snapshot.ema_20,
            met: |_| "EMA9 > EMA20 (uptrend)".to_string(),
            failed: Some(|_: &SetupInput<'a>| "No uptrend".to_string()),
        },
        ScoreRule {
            points: 1,
            applies: |i| i.snapshot.rvol >= MIN_RVOL,
            met: |_| "Good volume".to_string(),
            failed: Some(|_: &SetupInput<'a>| "Light volume".to_string()),
        },
    ]
}

fn confidence(score: u32) -> SetupConfidence {
    match score {
        s if s >= 6 => SetupConfidence::High,
        5 => SetupConfidence::Medium,
        _ => SetupConfidence::Low,
    }
}

pub fn check(input: &SetupInput<'_>) -> SetupCheck {
    let snapshot = input.snapshot;
    let result = tally(&rules(), input);

    let entry = snapshot.ema_9.max(snapshot.vwap) * 1.005;
    let stop = snapshot.ema_9 * 0.98;
    let confidence = confidence(result.score);

    finish(
        SetupType::MicroPullback,
        result,
        VALID_SCORE,
        entry,
        stop,
        TARGET_MULTIPLES,
        confidence,
    )
}
