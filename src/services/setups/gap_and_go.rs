//! Gap & Go: a large opening gap holding above VWAP and EMA9 on heavy volume.

use super::{finish, SetupInput};
use crate::services::scoring::{tally, ScoreRule};
use crate::types::{SetupCheck, SetupConfidence, SetupType};

pub const MIN_GAP_PERCENT: f64 = 3.0;
pub const MIN_RVOL: f64 = 2.0;
pub const VALID_SCORE: u32 = 5;
pub const TARGET_MULTIPLES: [f64; 3] = [1.5, 2.5, 4.0];

pub fn rules<'a>() -> [ScoreRule<SetupInput<'a>>; 4] {
    [
        ScoreRule {
            points: 3,
            applies: |i| i.snapshot.gap_percent.abs() >= MIN_GAP_PERCENT,
            met: |i| format!("Significant gap: {:.1}%", i.snapshot.gap_percent),
            failed: Some(|i: &SetupInput<'a>| {
                format!("Gap too small: {:.1}%", i.snapshot.gap_percent)
            }),
        },
        ScoreRule {
            points: 2,
            applies: |i| i.snapshot.rvol >= MIN_RVOL,
            met: |i| format!("High RVOL: {:.1}x", i.snapshot.rvol),
            failed: Some(|i: &SetupInput<'a>| format!("Low RVOL: {:.1}x", i.snapshot.rvol)),
        },
        ScoreRule {
            points: 1,
            applies: |i| i.price() > i.snapshot.vwap,
            met: |_| "Price above VWAP".to_string(),
            failed: Some(|_: &SetupInput<'a>| "Price below VWAP".to_string()),
        },
        ScoreRule {
            points: 1,
            applies: |i| i.price() > i.snapshot.ema_9,
            met: |_| "Price above EMA9".to_string(),
            failed: Some(|_: &SetupInput<'a>| "Price below EMA9".to_string()),
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

    // Entry 1% over the higher of VWAP/EMA9, stop 1% under the lower
    let entry = snapshot.vwap.max(snapshot.ema_9) * 1.01;
    let stop = snapshot.vwap.min(snapshot.ema_9) * 0.99;
    let confidence = confidence(result.score);

    finish(
        SetupType::GapAndGo,
        result,
        VALID_SCORE,
        entry,
        stop,
        TARGET_MULTIPLES,
        confidence,
    )
}
