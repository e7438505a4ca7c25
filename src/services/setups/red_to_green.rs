//! Red to Green: a stock that opened or traded red reclaiming the prior close.

use super::{finish, SetupInput};
use crate::services::scoring::{tally, ScoreRule};
use crate::types::{SetupCheck, SetupConfidence, SetupType};

pub const MIN_RVOL: f64 = 2.5;
pub const VALID_SCORE: u32 = 6;
pub const TARGET_MULTIPLES: [f64; 3] = [2.0, 3.0, 5.0];

pub fn rules<'a>() -> [ScoreRule<SetupInput<'a>>; 4] {
    [
        ScoreRule {
            points: 2,
            applies: |i| i.snapshot.gap_percent < 0.0 || i.snapshot.change_percent < 0.0,
            met: |_| "Started red".to_string(),
            failed: None,
        },
        ScoreRule {
            points: 3,
            applies: |i| i.snapshot.change_percent > 0.0,
            met: |i| format!("Turning green: {:+.1}%", i.snapshot.change_percent),
            failed: Some(|_: &SetupInput<'a>| "Not green yet".to_string()),
        },
        ScoreRule {
            points: 2,
            applies: |i| i.snapshot.rvol >= MIN_RVOL,
            met: |i| format!("High volume: {:.1}x", i.snapshot.rvol),
            failed: Some(|_: &SetupInput<'a>| "Volume not sufficient".to_string()),
        },
        ScoreRule {
            points: 2,
            applies: |i| i.price() > i.snapshot.previous_close,
            met: |_| "Above previous close".to_string(),
            failed: None,
        },
    ]
}

fn confidence(score: u32) -> SetupConfidence {
    match score {
        s if s >= 7 => SetupConfidence::High,
        6 => SetupConfidence::Medium,
        _ => SetupConfidence::Low,
    }
}

pub fn check(input: &SetupInput<'_>) -> SetupCheck {
    let snapshot = input.snapshot;
    let result = tally(&rules(), input);

    let entry = snapshot.previous_close * 1.005;
    let stop = snapshot.known_day_low().unwrap_or(input.price() * 0.98);
    let confidence = confidence(result.score);

    finish(
        SetupType::RedToGreen,
        result,
        VALID_SCORE,
        entry,
        stop,
        TARGET_MULTIPLES,
        confidence,
    )
}
