//! First Green Day: the first strong up day after consecutive down days.

use super::{finish, insufficient_history, SetupInput};
use crate::services::scoring::{tally, ScoreRule};
use crate::types::{SetupCheck, SetupConfidence, SetupType};

pub const MIN_CHANGE_PERCENT: f64 = 2.0;
pub const MIN_RVOL: f64 = 2.0;
pub const MIN_PRIOR_DOWN_DAYS: usize = 2;
pub const VALID_SCORE: u32 = 6;
pub const TARGET_MULTIPLES: [f64; 3] = [2.0, 3.0, 5.0];

/// Down closes among the two daily changes before the most recent bar.
///
/// A change needs a preceding close, so short series count fewer days.
pub fn prior_down_days(closes: &[f64]) -> usize {
    let n = closes.len();
    (n.saturating_sub(3)..n.saturating_sub(1))
        .filter(|&i| i >= 1 && closes[i] < closes[i - 1])
        .count()
}

fn down_days(input: &SetupInput<'_>) -> usize {
    input.history().map_or(0, |h| prior_down_days(&h.closes()))
}

pub fn rules<'a>() -> [ScoreRule<SetupInput<'a>>; 3] {
    [
        ScoreRule {
            points: 3,
            applies: |i| down_days(i) >= MIN_PRIOR_DOWN_DAYS,
            met: |_| "2+ prior red days".to_string(),
            failed: Some(|i: &SetupInput<'a>| format!("Only {} prior red days", down_days(i))),
        },
        ScoreRule {
            points: 3,
            applies: |i| i.snapshot.change_percent > MIN_CHANGE_PERCENT,
            met: |i| format!("Green day: +{:.1}%", i.snapshot.change_percent),
            failed: Some(|_: &SetupInput<'a>| "Not green enough".to_string()),
        },
        ScoreRule {
            points: 2,
            applies: |i| i.snapshot.rvol >= MIN_RVOL,
            met: |i| format!("Volume surge: {:.1}x", i.snapshot.rvol),
            failed: None,
        },
    ]
}

fn confidence(score: u32) -> SetupConfidence {
    if score >= VALID_SCORE {
        SetupConfidence::Medium
    } else {
        SetupConfidence::Low
    }
}

pub fn check(input: &SetupInput<'_>) -> SetupCheck {
    if input.history().is_none() {
        return insufficient_history(SetupType::FirstGreenDay);
    }

    let result = tally(&rules(), input);
    let price = input.price();
    let entry = price * 1.02;
    let stop = input.snapshot.known_day_low().unwrap_or(price * 0.96);
    let confidence = confidence(result.score);

    finish(
        SetupType::FirstGreenDay,
        result,
        VALID_SCORE,
        entry,
        stop,
        TARGET_MULTIPLES,
        confidence,
    )
}
