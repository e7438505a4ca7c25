//! Bull Flag: orderly consolidation on light volume after a strong run.

use super::{finish, insufficient_history, SetupInput};
use crate::services::scoring::{tally, ScoreRule};
use crate::types::{SetupCheck, SetupConfidence, SetupType};

pub const MIN_PULLBACK: f64 = 0.05;
pub const MAX_PULLBACK: f64 = 0.15;
pub const MIN_RVOL: f64 = 0.5;
pub const MAX_RVOL: f64 = 1.5;
pub const MAX_SUPPORT_DISTANCE: f64 = 0.03;
pub const VALID_SCORE: u32 = 5;
pub const TARGET_MULTIPLES: [f64; 3] = [3.0, 5.0, 8.0];

/// Fractional pullback from the highest high in the history.
pub fn pullback(input: &SetupInput<'_>) -> Option<f64> {
    let high = input.history()?.highest_high()?;
    if high > 0.0 {
        Some((high - input.price()) / high)
    } else {
        None
    }
}

/// The higher of EMA9 and VWAP.
pub fn support(input: &SetupInput<'_>) -> f64 {
    input.snapshot.ema_9.max(input.snapshot.vwap)
}

fn near_support(input: &SetupInput<'_>) -> bool {
    let support = support(input);
    support > 0.0 && (input.price() - support).abs() / support < MAX_SUPPORT_DISTANCE
}

pub fn rules<'a>() -> [ScoreRule<SetupInput<'a>>; 3] {
    [
        ScoreRule {
            points: 3,
            applies: |i| pullback(i).map_or(false, |p| p > MIN_PULLBACK && p < MAX_PULLBACK),
            met: |i| {
                format!(
                    "Pullback from high: {:.1}%",
                    pullback(i).unwrap_or(0.0) * 100.0
                )
            },
            failed: Some(|_: &SetupInput<'a>| "No orderly pullback".to_string()),
        },
        ScoreRule {
            points: 2,
            applies: |i| i.snapshot.rvol > MIN_RVOL && i.snapshot.rvol < MAX_RVOL,
            met: |_| "Volume contracting".to_string(),
            failed: Some(|_: &SetupInput<'a>| "Volume not contracting".to_string()),
        },
        ScoreRule {
            points: 2,
            applies: |i| near_support(i),
            met: |_| "Near support".to_string(),
            failed: Some(|_: &SetupInput<'a>| "Away from support".to_string()),
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
        return insufficient_history(SetupType::BullFlag);
    }

    let result = tally(&rules(), input);
    let breakout = input
        .snapshot
        .known_day_high()
        .unwrap_or(input.price() * 1.01);
    let entry = breakout * 1.005;
    let stop = support(input) * 0.98;
    let confidence = confidence(result.score);

    finish(
        SetupType::BullFlag,
        result,
        VALID_SCORE,
        entry,
        stop,
        TARGET_MULTIPLES,
        confidence,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HistoricalSeries, MarketSnapshot, OhlcvBar};

    fn run_up(peak: f64) -> HistoricalSeries {
        [peak * 0.7, peak * 0.85, peak, peak * 0.95]
            .iter()
            .enumerate()
            .map(|(i, &close)| OhlcvBar {
                time: i as i64 * 86_400_000,
                open: close,
                high: close,
                low: close * 0.97,
                close,
                volume: 500_000.0,
            })
            .collect::<Vec<_>>()
            .into()
    }

    fn flag_snapshot() -> MarketSnapshot {
        MarketSnapshot {
            symbol: "FLAG".to_string(),
            current_price: 18.0,
            rvol: 0.9,
            day_high: Some(18.4),
            day_low: Some(17.7),
            vwap: 17.8,
            ema_9: 17.9,
            data_available: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_orderly_flag_scores_seven() {
        let snapshot = flag_snapshot();
        let history = run_up(20.0);
        let result = check(&SetupInput::new(&snapshot, Some(&history)));

        assert_eq!(result.score, 7);
        assert!(result.valid);
        assert_eq!(result.confidence, SetupConfidence::Medium);
        assert_eq!(result.criteria_met[0], "Pullback from high: 10.0%");

        let plan = result.plan.unwrap();
        assert_eq!(plan.entry, 18.49);
        // 0.98 * 17.9
        assert_eq!(plan.stop, 17.54);
        assert!(plan.targets[2] > plan.targets[1]);
    }

    #[test]
    fn test_entry_falls_back_without_day_high() {
        let mut snapshot = flag_snapshot();
        snapshot.day_high = None;
        let history = run_up(20.0);
        let result = check(&SetupInput::new(&snapshot, Some(&history)));

        // 18.0 * 1.01 * 1.005
        assert_eq!(result.plan.unwrap().entry, 18.27);
    }

    #[test]
    fn test_deep_pullback_and_heavy_volume_fail() {
        let mut snapshot = flag_snapshot();
        snapshot.rvol = 2.5;
        let history = run_up(24.0);
        let result = check(&SetupInput::new(&snapshot, Some(&history)));

        assert_eq!(result.score, 2);
        assert!(!result.valid);
        assert_eq!(
            result.criteria_failed,
            vec!["No orderly pullback", "Volume not contracting"]
        );
    }

    #[test]
    fn test_requires_history() {
        let snapshot = flag_snapshot();
        let result = check(&SetupInput::new(&snapshot, None));
        assert_eq!(result.score, 0);
        assert!(!result.valid);
        assert!(result.plan.is_none());
    }
}
