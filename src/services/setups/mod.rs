//! Momentum setup classification.
//!
//! Five independent checkers score a [`MarketSnapshot`] (plus optional
//! history) against fixed point tables. The evaluator runs them in a fixed
//! order and keeps the valid check with the strictly highest score, so ties
//! go to the checker evaluated first.

pub mod bull_flag;
pub mod first_green_day;
pub mod gap_and_go;
pub mod micro_pullback;
pub mod plan;
pub mod red_to_green;
pub mod screen;

pub use screen::{momentum_screen, MomentumCriteria};

use tracing::debug;

use crate::services::scoring::Tally;
use crate::types::{
    HistoricalSeries, MarketSnapshot, SetupCheck, SetupConfidence, SetupResult, SetupType,
};

pub const REASON_DATA_UNAVAILABLE: &str = "data unavailable";
pub const REASON_INSUFFICIENT_HISTORY: &str = "insufficient history";
pub const REASON_NO_SETUP: &str = "no setup met its threshold";
pub const REASON_NON_POSITIVE_RISK: &str = "non-positive risk";

/// Inputs shared by every checker.
#[derive(Debug, Clone, Copy)]
pub struct SetupInput<'a> {
    pub snapshot: &'a MarketSnapshot,
    history: Option<&'a HistoricalSeries>,
}

impl<'a> SetupInput<'a> {
    pub fn new(snapshot: &'a MarketSnapshot, history: Option<&'a HistoricalSeries>) -> Self {
        Self { snapshot, history }
    }

    /// History, treating an empty series as absent.
    pub fn history(&self) -> Option<&'a HistoricalSeries> {
        self.history.filter(|h| !h.is_empty())
    }

    pub fn price(&self) -> f64 {
        self.snapshot.current_price
    }
}

type Checker = fn(&SetupInput<'_>) -> SetupCheck;

/// Checkers in evaluation order. Order decides ties.
pub const CHECKERS: [(SetupType, Checker); 5] = [
    (SetupType::GapAndGo, gap_and_go::check),
    (SetupType::RedToGreen, red_to_green::check),
    (SetupType::FirstGreenDay, first_green_day::check),
    (SetupType::MicroPullback, micro_pullback::check),
    (SetupType::BullFlag, bull_flag::check),
];

/// Turn a rule tally and raw price levels into a check.
///
/// A check is valid only when the score reaches `min_score` and the levels
/// yield a plan with positive risk.
pub(crate) fn finish(
    setup_type: SetupType,
    tally: Tally,
    min_score: u32,
    entry: f64,
    stop: f64,
    multiples: [f64; 3],
    confidence: SetupConfidence,
) -> SetupCheck {
    let Tally {
        score,
        met,
        mut failed,
    } = tally;

    let plan = plan::build_plan(entry, stop, multiples);
    let threshold_met = score >= min_score;
    if threshold_met && plan.is_none() {
        failed.push(REASON_NON_POSITIVE_RISK.to_string());
    }

    SetupCheck {
        setup_type,
        valid: threshold_met && plan.is_some(),
        score,
        criteria_met: met,
        criteria_failed: failed,
        plan,
        confidence,
    }
}

/// Check result for setups that cannot run without history.
pub(crate) fn insufficient_history(setup_type: SetupType) -> SetupCheck {
    SetupCheck {
        setup_type,
        valid: false,
        score: 0,
        criteria_met: Vec::new(),
        criteria_failed: vec![REASON_INSUFFICIENT_HISTORY.to_string()],
        plan: None,
        confidence: SetupConfidence::Low,
    }
}

/// Pick the valid check with the strictly highest score.
///
/// Equal scores keep the earlier check.
pub fn select_best(checks: Vec<SetupCheck>) -> Option<SetupCheck> {
    let mut best: Option<SetupCheck> = None;
    for check in checks.into_iter().filter(|c| c.valid) {
        let better = best.as_ref().map_or(true, |b| check.score > b.score);
        if better {
            best = Some(check);
        }
    }
    best
}

/// Stateless setup evaluator.
#[derive(Debug, Clone, Copy, Default)]
pub struct SetupEvaluator;

impl SetupEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Run every checker, in evaluation order.
    pub fn evaluate_all(
        &self,
        snapshot: &MarketSnapshot,
        history: Option<&HistoricalSeries>,
    ) -> Vec<SetupCheck> {
        let input = SetupInput::new(snapshot, history);
        CHECKERS.iter().map(|(_, check)| check(&input)).collect()
    }

    /// Classify a snapshot into its best setup.
    pub fn evaluate(
        &self,
        snapshot: &MarketSnapshot,
        history: Option<&HistoricalSeries>,
    ) -> SetupResult {
        let symbol = snapshot.symbol.as_str();

        if !snapshot.data_available {
            debug!("{}: no market data, skipping setup checks", symbol);
            return SetupResult::no_setup(symbol, vec![REASON_DATA_UNAVAILABLE.to_string()]);
        }

        let checks = self.evaluate_all(snapshot, history);
        for check in &checks {
            debug!(
                "{}: {} score={} valid={}",
                symbol,
                check.setup_type.name(),
                check.score,
                check.valid
            );
        }

        match select_best(checks).and_then(|best| SetupResult::from_check(symbol, best)) {
            Some(result) => result,
            None => {
                let mut reasons = vec![REASON_NO_SETUP.to_string()];
                if history.map_or(true, |h| h.is_empty()) {
                    reasons.push(REASON_INSUFFICIENT_HISTORY.to_string());
                }
                SetupResult::no_setup(symbol, reasons)
            }
        }
    }
}
