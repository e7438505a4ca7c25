//! Additive point rules.
//!
//! Setup checkers and the signal scorer both accumulate points from a fixed,
//! ordered list of independent conditions. Rules are plain data so a scoring
//! table can be inspected and tested without running a whole evaluation.

/// One independent condition worth `points` when it holds.
pub struct ScoreRule<C> {
    /// Points added when the predicate holds.
    pub points: u32,
    pub applies: fn(&C) -> bool,
    /// Reason recorded when the rule holds.
    pub met: fn(&C) -> String,
    /// Reason recorded when it does not; None records nothing.
    pub failed: Option<fn(&C) -> String>,
}

/// Accumulated result of evaluating a rule list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tally {
    pub score: u32,
    pub met: Vec<String>,
    pub failed: Vec<String>,
}

/// Evaluate every rule once, in order.
pub fn tally<C>(rules: &[ScoreRule<C>], ctx: &C) -> Tally {
    let mut tally = Tally::default();
    for rule in rules {
        if (rule.applies)(ctx) {
            tally.score += rule.points;
            tally.met.push((rule.met)(ctx));
        } else if let Some(failed) = rule.failed {
            tally.failed.push(failed(ctx));
        }
    }
    tally
}

/// First-match threshold tier: `value > threshold` earns `points`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tier {
    pub threshold: f64,
    pub points: u32,
    pub label: &'static str,
}

/// Return the first tier (in descending threshold order) that `value` exceeds.
pub fn first_tier(tiers: &[Tier], value: f64) -> Option<&Tier> {
    tiers.iter().find(|t| value > t.threshold)
}
