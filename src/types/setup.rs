use serde::{Deserialize, Serialize};

/// Momentum setup patterns, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetupType {
    GapAndGo,
    RedToGreen,
    FirstGreenDay,
    MicroPullback,
    BullFlag,
    /// No setup qualified.
    None,
}

impl SetupType {
    /// Get display name.
    pub fn name(&self) -> &'static str {
        match self {
            SetupType::GapAndGo => "Gap & Go",
            SetupType::RedToGreen => "Red to Green",
            SetupType::FirstGreenDay => "First Green Day",
            SetupType::MicroPullback => "Micro Pullback",
            SetupType::BullFlag => "Bull Flag",
            SetupType::None => "No Setup",
        }
    }
}

/// Categorical confidence of a setup classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetupConfidence {
    None,
    Low,
    Medium,
    High,
}

impl SetupConfidence {
    /// Ordinal used when ranking scan results.
    pub fn rank(&self) -> u32 {
        match self {
            SetupConfidence::None => 0,
            SetupConfidence::Low => 1,
            SetupConfidence::Medium => 2,
            SetupConfidence::High => 3,
        }
    }
}

/// Entry, stop and profit targets for a setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradePlan {
    pub entry: f64,
    pub stop: f64,
    /// Three ascending profit targets.
    pub targets: [f64; 3],
    /// "1:X.X", computed from the second target.
    pub risk_reward: String,
}

impl TradePlan {
    /// Distance from entry to stop.
    pub fn risk(&self) -> f64 {
        self.entry - self.stop
    }
}

/// Outcome of one setup checker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetupCheck {
    pub setup_type: SetupType,
    pub valid: bool,
    pub score: u32,
    pub criteria_met: Vec<String>,
    pub criteria_failed: Vec<String>,
    /// Present whenever entry/stop could be derived with positive risk.
    pub plan: Option<TradePlan>,
    pub confidence: SetupConfidence,
}

/// Classification of a symbol's current state, always fully populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetupResult {
    pub symbol: String,
    pub setup_type: SetupType,
    pub valid: bool,
    pub score: u32,
    pub criteria_met: Vec<String>,
    pub criteria_failed: Vec<String>,
    pub entry: f64,
    pub stop: f64,
    pub targets: Vec<f64>,
    pub risk_reward: String,
    pub confidence: SetupConfidence,
}

impl SetupResult {
    /// Result used when no setup applies.
    pub fn no_setup(symbol: &str, reasons: Vec<String>) -> Self {
        Self {
            symbol: symbol.to_string(),
            setup_type: SetupType::None,
            valid: false,
            score: 0,
            criteria_met: Vec::new(),
            criteria_failed: reasons,
            entry: 0.0,
            stop: 0.0,
            targets: Vec::new(),
            risk_reward: "0:0".to_string(),
            confidence: SetupConfidence::None,
        }
    }

    /// Promote a valid checker outcome into a result.
    ///
    /// Returns None if the check is invalid or has no plan.
    pub fn from_check(symbol: &str, check: SetupCheck) -> Option<Self> {
        if !check.valid {
            return None;
        }
        let plan = check.plan?;

        Some(Self {
            symbol: symbol.to_string(),
            setup_type: check.setup_type,
            valid: true,
            score: check.score,
            criteria_met: check.criteria_met,
            criteria_failed: check.criteria_failed,
            entry: plan.entry,
            stop: plan.stop,
            targets: plan.targets.to_vec(),
            risk_reward: plan.risk_reward,
            confidence: check.confidence,
        })
    }
}
