use serde::{Deserialize, Serialize};

/// Maximum confidence a signal can carry.
pub const MAX_SIGNAL_CONFIDENCE: u8 = 95;

/// Directional recommendation derived from social sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalLabel {
    StrongBuy,
    Buy,
    WeakBuy,
    Neutral,
    WeakSell,
    Sell,
    StrongSell,
}

impl SignalLabel {
    /// Wire name, e.g. `STRONG_BUY`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalLabel::StrongBuy => "STRONG_BUY",
            SignalLabel::Buy => "BUY",
            SignalLabel::WeakBuy => "WEAK_BUY",
            SignalLabel::Neutral => "NEUTRAL",
            SignalLabel::WeakSell => "WEAK_SELL",
            SignalLabel::Sell => "SELL",
            SignalLabel::StrongSell => "STRONG_SELL",
        }
    }

    pub fn is_bullish(&self) -> bool {
        matches!(
            self,
            SignalLabel::StrongBuy | SignalLabel::Buy | SignalLabel::WeakBuy
        )
    }

    pub fn is_bearish(&self) -> bool {
        matches!(
            self,
            SignalLabel::StrongSell | SignalLabel::Sell | SignalLabel::WeakSell
        )
    }
}

impl std::fmt::Display for SignalLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scored social signal for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub symbol: String,
    pub label: SignalLabel,
    /// 0..=95.
    pub confidence: u8,
    /// Reasons in evaluation order.
    pub reasoning: Vec<String>,
}

impl Signal {
    /// Human-readable advice for this signal.
    pub fn recommendation(&self) -> String {
        let c = self.confidence;
        match self.label {
            SignalLabel::StrongBuy => format!(
                "Strong Buy Signal ({}% confidence). Consider entering position. High social momentum.",
                c
            ),
            SignalLabel::Buy => format!(
                "Buy Signal ({}% confidence). Positive sentiment, consider buying.",
                c
            ),
            SignalLabel::WeakBuy => format!(
                "Weak Buy Signal ({}% confidence). Slightly positive, wait for confirmation.",
                c
            ),
            SignalLabel::Neutral => format!(
                "Neutral ({}% confidence). No clear social signal. Wait for better setup.",
                c
            ),
            SignalLabel::WeakSell => format!(
                "Weak Sell Signal ({}% confidence). Slightly negative, monitor closely.",
                c
            ),
            SignalLabel::Sell => format!(
                "Sell Signal ({}% confidence). Negative sentiment, consider exiting.",
                c
            ),
            SignalLabel::StrongSell => format!(
                "Strong Sell Signal ({}% confidence). Very negative sentiment. Avoid or short.",
                c
            ),
        }
    }
}
