use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::SignalLabel;

/// Kind of watchlist/position alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertKind {
    EntrySignal,
    ExitSignal,
    Breakout,
    SentimentShift,
}

impl AlertKind {
    pub fn title(&self) -> &'static str {
        match self {
            AlertKind::EntrySignal => "BUY OPPORTUNITY",
            AlertKind::ExitSignal => "SELL WARNING",
            AlertKind::Breakout => "BREAKOUT",
            AlertKind::SentimentShift => "SENTIMENT SHIFT",
        }
    }
}

/// Kind-specific alert payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AlertDetail {
    Signal {
        label: SignalLabel,
        confidence: u8,
        price: f64,
        sentiment: f64,
        mentions: u64,
        /// Top reasons, at most three.
        reasoning: Vec<String>,
    },
    Breakout {
        price: f64,
        change_percent: f64,
        volume_ratio: f64,
    },
    SentimentShift {
        previous: f64,
        current: f64,
    },
}

/// An alert ready for a delivery channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: Uuid,
    pub kind: AlertKind,
    pub symbol: String,
    pub detail: AlertDetail,
    /// Unix timestamp (milliseconds) when raised.
    pub timestamp: i64,
}

impl Alert {
    pub fn new(kind: AlertKind, symbol: &str, detail: AlertDetail, timestamp: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            symbol: symbol.to_string(),
            detail,
            timestamp,
        }
    }

    /// Plain-text body for notification channels.
    pub fn message(&self) -> String {
        let header = format!("{}: ${}", self.kind.title(), self.symbol);
        match &self.detail {
            AlertDetail::Signal {
                label,
                confidence,
                price,
                sentiment,
                mentions,
                reasoning,
            } => {
                let mut lines = vec![
                    header,
                    String::new(),
                    format!("Signal: {}", label),
                    format!("Confidence: {}%", confidence),
                    format!("Price: ${:.2}", price),
                    format!("Sentiment: {:.2}", sentiment),
                    format!("Mentions: {}", mentions),
                ];
                if !reasoning.is_empty() {
                    lines.push(String::new());
                    lines.push("Reasons:".to_string());
                    lines.extend(reasoning.iter().map(|r| format!("- {}", r)));
                }
                lines.join("\n")
            }
            AlertDetail::Breakout {
                price,
                change_percent,
                volume_ratio,
            } => {
                let direction = if *change_percent > 0.0 { "UP" } else { "DOWN" };
                [
                    header,
                    String::new(),
                    format!("Direction: {}", direction),
                    format!("Change: {:+.2}%", change_percent),
                    format!("Price: ${:.2}", price),
                    format!("Volume: {:.1}x average", volume_ratio),
                ]
                .join("\n")
            }
            AlertDetail::SentimentShift { previous, current } => [
                header,
                String::new(),
                format!("Previous: {:.2}", previous),
                format!("Current: {:.2}", current),
                format!("Change: {:.2}", current - previous),
                String::new(),
                "Consider reviewing your position".to_string(),
            ]
            .join("\n"),
        }
    }
}
