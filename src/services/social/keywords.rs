//! Keyword sentiment for individual posts.

/// Trader slang that reads as bullish.
pub const BULLISH_KEYWORDS: &[&str] = &[
    "buy",
    "long",
    "calls",
    "moon",
    "rocket",
    "bullish",
    "pump",
    "breakout",
    "rally",
    "surge",
    "gap up",
    "squeeze",
    "tendies",
    "yolo",
    "diamond hands",
    "hold",
    "hodl",
    "to the moon",
];

/// Trader slang that reads as bearish.
pub const BEARISH_KEYWORDS: &[&str] = &[
    "sell",
    "short",
    "puts",
    "crash",
    "dump",
    "bearish",
    "drop",
    "tank",
    "fail",
    "overvalued",
    "bubble",
    "red",
    "loss",
    "bag holder",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSentiment {
    Bullish,
    Bearish,
    Neutral,
}

fn hits(text: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|k| text.contains(*k)).count()
}

/// Classify a post by which keyword list it matches more of.
///
/// Matching is case-insensitive substring search, so "buying" counts as
/// "buy". Equal counts are neutral.
pub fn classify_text(text: &str) -> TextSentiment {
    let text = text.to_lowercase();
    let bullish = hits(&text, BULLISH_KEYWORDS);
    let bearish = hits(&text, BEARISH_KEYWORDS);

    match bullish.cmp(&bearish) {
        std::cmp::Ordering::Greater => TextSentiment::Bullish,
        std::cmp::Ordering::Less => TextSentiment::Bearish,
        std::cmp::Ordering::Equal => TextSentiment::Neutral,
    }
}
