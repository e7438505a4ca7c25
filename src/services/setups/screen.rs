//! Watchlist pre-screen for momentum candidates.

use serde::{Deserialize, Serialize};

use crate::types::MarketSnapshot;

/// Minimum activity a snapshot must show to be worth classifying.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MomentumCriteria {
    pub min_rvol: f64,
    pub min_gap_percent: f64,
    pub min_volume: f64,
}

impl Default for MomentumCriteria {
    fn default() -> Self {
        Self {
            min_rvol: 2.0,
            min_gap_percent: 3.0,
            min_volume: 100_000.0,
        }
    }
}

impl MomentumCriteria {
    pub fn matches(&self, snapshot: &MarketSnapshot) -> bool {
        snapshot.data_available
            && snapshot.rvol >= self.min_rvol
            && snapshot.gap_percent.abs() >= self.min_gap_percent
            && snapshot.volume >= self.min_volume
    }
}

/// Keep the snapshots that pass every criterion, highest RVOL first.
pub fn momentum_screen(
    snapshots: Vec<MarketSnapshot>,
    criteria: &MomentumCriteria,
) -> Vec<MarketSnapshot> {
    let mut hits: Vec<MarketSnapshot> = snapshots
        .into_iter()
        .filter(|s| criteria.matches(s))
        .collect();
    hits.sort_by(|a, b| b.rvol.total_cmp(&a.rvol));
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(symbol: &str, rvol: f64, gap: f64, volume: f64) -> MarketSnapshot {
        MarketSnapshot {
            symbol: symbol.to_string(),
            current_price: 5.0,
            rvol,
            gap_percent: gap,
            volume,
            data_available: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_screen_filters_and_sorts_by_rvol() {
        let mut offline = snapshot("OFF", 9.0, 9.0, 1_000_000.0);
        offline.data_available = false;

        let hits = momentum_screen(
            vec![
                snapshot("AAA", 2.5, 4.0, 300_000.0),
                snapshot("BBB", 6.0, -5.0, 900_000.0),
                snapshot("THIN", 8.0, 7.0, 50_000.0),
                snapshot("FLAT", 3.0, 1.0, 500_000.0),
                offline,
            ],
            &MomentumCriteria::default(),
        );

        let symbols: Vec<&str> = hits.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["BBB", "AAA"]);
    }

    #[test]
    fn test_thresholds_are_inclusive() {
        let criteria = MomentumCriteria::default();
        assert!(criteria.matches(&snapshot("EDGE", 2.0, 3.0, 100_000.0)));
        assert!(!criteria.matches(&snapshot("EDGE", 1.99, 3.0, 100_000.0)));
    }
}
