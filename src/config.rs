use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::services::alerts::AlertThresholds;
use crate::services::scanner::ScanSettings;
use crate::services::setups::MomentumCriteria;

/// Watchlist scan pacing and caching.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Minimum spacing between external calls, in milliseconds.
    pub request_delay_ms: u64,
    /// Result cache lifetime, in seconds.
    pub cache_ttl_secs: u64,
    pub cache_enabled: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            request_delay_ms: 3000,
            cache_ttl_secs: 3600,
            cache_enabled: true,
        }
    }
}

/// Alert trigger thresholds.
#[derive(Debug, Clone)]
pub struct AlertConfig {
    pub buy_confidence: u8,
    pub sell_confidence: u8,
    /// Absolute daily change (percent) for a breakout.
    pub price_change_pct: f64,
    /// Volume over average for a breakout.
    pub volume_spike: f64,
    /// Duplicate suppression window, in seconds.
    pub cooldown_secs: i64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            buy_confidence: 75,
            sell_confidence: 70,
            price_change_pct: 3.0,
            volume_spike: 2.0,
            cooldown_secs: 1800,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub scan: ScanConfig,
    pub screen: MomentumCriteria,
    pub alerts: AlertConfig,
    /// Minimum confidence for BUY/STRONG_BUY opportunities and sell-side risk alerts.
    pub opportunity_min_confidence: u8,
    /// Watchlist fixture consumed by the binary.
    pub fixture_path: Option<PathBuf>,
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

fn flag_env(key: &str) -> Option<bool> {
    env::var(key).ok().map(|v| v == "true" || v == "1")
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let scan_defaults = ScanConfig::default();
        let screen_defaults = MomentumCriteria::default();
        let alert_defaults = AlertConfig::default();

        Self {
            scan: ScanConfig {
                request_delay_ms: parse_env("SCAN_REQUEST_DELAY_MS")
                    .unwrap_or(scan_defaults.request_delay_ms),
                cache_ttl_secs: parse_env("SCAN_CACHE_TTL_SECS")
                    .unwrap_or(scan_defaults.cache_ttl_secs),
                cache_enabled: flag_env("SCAN_CACHE_ENABLED")
                    .unwrap_or(scan_defaults.cache_enabled),
            },
            screen: MomentumCriteria {
                min_rvol: parse_env("SCREEN_MIN_RVOL").unwrap_or(screen_defaults.min_rvol),
                min_gap_percent: parse_env("SCREEN_MIN_GAP_PCT")
                    .unwrap_or(screen_defaults.min_gap_percent),
                min_volume: parse_env("SCREEN_MIN_VOLUME").unwrap_or(screen_defaults.min_volume),
            },
            alerts: AlertConfig {
                buy_confidence: parse_env("ALERT_BUY_CONFIDENCE")
                    .unwrap_or(alert_defaults.buy_confidence),
                sell_confidence: parse_env("ALERT_SELL_CONFIDENCE")
                    .unwrap_or(alert_defaults.sell_confidence),
                price_change_pct: parse_env("ALERT_PRICE_CHANGE_PCT")
                    .unwrap_or(alert_defaults.price_change_pct),
                volume_spike: parse_env("ALERT_VOLUME_SPIKE")
                    .unwrap_or(alert_defaults.volume_spike),
                cooldown_secs: parse_env("ALERT_COOLDOWN_SECS")
                    .unwrap_or(alert_defaults.cooldown_secs),
            },
            opportunity_min_confidence: parse_env("OPPORTUNITY_MIN_CONFIDENCE").unwrap_or(60),
            fixture_path: env::var("SCAN_FIXTURE").ok().map(PathBuf::from),
        }
    }

    pub fn scan_settings(&self) -> ScanSettings {
        ScanSettings {
            request_delay: Duration::from_millis(self.scan.request_delay_ms),
            cache_ttl: Duration::from_secs(self.scan.cache_ttl_secs),
            cache_enabled: self.scan.cache_enabled,
        }
    }

    pub fn alert_thresholds(&self) -> AlertThresholds {
        AlertThresholds {
            buy_confidence: self.alerts.buy_confidence,
            sell_confidence: self.alerts.sell_confidence,
            price_change_percent: self.alerts.price_change_pct,
            volume_spike: self.alerts.volume_spike,
            cooldown: chrono::Duration::try_seconds(self.alerts.cooldown_secs)
                .unwrap_or_else(|| AlertThresholds::default().cooldown),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scan: ScanConfig::default(),
            screen: MomentumCriteria::default(),
            alerts: AlertConfig::default(),
            opportunity_min_confidence: 60,
            fixture_path: None,
        }
    }
}
