//! Watchlist scanning.
//!
//! [`ScanOrchestrator`] walks a watchlist one symbol at a time, spacing
//! external calls by a fixed delay, reusing cached results, and isolating
//! per-symbol failures. [`SetupScanner`] and [`SocialScanner`] plug the
//! setup evaluator and the signal scorer into it.

use serde::Serialize;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::services::cache::{Cache, CachePolicy, NoCache, TtlPolicy};
use crate::services::setups::SetupEvaluator;
use crate::services::social::{self, SignalScorer};
use crate::types::{HistoricalSeries, MarketSnapshot, SentimentSnapshot, SetupResult, Signal};

/// Boxed future returned by collaborator traits.
pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Provider of market snapshots and daily history.
pub trait MarketDataSource: Send + Sync {
    fn snapshot<'a>(&'a self, symbol: &'a str) -> SourceFuture<'a, MarketSnapshot>;

    /// Daily bars, None when the provider has no history.
    fn history<'a>(&'a self, symbol: &'a str) -> SourceFuture<'a, Option<HistoricalSeries>>;
}

/// Provider of aggregated social sentiment.
pub trait SentimentSource: Send + Sync {
    fn sentiment<'a>(&'a self, symbol: &'a str) -> SourceFuture<'a, SentimentSnapshot>;
}

/// Ordering key for scan results; higher ranks sort first.
pub trait Ranked {
    fn rank(&self) -> u32;
}

impl Ranked for SetupResult {
    fn rank(&self) -> u32 {
        self.confidence.rank()
    }
}

impl Ranked for Signal {
    fn rank(&self) -> u32 {
        self.confidence as u32
    }
}

#[derive(Debug, Clone)]
pub struct ScanSettings {
    /// Minimum spacing between external calls.
    pub request_delay: Duration,
    pub cache_ttl: Duration,
    pub cache_enabled: bool,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            request_delay: Duration::from_secs(3),
            cache_ttl: Duration::from_secs(3600),
            cache_enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanFailure {
    pub symbol: String,
    pub error: String,
}

/// Outcome of one watchlist scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport<T> {
    /// Successful results, rank descending; ties keep watchlist order.
    pub results: Vec<T>,
    pub failures: Vec<ScanFailure>,
    pub cache_hits: usize,
}

pub struct ScanOrchestrator<T> {
    request_delay: Duration,
    cache: Cache<T>,
}

impl<T: Clone + Ranked> ScanOrchestrator<T> {
    pub fn new(settings: &ScanSettings) -> Self {
        if settings.cache_enabled {
            Self::with_policy(settings.request_delay, TtlPolicy::new(settings.cache_ttl))
        } else {
            Self::with_policy(settings.request_delay, NoCache)
        }
    }

    pub fn with_policy(request_delay: Duration, policy: impl CachePolicy + 'static) -> Self {
        Self {
            request_delay,
            cache: Cache::new(policy),
        }
    }

    pub fn cache(&self) -> &Cache<T> {
        &self.cache
    }

    /// Evaluate every symbol in order.
    ///
    /// Expired cache entries are swept first, including symbols no longer on
    /// the watchlist. Cached results are reused without calling `evaluate`. Each call to
    /// `evaluate` starts at least `request_delay` after the previous one.
    /// A failing symbol is logged and reported but never aborts the scan.
    pub async fn scan<F, Fut>(&self, symbols: &[String], mut evaluate: F) -> ScanReport<T>
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        info!("Scanning {} symbols", symbols.len());
        self.cache.cleanup();

        let mut results = Vec::with_capacity(symbols.len());
        let mut failures = Vec::new();
        let mut cache_hits = 0;
        let mut last_call: Option<Instant> = None;

        for symbol in symbols {
            if let Some(cached) = self.cache.get(symbol) {
                debug!("{}: cache hit", symbol);
                cache_hits += 1;
                results.push(cached);
                continue;
            }

            if let Some(last) = last_call {
                sleep_until(last + self.request_delay).await;
            }
            last_call = Some(Instant::now());

            match evaluate(symbol.clone()).await {
                Ok(result) => {
                    self.cache.set(symbol.clone(), result.clone());
                    results.push(result);
                }
                Err(e) => {
                    warn!("Scan failed for {}: {}", symbol, e);
                    failures.push(ScanFailure {
                        symbol: symbol.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        results.sort_by(|a, b| b.rank().cmp(&a.rank()));

        info!(
            "Scan complete: {} results, {} failures, {} cache hits",
            results.len(),
            failures.len(),
            cache_hits
        );

        ScanReport {
            results,
            failures,
            cache_hits,
        }
    }
}

/// Fetch market data for one symbol and classify it.
///
/// History is only requested when the snapshot has data. A failed history
/// fetch degrades to no history.
pub async fn evaluate_setup<S: MarketDataSource + ?Sized>(
    source: &S,
    evaluator: &SetupEvaluator,
    symbol: &str,
) -> Result<SetupResult> {
    let snapshot = source.snapshot(symbol).await?;
    let history = if snapshot.data_available {
        match source.history(symbol).await {
            Ok(history) => history,
            Err(e) => {
                warn!("{}: history unavailable: {}", symbol, e);
                None
            }
        }
    } else {
        None
    };

    Ok(evaluator.evaluate(&snapshot, history.as_ref()))
}

/// Setup classification over a watchlist.
pub struct SetupScanner<S> {
    source: S,
    evaluator: SetupEvaluator,
    orchestrator: ScanOrchestrator<SetupResult>,
}

impl<S: MarketDataSource> SetupScanner<S> {
    pub fn new(source: S, settings: &ScanSettings) -> Self {
        Self {
            source,
            evaluator: SetupEvaluator::new(),
            orchestrator: ScanOrchestrator::new(settings),
        }
    }

    pub async fn scan(&self, symbols: &[String]) -> ScanReport<SetupResult> {
        let source = &self.source;
        let evaluator = self.evaluator;
        self.orchestrator
            .scan(symbols, move |symbol| async move {
                evaluate_setup(source, &evaluator, &symbol).await
            })
            .await
    }

    /// Only the symbols with a valid setup.
    pub async fn valid_setups(&self, symbols: &[String]) -> Vec<SetupResult> {
        self.scan(symbols)
            .await
            .results
            .into_iter()
            .filter(|r| r.valid)
            .collect()
    }
}

/// Social signal scoring over a watchlist.
pub struct SocialScanner<S> {
    source: S,
    scorer: SignalScorer,
    orchestrator: ScanOrchestrator<Signal>,
}

impl<S: SentimentSource> SocialScanner<S> {
    pub fn new(source: S, settings: &ScanSettings) -> Self {
        Self {
            source,
            scorer: SignalScorer::new(),
            orchestrator: ScanOrchestrator::new(settings),
        }
    }

    pub async fn scan(&self, symbols: &[String]) -> ScanReport<Signal> {
        let source = &self.source;
        let scorer = self.scorer;
        self.orchestrator
            .scan(symbols, move |symbol| async move {
                let snapshot = source.sentiment(&symbol).await?;
                Ok(scorer.score(&snapshot))
            })
            .await
    }

    pub async fn top_opportunities(&self, symbols: &[String], min_confidence: u8) -> Vec<Signal> {
        let report = self.scan(symbols).await;
        social::top_opportunities(&report.results, min_confidence)
    }

    pub async fn risk_alerts(&self, symbols: &[String], min_confidence: u8) -> Vec<Signal> {
        let report = self.scan(symbols).await;
        social::risk_alerts(&report.results, min_confidence)
    }
}
