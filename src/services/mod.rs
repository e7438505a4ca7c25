pub mod alerts;
pub mod cache;
pub mod fixture;
pub mod indicators;
pub mod scanner;
pub mod scoring;
pub mod setups;
pub mod social;

pub use alerts::{AlertEngine, AlertThresholds};
pub use cache::{Cache, CachePolicy, NoCache, TtlPolicy};
pub use fixture::FixtureSource;
pub use scanner::{
    MarketDataSource, Ranked, ScanFailure, ScanOrchestrator, ScanReport, ScanSettings,
    SentimentSource, SetupScanner, SocialScanner,
};
pub use setups::{momentum_screen, MomentumCriteria, SetupEvaluator};
pub use social::{risk_alerts, top_opportunities, SignalScorer};
