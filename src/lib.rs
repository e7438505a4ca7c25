//! Momentum Scout - intraday momentum setups and social sentiment signals

pub mod config;
pub mod error;
pub mod services;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use services::{
    AlertEngine, FixtureSource, ScanOrchestrator, ScanReport, ScanSettings, SetupEvaluator,
    SetupScanner, SignalScorer, SocialScanner,
};
pub use types::*;
