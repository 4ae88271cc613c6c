//! Property Projection - monthly cash-flow and equity projection for a leveraged rental property
//!
//! This library provides:
//! - Fixed-payment loan amortization with per-month principal/interest splits
//! - Annual escalation of value, rent and HOA under named growth scenarios
//! - One-time repair costs and scripted rent changes layered over the trajectory
//! - Month-indexed ledgers with cash-on-cash return, equity and equity IRR
//! - CSV and JSON export sinks behind a failure-isolating boundary

pub mod amortization;
pub mod config;
pub mod error;
pub mod export;
pub mod overlay;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use amortization::{AmortizationCalculator, PaymentSplit};
pub use config::{FinancingMode, InvestmentConfig};
pub use error::{ConfigurationError, ExportError, LoadError};
pub use overlay::EventOverlay;
pub use projection::{Ledger, LedgerRecord, LedgerSummary, ProjectionEngine};
pub use scenario::{Scenario, ScenarioRates, ScenarioRunner};
