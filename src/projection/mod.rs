//! Month-by-month projection engine and its ledger output

mod state;
mod engine;
mod ledger;
pub mod irr;

pub use engine::ProjectionEngine;
pub use ledger::{round_currency, Ledger, LedgerRecord, LedgerSummary};
pub use irr::calculate_irr;
