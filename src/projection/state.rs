//! Running state for a single scenario run

use crate::config::InvestmentConfig;
use crate::scenario::ScenarioRates;

/// Values carried from one month to the next, kept at full precision
///
/// Created fresh for every run and dropped once the ledger is built.
#[derive(Debug, Clone)]
pub(crate) struct EngineState {
    /// Current projection month (1-indexed once advanced)
    pub month: u32,

    pub current_value: f64,

    pub current_hoa: f64,

    pub current_rent: f64,

    /// Loan principal outstanding at the start of the month
    pub remaining_balance: f64,
}

impl EngineState {
    /// State before month 1
    pub fn from_config(config: &InvestmentConfig) -> Self {
        Self {
            month: 0,
            current_value: config.market_value,
            current_hoa: config.monthly_hoa,
            current_rent: config.initial_rental_income,
            remaining_balance: config.loan_amount(),
        }
    }

    /// Whether this month opens a new year (13, 25, 37, ...)
    pub fn is_escalation_month(&self) -> bool {
        self.month > 1 && (self.month - 1) % 12 == 0
    }

    /// Advance to the next month, escalating at each anniversary
    pub fn advance_month(&mut self, rates: &ScenarioRates) {
        self.month += 1;

        if self.is_escalation_month() {
            self.current_value *= 1.0 + rates.value_growth;
            self.current_hoa *= 1.0 + rates.hoa_growth;
            self.current_rent *= 1.0 + rates.rent_growth;
        }
    }

    /// Pay down principal; the result is next month's opening balance
    pub fn apply_principal(&mut self, principal: f64) {
        self.remaining_balance = (self.remaining_balance - principal).max(0.0);
    }
}
