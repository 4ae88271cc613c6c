//! Ledger output structures for projections

use super::irr::calculate_irr;
use crate::scenario::Scenario;
use serde::{Deserialize, Serialize};

/// Round to currency precision (2 decimal places)
pub fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A single month of projection output, rounded to currency precision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRecord {
    pub month: u32,
    pub property_value: f64,
    pub rental_income: f64,
    pub hoa_cost: f64,
    pub repair_cost: f64,

    // Debt service
    pub mortgage_payment: f64,
    pub principal_portion: f64,
    pub interest_portion: f64,

    pub brokerage_fee: f64,
    pub property_tax: f64,

    // Returns
    pub net_cash_flow: f64,
    pub cash_on_cash_return_pct: f64,
    pub down_payment: f64,
    pub equity: f64,
}

impl LedgerRecord {
    /// Column headers, in field order
    pub const COLUMNS: [&'static str; 14] = [
        "month",
        "property_value",
        "rental_income",
        "hoa_cost",
        "repair_cost",
        "mortgage_payment",
        "principal_portion",
        "interest_portion",
        "brokerage_fee",
        "property_tax",
        "net_cash_flow",
        "cash_on_cash_return_pct",
        "down_payment",
        "equity",
    ];

    /// Currency-valued columns in `COLUMNS` order (everything after `month`)
    pub fn amounts(&self) -> [f64; 13] {
        [
            self.property_value,
            self.rental_income,
            self.hoa_cost,
            self.repair_cost,
            self.mortgage_payment,
            self.principal_portion,
            self.interest_portion,
            self.brokerage_fee,
            self.property_tax,
            self.net_cash_flow,
            self.cash_on_cash_return_pct,
            self.down_payment,
            self.equity,
        ]
    }
}

/// Month-ordered output of one scenario run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    scenario: Scenario,
    records: Vec<LedgerRecord>,
}

impl Ledger {
    pub(crate) fn new(scenario: Scenario, capacity: usize) -> Self {
        Self {
            scenario,
            records: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn add_row(&mut self, record: LedgerRecord) {
        debug_assert_eq!(record.month as usize, self.records.len() + 1);
        self.records.push(record);
    }

    pub fn scenario(&self) -> Scenario {
        self.scenario
    }

    pub fn records(&self) -> &[LedgerRecord] {
        &self.records
    }

    /// Record for a 1-indexed month
    pub fn record(&self, month: u32) -> Option<&LedgerRecord> {
        month
            .checked_sub(1)
            .and_then(|idx| self.records.get(idx as usize))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get summary statistics
    pub fn summary(&self) -> LedgerSummary {
        let total_rental_income: f64 = self.records.iter().map(|r| r.rental_income).sum();
        let total_repairs: f64 = self.records.iter().map(|r| r.repair_cost).sum();
        let total_interest: f64 = self.records.iter().map(|r| r.interest_portion).sum();
        let total_principal: f64 = self.records.iter().map(|r| r.principal_portion).sum();
        let total_net_cash_flow: f64 = self.records.iter().map(|r| r.net_cash_flow).sum();

        let average_coc_return_pct = if self.records.is_empty() {
            0.0
        } else {
            self.records
                .iter()
                .map(|r| r.cash_on_cash_return_pct)
                .sum::<f64>()
                / self.records.len() as f64
        };

        let last = self.records.last();
        let final_property_value = last.map(|r| r.property_value).unwrap_or(0.0);
        let final_equity = last.map(|r| r.equity).unwrap_or(0.0);

        LedgerSummary {
            scenario: self.scenario,
            total_months: self.records.len() as u32,
            total_rental_income: round_currency(total_rental_income),
            total_repairs: round_currency(total_repairs),
            total_interest: round_currency(total_interest),
            total_principal: round_currency(total_principal),
            total_net_cash_flow: round_currency(total_net_cash_flow),
            average_coc_return_pct: round_currency(average_coc_return_pct),
            final_property_value,
            final_equity,
            final_remaining_balance: round_currency(final_property_value - final_equity),
            equity_irr: self.equity_irr(),
        }
    }

    /// Annualized IRR of buying with the down payment, collecting every month's net
    /// cash flow, and exiting at the final month's equity
    pub fn equity_irr(&self) -> Option<f64> {
        let first = self.records.first()?;
        let last = self.records.last()?;

        let mut flows = Vec::with_capacity(self.records.len() + 1);
        flows.push(-first.down_payment);
        flows.extend(self.records.iter().map(|r| r.net_cash_flow));
        if let Some(exit) = flows.last_mut() {
            *exit += last.equity;
        }

        calculate_irr(&flows, 12)
    }
}

/// Summary statistics for a ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub scenario: Scenario,
    pub total_months: u32,
    pub total_rental_income: f64,
    pub total_repairs: f64,
    pub total_interest: f64,
    pub total_principal: f64,
    pub total_net_cash_flow: f64,
    pub average_coc_return_pct: f64,
    pub final_property_value: f64,
    pub final_equity: f64,
    pub final_remaining_balance: f64,
    /// None when the flows never change sign
    pub equity_irr: Option<f64>,
}
