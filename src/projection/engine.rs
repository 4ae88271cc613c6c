//! Core projection engine for monthly property cash flows

use super::ledger::{round_currency, Ledger, LedgerRecord};
use super::state::EngineState;
use crate::amortization::{AmortizationCalculator, PaymentSplit};
use crate::config::{FinancingMode, InvestmentConfig};
use crate::error::ConfigurationError;
use crate::overlay::EventOverlay;
use crate::scenario::Scenario;

/// Main projection engine
///
/// Holds validated inputs only; every `project` call starts from fresh state, so runs
/// never observe each other and may execute on separate threads.
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    config: InvestmentConfig,
    overlay: EventOverlay,
    loan: AmortizationCalculator,
}

impl ProjectionEngine {
    /// Validate inputs and freeze the overlay
    ///
    /// Fails before any month is projected, so an invalid config never yields a partial ledger.
    pub fn new(config: InvestmentConfig, overlay: EventOverlay) -> Result<Self, ConfigurationError> {
        config.validate()?;
        validate_overlay(&overlay, config.horizon_months)?;

        let loan = AmortizationCalculator::new(
            config.loan_amount(),
            config.annual_interest_rate,
            config.loan_term_months,
        )?;

        log::debug!(
            "loan of {:.2} over {} months, payment {:.2}",
            loan.principal(),
            loan.term_months(),
            loan.monthly_payment()
        );

        Ok(Self { config, overlay, loan })
    }

    pub fn config(&self) -> &InvestmentConfig {
        &self.config
    }

    pub fn overlay(&self) -> &EventOverlay {
        &self.overlay
    }

    pub fn loan(&self) -> &AmortizationCalculator {
        &self.loan
    }

    /// Run projection for a single scenario
    pub fn project(&self, scenario: Scenario) -> Ledger {
        let rates = scenario.rates();
        let mut ledger = Ledger::new(scenario, self.config.horizon_months as usize);
        let mut state = EngineState::from_config(&self.config);

        for _month in 1..=self.config.horizon_months {
            state.advance_month(&rates);

            let row = self.calculate_month(&mut state);
            ledger.add_row(row);
        }

        log::debug!(
            "{} scenario: {} months projected, ending balance {:.2}",
            scenario,
            ledger.len(),
            state.remaining_balance
        );

        ledger
    }

    /// Calculate one month; `state` is already advanced and escalated
    fn calculate_month(&self, state: &mut EngineState) -> LedgerRecord {
        let month = state.month;

        // Scripted rent replaces whatever escalation produced
        if let Some(rent) = self.overlay.rental_override(month) {
            state.current_rent = rent;
        }

        let repair_cost = self.overlay.repair_cost(month);

        // Split against the balance before this month's payment
        let (split, brokerage_fee, property_tax) = match self.config.financing {
            FinancingMode::Mortgage => (
                self.loan.split(state.remaining_balance),
                self.config.monthly_brokerage_fee,
                self.config.monthly_property_tax,
            ),
            FinancingMode::AllCash => (PaymentSplit::default(), 0.0, 0.0),
        };

        let net_cash_flow = state.current_rent
            - state.current_hoa
            - repair_cost
            - (split.principal + split.interest + brokerage_fee)
            - property_tax;

        let coc_return = if self.config.down_payment > 0.0 {
            net_cash_flow * 12.0 / self.config.down_payment * 100.0
        } else {
            0.0
        };

        let balance_after = state.remaining_balance - split.principal;
        let equity = state.current_value - balance_after;

        state.apply_principal(split.principal);

        LedgerRecord {
            month,
            property_value: round_currency(state.current_value),
            rental_income: round_currency(state.current_rent),
            hoa_cost: round_currency(state.current_hoa),
            repair_cost: round_currency(repair_cost),
            mortgage_payment: round_currency(split.total()),
            principal_portion: round_currency(split.principal),
            interest_portion: round_currency(split.interest),
            brokerage_fee: round_currency(brokerage_fee),
            property_tax: round_currency(property_tax),
            net_cash_flow: round_currency(net_cash_flow),
            cash_on_cash_return_pct: round_currency(coc_return),
            down_payment: round_currency(self.config.down_payment),
            equity: round_currency(equity),
        }
    }
}

fn validate_overlay(overlay: &EventOverlay, horizon_months: u32) -> Result<(), ConfigurationError> {
    let entries = overlay
        .repairs()
        .map(|(month, value)| ("repair cost", month, value))
        .chain(
            overlay
                .rental_overrides()
                .map(|(month, value)| ("rental override", month, value)),
        );

    for (kind, month, value) in entries {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigurationError::InvalidOverlay { kind, month, value });
        }
        if month == 0 || month > horizon_months {
            log::warn!(
                "{} for month {} is outside months 1..={} and will be ignored",
                kind,
                month,
                horizon_months
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn reference_overlay() -> EventOverlay {
        EventOverlay::from_entries(vec![(3, 1_000.0), (15, 500.0)], vec![(13, 2_200.0)])
    }

    fn reference_engine() -> ProjectionEngine {
        ProjectionEngine::new(InvestmentConfig::default(), reference_overlay()).unwrap()
    }

    #[test]
    fn test_reference_scenario() {
        let ledger = reference_engine().project(Scenario::Probable);
        assert_eq!(ledger.len(), 36);

        let m1 = ledger.record(1).unwrap();
        assert_eq!(m1.month, 1);
        assert_eq!(m1.property_value, 300_000.0);
        assert_eq!(m1.rental_income, 2_000.0);
        assert_eq!(m1.hoa_cost, 200.0);
        assert_eq!(m1.repair_cost, 0.0);
        assert_eq!(m1.interest_portion, 1_000.0);
        assert_eq!(m1.mortgage_payment, 1_288.37);
        assert_eq!(m1.brokerage_fee, 50.0);
        assert_eq!(m1.property_tax, 300.0);
        assert_eq!(m1.down_payment, 60_000.0);

        // 2000 - 200 - 1288.37 - 50 - 300
        assert_abs_diff_eq!(m1.net_cash_flow, 161.63, epsilon = 0.011);

        let m3 = ledger.record(3).unwrap();
        assert_eq!(m3.repair_cost, 1_000.0);
        assert!(m3.net_cash_flow < 0.0);

        let m13 = ledger.record(13).unwrap();
        assert_eq!(m13.rental_income, 2_200.0);
        assert_eq!(m13.property_value, 306_000.0);
        assert_eq!(m13.hoa_cost, 202.0);

        assert_eq!(ledger.record(15).unwrap().repair_cost, 500.0);
        assert_eq!(ledger.record(16).unwrap().repair_cost, 0.0);
    }

    #[test]
    fn test_override_persists_until_next_escalation() {
        let ledger = reference_engine().project(Scenario::Probable);

        for month in 13..=24 {
            assert_eq!(ledger.record(month).unwrap().rental_income, 2_200.0);
        }
        // Next escalation compounds from the overridden base
        assert_eq!(ledger.record(25).unwrap().rental_income, 2_244.0);
    }

    #[test]
    fn test_override_can_lower_rent() {
        let overlay = EventOverlay::from_entries(vec![], vec![(5, 1_800.0)]);
        let ledger = ProjectionEngine::new(InvestmentConfig::default(), overlay)
            .unwrap()
            .project(Scenario::Probable);

        for month in 1..=4 {
            assert_eq!(ledger.record(month).unwrap().rental_income, 2_000.0);
        }
        for month in 5..=12 {
            assert_eq!(ledger.record(month).unwrap().rental_income, 1_800.0);
        }
        // Escalates from the lowered base, not the original rent
        assert_eq!(ledger.record(13).unwrap().rental_income, 1_836.0);
        assert_eq!(ledger.record(24).unwrap().rental_income, 1_836.0);
    }

    #[test]
    fn test_escalation_only_on_anniversaries() {
        let ledger = reference_engine().project(Scenario::Pessimistic);

        for month in 1..=12 {
            assert_eq!(ledger.record(month).unwrap().property_value, 300_000.0);
            assert_eq!(ledger.record(month).unwrap().rental_income, 2_000.0);
        }
        assert_eq!(ledger.record(13).unwrap().property_value, 303_000.0);
        assert_eq!(ledger.record(24).unwrap().property_value, 303_000.0);
        assert_eq!(ledger.record(25).unwrap().property_value, 306_030.0);
    }

    #[test]
    fn test_equity_tracks_remaining_balance() {
        let engine = reference_engine();
        let ledger = engine.project(Scenario::Probable);
        let loan_amount = engine.config().loan_amount();

        let mut paid = 0.0;
        for record in ledger.records() {
            paid += record.principal_portion;
            let expected = record.property_value - (loan_amount - paid);
            // Rounded principal portions drift by at most half a cent per month
            assert_abs_diff_eq!(record.equity, expected, epsilon = 0.01 * (record.month + 1) as f64);
        }
    }

    #[test]
    fn test_zero_interest_loan() {
        let config = InvestmentConfig {
            annual_interest_rate: 0.0,
            loan_term_months: 240,
            ..Default::default()
        };
        let engine = ProjectionEngine::new(config, EventOverlay::new()).unwrap();
        assert_eq!(engine.loan().monthly_payment(), 1_000.0);

        let ledger = engine.project(Scenario::Probable);
        for record in ledger.records() {
            assert_eq!(record.interest_portion, 0.0);
            assert_eq!(record.principal_portion, 1_000.0);
        }
        // Value escalated twice by 2%, 36 payments of 1000
        assert_eq!(ledger.record(36).unwrap().equity, 312_120.0 - (240_000.0 - 36_000.0));
    }

    #[test]
    fn test_zero_down_payment_has_zero_coc() {
        let config = InvestmentConfig {
            down_payment: 0.0,
            ..Default::default()
        };
        let ledger = ProjectionEngine::new(config, reference_overlay())
            .unwrap()
            .project(Scenario::Probable);

        assert!(ledger.records().iter().all(|r| r.cash_on_cash_return_pct == 0.0));
        assert!(ledger.records().iter().all(|r| r.net_cash_flow.is_finite()));
    }

    #[test]
    fn test_repeat_runs_identical() {
        let engine = reference_engine();
        let first = engine.project(Scenario::Probable);
        let _other = engine.project(Scenario::Pessimistic);
        let second = engine.project(Scenario::Probable);

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_balance_non_increasing() {
        let ledger = reference_engine().project(Scenario::Probable);
        let mut previous = f64::INFINITY;
        for record in ledger.records() {
            let balance = record.property_value - record.equity;
            assert!(balance <= previous + 0.01);
            previous = balance;
        }
    }

    #[test]
    fn test_all_cash_matches_debt_free_variant() {
        let config = InvestmentConfig {
            financing: FinancingMode::AllCash,
            ..Default::default()
        };
        let ledger = ProjectionEngine::new(config, reference_overlay())
            .unwrap()
            .project(Scenario::Probable);

        let m1 = ledger.record(1).unwrap();
        assert_eq!(m1.mortgage_payment, 0.0);
        assert_eq!(m1.brokerage_fee, 0.0);
        assert_eq!(m1.property_tax, 0.0);
        assert_eq!(m1.net_cash_flow, 1_800.0);
        assert_eq!(m1.cash_on_cash_return_pct, 36.0);
        assert_eq!(m1.equity, 300_000.0);

        // 2000 - 200 - 1000 repair
        assert_eq!(ledger.record(3).unwrap().net_cash_flow, 800.0);
    }

    #[test]
    fn test_horizon_past_loan_term() {
        let config = InvestmentConfig {
            horizon_months: 30,
            loan_term_months: 24,
            annual_interest_rate: 0.04,
            ..Default::default()
        };
        let ledger = ProjectionEngine::new(config, EventOverlay::new())
            .unwrap()
            .project(Scenario::Pessimistic);

        assert!(ledger.record(24).unwrap().mortgage_payment > 0.0);
        for month in 25..=30 {
            let record = ledger.record(month).unwrap();
            assert_eq!(record.mortgage_payment, 0.0);
            assert_eq!(record.equity, record.property_value);
        }
    }

    #[test]
    fn test_configuration_errors() {
        let zero_term = InvestmentConfig {
            loan_term_months: 0,
            ..Default::default()
        };
        assert!(matches!(
            ProjectionEngine::new(zero_term, EventOverlay::new()),
            Err(ConfigurationError::ZeroLoanTerm { .. })
        ));

        let no_value = InvestmentConfig {
            market_value: 0.0,
            down_payment: 0.0,
            ..Default::default()
        };
        assert!(ProjectionEngine::new(no_value, EventOverlay::new()).is_err());

        let mut overlay = EventOverlay::new();
        overlay.add_repair(4, -10.0);
        assert_eq!(
            ProjectionEngine::new(InvestmentConfig::default(), overlay).unwrap_err(),
            ConfigurationError::InvalidOverlay {
                kind: "repair cost",
                month: 4,
                value: -10.0
            }
        );
    }

    #[test]
    fn test_overlay_outside_horizon_ignored() {
        let overlay = EventOverlay::from_entries(vec![(0, 50.0), (99, 500.0)], vec![(40, 9_999.0)]);
        let ledger = ProjectionEngine::new(InvestmentConfig::default(), overlay)
            .unwrap()
            .project(Scenario::Probable);

        assert!(ledger.records().iter().all(|r| r.repair_cost == 0.0));
        assert!(ledger.records().iter().all(|r| r.rental_income < 9_999.0));
    }
}
