//! Investment inputs and their validation

pub mod loader;

pub use loader::{
    load_investment, load_investment_from_reader, load_rental_overrides, load_repairs,
    InvestmentFile, DEFAULT_INVESTMENT_PATH, DEFAULT_RENTAL_OVERRIDES_PATH, DEFAULT_REPAIRS_PATH,
};

use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};

/// How the purchase is financed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancingMode {
    /// Amortizing loan for `market_value - down_payment`, with brokerage fee and property tax
    #[default]
    Mortgage,
    /// No debt service: principal, interest, brokerage fee and property tax are all zero
    AllCash,
}

/// Immutable inputs for one property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentConfig {
    /// Purchase price and starting property value
    pub market_value: f64,

    /// Cash invested up front (also the cash-on-cash denominator)
    pub down_payment: f64,

    /// HOA dues in month 1
    pub monthly_hoa: f64,

    /// Rent in month 1
    pub initial_rental_income: f64,

    /// Number of months to project
    pub horizon_months: u32,

    /// Annual loan rate as a decimal (0.05 = 5%)
    pub annual_interest_rate: f64,

    /// Loan term in months
    pub loan_term_months: u32,

    pub monthly_brokerage_fee: f64,

    /// Flat over the whole horizon, never escalated
    pub monthly_property_tax: f64,

    #[serde(default)]
    pub financing: FinancingMode,
}

impl Default for InvestmentConfig {
    fn default() -> Self {
        Self {
            market_value: 300_000.0,
            down_payment: 60_000.0,
            monthly_hoa: 200.0,
            initial_rental_income: 2_000.0,
            horizon_months: 36,
            annual_interest_rate: 0.05,
            loan_term_months: 360, // 30 years
            monthly_brokerage_fee: 50.0,
            monthly_property_tax: 3_600.0 / 12.0,
            financing: FinancingMode::Mortgage,
        }
    }
}

impl InvestmentConfig {
    /// Set the property tax from an annual amount
    pub fn with_annual_property_tax(mut self, annual_property_tax: f64) -> Self {
        self.monthly_property_tax = annual_property_tax / 12.0;
        self
    }

    /// Amount financed by the loan
    pub fn loan_amount(&self) -> f64 {
        match self.financing {
            FinancingMode::Mortgage => self.market_value - self.down_payment,
            FinancingMode::AllCash => 0.0,
        }
    }

    /// Check every numeric input; the engine refuses to run on an invalid config
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(self.market_value.is_finite() && self.market_value > 0.0) {
            return Err(ConfigurationError::invalid(
                "market_value",
                format!("must be positive, got {}", self.market_value),
            ));
        }

        if !self.down_payment.is_finite() || self.down_payment < 0.0 {
            return Err(ConfigurationError::invalid(
                "down_payment",
                format!("must be non-negative, got {}", self.down_payment),
            ));
        }
        if self.down_payment > self.market_value {
            return Err(ConfigurationError::invalid(
                "down_payment",
                format!(
                    "{} exceeds market value {}",
                    self.down_payment, self.market_value
                ),
            ));
        }

        if self.horizon_months == 0 {
            return Err(ConfigurationError::invalid(
                "horizon_months",
                "must be at least 1",
            ));
        }

        let non_negative = [
            ("monthly_hoa", self.monthly_hoa),
            ("initial_rental_income", self.initial_rental_income),
            ("annual_interest_rate", self.annual_interest_rate),
            ("monthly_brokerage_fee", self.monthly_brokerage_fee),
            ("monthly_property_tax", self.monthly_property_tax),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigurationError::invalid(
                    field,
                    format!("must be non-negative, got {}", value),
                ));
            }
        }

        let principal = self.loan_amount();
        if self.loan_term_months == 0 && principal > 0.0 {
            return Err(ConfigurationError::ZeroLoanTerm { principal });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = InvestmentConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.loan_amount(), 240_000.0);
        assert_eq!(config.monthly_property_tax, 300.0);
    }

    #[test]
    fn test_annual_property_tax() {
        let config = InvestmentConfig::default().with_annual_property_tax(4_800.0);
        assert_eq!(config.monthly_property_tax, 400.0);
    }

    #[test]
    fn test_rejects_non_positive_market_value() {
        let config = InvestmentConfig {
            market_value: 0.0,
            down_payment: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::InvalidInput { field: "market_value", .. })
        ));
    }

    #[test]
    fn test_rejects_zero_horizon() {
        let config = InvestmentConfig {
            horizon_months: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::InvalidInput { field: "horizon_months", .. })
        ));
    }

    #[test]
    fn test_rejects_down_payment_above_value() {
        let config = InvestmentConfig {
            down_payment: 300_001.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_term_only_fails_with_principal() {
        let financed = InvestmentConfig {
            loan_term_months: 0,
            ..Default::default()
        };
        assert_eq!(
            financed.validate(),
            Err(ConfigurationError::ZeroLoanTerm { principal: 240_000.0 })
        );

        let paid_in_full = InvestmentConfig {
            down_payment: 300_000.0,
            loan_term_months: 0,
            ..Default::default()
        };
        assert!(paid_in_full.validate().is_ok());

        let all_cash = InvestmentConfig {
            loan_term_months: 0,
            financing: FinancingMode::AllCash,
            ..Default::default()
        };
        assert!(all_cash.validate().is_ok());
    }

    #[test]
    fn test_rejects_negative_costs() {
        let config = InvestmentConfig {
            monthly_hoa: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::InvalidInput { field: "monthly_hoa", .. })
        ));
    }
}
