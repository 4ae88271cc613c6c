//! Fixed-payment loan amortization

use crate::error::ConfigurationError;

/// Principal and interest portions of one monthly payment
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PaymentSplit {
    pub principal: f64,
    pub interest: f64,
}

impl PaymentSplit {
    pub fn total(&self) -> f64 {
        self.principal + self.interest
    }
}

/// Level monthly payment for a fully amortizing loan
///
/// Payment M = P * i / (1 - (1+i)^-n) with monthly rate i = r/12,
/// or P/n exactly when the rate is zero.
#[derive(Debug, Clone, PartialEq)]
pub struct AmortizationCalculator {
    principal: f64,
    monthly_rate: f64,
    term_months: u32,
    monthly_payment: f64,
}

impl AmortizationCalculator {
    /// Fails on a zero term with outstanding principal
    pub fn new(
        principal: f64,
        annual_rate: f64,
        term_months: u32,
    ) -> Result<Self, ConfigurationError> {
        if !principal.is_finite() || principal < 0.0 {
            return Err(ConfigurationError::invalid(
                "loan_amount",
                format!("must be non-negative, got {}", principal),
            ));
        }
        if !annual_rate.is_finite() || annual_rate < 0.0 {
            return Err(ConfigurationError::invalid(
                "annual_interest_rate",
                format!("must be non-negative, got {}", annual_rate),
            ));
        }

        let monthly_rate = annual_rate / 12.0;

        let monthly_payment = if principal == 0.0 {
            0.0
        } else if term_months == 0 {
            return Err(ConfigurationError::ZeroLoanTerm { principal });
        } else if monthly_rate == 0.0 {
            principal / term_months as f64
        } else {
            let periods = i32::try_from(term_months).map_err(|_| {
                ConfigurationError::invalid(
                    "loan_term_months",
                    format!("{} months is too long to amortize", term_months),
                )
            })?;
            // Discount-factor form stays finite when (1+i)^n overflows
            let discount = 1.0 / (1.0 + monthly_rate);
            principal * monthly_rate / (1.0 - discount.powi(periods))
        };

        Ok(Self {
            principal,
            monthly_rate,
            term_months,
            monthly_payment,
        })
    }

    pub fn principal(&self) -> f64 {
        self.principal
    }

    pub fn monthly_rate(&self) -> f64 {
        self.monthly_rate
    }

    pub fn term_months(&self) -> u32 {
        self.term_months
    }

    pub fn monthly_payment(&self) -> f64 {
        self.monthly_payment
    }

    /// Split this month's payment against the balance outstanding before it
    ///
    /// Principal never exceeds the balance; a paid-off loan splits to zero.
    pub fn split(&self, balance: f64) -> PaymentSplit {
        if balance <= 0.0 {
            return PaymentSplit::default();
        }

        let interest = balance * self.monthly_rate;
        let principal = (self.monthly_payment - interest).min(balance).max(0.0);

        PaymentSplit { principal, interest }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_standard_payment() {
        // $240k at 5% over 30 years
        let calc = AmortizationCalculator::new(240_000.0, 0.05, 360).unwrap();
        assert_abs_diff_eq!(calc.monthly_payment(), 1288.37, epsilon = 0.01);
    }

    #[test]
    fn test_extreme_term_stays_finite() {
        // (1 + 0.025)^40000 overflows f64; the payment tends to interest-only
        let calc = AmortizationCalculator::new(240_000.0, 0.30, 40_000).unwrap();
        assert!(calc.monthly_payment().is_finite());
        assert_abs_diff_eq!(calc.monthly_payment(), 6_000.0, epsilon = 1e-6);

        let split = calc.split(240_000.0);
        assert_abs_diff_eq!(split.interest, 6_000.0, epsilon = 1e-6);
        assert!(split.principal < 1.0);
    }

    #[test]
    fn test_term_beyond_i32_rejected() {
        let err = AmortizationCalculator::new(240_000.0, 0.05, u32::MAX).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::InvalidInput { field: "loan_term_months", .. }
        ));
    }

    #[test]
    fn test_zero_interest_is_exact() {
        let calc = AmortizationCalculator::new(120_000.0, 0.0, 120).unwrap();
        assert_eq!(calc.monthly_payment(), 1_000.0);

        let split = calc.split(120_000.0);
        assert_eq!(split.interest, 0.0);
        assert_eq!(split.principal, 1_000.0);
    }

    #[test]
    fn test_zero_term_with_principal_fails() {
        let err = AmortizationCalculator::new(240_000.0, 0.05, 0).unwrap_err();
        assert_eq!(err, ConfigurationError::ZeroLoanTerm { principal: 240_000.0 });
    }

    #[test]
    fn test_no_principal_no_payment() {
        let calc = AmortizationCalculator::new(0.0, 0.05, 0).unwrap();
        assert_eq!(calc.monthly_payment(), 0.0);
        assert_eq!(calc.split(0.0), PaymentSplit::default());
    }

    #[test]
    fn test_first_month_split() {
        let calc = AmortizationCalculator::new(240_000.0, 0.05, 360).unwrap();
        let split = calc.split(240_000.0);

        assert_abs_diff_eq!(split.interest, 1_000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(split.total(), calc.monthly_payment(), epsilon = 1e-9);
    }

    #[test]
    fn test_fully_amortizes_over_term() {
        let calc = AmortizationCalculator::new(100_000.0, 0.06, 180).unwrap();
        let mut balance = 100_000.0;

        for _ in 0..180 {
            let split = calc.split(balance);
            assert!(split.principal <= balance);
            balance -= split.principal;
        }

        assert_abs_diff_eq!(balance, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_principal_capped_at_balance() {
        let calc = AmortizationCalculator::new(10_000.0, 0.0, 10).unwrap();
        let split = calc.split(400.0);
        assert_eq!(split.principal, 400.0);
        assert_eq!(calc.split(-1.0), PaymentSplit::default());
    }
}
