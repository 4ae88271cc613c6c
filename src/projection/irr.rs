//! Internal rate of return for periodic cash flows
//!
//! Used for the equity IRR in `LedgerSummary`

const TOLERANCE: f64 = 1e-10;
const MAX_ITERATIONS: usize = 1000;
const MIN_PERIODIC_RATE: f64 = -0.99;
const MAX_PERIODIC_RATE: f64 = 10.0;

/// Annual IRR of evenly spaced cash flows (negative = money in, positive = money out)
///
/// Solves the periodic rate with Newton-Raphson, falling back to bisection, then
/// compounds it to an annual rate. Returns None for empty input, for flows without a
/// sign change, or when neither method finds a root.
pub fn calculate_irr(cashflows: &[f64], periods_per_year: u32) -> Option<f64> {
    if cashflows.is_empty() {
        return None;
    }

    if cashflows.iter().all(|cf| cf.abs() < TOLERANCE) {
        return Some(0.0);
    }

    let has_inflow = cashflows.iter().any(|&cf| cf > TOLERANCE);
    let has_outflow = cashflows.iter().any(|&cf| cf < -TOLERANCE);
    if !has_inflow || !has_outflow {
        return None;
    }

    let periodic = newton_raphson(cashflows, periods_per_year)
        .or_else(|| bisection(cashflows))?;

    Some(annualize(periodic, periods_per_year))
}

fn annualize(periodic_rate: f64, periods_per_year: u32) -> f64 {
    (1.0 + periodic_rate).powi(periods_per_year as i32) - 1.0
}

fn newton_raphson(cashflows: &[f64], periods_per_year: u32) -> Option<f64> {
    // Start from 5% a year
    let mut rate = 0.05 / periods_per_year.max(1) as f64;

    for _ in 0..MAX_ITERATIONS {
        let (value, slope) = npv_with_slope(cashflows, rate);
        if slope.abs() < 1e-20 {
            return None;
        }

        let next = (rate - value / slope).clamp(MIN_PERIODIC_RATE, MAX_PERIODIC_RATE);
        if (next - rate).abs() < TOLERANCE {
            return Some(next);
        }
        rate = next;
    }

    None
}

fn bisection(cashflows: &[f64]) -> Option<f64> {
    let mut low = MIN_PERIODIC_RATE;
    let mut high = MAX_PERIODIC_RATE;
    let mut npv_low = npv(cashflows, low);

    if npv_low * npv(cashflows, high) > 0.0 {
        return None;
    }

    for _ in 0..MAX_ITERATIONS {
        let mid = (low + high) / 2.0;
        let npv_mid = npv(cashflows, mid);

        if npv_mid.abs() < TOLERANCE || (high - low) / 2.0 < TOLERANCE {
            return Some(mid);
        }

        if npv_mid * npv_low < 0.0 {
            high = mid;
        } else {
            low = mid;
            npv_low = npv_mid;
        }
    }

    None
}

/// NPV at a periodic rate and its derivative with respect to the rate
fn npv_with_slope(cashflows: &[f64], rate: f64) -> (f64, f64) {
    let base = 1.0 + rate;
    cashflows
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(value, slope), (t, &cf)| {
            let discount = base.powi(t as i32);
            (
                value + cf / discount,
                slope - t as f64 * cf / (discount * base),
            )
        })
}

fn npv(cashflows: &[f64], rate: f64) -> f64 {
    cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}
