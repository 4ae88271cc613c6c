//! JSON investment file and CSV overlay loaders
//!
//! Default inputs live in data/: investment.json, repairs.csv, rental_overrides.csv

use super::{FinancingMode, InvestmentConfig};
use crate::error::{ConfigurationError, LoadError};
use crate::overlay::EventOverlay;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Default path to the investment file
pub const DEFAULT_INVESTMENT_PATH: &str = "data/investment.json";

/// Default path to the one-time repair schedule
pub const DEFAULT_REPAIRS_PATH: &str = "data/repairs.csv";

/// Default path to the scripted rent changes
pub const DEFAULT_RENTAL_OVERRIDES_PATH: &str = "data/rental_overrides.csv";

/// On-disk shape of an investment file
///
/// Every field is optional and falls back to `InvestmentConfig::default()`.
/// Property tax may be given monthly or annually, not both.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InvestmentFile {
    #[serde(default = "default_market_value")]
    pub market_value: f64,

    #[serde(default = "default_down_payment")]
    pub down_payment: f64,

    #[serde(default = "default_monthly_hoa")]
    pub monthly_hoa: f64,

    #[serde(default = "default_rental_income")]
    pub initial_rental_income: f64,

    #[serde(default = "default_horizon_months")]
    pub horizon_months: u32,

    #[serde(default = "default_interest_rate")]
    pub annual_interest_rate: f64,

    #[serde(default = "default_loan_term_months")]
    pub loan_term_months: u32,

    #[serde(default = "default_brokerage_fee")]
    pub monthly_brokerage_fee: f64,

    #[serde(default)]
    pub monthly_property_tax: Option<f64>,

    #[serde(default)]
    pub annual_property_tax: Option<f64>,

    #[serde(default)]
    pub financing: FinancingMode,

    /// month -> one-time repair cost
    #[serde(default)]
    pub repairs: BTreeMap<u32, f64>,

    /// month -> absolute rent from that month on
    #[serde(default)]
    pub rental_overrides: BTreeMap<u32, f64>,
}

fn default_market_value() -> f64 { InvestmentConfig::default().market_value }
fn default_down_payment() -> f64 { InvestmentConfig::default().down_payment }
fn default_monthly_hoa() -> f64 { InvestmentConfig::default().monthly_hoa }
fn default_rental_income() -> f64 { InvestmentConfig::default().initial_rental_income }
fn default_horizon_months() -> u32 { InvestmentConfig::default().horizon_months }
fn default_interest_rate() -> f64 { InvestmentConfig::default().annual_interest_rate }
fn default_loan_term_months() -> u32 { InvestmentConfig::default().loan_term_months }
fn default_brokerage_fee() -> f64 { InvestmentConfig::default().monthly_brokerage_fee }

impl InvestmentFile {
    /// Split into the validated config and the overlay it declares
    pub fn into_parts(self) -> Result<(InvestmentConfig, EventOverlay), ConfigurationError> {
        let monthly_property_tax = match (self.monthly_property_tax, self.annual_property_tax) {
            (Some(_), Some(_)) => {
                return Err(ConfigurationError::invalid(
                    "property_tax",
                    "set either monthly_property_tax or annual_property_tax, not both",
                ));
            }
            (Some(monthly), None) => monthly,
            (None, Some(annual)) => annual / 12.0,
            (None, None) => InvestmentConfig::default().monthly_property_tax,
        };

        let config = InvestmentConfig {
            market_value: self.market_value,
            down_payment: self.down_payment,
            monthly_hoa: self.monthly_hoa,
            initial_rental_income: self.initial_rental_income,
            horizon_months: self.horizon_months,
            annual_interest_rate: self.annual_interest_rate,
            loan_term_months: self.loan_term_months,
            monthly_brokerage_fee: self.monthly_brokerage_fee,
            monthly_property_tax,
            financing: self.financing,
        };
        config.validate()?;

        let mut overlay = EventOverlay::new();
        for (month, cost) in self.repairs {
            overlay.add_repair(month, cost);
        }
        for (month, amount) in self.rental_overrides {
            overlay.set_rental_override(month, amount);
        }

        Ok((config, overlay))
    }
}

/// Load an investment file from disk
pub fn load_investment<P: AsRef<Path>>(
    path: P,
) -> Result<(InvestmentConfig, EventOverlay), LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_investment_from_reader(file)
}

/// Load an investment file from any reader (string buffer, stdin, ...)
pub fn load_investment_from_reader<R: Read>(
    reader: R,
) -> Result<(InvestmentConfig, EventOverlay), LoadError> {
    let file: InvestmentFile = serde_json::from_reader(reader)?;
    Ok(file.into_parts()?)
}

#[derive(Debug, Deserialize)]
struct RepairRow {
    month: u32,
    cost: f64,
}

#[derive(Debug, Deserialize)]
struct RentalOverrideRow {
    month: u32,
    amount: f64,
}

/// Load repairs from a `month,cost` CSV
/// Returns Vec<(month, cost)> in file order
pub fn load_repairs<P: AsRef<Path>>(path: P) -> Result<Vec<(u32, f64)>, LoadError> {
    let mut reader = open_csv(path.as_ref())?;
    let mut repairs = Vec::new();

    for result in reader.deserialize() {
        let row: RepairRow = result?;
        repairs.push((row.month, row.cost));
    }

    Ok(repairs)
}

/// Load rent overrides from a `month,amount` CSV
/// Returns Vec<(month, amount)> in file order
pub fn load_rental_overrides<P: AsRef<Path>>(path: P) -> Result<Vec<(u32, f64)>, LoadError> {
    let mut reader = open_csv(path.as_ref())?;
    let mut overrides = Vec::new();

    for result in reader.deserialize() {
        let row: RentalOverrideRow = result?;
        overrides.push((row.month, row.amount));
    }

    Ok(overrides)
}

fn open_csv(path: &Path) -> Result<csv::Reader<File>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(file))
}
