//! Growth scenarios and the runner that projects them
//!
//! A `Scenario` is a closed set of named rate bundles; unknown names are rejected when
//! parsed rather than silently falling back to a default.

use crate::config::InvestmentConfig;
use crate::error::ConfigurationError;
use crate::overlay::EventOverlay;
use crate::projection::{Ledger, ProjectionEngine};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Annual growth rates, each applied once per 12-month cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRates {
    pub rent_growth: f64,
    pub value_growth: f64,
    pub hoa_growth: f64,
}

/// 1% rent, 1% value, 1% HOA
pub const PESSIMISTIC_RATES: ScenarioRates = ScenarioRates {
    rent_growth: 0.01,
    value_growth: 0.01,
    hoa_growth: 0.01,
};

/// 2% rent, 2% value, 1% HOA
pub const PROBABLE_RATES: ScenarioRates = ScenarioRates {
    rent_growth: 0.02,
    value_growth: 0.02,
    hoa_growth: 0.01,
};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    Pessimistic,
    Probable,
}

impl Scenario {
    /// Every scenario, in reporting order
    pub const ALL: [Scenario; 2] = [Scenario::Pessimistic, Scenario::Probable];

    pub fn rates(self) -> ScenarioRates {
        match self {
            Scenario::Pessimistic => PESSIMISTIC_RATES,
            Scenario::Probable => PROBABLE_RATES,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Scenario::Pessimistic => "pessimistic",
            Scenario::Probable => "probable",
        }
    }

    /// Heading used by console reports and export sheets
    pub fn title(self) -> &'static str {
        match self {
            Scenario::Pessimistic => "Pessimistic Scenario",
            Scenario::Probable => "Probable Scenario",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Runs one engine across several scenarios
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(InvestmentConfig::default(), overlay)?;
/// let ledgers = runner.run_all();
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    /// Validate inputs and build the shared engine
    pub fn new(config: InvestmentConfig, overlay: EventOverlay) -> Result<Self, ConfigurationError> {
        Ok(Self {
            engine: ProjectionEngine::new(config, overlay)?,
        })
    }

    pub fn with_engine(engine: ProjectionEngine) -> Self {
        Self { engine }
    }

    /// Project a single scenario
    pub fn run(&self, scenario: Scenario) -> Ledger {
        self.engine.project(scenario)
    }

    /// Project each scenario in parallel
    ///
    /// Repeated scenarios run once; output follows first-occurrence order.
    pub fn run_scenarios(&self, scenarios: &[Scenario]) -> Vec<Ledger> {
        let mut unique: Vec<Scenario> = Vec::with_capacity(scenarios.len());
        for &scenario in scenarios {
            if !unique.contains(&scenario) {
                unique.push(scenario);
            }
        }

        log::info!("projecting {} scenario(s)", unique.len());
        unique
            .par_iter()
            .map(|&scenario| self.engine.project(scenario))
            .collect()
    }

    /// Project every scenario
    pub fn run_all(&self) -> Vec<Ledger> {
        self.run_scenarios(&Scenario::ALL)
    }

    pub fn engine(&self) -> &ProjectionEngine {
        &self.engine
    }
}
