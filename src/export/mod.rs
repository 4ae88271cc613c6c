//! Export boundary between computed ledgers and downstream sinks
//!
//! Projection always finishes before export starts. Sink failures are caught in
//! `export_ledgers` and reported as an `ExportOutcome`; they never reach back into the
//! ledgers, which stay valid whatever the sink does.

mod csv_sink;
mod json_sink;

pub use csv_sink::{analysis_folder_name, CsvSink};
pub use json_sink::JsonSink;

use crate::error::ExportError;
use crate::projection::Ledger;

/// Destination for a set of scenario ledgers
pub trait LedgerSink {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Write every ledger, returning where the output ended up
    fn export(&mut self, ledgers: &[Ledger]) -> Result<String, ExportError>;
}

/// Result of handing ledgers to a sink
#[derive(Debug)]
pub enum ExportOutcome {
    Exported { sink: String, location: String },
    Failed { sink: String, error: ExportError },
}

impl ExportOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ExportOutcome::Exported { .. })
    }
}

/// Export through `sink`, catching any failure at this boundary
pub fn export_ledgers(sink: &mut dyn LedgerSink, ledgers: &[Ledger]) -> ExportOutcome {
    let name = sink.name().to_string();
    log::info!("exporting {} ledger(s) via {}", ledgers.len(), name);

    match sink.export(ledgers) {
        Ok(location) => {
            log::info!("{} export written to {}", name, location);
            ExportOutcome::Exported { sink: name, location }
        }
        Err(error) => {
            log::warn!("{} export failed: {}", name, error);
            ExportOutcome::Failed { sink: name, error }
        }
    }
}

/// Currency text with two decimals, as written by every sink
pub fn format_currency(value: f64) -> String {
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InvestmentConfig;
    use crate::overlay::EventOverlay;
    use crate::scenario::ScenarioRunner;

    struct RejectingSink;

    impl LedgerSink for RejectingSink {
        fn name(&self) -> &str {
            "rejecting"
        }

        fn export(&mut self, _ledgers: &[Ledger]) -> Result<String, ExportError> {
            Err(ExportError::Sink("authorization denied".to_string()))
        }
    }

    #[test]
    fn test_failure_caught_and_ledgers_intact() {
        let runner = ScenarioRunner::new(InvestmentConfig::default(), EventOverlay::new()).unwrap();
        let ledgers = runner.run_all();
        let before = ledgers.clone();

        let outcome = export_ledgers(&mut RejectingSink, &ledgers);

        match outcome {
            ExportOutcome::Failed { sink, error } => {
                assert_eq!(sink, "rejecting");
                assert_eq!(error.to_string(), "authorization denied");
            }
            other => panic!("Expected failure, got {:?}", other),
        }
        assert_eq!(ledgers, before);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(306_000.0), "306000.00");
        assert_eq!(format_currency(1_288.371), "1288.37");
        assert_eq!(format_currency(-12.5), "-12.50");
    }
}
