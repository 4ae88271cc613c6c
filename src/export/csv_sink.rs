//! One CSV file per scenario inside a timestamped analysis folder

use super::{format_currency, LedgerSink};
use crate::error::ExportError;
use crate::projection::{Ledger, LedgerRecord};
use chrono::{DateTime, Local};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Folder name for an analysis exported at `at`
pub fn analysis_folder_name(at: DateTime<Local>) -> String {
    format!("Property_Investment_Analysis_{}", at.format("%Y%m%d_%H%M%S"))
}

/// Writes `<output_dir>/<folder>/<scenario>_scenario.csv`
#[derive(Debug, Clone)]
pub struct CsvSink {
    output_dir: PathBuf,
    folder_name: String,
}

impl CsvSink {
    /// Sink whose folder is stamped with the current local time
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self::with_folder_name(output_dir, analysis_folder_name(Local::now()))
    }

    pub fn with_folder_name(output_dir: impl Into<PathBuf>, folder_name: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            folder_name: folder_name.into(),
        }
    }

    pub fn folder(&self) -> PathBuf {
        self.output_dir.join(&self.folder_name)
    }

    /// Write one ledger as CSV: header row of column names, then one row per month
    pub fn write_ledger<W: Write>(writer: W, ledger: &Ledger) -> Result<(), ExportError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(LedgerRecord::COLUMNS)?;

        for record in ledger.records() {
            let mut row = Vec::with_capacity(LedgerRecord::COLUMNS.len());
            row.push(record.month.to_string());
            row.extend(record.amounts().iter().map(|&v| format_currency(v)));
            csv_writer.write_record(&row)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

impl LedgerSink for CsvSink {
    fn name(&self) -> &str {
        "csv"
    }

    fn export(&mut self, ledgers: &[Ledger]) -> Result<String, ExportError> {
        let folder = self.folder();
        fs::create_dir_all(&folder)?;

        for ledger in ledgers {
            let path = folder.join(format!("{}_scenario.csv", ledger.scenario().label()));
            let file = fs::File::create(&path)?;
            Self::write_ledger(file, ledger)?;
            log::debug!("wrote {} rows to {}", ledger.len(), path.display());
        }

        Ok(folder.display().to_string())
    }
}
