//! Single JSON document keyed by scenario label

use super::LedgerSink;
use crate::error::ExportError;
use crate::projection::{Ledger, LedgerRecord, LedgerSummary};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

#[derive(Serialize)]
struct ScenarioDocument<'a> {
    summary: LedgerSummary,
    records: &'a [LedgerRecord],
}

/// Writes `{ "<scenario>": { "summary": ..., "records": [...] } }` to one file
#[derive(Debug, Clone)]
pub struct JsonSink {
    path: PathBuf,
}

impl JsonSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn write_ledgers<W: Write>(writer: W, ledgers: &[Ledger]) -> Result<(), ExportError> {
        let document: BTreeMap<&str, ScenarioDocument> = ledgers
            .iter()
            .map(|ledger| {
                (
                    ledger.scenario().label(),
                    ScenarioDocument {
                        summary: ledger.summary(),
                        records: ledger.records(),
                    },
                )
            })
            .collect();

        serde_json::to_writer_pretty(writer, &document)?;
        Ok(())
    }
}

impl LedgerSink for JsonSink {
    fn name(&self) -> &str {
        "json"
    }

    fn export(&mut self, ledgers: &[Ledger]) -> Result<String, ExportError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(fs::File::create(&self.path)?);
        Self::write_ledgers(&mut writer, ledgers)?;
        writer.flush()?;

        Ok(self.path.display().to_string())
    }
}
