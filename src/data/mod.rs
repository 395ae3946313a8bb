//! Measurement tables produced by the systematic sense-amp test.
//!
//! Each CSV file holds one (manufacturer, data pattern, temperature) run; the
//! run identity lives in [`DatasetLabel`] next to the rows, not in a column.

pub mod label;
pub mod reader;

pub use label::{DatasetDescriptor, DatasetLabel};
pub use reader::load_table;

use crate::util::cmp_f64;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("measurement file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("{}: malformed row at line {line}: {message}", path.display())]
    MalformedRow {
        path: PathBuf,
        line: u64,
        message: String,
    },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One CSV record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeasurementRow {
    pub trcd_ns: f64,
    /// Share of flipped bits, 0..=100.
    pub error_percent: f64,
    pub retention_secs: f64,
    /// Absolute bit-error count, when the file carries it.
    pub error_count: Option<u64>,
}

#[derive(Clone, Debug)]
pub struct MeasurementTable {
    label: DatasetLabel,
    source: PathBuf,
    rows: Vec<MeasurementRow>,
}

impl MeasurementTable {
    pub fn new(label: DatasetLabel, source: impl Into<PathBuf>, rows: Vec<MeasurementRow>) -> Self {
        Self {
            label,
            source: source.into(),
            rows,
        }
    }

    pub fn label(&self) -> &DatasetLabel {
        &self.label
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn rows(&self) -> &[MeasurementRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of the absolute error counts, if every row carries one.
    pub fn total_error_count(&self) -> Option<u64> {
        self.rows.iter().map(|r| r.error_count).sum()
    }

    /// Distinct tRCD values, ascending.
    pub fn distinct_trcd(&self) -> Vec<f64> {
        let mut values: Vec<f64> = self.rows.iter().map(|r| r.trcd_ns).collect();
        values.sort_by(cmp_f64);
        values.dedup();
        values
    }

    pub fn rows_with_trcd(&self, trcd_ns: f64) -> impl Iterator<Item = &MeasurementRow> + '_ {
        self.rows.iter().filter(move |r| r.trcd_ns == trcd_ns)
    }
}
