use std::path::Path;

use crate::error::MarketDataError;
use crate::row::PriceRow;

/// The full replay dataset, loaded once at process start and shared
/// read-only by every subscriber. Never mutated after load.
#[derive(Debug, Clone)]
pub struct ReplayDataset {
    rows: Vec<PriceRow>,
}

/// Number of header lines at the top of the dataset file. pandas writes a
/// multi-index CSV (column names, ticker row, index label row) before the
/// first data row.
const HEADER_LINES: usize = 3;

impl ReplayDataset {
    /// Load the dataset file, skipping the header lines and zipping each
    /// remaining line positionally onto the fixed column list. Short rows
    /// load with their trailing fields missing; they never fail the load.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MarketDataError> {
        let path = path.as_ref();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;

        let mut rows = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record?;
            if i < HEADER_LINES {
                continue;
            }
            rows.push(PriceRow::from_fields(record.iter()));
        }

        tracing::info!(path = %path.display(), rows = rows.len(), "Loaded replay dataset");
        Ok(Self { rows })
    }

    pub fn from_rows(rows: Vec<PriceRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PriceRow> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[PriceRow] {
        &self.rows
    }
}
