use std::sync::Arc;

use crate::dataset::ReplayDataset;
use crate::row::PriceRow;

/// Per-subscriber position in the shared dataset.
///
/// Each live connection owns exactly one cursor; cursors never interact, so
/// two concurrent subscribers replay the full sequence independently from
/// row zero. The position only moves forward and is bounded by the dataset
/// length.
#[derive(Debug, Clone)]
pub struct ReplayCursor {
    dataset: Arc<ReplayDataset>,
    position: usize,
}

impl ReplayCursor {
    pub fn new(dataset: Arc<ReplayDataset>) -> Self {
        Self {
            dataset,
            position: 0,
        }
    }

    /// Return the row at the cursor and advance, or `None` once exhausted.
    pub fn next_row(&mut self) -> Option<PriceRow> {
        let row = self.dataset.get(self.position).cloned()?;
        self.position += 1;
        Some(row)
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.position >= self.dataset.len()
    }
}
