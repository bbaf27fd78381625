//! Session state: one loaded dataset plus the current weight configuration.
//!
//! The upstream dashboard kept these as ambient globals; here they are
//! explicit state owned by a `Session` and passed by reference into the
//! statistics engine. Both values are replaced wholesale on update, never
//! partially mutated, so torn reads are impossible by construction.

use std::path::{Path, PathBuf};

use crate::domain::{ColumnMap, Dataset, Summary, WeightConfig};
use crate::error::{AppError, EXIT_INPUT};
use crate::ingest::{self, IngestedData};
use crate::stats;

/// Status prompt shown while no dataset is loaded.
pub const EMPTY_PROMPT: &str = "Please upload a sheet to perform calculations.";

#[derive(Debug, Clone, Default)]
pub struct Session {
    dataset: Dataset,
    weights: WeightConfig,
    column_map: Option<ColumnMap>,
    source: Option<PathBuf>,
    last_ingest: Option<IngestStats>,
    upload_in_flight: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a sheet file, replacing the current dataset on success.
    ///
    /// On any ingestion failure the dataset reverts to **empty**, not to the
    /// previously loaded data; keeping stale data around after a failed
    /// upload would misrepresent what the readouts describe.
    ///
    /// A load started while another is in flight is rejected outright rather
    /// than interleaved.
    pub fn load_file(&mut self, path: &Path) -> Result<IngestStats, AppError> {
        if self.upload_in_flight {
            return Err(AppError::new(
                EXIT_INPUT,
                "An upload is already in progress; try again when it finishes.",
            ));
        }

        self.upload_in_flight = true;
        let result = ingest::load_dataset(path);
        self.upload_in_flight = false;

        match result {
            Ok(ingested) => {
                let stats = IngestStats {
                    rows_read: ingested.rows_read,
                    rows_used: ingested.rows_used,
                    rows_rejected: ingested.rows_rejected,
                };
                self.install(ingested, path, stats);
                Ok(stats)
            }
            Err(err) => {
                self.clear();
                Err(err)
            }
        }
    }

    fn install(&mut self, ingested: IngestedData, path: &Path, stats: IngestStats) {
        self.last_ingest = Some(stats);
        self.dataset = ingested.dataset;
        self.column_map = Some(ingested.column_map);
        self.source = Some(path.to_path_buf());
    }

    /// Drop the loaded dataset, reverting to the empty state.
    pub fn clear(&mut self) {
        self.dataset = Dataset::default();
        self.column_map = None;
        self.source = None;
        self.last_ingest = None;
    }

    /// Replace the weight configuration wholesale.
    pub fn set_weights(&mut self, weights: WeightConfig) {
        self.weights = weights;
    }

    pub fn weights(&self) -> WeightConfig {
        self.weights
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Exact header text of the matched location column, for display only.
    pub fn location_header(&self) -> &str {
        self.column_map
            .as_ref()
            .and_then(|m| m.location_header.as_deref())
            .unwrap_or("Location")
    }

    /// Row bookkeeping from the most recent successful upload.
    pub fn last_ingest(&self) -> Option<IngestStats> {
        self.last_ingest
    }

    /// Recompute all statistics outputs from the current state.
    pub fn summary(&self) -> Summary {
        stats::compute_summary(&self.dataset, &self.weights)
    }
}

/// Row bookkeeping from the most recent successful upload.
#[derive(Debug, Clone, Copy)]
pub struct IngestStats {
    pub rows_read: usize,
    pub rows_used: usize,
    pub rows_rejected: usize,
}
