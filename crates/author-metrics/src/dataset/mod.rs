//! Yearly author tables held in memory.
//!
//! The store is built once during startup and shared read-only behind an
//! [`Arc`]; nothing mutates it afterwards.

pub mod schema;

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::OnceCell;

pub use schema::{ColumnLayout, FieldMapping};

use crate::config::Config;
use crate::error::{LoadError, LoadResult};
use crate::models::AuthorRecord;

/// Every author row of one year.
#[derive(Debug, Clone)]
pub struct YearlyDataset {
    year: u16,
    records: Vec<AuthorRecord>,
}

impl YearlyDataset {
    /// Parse a CSV table for `year`.
    ///
    /// # Errors
    ///
    /// Returns error if the year has no mapping, a required column is missing,
    /// or the CSV is malformed.
    pub fn from_reader<R: Read>(year: u16, reader: R) -> LoadResult<Self> {
        let mapping = FieldMapping::for_year(year).ok_or(LoadError::NoFieldMapping { year })?;

        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = reader.headers().map_err(|source| LoadError::Csv { year, source })?.clone();
        let layout = ColumnLayout::resolve(year, mapping, &headers)?;

        let records = reader
            .records()
            .map(|row| {
                row.map(|row| layout.parse_row(&row)).map_err(|source| LoadError::Csv { year, source })
            })
            .collect::<LoadResult<Vec<_>>>()?;

        Ok(Self { year, records })
    }

    /// Read the table for `year` from disk.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be opened or parsed.
    pub fn from_path(year: u16, path: &Path) -> LoadResult<Self> {
        let file =
            File::open(path).map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
        Self::from_reader(year, file)
    }

    /// Wrap already-built rows.
    ///
    /// # Errors
    ///
    /// Returns error if the year has no mapping.
    pub fn from_records(year: u16, records: Vec<AuthorRecord>) -> LoadResult<Self> {
        FieldMapping::for_year(year).ok_or(LoadError::NoFieldMapping { year })?;
        Ok(Self { year, records })
    }

    #[must_use]
    pub const fn year(&self) -> u16 {
        self.year
    }

    #[must_use]
    pub fn records(&self) -> &[AuthorRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// All loaded years, keyed by year.
#[derive(Debug, Clone, Default)]
pub struct DatasetStore {
    datasets: BTreeMap<u16, YearlyDataset>,
}

impl DatasetStore {
    /// Load every configured year from disk.
    ///
    /// Years load independently. Unless `allow_partial_load` is set, a single
    /// failing year fails the whole load.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Incomplete`] listing failed years, or
    /// [`LoadError::Empty`] if nothing loaded.
    pub fn load(config: &Config) -> LoadResult<Self> {
        let mut datasets = BTreeMap::new();
        let mut failures = Vec::new();

        for &year in &config.years {
            let path = config.dataset_path(year);
            match YearlyDataset::from_path(year, &path) {
                Ok(dataset) => {
                    tracing::info!(year, rows = dataset.len(), path = %path.display(), "Loaded dataset");
                    datasets.insert(year, dataset);
                }
                Err(e) => {
                    tracing::error!(year, error = %e, "Failed to load dataset");
                    failures.push((year, e.to_string()));
                }
            }
        }

        if !failures.is_empty() {
            if !config.allow_partial_load {
                return Err(LoadError::Incomplete { failures });
            }
            tracing::warn!(
                dropped = ?failures.iter().map(|(y, _)| *y).collect::<Vec<_>>(),
                "Serving without failed years"
            );
        }

        if datasets.is_empty() {
            return Err(LoadError::Empty);
        }

        Ok(Self { datasets })
    }

    /// Build a store from datasets already in memory.
    #[must_use]
    pub fn from_datasets(datasets: impl IntoIterator<Item = YearlyDataset>) -> Self {
        Self { datasets: datasets.into_iter().map(|d| (d.year(), d)).collect() }
    }

    /// Loaded years, ascending.
    #[must_use]
    pub fn years(&self) -> Vec<u16> {
        self.datasets.keys().copied().collect()
    }

    #[must_use]
    pub fn get(&self, year: u16) -> Option<&YearlyDataset> {
        self.datasets.get(&year)
    }

    #[must_use]
    pub fn contains(&self, year: u16) -> bool {
        self.datasets.contains_key(&year)
    }

    /// The most recent loaded year.
    #[must_use]
    pub fn latest(&self) -> Option<&YearlyDataset> {
        self.datasets.values().next_back()
    }

    /// Datasets in ascending year order.
    pub fn iter(&self) -> impl Iterator<Item = &YearlyDataset> {
        self.datasets.values()
    }

    /// Total rows across all years.
    #[must_use]
    pub fn total_rows(&self) -> usize {
        self.datasets.values().map(YearlyDataset::len).sum()
    }
}

/// Loads the store at most once and hands out the shared snapshot.
#[derive(Debug)]
pub struct DatasetLoader {
    config: Config,
    store: OnceCell<Arc<DatasetStore>>,
}

impl DatasetLoader {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config, store: OnceCell::new() }
    }

    /// Load the datasets, or return the snapshot from an earlier call.
    ///
    /// File reads and parsing run on the blocking thread pool.
    ///
    /// # Errors
    ///
    /// Returns error if the first load fails; a later call retries.
    pub async fn load(&self) -> LoadResult<Arc<DatasetStore>> {
        if let Some(store) = self.store.get() {
            tracing::info!("Datasets already loaded, skipping");
            return Ok(Arc::clone(store));
        }

        let store = self
            .store
            .get_or_try_init(|| async {
                let config = self.config.clone();
                tokio::task::spawn_blocking(move || DatasetStore::load(&config))
                    .await
                    .map_err(|source| LoadError::Task { source })?
                    .map(Arc::new)
            })
            .await?;
        Ok(Arc::clone(store))
    }

    /// The snapshot, if loaded.
    #[must_use]
    pub fn get(&self) -> Option<Arc<DatasetStore>> {
        self.store.get().cloned()
    }
}
