//! In-memory station catalog.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::{StateCode, StationRecord};

use super::error::CatalogError;
use super::loader::parse_stations;

/// Read-only list of known fuel stations and their prices.
///
/// Stations keep the order they had in the dataset; selection ties are
/// broken by that order.
#[derive(Debug, Clone, Default)]
pub struct StationCatalog {
    stations: Vec<StationRecord>,
    skipped: usize,
    source: Option<PathBuf>,
}

impl StationCatalog {
    /// Build a catalog directly from records (for tests and fixtures).
    pub fn new(stations: Vec<StationRecord>) -> Self {
        Self {
            stations,
            skipped: 0,
            source: None,
        }
    }

    /// Load a catalog from a CSV file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut catalog = Self::from_reader(BufReader::new(file))?;
        catalog.source = Some(path.to_path_buf());

        info!(
            path = %path.display(),
            stations = catalog.len(),
            skipped = catalog.skipped,
            "loaded station catalog"
        );

        Ok(catalog)
    }

    /// Load a catalog from any CSV reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let parsed = parse_stations(reader)?;
        Ok(Self {
            stations: parsed.stations,
            skipped: parsed.skipped,
            source: None,
        })
    }

    /// All stations, in dataset order.
    pub fn stations(&self) -> &[StationRecord] {
        &self.stations
    }

    pub fn iter(&self) -> impl Iterator<Item = &StationRecord> {
        self.stations.iter()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Number of dataset rows rejected during loading.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// The file the catalog was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Stations located in the given state, in dataset order.
    pub fn stations_in_state(&self, state: StateCode) -> impl Iterator<Item = &StationRecord> {
        self.stations.iter().filter(move |s| s.state == state)
    }

    /// The `limit` cheapest stations in a state, cheapest first.
    ///
    /// Stations with equal prices keep their dataset order.
    pub fn cheapest_in_state(&self, state: StateCode, limit: usize) -> Vec<&StationRecord> {
        let mut stations: Vec<&StationRecord> = self.stations_in_state(state).collect();
        stations.sort_by(|a, b| a.price.value().total_cmp(&b.price.value()));
        stations.truncate(limit);
        stations
    }
}
