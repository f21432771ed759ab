use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use itertools::Itertools;
use log::{error, info};

use super::VehicleRecord;
use crate::errors::PaintRiskError;

const BUILTIN_DATASET: &str = include_str!("../../assets/vehicles.json");

/// Read-only collection of vehicle records, kept in dataset order.
///
/// Every lookup is a linear scan. The dataset is small and the order of
/// first appearance drives the order suggestions are shown in.
#[derive(Debug, Clone, Default)]
pub struct VehicleTable {
    records: Vec<VehicleRecord>,
}

impl VehicleTable {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<VehicleRecord>) -> Self {
        Self { records }
    }

    /// Parse a dataset given as a JSON array of records.
    pub fn from_json_str(content: &str) -> Result<Self, PaintRiskError> {
        let records: Vec<VehicleRecord> = serde_json::from_str(content)
            .map_err(|e| PaintRiskError::DatasetParseError { source: e })?;
        Ok(Self::from_records(records))
    }

    /// The dataset shipped inside the binary.
    pub fn builtin() -> Self {
        match Self::from_json_str(BUILTIN_DATASET) {
            Ok(table) => table,
            Err(e) => {
                error!("Built-in vehicle dataset is invalid: {}", e);
                Self::empty()
            }
        }
    }

    /// Load a dataset file. `.jsonl` files hold one record per line, anything
    /// ending in `.json` holds a single array.
    pub fn load(path: &Path) -> Result<Self, PaintRiskError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let table = match extension.as_deref() {
            Some("jsonl") => {
                let records = serde_jsonlines::json_lines(path)
                    .map_err(|e| PaintRiskError::DatasetIOError { source: e })?
                    .collect::<Result<Vec<VehicleRecord>, std::io::Error>>()
                    .map_err(|e| PaintRiskError::DatasetIOError { source: e })?;
                Self::from_records(records)
            }
            Some("json") => {
                let content = std::fs::read_to_string(path)
                    .map_err(|e| PaintRiskError::DatasetIOError { source: e })?;
                Self::from_json_str(&content)?
            }
            _ => {
                return Err(PaintRiskError::UnsupportedDatasetFormat {
                    path: format!("{:?}", path),
                });
            }
        };

        info!("Loaded {:?}, found {} vehicles", path, table.len());
        Ok(table)
    }

    /// Load a dataset file, logging any failure and falling back to an empty
    /// table. Lookups against an empty table never match.
    pub fn load_or_empty(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            error!("Could not load vehicle dataset {:?}: {}", path, e);
            Self::empty()
        })
    }

    pub fn records(&self) -> &[VehicleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct makes in dataset order.
    pub fn makes(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.make.clone())
            .unique_by(|m| m.to_lowercase())
            .collect()
    }

    /// Distinct models for a make in dataset order.
    pub fn models(&self, make: &str) -> Vec<String> {
        let make = make.trim();
        self.records
            .iter()
            .filter(|r| r.make.eq_ignore_ascii_case(make))
            .map(|r| r.model.clone())
            .unique_by(|m| m.to_lowercase())
            .collect()
    }

    /// Distinct years for a make and model in dataset order.
    pub fn years(&self, make: &str, model: &str) -> Vec<String> {
        let (make, model) = (make.trim(), model.trim());
        self.records
            .iter()
            .filter(|r| r.make.eq_ignore_ascii_case(make) && r.model.eq_ignore_ascii_case(model))
            .map(|r| r.year.clone())
            .unique()
            .collect()
    }

    /// First record matching the vehicle, if any.
    pub fn find(&self, make: &str, model: &str, year: &str) -> Option<&VehicleRecord> {
        self.records.iter().find(|r| r.matches(make, model, year))
    }
}

/// Load the vehicle table on a worker thread.
///
/// The receiver yields exactly one table: the file at `path` when given,
/// otherwise the built-in dataset. A failed load still delivers an empty
/// table so the caller is never left waiting.
pub fn spawn_table_loader(path: Option<PathBuf>) -> Receiver<VehicleTable> {
    let (table_tx, table_rx) = mpsc::channel::<VehicleTable>();
    thread::spawn(move || {
        let table = match path {
            Some(path) => VehicleTable::load_or_empty(&path),
            None => VehicleTable::builtin(),
        };
        if table_tx.send(table).is_err() {
            error!("Vehicle table receiver dropped before the dataset finished loading");
        }
    });
    table_rx
}
