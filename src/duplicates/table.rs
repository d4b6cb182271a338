//! Uploaded tabular files
//!
//! Each file is read once into memory as a header row plus data rows.

use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{HoaError, HoaResult};

/// A CSV file loaded for a duplicate scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularFile {
    /// Display name (usually the file name)
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TabularFile {
    /// Load a CSV file from disk
    pub fn load(path: &Path) -> HoaResult<Self> {
        let file = std::fs::File::open(path)
            .map_err(|e| HoaError::Import(format!("Failed to open {}: {}", path.display(), e)))?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self::from_reader(name, file)
    }

    /// Read CSV content from any reader; the first row is the header
    pub fn from_reader<R: Read>(name: impl Into<String>, reader: R) -> HoaResult<Self> {
        let name = name.into();
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::None)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| HoaError::Import(format!("{}: failed to read header: {}", name, e)))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for (i, record) in csv_reader.records().enumerate() {
            let record = record.map_err(|e| {
                HoaError::Import(format!("{}: failed to read row {}: {}", name, i + 1, e))
            })?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self {
            name,
            headers,
            rows,
        })
    }

    pub fn record_count(&self) -> usize {
        self.rows.len()
    }

    /// Column name for a cell, falling back to its position
    pub fn column_name(&self, column: usize) -> String {
        self.headers
            .get(column)
            .cloned()
            .unwrap_or_else(|| format!("column_{}", column + 1))
    }
}
