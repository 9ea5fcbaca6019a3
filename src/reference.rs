//! Legacy title reference table (the DSC table)
//!
//! A two-column delimited file: the first column holds the canonical title,
//! the second the legacy title used as lookup key. The header row is skipped.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::ReferenceTableError;

/// Immutable legacy title to canonical title mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceTable {
    titles: HashMap<String, String>,
}

impl ReferenceTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the table from a file on disk
    pub fn load(path: impl AsRef<Path>, delimiter: u8) -> Result<Self, ReferenceTableError> {
        let path = path.as_ref();
        let reader = builder(delimiter)
            .from_path(path)
            .map_err(|source| ReferenceTableError::Load {
                path: path.display().to_string(),
                source,
            })?;
        Self::collect(reader)
    }

    /// Read the table from any reader
    pub fn from_reader<R: Read>(reader: R, delimiter: u8) -> Result<Self, ReferenceTableError> {
        Self::collect(builder(delimiter).from_reader(reader))
    }

    fn collect<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, ReferenceTableError> {
        let mut titles = HashMap::new();
        for result in reader.records() {
            let record = result?;
            // rows without a legacy column carry nothing to look up
            if let (Some(canonical), Some(legacy)) = (record.get(0), record.get(1)) {
                titles.insert(legacy.to_string(), canonical.to_string());
            }
        }
        Ok(Self { titles })
    }

    /// Canonical title for a legacy title
    pub fn get(&self, legacy: &str) -> Option<&str> {
        self.titles.get(legacy).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ReferenceTable
where
    K: Into<String>,
    V: Into<String>,
{
    /// Builds a table from `(legacy, canonical)` pairs
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            titles: iter
                .into_iter()
                .map(|(legacy, canonical)| (legacy.into(), canonical.into()))
                .collect(),
        }
    }
}

fn builder(delimiter: u8) -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder.delimiter(delimiter).has_headers(true).flexible(true);
    builder
}
