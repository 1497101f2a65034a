//! Name → relationship marker table, built from the reference CSV.

use std::collections::HashMap;
use std::path::Path;

use crate::config::LookupConfig;
use crate::error::EnrichError;
use crate::model::LookupStats;

#[derive(Debug, Clone, Default)]
pub struct LookupTable {
    entries: HashMap<String, String>,
    rows: usize,
    overwritten: usize,
}

impl LookupTable {
    /// Build from CSV text. `source` only names the input in error messages.
    pub fn from_csv(
        source: &Path,
        csv_data: &str,
        config: &LookupConfig,
    ) -> Result<Self, EnrichError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| EnrichError::parse(source, e))?
            .iter()
            .map(normalize_header)
            .collect();

        // Repeated header names resolve to the last such column.
        let idx = |name: &str| -> Result<usize, EnrichError> {
            let name = normalize_header(name);
            headers
                .iter()
                .rposition(|h| *h == name)
                .ok_or(EnrichError::MissingColumn { column: name })
        };

        let name_idx = idx(&config.name_column)?;
        let mode_idx = idx(&config.mode_column)?;
        let sentinel = config.sentinel.trim();

        let mut table = Self::default();

        for record in reader.records() {
            let record = record.map_err(|e| EnrichError::parse(source, e))?;

            let name = record.get(name_idx).unwrap_or("").trim();
            let mode = record.get(mode_idx).unwrap_or("").trim();
            let value = if mode == sentinel {
                config.marker.clone()
            } else {
                String::new()
            };

            table.insert(name.to_string(), value);
        }

        let stats = table.stats();
        log::info!(
            "lookup table: {} rows, {} names, {} marked related",
            stats.rows,
            stats.distinct_names,
            stats.related,
        );

        Ok(table)
    }

    /// Read and parse a CSV file.
    pub fn load(path: &Path, config: &LookupConfig) -> Result<Self, EnrichError> {
        let csv_data = std::fs::read_to_string(path).map_err(|e| EnrichError::read(path, e))?;
        log::debug!("read {} bytes from {}", csv_data.len(), path.display());
        Self::from_csv(path, &csv_data, config)
    }

    /// Last write wins on duplicate names.
    fn insert(&mut self, name: String, value: String) {
        self.rows += 1;
        if let Some(previous) = self.entries.get(&name) {
            self.overwritten += 1;
            log::debug!("lookup row overwrites '{name}' ('{previous}' -> '{value}')");
        }
        self.entries.insert(name, value);
    }

    /// Relationship value for a school name, "" when the name is absent.
    pub fn relationship(&self, name: &str) -> &str {
        self.entries.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> LookupStats {
        LookupStats {
            rows: self.rows,
            distinct_names: self.entries.len(),
            overwritten: self.overwritten,
            related: self.entries.values().filter(|v| !v.is_empty()).count(),
        }
    }
}

/// Header cells are compared trimmed and without a leading byte-order mark.
fn normalize_header(h: &str) -> String {
    h.trim_start_matches('\u{feff}').trim().to_string()
}
