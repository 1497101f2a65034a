use std::path::Path;

use crate::config::EnrichConfig;
use crate::error::EnrichError;
use crate::lookup::LookupTable;
use crate::model::{Dataset, EnrichSummary, RunReport, PRIMARY_SCHOOL, RELATIONSHIP, SECONDARY_SCHOOL};
use crate::output::persist;

/// Run the whole pipeline per config: lookup, dataset, enrich, persist.
///
/// Each input is read fully before the next phase starts. Any error returns
/// before the output file is touched.
pub fn run(config: &EnrichConfig) -> Result<RunReport, EnrichError> {
    let files = &config.files;

    let table = LookupTable::load(&files.lookup, &config.lookup)?;
    let mut dataset = load_dataset(&files.dataset)?;

    let summary = enrich(&mut dataset, &table);
    let written = persist(&dataset, &files.output)?;
    debug_assert_eq!(written, summary.records);

    Ok(RunReport {
        output: files.output.display().to_string(),
        lookup: table.stats(),
        summary,
    })
}

/// Read a JSON array of school records.
pub fn load_dataset(path: &Path) -> Result<Dataset, EnrichError> {
    let json = std::fs::read_to_string(path).map_err(|e| EnrichError::read(path, e))?;
    let dataset = parse_dataset(path, &json)?;
    log::info!("loaded {} records from {}", dataset.len(), path.display());
    Ok(dataset)
}

/// Parse JSON text. `source` only names the input in error messages.
pub fn parse_dataset(source: &Path, json: &str) -> Result<Dataset, EnrichError> {
    serde_json::from_str(json).map_err(|e| EnrichError::parse(source, e))
}

/// Clear both school fields and set `relationship` from the lookup table.
///
/// Mutates in place. Never adds, drops, or reorders records, and running it
/// again with the same table changes nothing. A `chineseName` that is not a
/// string gets an empty `relationship`.
pub fn enrich(dataset: &mut Dataset, table: &LookupTable) -> EnrichSummary {
    let mut summary = EnrichSummary {
        records: dataset.len(),
        ..Default::default()
    };

    for record in dataset.iter_mut() {
        let relationship = match record.chinese_name() {
            Some(name) if table.contains(name) => table.relationship(name).to_string(),
            _ => {
                summary.unmatched += 1;
                String::new()
            }
        };
        if !relationship.is_empty() {
            summary.related += 1;
        }

        record.set(PRIMARY_SCHOOL, "");
        record.set(SECONDARY_SCHOOL, "");
        record.set(RELATIONSHIP, relationship);
    }

    log::debug!(
        "enriched {} records: {} related, {} without a lookup row",
        summary.records,
        summary.related,
        summary.unmatched,
    );

    summary
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
