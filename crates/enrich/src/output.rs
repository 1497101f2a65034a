use std::path::{Path, PathBuf};

use crate::error::EnrichError;
use crate::model::Dataset;

/// Pretty JSON: 2-space indent, non-ASCII written as-is, trailing newline.
pub fn to_json(dataset: &Dataset) -> Result<String, serde_json::Error> {
    let mut json = serde_json::to_string_pretty(dataset)?;
    json.push('\n');
    Ok(json)
}

/// Write the dataset to `path`. Returns the number of records written.
///
/// Atomic: writes a sibling `.tmp` file then renames it over `path`, so a
/// failed run never leaves partial output behind.
pub fn persist(dataset: &Dataset, path: &Path) -> Result<usize, EnrichError> {
    let json = to_json(dataset).map_err(|e| EnrichError::parse(path, e))?;

    let tmp_path = temp_path(path);
    let io_err = |source: std::io::Error| EnrichError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Err(e) = std::fs::write(&tmp_path, json.as_bytes()) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(io_err(e));
    }
    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(io_err(e));
    }

    log::info!("wrote {} records to {}", dataset.len(), path.display());
    Ok(dataset.len())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntityRecord;

    #[test]
    fn json_layout() {
        let mut record = EntityRecord::new("晨曦幼稚園");
        record.set("district", "沙田");
        record.set("relationship", "有關係");

        let json = to_json(&vec![record]).unwrap();

        assert_eq!(
            json,
            "[\n  {\n    \"chineseName\": \"晨曦幼稚園\",\n    \"district\": \"沙田\",\n    \"relationship\": \"有關係\"\n  }\n]\n"
        );
        assert!(!json.contains("\\u"));
    }

    #[test]
    fn empty_dataset_is_empty_array() {
        assert_eq!(to_json(&Vec::new()).unwrap(), "[]\n");
    }

    #[test]
    fn temp_path_is_a_sibling() {
        assert_eq!(
            temp_path(Path::new("out/merged_updated.json")),
            PathBuf::from("out/merged_updated.json.tmp")
        );
    }

    #[test]
    fn persist_writes_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("merged_updated.json");

        let written = persist(&vec![EntityRecord::new("A"), EntityRecord::new("B")], &path).unwrap();

        assert_eq!(written, 2);
        let back: Vec<EntityRecord> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back.len(), 2);
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn persist_replaces_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("merged_updated.json");
        std::fs::write(&path, "stale").unwrap();

        persist(&vec![EntityRecord::new("A")], &path).unwrap();

        assert!(std::fs::read_to_string(&path).unwrap().contains("\"chineseName\": \"A\""));
    }

    #[test]
    fn persist_into_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/out.json");

        let err = persist(&vec![EntityRecord::new("A")], &path).unwrap_err();

        assert!(matches!(err, EnrichError::Io { .. }));
        assert!(!path.exists());
    }
}
