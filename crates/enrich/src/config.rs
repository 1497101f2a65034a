use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::EnrichError;

pub const DEFAULT_LOOKUP_FILE: &str = "Xia-Zai.csv";
pub const DEFAULT_DATASET_FILE: &str = "merged.json";
pub const DEFAULT_OUTPUT_FILE: &str = "merged_updated.json";

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "schoolpath.toml";

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnrichConfig {
    #[serde(default)]
    pub files: FilesConfig,
    #[serde(default)]
    pub lookup: LookupConfig,
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilesConfig {
    #[serde(default = "default_lookup_file")]
    pub lookup: PathBuf,
    #[serde(default = "default_dataset_file")]
    pub dataset: PathBuf,
    #[serde(default = "default_output_file")]
    pub output: PathBuf,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            lookup: default_lookup_file(),
            dataset: default_dataset_file(),
            output: default_output_file(),
        }
    }
}

fn default_lookup_file() -> PathBuf {
    DEFAULT_LOOKUP_FILE.into()
}

fn default_dataset_file() -> PathBuf {
    DEFAULT_DATASET_FILE.into()
}

fn default_output_file() -> PathBuf {
    DEFAULT_OUTPUT_FILE.into()
}

// ---------------------------------------------------------------------------
// Lookup columns + marker
// ---------------------------------------------------------------------------

/// Which CSV columns feed the lookup table, and what a qualifying row maps to.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LookupConfig {
    /// School name column ("kindergarten / school name").
    #[serde(default = "default_name_column")]
    pub name_column: String,
    /// Program continuity column ("one-dragon mode").
    #[serde(default = "default_mode_column")]
    pub mode_column: String,
    /// Mode value that qualifies a school.
    #[serde(default = "default_sentinel")]
    pub sentinel: String,
    /// Written to `relationship` for qualifying schools.
    #[serde(default = "default_marker")]
    pub marker: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            name_column: default_name_column(),
            mode_column: default_mode_column(),
            sentinel: default_sentinel(),
            marker: default_marker(),
        }
    }
}

fn default_name_column() -> String {
    "幼稚園／學校名稱".into()
}

fn default_mode_column() -> String {
    "一條龍模式".into()
}

fn default_sentinel() -> String {
    "一條龍".into()
}

fn default_marker() -> String {
    "有關係".into()
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl EnrichConfig {
    pub fn from_toml(input: &str) -> Result<Self, EnrichError> {
        let config: EnrichConfig =
            toml::from_str(input).map_err(|e| EnrichError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a config file. Relative file paths resolve against its directory.
    pub fn from_file(path: &Path) -> Result<Self, EnrichError> {
        let input = std::fs::read_to_string(path).map_err(|e| EnrichError::read(path, e))?;
        let mut config = Self::from_toml(&input)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        config.files.resolve_against(base_dir);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EnrichError> {
        let lookup = &self.lookup;

        if lookup.name_column.trim().is_empty() {
            return Err(EnrichError::Config("lookup.name_column must not be empty".into()));
        }
        if lookup.mode_column.trim().is_empty() {
            return Err(EnrichError::Config("lookup.mode_column must not be empty".into()));
        }
        if lookup.name_column.trim() == lookup.mode_column.trim() {
            return Err(EnrichError::Config(format!(
                "lookup.name_column and lookup.mode_column are both '{}'",
                lookup.name_column
            )));
        }
        // An empty sentinel would mark every row with a blank mode cell.
        if lookup.sentinel.trim().is_empty() {
            return Err(EnrichError::Config("lookup.sentinel must not be empty".into()));
        }

        Ok(())
    }
}

impl FilesConfig {
    fn resolve_against(&mut self, base_dir: &Path) {
        for path in [&mut self.lookup, &mut self.dataset, &mut self.output] {
            if path.is_relative() {
                *path = base_dir.join(&*path);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
