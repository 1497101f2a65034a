use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnrichError {
    /// An input file does not exist.
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// A required column is absent from the lookup CSV header.
    #[error("missing column '{column}'")]
    MissingColumn { column: String },

    /// Malformed CSV or JSON content.
    #[error("{}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// Read or write failure other than a missing input.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parse / validation error.
    #[error("config error: {0}")]
    Config(String),
}

impl EnrichError {
    pub(crate) fn parse(path: impl Into<PathBuf>, message: impl std::fmt::Display) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Map a read failure on an input file. Not-found and non-UTF-8 content get
    /// their own kinds.
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::FileNotFound { path },
            std::io::ErrorKind::InvalidData => Self::parse(path, source),
            _ => Self::Io { path, source },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_not_found_becomes_file_not_found() {
        let err = EnrichError::read(
            "merged.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, EnrichError::FileNotFound { .. }));
        assert_eq!(err.to_string(), "file not found: merged.json");
    }

    #[test]
    fn read_permission_denied_stays_io() {
        let err = EnrichError::read(
            "merged.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, EnrichError::Io { .. }));
    }

    #[test]
    fn read_invalid_utf8_is_parse() {
        let err = EnrichError::read(
            "Xia-Zai.csv",
            std::io::Error::new(std::io::ErrorKind::InvalidData, "stream did not contain valid UTF-8"),
        );
        assert!(matches!(err, EnrichError::Parse { .. }));
    }
}
