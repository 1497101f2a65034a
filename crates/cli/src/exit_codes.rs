//! CLI Exit Code Registry
//!
//! Single source of truth for `schoolpath` exit codes.
//! Scripts rely on these, so codes are never reused.
//!
//! | Code | Meaning                                        |
//! |------|------------------------------------------------|
//! | 0    | Success                                        |
//! | 1    | General error (unspecified)                    |
//! | 2    | Usage error (bad args, invalid config)         |
//! | 3    | Input file not found                           |
//! | 4    | Lookup CSV is missing a required column        |
//! | 5    | Malformed CSV or JSON input                    |
//! | 6    | I/O error (output cannot be written)           |

use schoolpath_enrich::EnrichError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments or an invalid config file.
pub const EXIT_USAGE: u8 = 2;

/// Lookup CSV or dataset JSON does not exist.
pub const EXIT_NOT_FOUND: u8 = 3;

/// Lookup CSV header lacks the name or mode column.
pub const EXIT_MISSING_COLUMN: u8 = 4;

/// Input could not be parsed.
pub const EXIT_PARSE: u8 = 5;

/// Read/write failure other than a missing input.
pub const EXIT_IO: u8 = 6;

/// Map an engine error to its exit code.
pub fn enrich_exit_code(err: &EnrichError) -> u8 {
    match err {
        EnrichError::FileNotFound { .. } => EXIT_NOT_FOUND,
        EnrichError::MissingColumn { .. } => EXIT_MISSING_COLUMN,
        EnrichError::Parse { .. } => EXIT_PARSE,
        EnrichError::Io { .. } => EXIT_IO,
        EnrichError::Config(_) => EXIT_USAGE,
    }
}
