use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Request to import records from a prepared CSV/IMED/XLS file. Every row is
/// synthesized with the same source, voice, emotion and speed.
#[derive(Debug, Clone, PartialEq)]
pub struct FileImport {
    pub path: PathBuf,
    pub source_id: u64,
    pub voice: String,
    pub emotion: Option<String>,
    pub speed: f64,
}

/// Request to upload already recorded audio files; each file replaces the
/// record whose name matches the file name.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnFilesImport {
    pub files: Vec<PathBuf>,
    pub voice: String,
}

/// Server report for an own-files import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ImportReport {
    #[serde(default)]
    pub success: Vec<String>,
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Result of a file import the server accepted. Rows the server could not
/// process are listed in `skipped`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileImportOutcome {
    pub skipped: Vec<String>,
}
