use std::{fmt::Write, path::PathBuf, time::Duration};

use sayboard_bridge::{
    import::{FileImport, ImportReport, OwnFilesImport},
    notification::{NotificationMessage, timestamp},
};

use crate::{
    catalog::SourceCatalog,
    form::{Draft, FormError},
    record_form::{DEFAULT_SPEED, parse_speed},
};

/// Draft of a prepared-file import.
#[derive(Debug, Clone, PartialEq)]
pub struct FileImportDraft {
    pub path: Option<PathBuf>,
    pub source: String,
    pub voice: Option<String>,
    pub emotion: Option<String>,
    pub speed: String,
}

impl Default for FileImportDraft {
    fn default() -> Self {
        Self {
            path: None,
            source: String::new(),
            voice: None,
            emotion: None,
            speed: DEFAULT_SPEED.to_owned(),
        }
    }
}

impl FileImportDraft {
    pub fn new(catalog: &SourceCatalog) -> Self {
        let mut draft = Self::default();
        if let Some(source) = catalog.first_name() {
            draft.select_source(source, catalog);
        }
        draft
    }

    pub fn select_source(&mut self, source: &str, catalog: &SourceCatalog) {
        self.source = source.to_owned();
        self.voice = catalog.voices(source).first().cloned();
        self.emotion = catalog.emotions(source).first().cloned();
    }
}

impl Draft for FileImportDraft {
    type Request = FileImport;
    type Context = SourceCatalog;

    fn to_request(&self, catalog: &SourceCatalog) -> Result<FileImport, FormError> {
        let path = self.path.clone().ok_or(FormError::NoFiles)?;
        let source = catalog
            .get(&self.source)
            .ok_or_else(|| FormError::UnknownSource(self.source.clone()))?;
        let voice = self.voice.clone().ok_or(FormError::MissingVoice)?;

        Ok(FileImport {
            path,
            source_id: source.id,
            voice,
            emotion: self.emotion.clone(),
            speed: parse_speed(&self.speed)?,
        })
    }

    fn reset_after_success(&mut self) {
        self.path = None;
    }
}

/// Draft of an upload of already recorded audio files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnFilesDraft {
    pub files: Vec<PathBuf>,
    /// Free-text name of the actor who recorded the files.
    pub voice: String,
}

impl Draft for OwnFilesDraft {
    type Request = OwnFilesImport;
    type Context = ();

    fn to_request(&self, _: &()) -> Result<OwnFilesImport, FormError> {
        if self.voice.trim().is_empty() {
            return Err(FormError::MissingActor);
        }
        if self.files.is_empty() {
            return Err(FormError::NoFiles);
        }

        Ok(OwnFilesImport {
            files: self.files.clone(),
            voice: self.voice.trim().to_owned(),
        })
    }

    fn reset_after_success(&mut self) {
        self.files.clear();
    }
}

/// How an own-files import went, judged from the server report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportVerdict {
    /// No file was rejected.
    Complete,
    /// Some files were imported, some were not.
    Partial,
    /// Nothing was imported.
    Failed,
}

impl ImportVerdict {
    /// A report without errors is a complete import, even when the server
    /// listed no successes.
    pub fn of(report: &ImportReport) -> Self {
        match (report.errors.is_empty(), report.success.is_empty()) {
            (true, _) => Self::Complete,
            (false, false) => Self::Partial,
            (false, true) => Self::Failed,
        }
    }

    /// Imported files replace existing audio, so the list is stale unless
    /// nothing was imported.
    pub fn needs_reload(self) -> bool {
        self != Self::Failed
    }

    pub fn notification(self, reload_delay: Duration) -> NotificationMessage {
        match self {
            Self::Complete => NotificationMessage::success(format!(
                "Import was successful at {}. The list will be reloaded within {} seconds",
                timestamp(),
                reload_delay.as_secs()
            ))
            .title("Successful import")
            .auto_hide(reload_delay.saturating_sub(Duration::from_millis(500))),
            Self::Partial => NotificationMessage::warning("Import was partially successful")
                .title("Partial import")
                .auto_hide(Duration::from_secs(5)),
            Self::Failed => NotificationMessage::error("None of the uploaded files could be imported")
                .title(format!("Import error at {}", timestamp()))
                .auto_hide(Duration::from_secs(10)),
        }
    }
}

/// Text listing the files the server refused, shown below the import form.
/// Empty when every file was imported.
pub fn report_text(report: &ImportReport) -> String {
    if report.errors.is_empty() {
        return String::new();
    }

    let mut text = String::from("Following files were not imported:\n");
    for (index, error) in report.errors.iter().enumerate() {
        let _ = writeln!(text, "{index}: {error}");
    }
    text.push_str("Tip: reload the list to check which files were replaced");
    text
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn report(success: &[&str], errors: &[&str]) -> ImportReport {
        ImportReport {
            success: success.iter().map(|s| s.to_string()).collect(),
            errors: errors.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn verdicts() {
        assert_eq!(ImportVerdict::of(&report(&["a.wav"], &[])), ImportVerdict::Complete);
        assert_eq!(
            ImportVerdict::of(&report(&["a.wav"], &["b.wav: unknown name"])),
            ImportVerdict::Partial
        );
        assert_eq!(
            ImportVerdict::of(&report(&[], &["b.wav: unknown name"])),
            ImportVerdict::Failed
        );
        assert!(ImportVerdict::Partial.needs_reload());
        assert!(!ImportVerdict::Failed.needs_reload());
    }

    #[test]
    fn empty_report_counts_as_complete() {
        assert_eq!(ImportVerdict::of(&report(&[], &[])), ImportVerdict::Complete);
        assert_eq!(report_text(&report(&[], &[])), "");
    }

    #[test]
    fn report_lists_failed_files() {
        assert_eq!(
            report_text(&report(&["a.wav"], &["b.wav: unknown name", "c.txt: not audio"])),
            "Following files were not imported:\n\
             0: b.wav: unknown name\n\
             1: c.txt: not audio\n\
             Tip: reload the list to check which files were replaced"
        );
        assert_eq!(report_text(&report(&["a.wav"], &[])), "");
    }

    #[test]
    fn own_files_need_voice_then_files() {
        let mut draft = OwnFilesDraft::default();
        assert_eq!(draft.to_request(&()), Err(FormError::MissingActor));

        draft.voice = "Anna".to_owned();
        assert_eq!(draft.to_request(&()), Err(FormError::NoFiles));

        draft.files.push(PathBuf::from("/tmp/intro.wav"));
        assert_eq!(draft.to_request(&()).unwrap().files.len(), 1);
    }

    #[test]
    fn file_import_needs_a_file() {
        let draft = FileImportDraft::default();
        assert_eq!(draft.to_request(&SourceCatalog::default()), Err(FormError::NoFiles));
    }
}
