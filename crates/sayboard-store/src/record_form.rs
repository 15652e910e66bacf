use sayboard_bridge::record::{AudioRecord, NewRecord, RecordPatch};

use crate::{
    catalog::SourceCatalog,
    form::{Draft, FormError},
};

pub const DEFAULT_SPEED: &str = "1.0";

/// Record names are used in URLs and file names on the server.
pub fn validate_record_name(name: &str) -> Result<(), FormError> {
    if name.trim().is_empty() {
        return Err(FormError::Empty { field: "name" });
    }
    if name.contains(' ') || name.contains('/') {
        return Err(FormError::InvalidName);
    }
    Ok(())
}

pub fn validate_text(text: &str) -> Result<(), FormError> {
    if text.trim().is_empty() {
        return Err(FormError::Empty { field: "text" });
    }
    Ok(())
}

pub fn parse_speed(speed: &str) -> Result<f64, FormError> {
    match speed.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(value),
        _ => Err(FormError::InvalidSpeed),
    }
}

/// Compares speeds numerically so `"1.0"` and `"1.00"` are the same speed.
fn same_speed(a: &str, b: &str) -> bool {
    match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a.trim() == b.trim(),
    }
}

/// Voice/emotion pair after switching to `source`: its first voice and its
/// first emotion, if it has any.
fn defaults_for(source: &str, catalog: &SourceCatalog) -> (Option<String>, Option<String>) {
    (
        catalog.voices(source).first().cloned(),
        catalog.emotions(source).first().cloned(),
    )
}

/// Draft of a new record.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDraft {
    pub name: String,
    pub text: String,
    pub source: String,
    pub voice: Option<String>,
    pub emotion: Option<String>,
    pub speed: String,
    /// Send to the update endpoint, replacing a record with the same name.
    pub overwrite: bool,
}

impl Default for RecordDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            text: String::new(),
            source: String::new(),
            voice: None,
            emotion: None,
            speed: DEFAULT_SPEED.to_owned(),
            overwrite: false,
        }
    }
}

impl RecordDraft {
    /// Blank draft preset to the first source of the catalog.
    pub fn new(catalog: &SourceCatalog) -> Self {
        let mut draft = Self::default();
        if let Some(source) = catalog.first_name() {
            draft.select_source(source, catalog);
        }
        draft
    }

    pub fn select_source(&mut self, source: &str, catalog: &SourceCatalog) {
        self.source = source.to_owned();
        (self.voice, self.emotion) = defaults_for(source, catalog);
    }
}

/// Validated creation request.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateRecordRequest {
    pub request: NewRecord,
    pub overwrite: bool,
}

impl Draft for RecordDraft {
    type Request = CreateRecordRequest;
    type Context = SourceCatalog;

    fn to_request(&self, catalog: &SourceCatalog) -> Result<CreateRecordRequest, FormError> {
        validate_record_name(&self.name)?;
        validate_text(&self.text)?;
        let source = catalog
            .get(&self.source)
            .ok_or_else(|| FormError::UnknownSource(self.source.clone()))?;
        let voice = self
            .voice
            .clone()
            .filter(|voice| !voice.is_empty())
            .ok_or(FormError::MissingVoice)?;
        let speed = parse_speed(&self.speed)?;

        Ok(CreateRecordRequest {
            request: NewRecord {
                name: self.name.trim().to_owned(),
                text: self.text.clone(),
                speed,
                tts: source.id,
                voice,
                emotion: self.emotion.clone(),
            },
            overwrite: self.overwrite,
        })
    }

    fn reset_after_success(&mut self) {
        self.name.clear();
        self.text.clear();
    }
}

/// Draft of an edit to an existing record, remembering the values the form
/// was opened with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordEditDraft {
    baseline: Option<AudioRecord>,
    /// Catalog voice picked for the baseline. The server strips digits from
    /// voice names, so this is what an unchanged voice looks like.
    seeded_voice: Option<String>,
    pub text: String,
    pub source: String,
    pub voice: Option<String>,
    pub emotion: Option<String>,
    pub speed: String,
}

impl RecordEditDraft {
    /// Seeds the draft from a table row and the catalog entry of its source.
    pub fn seed(record: &AudioRecord, catalog: &SourceCatalog) -> Self {
        let voice = catalog
            .voices(&record.source)
            .iter()
            .find(|voice| voice.starts_with(record.voice.as_str()))
            .cloned();

        Self {
            baseline: Some(record.clone()),
            seeded_voice: voice.clone(),
            text: record.text.clone(),
            source: record.source.clone(),
            voice,
            emotion: record.emotion.clone(),
            speed: record.playing_speed.clone(),
        }
    }

    pub fn baseline(&self) -> Option<&AudioRecord> {
        self.baseline.as_ref()
    }

    pub fn select_source(&mut self, source: &str, catalog: &SourceCatalog) {
        self.source = source.to_owned();
        (self.voice, self.emotion) = defaults_for(source, catalog);
    }

    /// Builds the patch of changed fields. An unchanged draft is refused with
    /// [`FormError::NoChanges`].
    pub fn build_patch(&self, catalog: &SourceCatalog) -> Result<RecordPatch, FormError> {
        let Some(baseline) = &self.baseline else {
            return Err(FormError::NoChanges);
        };

        validate_text(&self.text)?;
        let source = catalog
            .get(&self.source)
            .ok_or_else(|| FormError::UnknownSource(self.source.clone()))?;

        let mut patch = RecordPatch {
            tts: source.id,
            ..RecordPatch::default()
        };
        if self.text != baseline.text {
            patch.text = Some(self.text.clone());
        }
        if self.emotion != baseline.emotion {
            patch.emotion = Some(self.emotion.clone());
        }
        if self.voice.is_some() && self.voice != self.seeded_voice {
            patch.voice = self.voice.clone();
        }
        if !same_speed(&self.speed, &baseline.playing_speed) {
            patch.speed = Some(parse_speed(&self.speed)?);
        }

        if patch.is_empty() {
            return Err(FormError::NoChanges);
        }
        Ok(patch)
    }
}

/// Validated edit request.
#[derive(Debug, Clone, PartialEq)]
pub struct EditRecordRequest {
    pub id: u64,
    pub previous_name: String,
    pub patch: RecordPatch,
}

impl Draft for RecordEditDraft {
    type Request = EditRecordRequest;
    type Context = SourceCatalog;

    fn to_request(&self, catalog: &SourceCatalog) -> Result<EditRecordRequest, FormError> {
        let patch = self.build_patch(catalog)?;
        let baseline = self.baseline.as_ref().ok_or(FormError::NoChanges)?;
        Ok(EditRecordRequest {
            id: baseline.id,
            previous_name: baseline.name.clone(),
            patch,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sayboard_bridge::source::SourcePayload;

    use super::*;
    use crate::form::FormController;

    fn catalog() -> SourceCatalog {
        let payloads: Vec<SourcePayload> = serde_json::from_str(
            r#"[
                {"name": "yandex", "id": 1, "voices": ["alyss", "jane"], "emote": ["good", "evil"]},
                {"name": "crt", "id": 2, "voices": ["oksana2", "pavel"], "emote": null}
            ]"#,
        )
        .unwrap();
        SourceCatalog::from_payloads(payloads)
    }

    fn record() -> AudioRecord {
        AudioRecord {
            id: 42,
            name: "greeting".to_owned(),
            text: "hello".to_owned(),
            source: "yandex".to_owned(),
            voice: "alyss".to_owned(),
            emotion: Some("good".to_owned()),
            playing_speed: "1.00".to_owned(),
            modified_at: String::new(),
            audio: None,
            show_details: false,
        }
    }

    #[test]
    fn name_rules() {
        assert_eq!(validate_record_name("intro_01"), Ok(()));
        assert_eq!(
            validate_record_name("   "),
            Err(FormError::Empty { field: "name" })
        );
        assert_eq!(validate_record_name("two words"), Err(FormError::InvalidName));
        assert_eq!(validate_record_name("a/b"), Err(FormError::InvalidName));
    }

    #[test]
    fn new_draft_takes_first_source_defaults() {
        let draft = RecordDraft::new(&catalog());

        assert_eq!(draft.source, "yandex");
        assert_eq!(draft.voice.as_deref(), Some("alyss"));
        assert_eq!(draft.emotion.as_deref(), Some("good"));
        assert_eq!(draft.speed, DEFAULT_SPEED);
    }

    #[test]
    fn switching_to_source_without_emotions_clears_emotion() {
        let catalog = catalog();
        let mut draft = RecordDraft::new(&catalog);
        draft.select_source("crt", &catalog);

        assert_eq!(draft.voice.as_deref(), Some("oksana2"));
        assert_eq!(draft.emotion, None);
    }

    #[test]
    fn create_request_is_built_from_valid_draft() {
        let catalog = catalog();
        let mut draft = RecordDraft::new(&catalog);
        draft.name = "intro".to_owned();
        draft.text = "Welcome".to_owned();
        draft.speed = "1.25".to_owned();

        let request = draft.to_request(&catalog).unwrap();
        assert_eq!(
            request.request,
            NewRecord {
                name: "intro".to_owned(),
                text: "Welcome".to_owned(),
                speed: 1.25,
                tts: 1,
                voice: "alyss".to_owned(),
                emotion: Some("good".to_owned()),
            }
        );
        assert!(!request.overwrite);
    }

    #[test]
    fn create_is_blocked_for_unknown_source() {
        let mut draft = RecordDraft::new(&SourceCatalog::default());
        draft.name = "intro".to_owned();
        draft.text = "Welcome".to_owned();

        assert_eq!(
            draft.to_request(&SourceCatalog::default()),
            Err(FormError::UnknownSource(String::new()))
        );
    }

    #[test]
    fn create_success_clears_name_and_text_only() {
        let catalog = catalog();
        let mut form = FormController::new(RecordDraft::new(&catalog));
        form.reopen();
        form.draft_mut().name = "intro".to_owned();
        form.draft_mut().text = "Welcome".to_owned();
        form.submit(&catalog).unwrap();
        form.succeed();

        assert!(form.draft().name.is_empty());
        assert!(form.draft().text.is_empty());
        assert_eq!(form.draft().source, "yandex");
    }

    #[test]
    fn only_changed_text_is_patched() {
        let catalog = catalog();
        let mut draft = RecordEditDraft::seed(&record(), &catalog);
        draft.text = "hello world".to_owned();

        let patch = draft.build_patch(&catalog).unwrap();
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({"tts": 1, "text": "hello world"})
        );
    }

    #[test]
    fn unchanged_edit_is_refused_locally() {
        let catalog = catalog();
        let mut form = FormController::default();
        form.open(RecordEditDraft::seed(&record(), &catalog));
        form.draft_mut().speed = "1.0".to_owned();

        assert_eq!(form.submit(&catalog), Err(FormError::NoChanges));
        assert!(!form.is_submitting());
        assert_eq!(
            form.errors().common.as_ref().unwrap().message,
            crate::feedback::NO_CHANGES
        );
    }

    #[test]
    fn seeded_voice_matches_stripped_server_voice() {
        let catalog = catalog();
        let mut row = record();
        row.source = "crt".to_owned();
        row.voice = "oksana".to_owned();
        row.emotion = None;

        let draft = RecordEditDraft::seed(&row, &catalog);
        assert_eq!(draft.voice.as_deref(), Some("oksana2"));
        assert_eq!(draft.build_patch(&catalog), Err(FormError::NoChanges));
    }

    #[test]
    fn edit_request_carries_id_and_previous_name() {
        let catalog = catalog();
        let mut draft = RecordEditDraft::seed(&record(), &catalog);
        draft.speed = "1.5".to_owned();
        draft.emotion = Some("evil".to_owned());

        let request = draft.to_request(&catalog).unwrap();
        assert_eq!(request.id, 42);
        assert_eq!(request.previous_name, "greeting");
        assert_eq!(request.patch.speed, Some(1.5));
        assert_eq!(request.patch.emotion, Some(Some("evil".to_owned())));
        assert_eq!(request.patch.text, None);
    }

    #[test]
    fn invalid_speed_is_reported_on_its_field() {
        let catalog = catalog();
        let mut draft = RecordEditDraft::seed(&record(), &catalog);
        draft.speed = "fast".to_owned();

        assert_eq!(draft.build_patch(&catalog), Err(FormError::InvalidSpeed));
    }
}
