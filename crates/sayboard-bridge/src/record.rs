use serde::{Deserialize, Deserializer, Serialize};

/// A synthesized audio record inside a project.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AudioRecord {
    pub id: u64,
    /// Unique inside a project, used to find the record again after an edit.
    pub name: String,
    pub text: String,
    /// Name of the source (provider) that synthesized the audio.
    pub source: String,
    pub voice: String,
    #[serde(rename = "emote", alias = "emotion", default)]
    pub emotion: Option<String>,
    /// Decimal playback speed, kept in the server's textual form.
    #[serde(deserialize_with = "decimal_string")]
    pub playing_speed: String,
    #[serde(default)]
    pub modified_at: String,
    /// Link to the synthesized audio file, when the server exposes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    /// Whether the table row is expanded. Never sent to or read from the
    /// server.
    #[serde(skip)]
    pub show_details: bool,
}

/// Body of a record creation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewRecord {
    pub name: String,
    pub text: String,
    pub speed: f64,
    /// Identifier of the chosen source.
    pub tts: u64,
    pub voice: String,
    pub emotion: Option<String>,
}

/// Partial update of an existing record. Only the changed fields are present;
/// `tts` is always sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordPatch {
    pub tts: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    /// `Some(None)` clears the emotion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

impl RecordPatch {
    /// Returns `true` when nothing besides the source id would be sent.
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.voice.is_none() && self.emotion.is_none() && self.speed.is_none()
    }
}

/// Accepts both `"1.00"` and `1.0` for decimal fields.
fn decimal_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Decimal {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Decimal::deserialize(deserializer)? {
        Decimal::Text(text) => text,
        Decimal::Number(number) => number.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn reads_server_record() {
        let raw = r#"{
            "id": 7,
            "name": "greeting",
            "text": "hello",
            "source": "yandex",
            "voice": "alyss",
            "emote": "good",
            "playing_speed": "1.00",
            "modified_at": "19-10-17 Thu 17:24:00",
            "audio": "/media/greeting.wav"
        }"#;
        let record: AudioRecord = serde_json::from_str(raw).unwrap();

        assert_eq!(record.emotion.as_deref(), Some("good"));
        assert_eq!(record.playing_speed, "1.00");
        assert!(!record.show_details);
    }

    #[test]
    fn numeric_speed_is_accepted() {
        let raw = r#"{"id": 1, "name": "a", "text": "b", "source": "s", "voice": "v", "playing_speed": 1.5}"#;
        let record: AudioRecord = serde_json::from_str(raw).unwrap();

        assert_eq!(record.playing_speed, "1.5");
        assert_eq!(record.emotion, None);
    }

    #[test]
    fn patch_only_carries_changed_fields() {
        let patch = RecordPatch {
            tts: 3,
            text: Some("hello world".to_owned()),
            ..RecordPatch::default()
        };

        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({"tts": 3, "text": "hello world"})
        );
    }

    #[test]
    fn cleared_emotion_is_sent_as_null() {
        let patch = RecordPatch {
            tts: 1,
            emotion: Some(None),
            ..RecordPatch::default()
        };

        assert!(!patch.is_empty());
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({"tts": 1, "emotion": null})
        );
    }
}
