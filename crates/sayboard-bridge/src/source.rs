use serde::{Deserialize, Serialize};

/// Metadata describing a single synthesis provider, as stored in the source
/// catalog.
///
/// The provider name is deliberately absent: it is the key under which this
/// value is stored, see [`SourcePayload`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SourceMeta {
    /// Server-assigned identifier, sent back as `tts` in record requests.
    pub id: u64,
    /// Voices offered by the provider, in server order.
    #[serde(default)]
    pub voices: Vec<String>,
    /// Emotions offered by the provider. `None` when the provider has no
    /// emotion support at all.
    #[serde(default)]
    pub emote: Option<Vec<String>>,
    /// Any attribute the server adds that the client does not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SourceMeta {
    /// Emotions offered by the provider, empty when it has none.
    pub fn emotions(&self) -> &[String] {
        self.emote.as_deref().unwrap_or_default()
    }
}

/// A provider entry exactly as the sources endpoint returns it.
///
/// `name` is consumed by this struct, so the flattened [`SourceMeta`] never
/// sees it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SourcePayload {
    pub name: String,
    #[serde(flatten)]
    pub meta: SourceMeta,
}

/// One entry of a selection list shown by the record forms.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SelectOption {
    pub text: String,
    pub value: String,
}

impl SelectOption {
    /// Builds an option that displays and submits the same string.
    pub fn same(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            text: label.clone(),
            value: label,
        }
    }
}
