use serde_json::Value;

/// A message the server attached to a rejected request. `field` is `None` for
/// messages that do not belong to a particular form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMessage {
    pub field: Option<String>,
    pub message: String,
}

/// Keys the server uses for messages that are not tied to a field.
const COMMON_KEYS: [&str; 2] = ["non_field_errors", "detail"];

/// Outcome of a request that did not produce the expected entity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The server had nothing to change (HTTP 304 or 409).
    #[error("nothing was modified")]
    NotModified,
    /// The entity no longer exists on the server (HTTP 404).
    #[error("entity was not found")]
    NotFound,
    /// The server failed while handling the request (HTTP 5xx).
    #[error("server error (HTTP {status})")]
    Server { status: u16 },
    /// The server rejected the request input (other HTTP 4xx). `messages`
    /// keeps the order of the response body.
    #[error("request rejected (HTTP {status})")]
    Rejected {
        status: u16,
        messages: Vec<FieldMessage>,
    },
    /// The request never produced a usable response: connection failure,
    /// timeout or an undecodable body.
    #[error("transport failure: {0}")]
    Transport(String),
    /// A record request was issued before any project was opened.
    #[error("no project is open")]
    NoProject,
}

impl ApiError {
    /// Classifies a non-successful response by its status code, extracting
    /// field messages from `body` when the request was rejected.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            304 | 409 => Self::NotModified,
            404 => Self::NotFound,
            500.. => Self::Server { status },
            _ => Self::Rejected {
                status,
                messages: parse_messages(body),
            },
        }
    }

    /// First message attached to `field`, if the server rejected it.
    pub fn field_message(&self, field: &str) -> Option<&str> {
        match self {
            Self::Rejected { messages, .. } => messages
                .iter()
                .find(|message| message.field.as_deref() == Some(field))
                .map(|message| message.message.as_str()),
            _ => None,
        }
    }
}

/// Extracts messages from an error body. Accepts `{"field": "msg"}`,
/// `{"field": ["msg", ...]}`, `["msg"]`, a bare JSON string, and any of those
/// encoded once more as a JSON string.
pub fn parse_messages(body: &str) -> Vec<FieldMessage> {
    let body = body.trim();
    if body.is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<Value>(body) {
        Ok(value) => messages_from_value(value),
        Err(_) => vec![FieldMessage {
            field: None,
            message: body.to_owned(),
        }],
    }
}

fn messages_from_value(value: Value) -> Vec<FieldMessage> {
    match value {
        Value::Object(map) => map
            .into_iter()
            .filter_map(|(key, value)| {
                let message = flatten_text(value)?;
                let field = (!COMMON_KEYS.contains(&key.as_str())).then_some(key);
                Some(FieldMessage { field, message })
            })
            .collect(),
        Value::String(text) => match serde_json::from_str::<Value>(&text) {
            Ok(inner @ (Value::Object(_) | Value::Array(_) | Value::String(_))) => {
                messages_from_value(inner)
            }
            _ => vec![FieldMessage {
                field: None,
                message: text,
            }],
        },
        other => flatten_text(other)
            .map(|message| FieldMessage {
                field: None,
                message,
            })
            .into_iter()
            .collect(),
    }
}

fn flatten_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(unquote(text)),
        Value::Array(items) => {
            let parts: Vec<String> = items.into_iter().filter_map(flatten_text).collect();
            (!parts.is_empty()).then(|| parts.join(" "))
        }
        other => Some(other.to_string()),
    }
}

/// Strips one level of JSON string encoding, as produced by servers that
/// `json.dumps` an exception text before wrapping it.
fn unquote(text: String) -> String {
    match serde_json::from_str::<String>(&text) {
        Ok(inner) => inner,
        Err(_) => text,
    }
}
