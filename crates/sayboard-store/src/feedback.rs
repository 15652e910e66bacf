//! The single place where request outcomes become user-facing text.

use sayboard_bridge::{
    error::ApiError,
    notification::{NotificationMessage, NotificationType},
};

pub const NO_CHANGES: &str = "You have to make changes before update";
pub const ENTITY_GONE: &str = "Requested record was deleted. Reload the list";
pub const SERVER_FAILURE: &str = "Internal server error. Try again later";
pub const NO_PROJECT: &str = "Open a project on the projects page first";

/// A styled message shown as a form banner or a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub style: NotificationType,
    pub message: String,
}

impl Feedback {
    pub fn new(style: NotificationType, message: impl Into<String>) -> Self {
        Self {
            style,
            message: message.into(),
        }
    }

    pub fn for_api_error(error: &ApiError) -> Self {
        match error {
            ApiError::NotModified => Self::new(NotificationType::Warning, NO_CHANGES),
            ApiError::NotFound => Self::new(NotificationType::Warning, ENTITY_GONE),
            ApiError::Server { .. } => Self::new(NotificationType::Error, SERVER_FAILURE),
            ApiError::Rejected { status, messages } => {
                let message = messages
                    .first()
                    .map(|message| message.message.clone())
                    .unwrap_or_else(|| format!("Request was rejected by the server (HTTP {status})"));
                Self::new(NotificationType::Error, message)
            }
            ApiError::Transport(reason) => Self::new(
                NotificationType::Error,
                format!("Server is unreachable: {reason}"),
            ),
            ApiError::NoProject => Self::new(NotificationType::Warning, NO_PROJECT),
        }
    }

    /// Same feedback as a notification titled `title` plus the event time.
    pub fn into_notification(self, title: &str) -> NotificationMessage {
        NotificationMessage::new(self.style, self.message).title(format!(
            "{title} at {}",
            sayboard_bridge::notification::timestamp()
        ))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sayboard_bridge::error::FieldMessage;

    use super::*;

    #[test]
    fn one_message_per_error_kind() {
        let cases = [
            (ApiError::NotModified, NotificationType::Warning, NO_CHANGES),
            (ApiError::NotFound, NotificationType::Warning, ENTITY_GONE),
            (
                ApiError::Server { status: 503 },
                NotificationType::Error,
                SERVER_FAILURE,
            ),
        ];

        for (error, style, message) in cases {
            assert_eq!(Feedback::for_api_error(&error), Feedback::new(style, message));
        }
    }

    #[test]
    fn rejection_shows_first_server_message() {
        let error = ApiError::Rejected {
            status: 400,
            messages: vec![
                FieldMessage {
                    field: Some("name".to_owned()),
                    message: "This name already exists".to_owned(),
                },
                FieldMessage {
                    field: None,
                    message: "second".to_owned(),
                },
            ],
        };

        assert_eq!(
            Feedback::for_api_error(&error).message,
            "This name already exists"
        );
    }

    #[test]
    fn empty_rejection_mentions_status() {
        let error = ApiError::Rejected {
            status: 422,
            messages: Vec::new(),
        };

        assert!(Feedback::for_api_error(&error).message.contains("422"));
    }
}
