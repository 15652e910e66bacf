use std::time::Duration;

/// Severity or category for user-visible notifications.
///
/// This enum classifies notifications by their intent and visual styling,
/// allowing the UI to display them appropriately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    /// Neutral informational message that does not indicate success or failure.
    Info,
    /// Indicates a successful operation or positive outcome.
    Success,
    /// Indicates a non-critical issue that the user should be aware of, but
    /// does not prevent normal operation.
    Warning,
    /// Indicates an error or failure that may affect functionality.
    Error,
}

/// A notification payload intended for the user interface.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationMessage {
    /// The type/severity of the notification, determining its visual style.
    pub notification_type: NotificationType,
    /// Short heading shown above the message.
    pub title: Option<String>,
    /// The text content to display to the user.
    pub message: String,
    /// How long the notification stays visible. `None` keeps the toolkit's
    /// default.
    pub auto_hide: Option<Duration>,
}

impl NotificationMessage {
    pub fn new(notification_type: NotificationType, message: impl Into<String>) -> Self {
        Self {
            notification_type,
            title: None,
            message: message.into(),
            auto_hide: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationType::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationType::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationType::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationType::Error, message)
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn auto_hide(mut self, delay: Duration) -> Self {
        self.auto_hide = Some(delay);
        self
    }

    /// Transient notice shown whenever a long-running request is dispatched.
    pub fn task_in_progress() -> Self {
        Self::info("Generating content. Do not close the application")
            .title(format!("Task executed at {}", timestamp()))
    }
}

/// Local wall-clock time used in notification titles.
pub fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_progress_notice_is_informational() {
        let notice = NotificationMessage::task_in_progress();

        assert_eq!(notice.notification_type, NotificationType::Info);
        assert!(notice.title.unwrap().starts_with("Task executed at "));
    }

    #[test]
    fn timestamp_has_date_and_time() {
        let stamp = timestamp();

        assert_eq!(stamp.len(), "2024-01-01 00:00:00".len());
        assert_eq!(&stamp[4..5], "-");
        assert_eq!(&stamp[10..11], " ");
    }
}
