//! Conversion of bridge notifications into toolkit notifications.

use gpui::{App, Window};
use gpui_component::{
    WindowExt,
    notification::{Notification, NotificationType},
};
use sayboard_bridge::notification::{self, NotificationMessage};

fn notification_type(kind: notification::NotificationType) -> NotificationType {
    match kind {
        notification::NotificationType::Info => NotificationType::Info,
        notification::NotificationType::Success => NotificationType::Success,
        notification::NotificationType::Warning => NotificationType::Warning,
        notification::NotificationType::Error => NotificationType::Error,
    }
}

/// Shows `message` in the window's notification layer. Errors without an
/// explicit delay stay until dismissed.
pub fn push(message: NotificationMessage, window: &mut Window, cx: &mut App) {
    let sticky = message.auto_hide.is_none()
        && message.notification_type == notification::NotificationType::Error;

    let mut toast = Notification::new()
        .message(message.message)
        .with_type(notification_type(message.notification_type))
        .autohide(!sticky);
    if let Some(title) = message.title {
        toast = toast.title(title);
    }

    window.push_notification(toast, cx);
}
