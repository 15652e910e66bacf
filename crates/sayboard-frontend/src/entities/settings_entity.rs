use gpui::{AppContext, Entity};
use sayboard_bridge::config::Config;

/// Configuration as last reported by the backend.
#[derive(Debug, Clone, Default)]
pub struct SettingsEntity {
    pub config: Config,
    /// Whether the backend answered the configuration request yet.
    pub received: bool,
}

impl SettingsEntity {
    pub fn update<C: AppContext>(entity: &Entity<Self>, config: Config, cx: &mut C) {
        let _ = entity.update(cx, |this, cx| {
            this.config = config;
            this.received = true;
            cx.notify();
        });
    }
}
