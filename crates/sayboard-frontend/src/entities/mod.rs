use gpui::Entity;
use sayboard_store::session::Session;

pub mod settings_entity;

/// Entities shared by every page. The session is the single owner of
/// client-side state; views only read it and call its methods.
#[derive(Debug, Clone)]
pub struct DataEntities {
    pub session: Entity<Session>,
    pub settings: Entity<settings_entity::SettingsEntity>,
}
