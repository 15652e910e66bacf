use gpui::{Context, Entity, IntoElement, ParentElement, Render, SharedString, Styled, Window, div};
use gpui_component::{
    ActiveTheme, StyledExt,
    group_box::{GroupBox, GroupBoxVariants},
};

use crate::{
    components::field_item::FieldItem,
    entities::{DataEntities, settings_entity::SettingsEntity},
};

/// Read-only view of the configuration the backend is running with.
pub struct SettingsPage {
    settings: Entity<SettingsEntity>,
}

impl SettingsPage {
    pub fn new(data: &DataEntities, cx: &mut Context<Self>) -> Self {
        cx.observe(&data.settings, |_, _, cx| cx.notify()).detach();
        Self {
            settings: data.settings.clone(),
        }
    }
}

fn value(text: impl ToString) -> SharedString {
    SharedString::from(text.to_string())
}

impl Render for SettingsPage {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let settings = self.settings.read(cx);
        let config = &settings.config;
        let muted = cx.theme().muted_foreground;

        div()
            .size_full()
            .flex()
            .flex_col()
            .gap_6()
            .child(div().child("Connection").text_2xl().font_bold())
            .child(div().text_sm().text_color(muted).child(if settings.received {
                "Edit the configuration file and restart the application to change these values."
            } else {
                "Waiting for the backend to report its configuration..."
            }))
            .child(
                GroupBox::new()
                    .outline()
                    .child(div().child("Server").text_xl().font_bold())
                    .child(
                        FieldItem::new()
                            .label("Address")
                            .child(value(&config.server.base_url)),
                    )
                    .child(
                        FieldItem::new()
                            .label("Request timeout")
                            .child(value(format!("{} s", config.server.request_timeout_secs))),
                    )
                    .child(
                        FieldItem::new()
                            .label("Primary source id")
                            .child(value(config.synthesis.primary_source_id)),
                    ),
            )
            .child(
                GroupBox::new()
                    .outline()
                    .child(div().child("Tables").text_xl().font_bold())
                    .child(
                        FieldItem::new()
                            .label("Records per page")
                            .child(value(config.tables.records_per_page)),
                    )
                    .child(
                        FieldItem::new()
                            .label("Projects per page")
                            .child(value(config.tables.projects_per_page)),
                    )
                    .child(
                        FieldItem::new()
                            .label("Reload after upload")
                            .child(value(format!("{} s", config.import.reload_delay_secs))),
                    )
                    .child(
                        FieldItem::new().label("Active project").child(value(
                            config.active_project.as_deref().unwrap_or("none"),
                        )),
                    ),
            )
    }
}
