use gpui::{IntoElement, ParentElement, SharedString, Styled, div, prelude::FluentBuilder};
use gpui_component::{ActiveTheme, StyledExt};

/// A labelled row: the label on the left, the control on the right and the
/// control's error message, if any, below it.
#[derive(Default, IntoElement)]
pub struct FieldItem {
    label: SharedString,
    child: Option<gpui::AnyElement>,
    error: Option<SharedString>,
}

impl FieldItem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<SharedString>) -> Self {
        self.label = label.into();
        self
    }

    pub fn child(mut self, child: impl IntoElement) -> Self {
        self.child = Some(child.into_any_element());
        self
    }

    pub fn error(mut self, error: Option<&str>) -> Self {
        self.error = error.map(|message| SharedString::from(message.to_owned()));
        self
    }
}

impl gpui::RenderOnce for FieldItem {
    fn render(self, _: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        let danger = cx.theme().danger;

        div()
            .w_full()
            .flex()
            .flex_col()
            .gap_1()
            .child(
                div()
                    .w_full()
                    .flex()
                    .items_center()
                    .justify_between()
                    .gap_4()
                    .child(div().child(self.label).font_semibold())
                    .when_some(self.child, |this, child| {
                        this.child(div().w_2_3().child(child))
                    }),
            )
            .when_some(self.error, |this, error| {
                this.child(div().text_sm().text_color(danger).child(error))
            })
    }
}
