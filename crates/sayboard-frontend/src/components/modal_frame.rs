use gpui::{
    AnyElement, InteractiveElement, IntoElement, ParentElement, SharedString, Styled, div, hsla, px,
    prelude::FluentBuilder,
};
use gpui_component::{ActiveTheme, StyledExt};
use sayboard_bridge::notification::NotificationType;
use sayboard_store::feedback::Feedback;

/// Dimmed overlay with a centered dialog: title, optional banner, body rows
/// and a footer with the actions.
#[derive(IntoElement)]
pub struct ModalFrame {
    title: SharedString,
    banner: Option<Feedback>,
    rows: Vec<AnyElement>,
    footer: Option<AnyElement>,
}

impl ModalFrame {
    pub fn new(title: impl Into<SharedString>) -> Self {
        Self {
            title: title.into(),
            banner: None,
            rows: Vec::new(),
            footer: None,
        }
    }

    pub fn banner(mut self, banner: Option<Feedback>) -> Self {
        self.banner = banner;
        self
    }

    pub fn row(mut self, row: impl IntoElement) -> Self {
        self.rows.push(row.into_any_element());
        self
    }

    pub fn footer(mut self, footer: impl IntoElement) -> Self {
        self.footer = Some(footer.into_any_element());
        self
    }
}

impl gpui::RenderOnce for ModalFrame {
    fn render(self, _: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        let theme = cx.theme();
        let banner_color = |style: NotificationType| match style {
            NotificationType::Error => theme.danger,
            NotificationType::Warning => theme.warning,
            NotificationType::Success => theme.success,
            NotificationType::Info => theme.info,
        };

        div()
            .absolute()
            .top_0()
            .left_0()
            .size_full()
            .occlude()
            .flex()
            .items_center()
            .justify_center()
            .bg(hsla(0., 0., 0., 0.45))
            .child(
                div()
                    .w_2_3()
                    .max_w(px(560.))
                    .p_6()
                    .flex()
                    .flex_col()
                    .gap_4()
                    .rounded_lg()
                    .border_1()
                    .border_color(theme.border)
                    .bg(theme.background)
                    .shadow_lg()
                    .child(div().child(self.title).text_xl().font_bold())
                    .when_some(self.banner, |this, banner| {
                        this.child(
                            div()
                                .p_2()
                                .rounded_md()
                                .border_1()
                                .border_color(banner_color(banner.style))
                                .text_color(banner_color(banner.style))
                                .child(banner.message),
                        )
                    })
                    .children(self.rows)
                    .when_some(self.footer, |this, footer| {
                        this.child(div().flex().justify_end().gap_2().child(footer))
                    }),
            )
    }
}
