use std::rc::Rc;

use gpui::{App, IntoElement, ParentElement, SharedString, Styled, Window, div};
use gpui_component::{
    ActiveTheme, Disableable, IconName, Sizable,
    button::{Button, ButtonVariants},
};

type PageHandler = Rc<dyn Fn(usize, &mut Window, &mut App)>;

/// Previous/next controls for a paginated table.
#[derive(IntoElement)]
pub struct Pager {
    id: SharedString,
    page: usize,
    page_count: usize,
    on_change: PageHandler,
}

impl Pager {
    pub fn new(
        id: impl Into<SharedString>,
        page: usize,
        page_count: usize,
        on_change: impl Fn(usize, &mut Window, &mut App) + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            page,
            page_count,
            on_change: Rc::new(on_change),
        }
    }
}

impl gpui::RenderOnce for Pager {
    fn render(self, _: &mut Window, cx: &mut App) -> impl IntoElement {
        let prev = self.on_change.clone();
        let next = self.on_change;
        let page = self.page;

        div()
            .flex()
            .items_center()
            .justify_end()
            .gap_2()
            .child(
                Button::new(SharedString::from(format!("{}-prev", self.id)))
                    .ghost()
                    .small()
                    .icon(IconName::ChevronLeft)
                    .disabled(page <= 1)
                    .on_click(move |_, window, cx| prev(page.saturating_sub(1), window, cx)),
            )
            .child(
                div()
                    .text_sm()
                    .text_color(cx.theme().muted_foreground)
                    .child(format!("Page {} of {}", page, self.page_count)),
            )
            .child(
                Button::new(SharedString::from(format!("{}-next", self.id)))
                    .ghost()
                    .small()
                    .icon(IconName::ChevronRight)
                    .disabled(page >= self.page_count)
                    .on_click(move |_, window, cx| next(page + 1, window, cx)),
            )
    }
}
