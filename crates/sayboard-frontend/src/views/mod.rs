mod import_forms;
mod project_form;
mod projects_page;
mod record_form;
mod records_page;
mod settings_page;

use gpui::{
    AnyView, App, AppContext, Context, Entity, IntoElement, ParentElement, Render, Styled, Window,
    div,
};
use gpui_component::{
    IconName, Root, Side,
    sidebar::{Sidebar, SidebarGroup, SidebarHeader, SidebarMenu, SidebarMenuItem},
};
use sayboard_store::{
    form::FormError,
    session::{Effects, Session},
};

use crate::{
    entities::DataEntities,
    run_effects,
    views::{
        projects_page::{ProjectOpened, ProjectsPage},
        records_page::RecordsPage,
        settings_page::SettingsPage,
    },
};

/// Carries out the effects of a form submit. Validation failures are
/// already shown inside the form, so they are only logged here.
fn dispatch(
    result: Result<Effects, FormError>,
    session: &Entity<Session>,
    window: &mut Window,
    cx: &mut App,
) {
    match result {
        Ok(effects) => run_effects(effects, session, window, cx),
        Err(e) => log::debug!("Form was not submitted: {e}"),
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum PageUi {
    Projects,
    Records,
    Connection,
}

pub struct FrontendUi {
    data: DataEntities,
    active_page: PageUi,
    active_page_view: AnyView,
}

impl FrontendUi {
    pub fn new(data: &DataEntities, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let initial_view = Self::build_page(data, PageUi::Projects, window, cx);
        Self {
            data: data.clone(),
            active_page: PageUi::Projects,
            active_page_view: initial_view,
        }
    }

    fn build_page(
        data: &DataEntities,
        page: PageUi,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> AnyView {
        match page {
            PageUi::Projects => {
                let projects = cx.new(|cx| ProjectsPage::new(data, window, cx));
                cx.subscribe_in(&projects, window, |this, _, _: &ProjectOpened, window, cx| {
                    this.change_page(PageUi::Records, window, cx);
                })
                .detach();
                projects.into()
            }
            PageUi::Records => cx.new(|cx| RecordsPage::new(data, window, cx)).into(),
            PageUi::Connection => cx.new(|cx| SettingsPage::new(data, cx)).into(),
        }
    }

    pub fn change_page(&mut self, page: PageUi, window: &mut Window, cx: &mut Context<Self>) {
        let data = self.data.clone();
        self.active_page_view = Self::build_page(&data, page, window, cx);
        self.active_page = page;
        cx.notify();
    }
}

impl Render for FrontendUi {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let notification_layer = Root::render_notification_layer(window, cx);
        let on_page_change = |page| {
            cx.listener(move |this, _, window, cx| {
                this.change_page(page, window, cx);
            })
        };

        div()
            .flex()
            .size_full()
            .child(
                Sidebar::new(Side::Left)
                    .header(SidebarHeader::new().child("sayboard"))
                    .child(
                        SidebarGroup::new("Navigation").child(
                            SidebarMenu::new()
                                .child(
                                    SidebarMenuItem::new("Projects")
                                        .active(self.active_page == PageUi::Projects)
                                        .icon(IconName::Folder)
                                        .on_click(on_page_change(PageUi::Projects)),
                                )
                                .child(
                                    SidebarMenuItem::new("Records")
                                        .active(self.active_page == PageUi::Records)
                                        .icon(IconName::LayoutDashboard)
                                        .on_click(on_page_change(PageUi::Records)),
                                )
                                .child(
                                    SidebarMenuItem::new("Connection")
                                        .active(self.active_page == PageUi::Connection)
                                        .icon(IconName::Settings)
                                        .on_click(on_page_change(PageUi::Connection)),
                                ),
                        ),
                    ),
            )
            .child(
                div()
                    .relative()
                    .p_5()
                    .size_full()
                    .child(self.active_page_view.clone()),
            )
            .children(notification_layer)
    }
}
