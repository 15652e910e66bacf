use gpui::{
    AppContext, Context, Entity, EventEmitter, IntoElement, ParentElement, PromptLevel, Render,
    SharedString, Styled, Window, div, prelude::FluentBuilder,
};
use gpui_component::{
    ActiveTheme, IconName, Sizable, StyledExt,
    button::{Button, ButtonVariants},
    group_box::{GroupBox, GroupBoxVariants},
};
use sayboard_bridge::MessageToBackend;
use sayboard_store::session::Session;

use crate::{
    components::pager::Pager,
    entities::DataEntities,
    send_command,
    views::project_form::ProjectFormView,
};

/// Emitted after the user opened a project, so the shell can switch to its
/// records.
pub struct ProjectOpened;

pub struct ProjectsPage {
    session: Entity<Session>,
    form: Entity<ProjectFormView>,
}

impl EventEmitter<ProjectOpened> for ProjectsPage {}

impl ProjectsPage {
    pub fn new(data: &DataEntities, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let form = cx.new(|cx| ProjectFormView::new(&data.session, window, cx));
        cx.observe(&data.session, |_, _, cx| cx.notify()).detach();

        Self {
            session: data.session.clone(),
            form,
        }
    }

    fn open_form(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.session.update(cx, |session, cx| {
            session.open_project_form();
            cx.notify();
        });
        self.form.update(cx, |form, cx| form.load(window, cx));
    }

    fn open_project(&mut self, slug: &str, window: &mut Window, cx: &mut Context<Self>) {
        let command = self.session.update(cx, |session, cx| {
            let command = session.open_project(slug);
            cx.notify();
            command
        });
        send_command(command, &self.session, window, cx);
        cx.emit(ProjectOpened);
    }

    fn reload(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        send_command(MessageToBackend::LoadProjects, &self.session, window, cx);
    }

    fn ask_delete(&mut self, slug: String, name: String, window: &mut Window, cx: &mut Context<Self>) {
        self.session.update(cx, |session, _| {
            session.projects_table.request_delete(slug);
        });

        let answer = window.prompt(
            PromptLevel::Warning,
            &format!("Delete project {name}?"),
            Some("All of its records are deleted on the server as well."),
            &["Delete", "Cancel"],
            cx,
        );
        cx.spawn_in(window, async move |this, cx| {
            let confirmed = answer.await == Ok(0);
            let _ = this.update_in(cx, |this, window, cx| {
                let command = this.session.update(cx, |session, cx| {
                    let command = if confirmed {
                        session.confirm_project_delete()
                    } else {
                        session.projects_table.cancel_delete();
                        None
                    };
                    cx.notify();
                    command
                });
                if let Some(command) = command {
                    send_command(command, &this.session, window, cx);
                }
            });
        })
        .detach();
    }
}

impl Render for ProjectsPage {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let session = self.session.read(cx);
        let table = &session.projects_table;
        let projects = session.projects();
        let active = session.active_project().map(str::to_owned);
        let rows = table.rows(projects).to_vec();
        let page = table.page();
        let page_count = table.page_count(projects);
        let ready = projects.is_ready();
        let form_open = session.project_form.is_open();
        let muted = cx.theme().muted_foreground;
        let session_entity = self.session.clone();

        div()
            .size_full()
            .flex()
            .flex_col()
            .gap_3()
            .child(
                div()
                    .flex()
                    .items_center()
                    .justify_between()
                    .child(div().child("Projects").text_2xl().font_bold())
                    .child(
                        div()
                            .flex()
                            .gap_2()
                            .child(
                                Button::new("projects-reload")
                                    .ghost()
                                    .icon(IconName::Redo)
                                    .label("Reload")
                                    .on_click(cx.listener(|this, _, window, cx| {
                                        this.reload(window, cx)
                                    })),
                            )
                            .child(
                                Button::new("projects-new")
                                    .primary()
                                    .icon(IconName::Plus)
                                    .label("New project")
                                    .on_click(cx.listener(|this, _, window, cx| {
                                        this.open_form(window, cx)
                                    })),
                            ),
                    ),
            )
            .child(
                GroupBox::new()
                    .outline()
                    .when(!ready, |this| {
                        this.child(div().text_color(muted).child("Loading projects..."))
                    })
                    .when(ready && rows.is_empty(), |this| {
                        this.child(div().text_color(muted).child("No projects yet"))
                    })
                    .children(rows.into_iter().map(|project| {
                        let is_active = active.as_deref() == Some(project.slug.as_str());
                        let open_slug = project.slug.clone();
                        let delete_slug = project.slug.clone();
                        let delete_name = project.name.clone();

                        div()
                            .w_full()
                            .flex()
                            .items_center()
                            .justify_between()
                            .gap_4()
                            .py_1()
                            .child(
                                div()
                                    .flex()
                                    .flex_col()
                                    .child(
                                        div()
                                            .child(SharedString::from(project.name.clone()))
                                            .font_semibold(),
                                    )
                                    .child(
                                        div()
                                            .text_sm()
                                            .text_color(muted)
                                            .child(format!(
                                                "{} · updated {}",
                                                project.slug, project.last_updated
                                            )),
                                    ),
                            )
                            .child(
                                div()
                                    .flex()
                                    .gap_2()
                                    .child(
                                        Button::new(SharedString::from(format!(
                                            "project-open-{}",
                                            project.slug
                                        )))
                                        .small()
                                        .when_else(
                                            is_active,
                                            |button| button.primary(),
                                            |button| button.outline(),
                                        )
                                        .label(if is_active { "Opened" } else { "Open" })
                                        .on_click(cx.listener(move |this, _, window, cx| {
                                            this.open_project(&open_slug, window, cx)
                                        })),
                                    )
                                    .child(
                                        Button::new(SharedString::from(format!(
                                            "project-delete-{}",
                                            project.slug
                                        )))
                                        .small()
                                        .danger()
                                        .icon(IconName::Delete)
                                        .on_click(cx.listener(move |this, _, window, cx| {
                                            this.ask_delete(
                                                delete_slug.clone(),
                                                delete_name.clone(),
                                                window,
                                                cx,
                                            )
                                        })),
                                    ),
                            )
                    })),
            )
            .child(Pager::new(
                "projects-pager",
                page,
                page_count,
                move |page, _, cx| {
                    session_entity.update(cx, |session, cx| {
                        session.go_to_projects_page(page);
                        cx.notify();
                    });
                },
            ))
            .when(form_open, |this| this.child(self.form.clone()))
    }
}
