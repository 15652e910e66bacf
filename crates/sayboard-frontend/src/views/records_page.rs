use gpui::{
    AppContext, Context, Entity, IntoElement, ParentElement, PromptLevel, Render, SharedString,
    Styled, Window, div, prelude::FluentBuilder,
};
use gpui_component::{
    ActiveTheme, IconName, Sizable, StyledExt,
    button::{Button, ButtonVariants},
    group_box::{GroupBox, GroupBoxVariants},
};
use sayboard_bridge::{MessageToBackend, record::AudioRecord};
use sayboard_store::{feedback::NO_PROJECT, session::Session};

use crate::{
    components::pager::Pager,
    entities::DataEntities,
    send_command,
    views::{
        import_forms::{FileImportView, OwnFilesView},
        record_form::{RecordFormMode, RecordFormView},
    },
};

/// Records of the active project with the record and import forms.
pub struct RecordsPage {
    session: Entity<Session>,
    create_form: Entity<RecordFormView>,
    edit_form: Entity<RecordFormView>,
    file_import: Entity<FileImportView>,
    own_files: Entity<OwnFilesView>,
}

impl RecordsPage {
    pub fn new(data: &DataEntities, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let session = &data.session;
        let create_form =
            cx.new(|cx| RecordFormView::new(RecordFormMode::Create, session, window, cx));
        let edit_form = cx.new(|cx| RecordFormView::new(RecordFormMode::Edit, session, window, cx));
        let file_import = cx.new(|cx| FileImportView::new(session, window, cx));
        let own_files = cx.new(|cx| OwnFilesView::new(session, window, cx));
        cx.observe(session, |_, _, cx| cx.notify()).detach();

        Self {
            session: session.clone(),
            create_form,
            edit_form,
            file_import,
            own_files,
        }
    }

    fn open_create(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.session.update(cx, |session, cx| {
            session.open_record_form();
            cx.notify();
        });
        self.create_form
            .update(cx, |form, cx| form.load(window, cx));
    }

    fn open_edit(&mut self, name: &str, window: &mut Window, cx: &mut Context<Self>) {
        let opened = self.session.update(cx, |session, cx| {
            let opened = session.open_edit_form(name);
            cx.notify();
            opened
        });
        if opened {
            self.edit_form.update(cx, |form, cx| form.load(window, cx));
        }
    }

    fn open_file_import(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.session.update(cx, |session, cx| {
            session.open_file_import_form();
            cx.notify();
        });
        self.file_import
            .update(cx, |form, cx| form.load(window, cx));
    }

    fn open_own_files(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.session.update(cx, |session, cx| {
            session.open_own_files_form();
            cx.notify();
        });
        self.own_files.update(cx, |form, cx| form.load(window, cx));
    }

    fn toggle_details(&mut self, name: &str, cx: &mut Context<Self>) {
        self.session.update(cx, |session, cx| {
            if session.toggle_details(name).is_some() {
                cx.notify();
            }
        });
    }

    fn reload(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        send_command(MessageToBackend::LoadRecords, &self.session, window, cx);
    }

    fn ask_delete(&mut self, name: String, window: &mut Window, cx: &mut Context<Self>) {
        let question = format!("Delete record {name}?");
        self.session.update(cx, |session, _| {
            session.records_table.request_delete(name);
        });

        let answer = window.prompt(
            PromptLevel::Warning,
            &question,
            Some("The synthesized audio is deleted as well."),
            &["Delete", "Cancel"],
            cx,
        );
        cx.spawn_in(window, async move |this, cx| {
            let confirmed = answer.await == Ok(0);
            let _ = this.update_in(cx, |this, window, cx| {
                let command = this.session.update(cx, |session, cx| {
                    let command = if confirmed {
                        session.confirm_record_delete()
                    } else {
                        session.records_table.cancel_delete();
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

    fn render_row(&self, record: AudioRecord, cx: &mut Context<Self>) -> impl IntoElement + use<> {
        let muted = cx.theme().muted_foreground;
        let details_name = record.name.clone();
        let edit_name = record.name.clone();
        let delete_name = record.name.clone();
        let id = |action: &str| SharedString::from(format!("record-{action}-{}", record.name));

        let summary = div()
            .w_full()
            .flex()
            .items_center()
            .justify_between()
            .gap_4()
            .child(
                div()
                    .flex()
                    .flex_col()
                    .flex_1()
                    .child(
                        div()
                            .child(SharedString::from(record.name.clone()))
                            .font_semibold(),
                    )
                    .child(
                        div()
                            .text_sm()
                            .text_color(muted)
                            .child(format!(
                                "{} / {} · x{} · {}",
                                record.source, record.voice, record.playing_speed, record.modified_at
                            )),
                    ),
            )
            .child(
                div()
                    .flex()
                    .gap_2()
                    .child(
                        Button::new(id("details"))
                            .small()
                            .ghost()
                            .icon(if record.show_details {
                                IconName::ChevronUp
                            } else {
                                IconName::ChevronDown
                            })
                            .on_click(cx.listener(move |this, _, _, cx| {
                                this.toggle_details(&details_name, cx)
                            })),
                    )
                    .child(
                        Button::new(id("edit"))
                            .small()
                            .outline()
                            .label("Edit")
                            .on_click(cx.listener(move |this, _, window, cx| {
                                this.open_edit(&edit_name, window, cx)
                            })),
                    )
                    .child(
                        Button::new(id("delete"))
                            .small()
                            .danger()
                            .icon(IconName::Delete)
                            .on_click(cx.listener(move |this, _, window, cx| {
                                this.ask_delete(delete_name.clone(), window, cx)
                            })),
                    ),
            );

        div()
            .w_full()
            .flex()
            .flex_col()
            .gap_1()
            .py_1()
            .child(summary)
            .when(record.show_details, |this| {
                this.child(
                    div()
                        .pl_4()
                        .flex()
                        .flex_col()
                        .gap_1()
                        .text_sm()
                        .child(SharedString::from(record.text.clone()))
                        .when_some(record.emotion.clone(), |this, emotion| {
                            this.child(
                                div()
                                    .text_color(muted)
                                    .child(format!("Emotion: {emotion}")),
                            )
                        })
                        .when_some(record.audio.clone(), |this, audio| {
                            this.child(div().text_color(muted).child(format!("Audio: {audio}")))
                        }),
                )
            })
    }
}

impl Render for RecordsPage {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let session = self.session.read(cx);
        let Some(project) = session.active_project().map(str::to_owned) else {
            return div()
                .size_full()
                .flex()
                .flex_col()
                .gap_3()
                .child(div().child("Records").text_2xl().font_bold())
                .child(div().text_color(cx.theme().muted_foreground).child(NO_PROJECT))
                .into_any_element();
        };

        let records = session.records();
        let table = &session.records_table;
        let rows = table.rows(records).to_vec();
        let page = table.page();
        let page_count = table.page_count(records);
        let ready = records.is_ready();
        let report = session.import_report().to_owned();
        let create_open = session.record_form.is_open();
        let edit_open = session.edit_form.is_open();
        let file_import_open = session.file_import_form.is_open();
        let own_files_open = session.own_files_form.is_open();
        let project_name = session
            .projects()
            .items()
            .iter()
            .find(|candidate| candidate.slug == project)
            .map(|candidate| candidate.name.clone())
            .unwrap_or_else(|| project.clone());
        let muted = cx.theme().muted_foreground;
        let session_entity = self.session.clone();

        let rows = rows
            .into_iter()
            .map(|record| self.render_row(record, cx))
            .collect::<Vec<_>>();

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
                    .child(
                        div()
                            .flex()
                            .flex_col()
                            .child(div().child(project_name).text_2xl().font_bold())
                            .child(div().text_sm().text_color(muted).child(project)),
                    )
                    .child(
                        div()
                            .flex()
                            .gap_2()
                            .child(
                                Button::new("records-reload")
                                    .ghost()
                                    .icon(IconName::Redo)
                                    .label("Reload")
                                    .on_click(cx.listener(|this, _, window, cx| {
                                        this.reload(window, cx)
                                    })),
                            )
                            .child(
                                Button::new("records-import-file")
                                    .outline()
                                    .label("Import file")
                                    .on_click(cx.listener(|this, _, window, cx| {
                                        this.open_file_import(window, cx)
                                    })),
                            )
                            .child(
                                Button::new("records-import-own")
                                    .outline()
                                    .label("Upload own files")
                                    .on_click(cx.listener(|this, _, window, cx| {
                                        this.open_own_files(window, cx)
                                    })),
                            )
                            .child(
                                Button::new("records-new")
                                    .primary()
                                    .icon(IconName::Plus)
                                    .label("New record")
                                    .on_click(cx.listener(|this, _, window, cx| {
                                        this.open_create(window, cx)
                                    })),
                            ),
                    ),
            )
            .when(!report.is_empty(), |this| {
                this.child(
                    GroupBox::new()
                        .outline()
                        .child(div().child("Last upload").font_semibold())
                        .children(
                            report
                                .lines()
                                .map(|line| div().text_sm().child(SharedString::from(line.to_owned()))),
                        ),
                )
            })
            .child(
                GroupBox::new()
                    .outline()
                    .when(!ready, |this| {
                        this.child(div().text_color(muted).child("Loading records..."))
                    })
                    .when(ready && rows.is_empty(), |this| {
                        this.child(div().text_color(muted).child("This project has no records yet"))
                    })
                    .children(rows),
            )
            .child(Pager::new(
                "records-pager",
                page,
                page_count,
                move |page, _, cx| {
                    session_entity.update(cx, |session, cx| {
                        session.go_to_records_page(page);
                        cx.notify();
                    });
                },
            ))
            .when(create_open, |this| this.child(self.create_form.clone()))
            .when(edit_open, |this| this.child(self.edit_form.clone()))
            .when(file_import_open, |this| this.child(self.file_import.clone()))
            .when(own_files_open, |this| this.child(self.own_files.clone()))
            .into_any_element()
    }
}
