use std::path::PathBuf;

use gpui::{
    AppContext, Context, Entity, IntoElement, ParentElement, PathPromptOptions, Render,
    SharedString, Styled, Window, div, prelude::FluentBuilder,
};
use gpui_component::{
    ActiveTheme, Disableable, IconName,
    button::{Button, ButtonVariants},
    input::{Input, InputState},
};
use sayboard_store::session::Session;

use crate::{
    components::{
        field_item::FieldItem,
        modal_frame::ModalFrame,
        source_picker::{Selection, SourcePicker},
    },
    views::dispatch,
};

/// Asks the OS for files and hands the chosen paths to `on_pick`. A
/// cancelled dialog picks nothing.
fn pick_files<V: 'static>(
    multiple: bool,
    window: &mut Window,
    cx: &mut Context<V>,
    on_pick: impl FnOnce(&mut V, Vec<PathBuf>, &mut Context<V>) + 'static,
) {
    let paths = cx.prompt_for_paths(PathPromptOptions {
        files: true,
        directories: false,
        multiple,
        prompt: None,
    });

    cx.spawn_in(window, async move |this, cx| {
        let paths = match paths.await {
            Ok(Ok(Some(paths))) => paths,
            Ok(Ok(None)) => return,
            Ok(Err(e)) => {
                log::error!("File dialog failed: {e}");
                return;
            }
            Err(e) => {
                log::error!("File dialog was dropped: {e}");
                return;
            }
        };
        let _ = this.update(cx, |this, cx| on_pick(this, paths, cx));
    })
    .detach();
}

fn file_names(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| {
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string())
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Import of a prepared file describing many records at once.
pub struct FileImportView {
    session: Entity<Session>,
    speed: Entity<InputState>,
    picker: Entity<SourcePicker>,
}

impl FileImportView {
    pub fn new(session: &Entity<Session>, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let speed = cx.new(|cx| InputState::new(window, cx).placeholder("1.0"));
        let picker = cx.new(|cx| SourcePicker::new(session, window, cx));
        cx.observe(session, |_, _, cx| cx.notify()).detach();

        Self {
            session: session.clone(),
            speed,
            picker,
        }
    }

    pub fn load(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let draft = self.session.read(cx).file_import_form.draft().clone();
        self.speed
            .update(cx, |state, cx| state.set_value(draft.speed, window, cx));
        let selection = Selection {
            source: draft.source,
            voice: draft.voice,
            emotion: draft.emotion,
        };
        self.picker
            .update(cx, |picker, cx| picker.show(&selection, window, cx));
    }

    fn choose_file(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        pick_files(false, window, cx, |this, paths, cx| {
            this.session.update(cx, |session, cx| {
                session.file_import_form.draft_mut().path = paths.into_iter().next();
                cx.notify();
            });
        });
    }

    fn submit(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let speed = self.speed.read(cx).value().to_string();
        let selection = self.picker.read(cx).selection(cx);

        let result = self.session.update(cx, |session, cx| {
            let draft = session.file_import_form.draft_mut();
            draft.speed = speed;
            draft.source = selection.source;
            draft.voice = selection.voice;
            draft.emotion = selection.emotion;
            let result = session.submit_file_import();
            cx.notify();
            result
        });
        dispatch(result, &self.session, window, cx);
    }
}

impl Render for FileImportView {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let form = &self.session.read(cx).file_import_form;
        let errors = form.errors().clone();
        let submitting = form.is_submitting();
        let chosen = form
            .draft()
            .path
            .as_ref()
            .map(|path| file_names(std::slice::from_ref(path)))
            .unwrap_or_else(|| "No file chosen".to_owned());
        let danger = cx.theme().danger;

        ModalFrame::new("Import records from a file")
            .banner(errors.common.clone())
            .row(
                FieldItem::new()
                    .label("File")
                    .child(
                        div()
                            .flex()
                            .items_center()
                            .gap_2()
                            .child(
                                Button::new("file-import-choose")
                                    .outline()
                                    .icon(IconName::FolderOpen)
                                    .label("Choose...")
                                    .disabled(submitting)
                                    .on_click(cx.listener(|this, _, window, cx| {
                                        this.choose_file(window, cx)
                                    })),
                            )
                            .child(div().text_sm().child(chosen)),
                    )
                    .error(errors.field("files").or(errors.field("file"))),
            )
            .row(self.picker.clone())
            .when_some(errors.field("voice"), |this, message| {
                this.row(
                    div()
                        .text_sm()
                        .text_color(danger)
                        .child(SharedString::from(message.to_owned())),
                )
            })
            .row(
                FieldItem::new()
                    .label("Speed")
                    .child(Input::new(&self.speed))
                    .error(errors.field("speed")),
            )
            .footer(
                div()
                    .flex()
                    .gap_2()
                    .child(
                        Button::new("file-import-cancel")
                            .ghost()
                            .label("Cancel")
                            .disabled(submitting)
                            .on_click(cx.listener(|this, _, _, cx| {
                                this.session.update(cx, |session, cx| {
                                    if session.file_import_form.close() {
                                        cx.notify();
                                    }
                                });
                            })),
                    )
                    .child(
                        Button::new("file-import-submit")
                            .primary()
                            .label("Import")
                            .loading(submitting)
                            .disabled(submitting)
                            .on_click(cx.listener(|this, _, window, cx| this.submit(window, cx))),
                    ),
            )
    }
}

/// Upload of audio files recorded outside the service.
pub struct OwnFilesView {
    session: Entity<Session>,
    voice: Entity<InputState>,
}

impl OwnFilesView {
    pub fn new(session: &Entity<Session>, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let voice = cx.new(|cx| InputState::new(window, cx).placeholder("Name of the speaker"));
        cx.observe(session, |_, _, cx| cx.notify()).detach();

        Self {
            session: session.clone(),
            voice,
        }
    }

    pub fn load(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let voice = self.session.read(cx).own_files_form.draft().voice.clone();
        self.voice
            .update(cx, |state, cx| state.set_value(voice, window, cx));
    }

    fn choose_files(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        pick_files(true, window, cx, |this, paths, cx| {
            this.session.update(cx, |session, cx| {
                session.own_files_form.draft_mut().files = paths;
                cx.notify();
            });
        });
    }

    fn submit(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let voice = self.voice.read(cx).value().to_string();

        let result = self.session.update(cx, |session, cx| {
            session.own_files_form.draft_mut().voice = voice;
            let result = session.submit_own_files();
            cx.notify();
            result
        });
        dispatch(result, &self.session, window, cx);
    }
}

impl Render for OwnFilesView {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let form = &self.session.read(cx).own_files_form;
        let errors = form.errors().clone();
        let submitting = form.is_submitting();
        let files = &form.draft().files;
        let chosen = if files.is_empty() {
            "No files chosen".to_owned()
        } else {
            format!("{} file(s): {}", files.len(), file_names(files))
        };

        ModalFrame::new("Upload own recordings")
            .banner(errors.common.clone())
            .row(
                FieldItem::new()
                    .label("Voice")
                    .child(Input::new(&self.voice))
                    .error(errors.field("voice")),
            )
            .row(
                FieldItem::new()
                    .label("Files")
                    .child(
                        div()
                            .flex()
                            .items_center()
                            .gap_2()
                            .child(
                                Button::new("own-files-choose")
                                    .outline()
                                    .icon(IconName::FolderOpen)
                                    .label("Choose...")
                                    .disabled(submitting)
                                    .on_click(cx.listener(|this, _, window, cx| {
                                        this.choose_files(window, cx)
                                    })),
                            )
                            .child(div().text_sm().child(chosen)),
                    )
                    .error(errors.field("files")),
            )
            .footer(
                div()
                    .flex()
                    .gap_2()
                    .child(
                        Button::new("own-files-cancel")
                            .ghost()
                            .label("Cancel")
                            .disabled(submitting)
                            .on_click(cx.listener(|this, _, _, cx| {
                                this.session.update(cx, |session, cx| {
                                    if session.own_files_form.close() {
                                        cx.notify();
                                    }
                                });
                            })),
                    )
                    .child(
                        Button::new("own-files-submit")
                            .primary()
                            .label("Upload")
                            .loading(submitting)
                            .disabled(submitting)
                            .on_click(cx.listener(|this, _, window, cx| this.submit(window, cx))),
                    ),
            )
    }
}
