use gpui::{
    AppContext, Context, Entity, IntoElement, ParentElement, Render, SharedString, Styled, Window,
    div, prelude::FluentBuilder,
};
use gpui_component::{
    ActiveTheme, Disableable,
    button::{Button, ButtonVariants},
    input::{Input, InputState},
    switch::Switch,
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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormMode {
    Create,
    Edit,
}

/// Modal form for synthesizing a new record or editing an existing one.
pub struct RecordFormView {
    session: Entity<Session>,
    mode: RecordFormMode,
    name: Entity<InputState>,
    text: Entity<InputState>,
    speed: Entity<InputState>,
    picker: Entity<SourcePicker>,
    overwrite: bool,
}

impl RecordFormView {
    pub fn new(
        mode: RecordFormMode,
        session: &Entity<Session>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let name = cx.new(|cx| InputState::new(window, cx).placeholder("greeting_01"));
        let text = cx.new(|cx| InputState::new(window, cx).placeholder("Text to synthesize"));
        let speed = cx.new(|cx| InputState::new(window, cx).placeholder("1.0"));
        let picker = cx.new(|cx| SourcePicker::new(session, window, cx));

        cx.observe(session, |_, _, cx| cx.notify()).detach();

        Self {
            session: session.clone(),
            mode,
            name,
            text,
            speed,
            picker,
            overwrite: false,
        }
    }

    /// Copies the current draft into the inputs. Called right after the form
    /// was opened.
    pub fn load(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let (name, text, speed, overwrite, selection) = {
            let session = self.session.read(cx);
            match self.mode {
                RecordFormMode::Create => {
                    let draft = session.record_form.draft();
                    (
                        draft.name.clone(),
                        draft.text.clone(),
                        draft.speed.clone(),
                        draft.overwrite,
                        Selection {
                            source: draft.source.clone(),
                            voice: draft.voice.clone(),
                            emotion: draft.emotion.clone(),
                        },
                    )
                }
                RecordFormMode::Edit => {
                    let draft = session.edit_form.draft();
                    (
                        draft
                            .baseline()
                            .map(|record| record.name.clone())
                            .unwrap_or_default(),
                        draft.text.clone(),
                        draft.speed.clone(),
                        false,
                        Selection {
                            source: draft.source.clone(),
                            voice: draft.voice.clone(),
                            emotion: draft.emotion.clone(),
                        },
                    )
                }
            }
        };

        self.name
            .update(cx, |state, cx| state.set_value(name, window, cx));
        self.text
            .update(cx, |state, cx| state.set_value(text, window, cx));
        self.speed
            .update(cx, |state, cx| state.set_value(speed, window, cx));
        self.picker
            .update(cx, |picker, cx| picker.show(&selection, window, cx));
        self.overwrite = overwrite;
        cx.notify();
    }

    fn submit(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let name = self.name.read(cx).value().to_string();
        let text = self.text.read(cx).value().to_string();
        let speed = self.speed.read(cx).value().to_string();
        let selection = self.picker.read(cx).selection(cx);
        let overwrite = self.overwrite;
        let mode = self.mode;

        let result = self.session.update(cx, |session, cx| {
            let result = match mode {
                RecordFormMode::Create => {
                    let draft = session.record_form.draft_mut();
                    draft.name = name;
                    draft.text = text;
                    draft.speed = speed;
                    draft.source = selection.source;
                    draft.voice = selection.voice;
                    draft.emotion = selection.emotion;
                    draft.overwrite = overwrite;
                    session.submit_record()
                }
                RecordFormMode::Edit => {
                    let draft = session.edit_form.draft_mut();
                    draft.text = text;
                    draft.speed = speed;
                    draft.source = selection.source;
                    draft.voice = selection.voice;
                    draft.emotion = selection.emotion;
                    session.submit_edit()
                }
            };
            cx.notify();
            result
        });

        dispatch(result, &self.session, window, cx);
    }

    fn close(&mut self, cx: &mut Context<Self>) {
        let mode = self.mode;
        self.session.update(cx, |session, cx| {
            let closed = match mode {
                RecordFormMode::Create => session.record_form.close(),
                RecordFormMode::Edit => session.edit_form.close(),
            };
            if closed {
                cx.notify();
            }
        });
    }
}

impl Render for RecordFormView {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let (errors, submitting, title) = {
            let session = self.session.read(cx);
            match self.mode {
                RecordFormMode::Create => (
                    session.record_form.errors().clone(),
                    session.record_form.is_submitting(),
                    SharedString::from("New record"),
                ),
                RecordFormMode::Edit => (
                    session.edit_form.errors().clone(),
                    session.edit_form.is_submitting(),
                    SharedString::from(format!(
                        "Edit record {}",
                        self.name.read(cx).value()
                    )),
                ),
            }
        };
        let creating = self.mode == RecordFormMode::Create;
        let danger = cx.theme().danger;

        ModalFrame::new(title)
            .banner(errors.common.clone())
            .when(creating, |this| {
                this.row(
                    FieldItem::new()
                        .label("Name")
                        .child(Input::new(&self.name))
                        .error(errors.field("name")),
                )
            })
            .row(
                FieldItem::new()
                    .label("Text")
                    .child(Input::new(&self.text))
                    .error(errors.field("text")),
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
            .when(creating, |this| {
                this.row(
                    FieldItem::new().label("Replace a record with the same name").child(
                        Switch::new("record-overwrite")
                            .checked(self.overwrite)
                            .on_click(cx.listener(|this, checked: &bool, _, cx| {
                                this.overwrite = *checked;
                                cx.notify();
                            })),
                    ),
                )
            })
            .footer(
                div()
                    .flex()
                    .gap_2()
                    .child(
                        Button::new("record-cancel")
                            .ghost()
                            .label("Cancel")
                            .disabled(submitting)
                            .on_click(cx.listener(|this, _, _, cx| this.close(cx))),
                    )
                    .child(
                        Button::new("record-submit")
                            .primary()
                            .label(if creating { "Synthesize" } else { "Save" })
                            .loading(submitting)
                            .disabled(submitting)
                            .on_click(cx.listener(|this, _, window, cx| this.submit(window, cx))),
                    ),
            )
    }
}
