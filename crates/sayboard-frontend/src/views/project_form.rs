use gpui::{AppContext, Context, Entity, IntoElement, ParentElement, Render, Styled, Window, div};
use gpui_component::{
    Disableable,
    button::{Button, ButtonVariants},
    input::{Input, InputState},
};
use sayboard_store::session::Session;

use crate::{
    components::{field_item::FieldItem, modal_frame::ModalFrame},
    views::dispatch,
};

pub struct ProjectFormView {
    session: Entity<Session>,
    name: Entity<InputState>,
    slug: Entity<InputState>,
}

impl ProjectFormView {
    pub fn new(session: &Entity<Session>, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let name = cx.new(|cx| InputState::new(window, cx).placeholder("Museum audio guide"));
        let slug = cx.new(|cx| {
            InputState::new(window, cx).placeholder("Leave empty to derive it from the name")
        });
        cx.observe(session, |_, _, cx| cx.notify()).detach();

        Self {
            session: session.clone(),
            name,
            slug,
        }
    }

    pub fn load(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let draft = self.session.read(cx).project_form.draft().clone();
        self.name
            .update(cx, |state, cx| state.set_value(draft.name, window, cx));
        self.slug
            .update(cx, |state, cx| state.set_value(draft.slug, window, cx));
    }

    fn submit(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let name = self.name.read(cx).value().to_string();
        let slug = self.slug.read(cx).value().to_string();

        let result = self.session.update(cx, |session, cx| {
            let draft = session.project_form.draft_mut();
            draft.name = name;
            draft.slug = slug;
            let result = session.submit_project();
            cx.notify();
            result
        });
        dispatch(result, &self.session, window, cx);
    }
}

impl Render for ProjectFormView {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let form = &self.session.read(cx).project_form;
        let errors = form.errors().clone();
        let submitting = form.is_submitting();

        ModalFrame::new("New project")
            .banner(errors.common.clone())
            .row(
                FieldItem::new()
                    .label("Name")
                    .child(Input::new(&self.name))
                    .error(errors.field("name")),
            )
            .row(
                FieldItem::new()
                    .label("Slug")
                    .child(Input::new(&self.slug))
                    .error(errors.field("slug")),
            )
            .footer(
                div()
                    .flex()
                    .gap_2()
                    .child(
                        Button::new("project-cancel")
                            .ghost()
                            .label("Cancel")
                            .disabled(submitting)
                            .on_click(cx.listener(|this, _, _, cx| {
                                this.session.update(cx, |session, cx| {
                                    if session.project_form.close() {
                                        cx.notify();
                                    }
                                });
                            })),
                    )
                    .child(
                        Button::new("project-submit")
                            .primary()
                            .label("Create")
                            .loading(submitting)
                            .disabled(submitting)
                            .on_click(cx.listener(|this, _, window, cx| this.submit(window, cx))),
                    ),
            )
    }
}
