use gpui::{
    App, AppContext, Context, Entity, IntoElement, ParentElement, Render, SharedString, Styled,
    Window, div,
};
use gpui_component::{
    IndexPath,
    select::{Select, SelectEvent, SelectItem, SelectState},
};
use sayboard_store::session::Session;

use crate::components::field_item::FieldItem;

#[derive(Debug, Clone)]
pub struct Choice {
    label: SharedString,
}

impl Choice {
    fn new(label: &str) -> Self {
        Self {
            label: SharedString::from(label.to_owned()),
        }
    }
}

impl SelectItem for Choice {
    type Value = SharedString;

    fn title(&self) -> SharedString {
        self.label.clone()
    }

    fn value(&self) -> &Self::Value {
        &self.label
    }
}

type ChoiceState = Entity<SelectState<Vec<Choice>>>;

/// What the picker currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub source: String,
    pub voice: Option<String>,
    pub emotion: Option<String>,
}

/// Source, voice and emotion selects backed by the session's catalog.
/// Picking another source refills the voices and emotions with that source's
/// lists, preselecting the first entry of each.
pub struct SourcePicker {
    session: Entity<Session>,
    source: ChoiceState,
    voice: ChoiceState,
    emotion: ChoiceState,
    has_emotions: bool,
}

fn fill(
    state: &ChoiceState,
    items: &[String],
    selected: Option<&str>,
    window: &mut Window,
    cx: &mut App,
) {
    let choices: Vec<Choice> = items.iter().map(|item| Choice::new(item)).collect();
    let index = selected.and_then(|selected| items.iter().position(|item| item == selected));

    state.update(cx, |state, cx| {
        state.set_items(choices, window, cx);
        state.set_selected_index(index.map(IndexPath::new), window, cx);
    });
}

fn selected(state: &ChoiceState, cx: &App) -> Option<String> {
    state
        .read(cx)
        .selected_value()
        .map(|value| value.to_string())
}

impl SourcePicker {
    pub fn new(session: &Entity<Session>, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let source = cx.new(|cx| SelectState::new(Vec::new(), None, window, cx));
        let voice = cx.new(|cx| SelectState::new(Vec::new(), None, window, cx));
        let emotion = cx.new(|cx| SelectState::new(Vec::new(), None, window, cx));

        cx.subscribe_in(&source, window, |this, _, event: &SelectEvent<Vec<Choice>>, window, cx| match event {
            SelectEvent::Confirm(Some(name)) => {
                let (voices, emotions) = {
                    let catalog = this.session.read(cx).catalog();
                    (
                        catalog.voices(name).to_vec(),
                        catalog.emotions(name).to_vec(),
                    )
                };
                fill(
                    &this.voice,
                    &voices,
                    voices.first().map(String::as_str),
                    window,
                    cx,
                );
                fill(
                    &this.emotion,
                    &emotions,
                    emotions.first().map(String::as_str),
                    window,
                    cx,
                );
                this.has_emotions = !emotions.is_empty();
                cx.notify();
            }
            SelectEvent::Confirm(None) => {}
        })
        .detach();

        Self {
            session: session.clone(),
            source,
            voice,
            emotion,
            has_emotions: false,
        }
    }

    /// Reloads all three lists from the catalog and selects the given
    /// values. Values the catalog does not know are left unselected.
    pub fn show(&mut self, selection: &Selection, window: &mut Window, cx: &mut Context<Self>) {
        let (sources, voices, emotions) = {
            let catalog = self.session.read(cx).catalog();
            (
                catalog
                    .options()
                    .iter()
                    .map(|option| option.value.clone())
                    .collect::<Vec<_>>(),
                catalog.voices(&selection.source).to_vec(),
                catalog.emotions(&selection.source).to_vec(),
            )
        };

        fill(
            &self.source,
            &sources,
            Some(selection.source.as_str()),
            window,
            cx,
        );
        fill(
            &self.voice,
            &voices,
            selection.voice.as_deref(),
            window,
            cx,
        );
        fill(
            &self.emotion,
            &emotions,
            selection.emotion.as_deref(),
            window,
            cx,
        );
        self.has_emotions = !emotions.is_empty();
        cx.notify();
    }

    pub fn selection(&self, cx: &App) -> Selection {
        Selection {
            source: selected(&self.source, cx).unwrap_or_default(),
            voice: selected(&self.voice, cx),
            emotion: selected(&self.emotion, cx),
        }
    }
}

impl Render for SourcePicker {
    fn render(&mut self, _: &mut Window, _: &mut Context<Self>) -> impl IntoElement {
        let has_emotions = self.has_emotions;

        div()
            .flex()
            .flex_col()
            .gap_3()
            .child(
                FieldItem::new()
                    .label("Source")
                    .child(Select::new(&self.source).placeholder("Choose a source...")),
            )
            .child(
                FieldItem::new()
                    .label("Voice")
                    .child(Select::new(&self.voice).placeholder("Choose a voice...")),
            )
            .child(
                FieldItem::new().label("Emotion").child(
                    Select::new(&self.emotion)
                        .placeholder(if has_emotions {
                            "Choose an emotion..."
                        } else {
                            "Not supported by this source"
                        }),
                ),
            )
    }
}
