use gpui::{
    App, AppContext, Application, AsyncApp, Entity, Global, PromptLevel, Window, WindowHandle,
    WindowOptions,
};
use gpui_component::Root;
use sayboard_bridge::{MessageFromBackend, MessageToBackend};
use sayboard_store::session::{Effects, Session};
use tokio::sync::mpsc::{self, error::TrySendError};

use crate::entities::{DataEntities, settings_entity::SettingsEntity};

pub mod components;
pub mod entities;
pub mod notifications;
mod views;

#[derive(Clone)]
pub struct BackendBridge {
    pub to_backend: mpsc::Sender<MessageToBackend>,
}

impl BackendBridge {
    /// Queues `message` for the backend without waiting. The channel is only
    /// full or closed when the backend thread is stuck or gone; the error
    /// hands the message back.
    pub fn send(&self, message: MessageToBackend) -> Result<(), TrySendError<MessageToBackend>> {
        self.to_backend.try_send(message)
    }
}

impl Global for BackendBridge {}

/// Sends `command` to the backend. A command that cannot be queued is
/// folded back into the session so nothing waits for an answer that never
/// comes.
pub(crate) fn send_command(
    command: MessageToBackend,
    session: &Entity<Session>,
    window: &mut Window,
    cx: &mut App,
) {
    let Err(e) = cx.global::<BackendBridge>().send(command) else {
        return;
    };
    let reason = e.to_string();
    let command = e.into_inner();

    let effects = session.update(cx, |session, cx| {
        let effects = session.command_not_sent(&command, &reason);
        cx.notify();
        effects
    });
    for notification in effects.notifications {
        notifications::push(notification, window, cx);
    }
}

/// Shows the notifications of `effects` and sends its commands.
pub(crate) fn run_effects(
    effects: Effects,
    session: &Entity<Session>,
    window: &mut Window,
    cx: &mut App,
) {
    for notification in effects.notifications {
        notifications::push(notification, window, cx);
    }

    for command in effects.commands {
        send_command(command, session, window, cx);
    }

    if let Some((delay, command)) = effects.delayed {
        let bridge = cx.global::<BackendBridge>().clone();
        let timer = cx.background_executor().timer(delay);
        cx.spawn(async move |_| {
            timer.await;
            if let Err(e) = bridge.send(command) {
                log::error!("Failed to send a delayed message to backend: {e}");
            }
        })
        .detach();
    }
}

/// Applies one backend message to the session and carries out the resulting
/// effects.
fn handle_backend_message(
    message: MessageFromBackend,
    data: &DataEntities,
    window: &mut Window,
    cx: &mut App,
) {
    if let MessageFromBackend::ConfigurationResponse(config) = &message {
        SettingsEntity::update(&data.settings, config.clone(), cx);
    }

    let effects: Effects = data.session.update(cx, |session, cx| {
        let effects = session.apply(message);
        cx.notify();
        effects
    });

    run_effects(effects, &data.session, window, cx);
}

async fn listen_to_backend(
    mut rx: mpsc::Receiver<MessageFromBackend>,
    data: DataEntities,
    window_handle: WindowHandle<Root>,
    cx: &mut AsyncApp,
) {
    while let Some(message) = rx.recv().await {
        log::debug!("Got a message from backend: {message:?}");
        let handled = window_handle.update(cx, |_, window, cx| {
            handle_backend_message(message, &data, window, cx);
        });
        if let Err(e) = handled {
            log::error!("Main window is gone, stopping backend listener: {e}");
            break;
        }
    }
}

/// Asks for confirmation before closing the window while requests are in
/// flight.
fn guard_window_close(data: &DataEntities, window: &mut Window, cx: &mut App) {
    let session = data.session.clone();
    window.on_window_should_close(cx, move |window, cx| {
        if !session.read(cx).should_warn_on_close() {
            return true;
        }

        let answer = window.prompt(
            PromptLevel::Warning,
            "A task is still in progress",
            Some("Closing the application now abandons the generated content."),
            &["Close anyway", "Stay"],
            cx,
        );
        window
            .spawn(cx, async move |cx| {
                if answer.await == Ok(0) {
                    let _ = cx.update(|window, _| window.remove_window());
                }
            })
            .detach();
        false
    });
}

pub fn run(
    rx: mpsc::Receiver<MessageFromBackend>,
    tx: mpsc::Sender<MessageToBackend>,
) -> anyhow::Result<()> {
    let app = Application::new().with_assets(gpui_component_assets::Assets);

    app.run(move |cx| {
        gpui_component::init(cx);

        let session = cx.new(|_| Session::default());
        let settings = cx.new(|_| SettingsEntity::default());
        let data = DataEntities { session, settings };

        let bridge = BackendBridge {
            to_backend: tx.clone(),
        };
        cx.set_global(bridge.clone());

        cx.spawn(async move |cx| {
            let listener_data = data.clone();
            let window_handle = cx.open_window(WindowOptions::default(), |window, cx| {
                guard_window_close(&data, window, cx);
                let view = cx.new(|cx| crate::views::FrontendUi::new(&data, window, cx));
                cx.new(|cx| Root::new(view, window, cx))
            })?;

            cx.spawn(async move |cx| listen_to_backend(rx, listener_data, window_handle, cx).await)
                .detach();

            for command in [
                MessageToBackend::ConfigurationRequest,
                MessageToBackend::LoadSources,
                MessageToBackend::LoadProjects,
            ] {
                if let Err(e) = bridge.send(command) {
                    log::error!("Failed to send a startup message to backend: {e}");
                }
            }

            Ok::<_, anyhow::Error>(())
        })
        .detach();
    });

    Ok(())
}
