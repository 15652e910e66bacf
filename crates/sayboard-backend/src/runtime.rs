//! Backend runtime setup and orchestration.
//!
//! This module wires together configuration, shared state, and the message
//! dispatch loop that listens to frontend bridge requests.

use std::{path::PathBuf, sync::Arc, thread};

use sayboard_bridge::{
    MessageFromBackend, MessageToBackend,
    config::{Config, ServerConfig},
    error::ApiError,
    notification::NotificationMessage,
};
use tokio::sync::{
    RwLock,
    mpsc::{Receiver, Sender},
};

use crate::api::{ApiClient, build_http_client};
use crate::app::AppContext;
use crate::state::State;

/// Initialize backend state from the configuration at `config_path`.
///
/// A broken configuration file is reported to the user and replaced by the
/// defaults for this run. The same goes for a server address that does not
/// parse, which only swaps the server section.
pub(crate) async fn build_state(
    config_path: PathBuf,
    tx: &Sender<MessageFromBackend>,
) -> State {
    let config = match crate::config::load_config(&config_path).await {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load config from {config_path:?}: {e}");
            let notification = NotificationMessage::error(format!(
                "Configuration could not be loaded ({e}). Using defaults"
            ));
            let _ = tx
                .send(MessageFromBackend::NotificationMessage(notification))
                .await;
            Default::default()
        }
    };

    let api = match connect(&config) {
        Ok(api) => api,
        Err(e) => {
            log::error!("Server settings in {config_path:?} are unusable: {e}");
            let notification = NotificationMessage::error(format!(
                "Server settings are invalid ({e}). Using {} instead",
                ServerConfig::default().base_url
            ));
            let _ = tx
                .send(MessageFromBackend::NotificationMessage(notification))
                .await;
            let fallback = Config {
                server: ServerConfig::default(),
                ..config.clone()
            };
            connect(&fallback).expect("default server settings must be valid")
        }
    };

    State {
        config,
        config_path,
        api,
    }
}

fn connect(config: &Config) -> Result<ApiClient, ApiError> {
    let client = build_http_client(config).map_err(|e| ApiError::Transport(e.to_string()))?;
    ApiClient::new(client, config)
}

/// Initialize backend state and start processing frontend messages.
async fn setup_backend(rx: Receiver<MessageToBackend>, tx: Sender<MessageFromBackend>) {
    let config_path = crate::config::default_config_path().expect("failed to resolve config path");
    let state = Arc::new(RwLock::new(build_state(config_path, &tx).await));

    let context = Arc::new(AppContext { state, tx });
    context.consume_bridge_messages(rx).await;
}

/// Spawn the backend runtime and begin processing bridge messages.
pub fn run(rx: Receiver<MessageToBackend>, tx: Sender<MessageFromBackend>) {
    thread::Builder::new()
        .name("backend".to_owned())
        .spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .expect("failed to build tokio runtime");
            runtime.block_on(async { setup_backend(rx, tx).await });
        })
        .expect("failed to spawn backend thread");
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sayboard_bridge::notification::NotificationType;
    use tokio::sync::mpsc;

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("sayboard-runtime-{name}-{}", std::process::id()))
            .join("config.toml")
    }

    #[tokio::test]
    async fn malformed_server_address_falls_back_to_default() {
        let path = temp_path("bad-url");
        let mut config = Config::default();
        config.server.base_url = "not a url".to_owned();
        config.active_project = Some("guide".to_owned());
        crate::config::save_config(&path, &config).await.unwrap();
        let (tx, mut rx) = mpsc::channel(4);

        let state = build_state(path.clone(), &tx).await;

        assert_eq!(state.api.base_url().as_str(), ServerConfig::default().base_url);
        assert_eq!(state.config.server.base_url, "not a url");
        assert_eq!(state.config.active_project.as_deref(), Some("guide"));
        match rx.try_recv() {
            Ok(MessageFromBackend::NotificationMessage(notification)) => {
                assert_eq!(notification.notification_type, NotificationType::Error);
            }
            other => panic!("unexpected message: {other:?}"),
        }
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn valid_config_sends_nothing() {
        let path = temp_path("good-url");
        crate::config::save_config(&path, &Config::default()).await.unwrap();
        let (tx, mut rx) = mpsc::channel(4);

        let state = build_state(path.clone(), &tx).await;

        assert_eq!(state.api.base_url().as_str(), ServerConfig::default().base_url);
        assert!(rx.try_recv().is_err());
        let _ = tokio::fs::remove_file(&path).await;
    }
}
