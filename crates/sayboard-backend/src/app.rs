//! Application context and message dispatching utilities.
//!
//! The context contains the shared state and provides helpers for sending
//! responses and notifications back to the frontend bridge.

use std::sync::Arc;

use sayboard_bridge::{
    MessageFromBackend, MessageToBackend, notification::NotificationMessage,
};
use tokio::sync::mpsc::{Receiver, Sender};

use crate::services;
use crate::state::SharedState;

/// Shared application context passed to services and message handlers.
pub(crate) struct AppContext {
    /// Mutable runtime application state shared across services.
    pub state: SharedState,
    /// Outbound channel to the frontend bridge.
    pub tx: Sender<MessageFromBackend>,
}

impl AppContext {
    /// Read and dispatch messages from the frontend bridge until it closes.
    pub async fn consume_bridge_messages(self: &Arc<Self>, mut rx: Receiver<MessageToBackend>) {
        while let Some(message) = rx.recv().await {
            log::debug!("Got a frontend message: {message:?}");
            self.dispatch_message(message).await;
        }
        log::info!("Frontend bridge closed, stopping backend");
    }

    /// Dispatches the received message from frontend down to individual
    /// service handlers.
    ///
    /// Commands that change the configuration run to completion before the
    /// next message is read. Server requests run as separate tasks, so a slow
    /// synthesis never holds up list loading. Record commands are bound to the
    /// project that is open when they are read, not when their task starts.
    async fn dispatch_message(self: &Arc<Self>, message: MessageToBackend) {
        let context = self.clone();
        match message {
            MessageToBackend::ConfigurationRequest => {
                services::config_service::handle_config_request(context).await;
            }
            MessageToBackend::OpenProject(slug) => {
                services::config_service::handle_open_project(context, slug).await;
            }
            MessageToBackend::LoadSources => {
                tokio::spawn(services::source_service::handle_load_sources(context));
            }
            MessageToBackend::LoadProjects => {
                tokio::spawn(services::project_service::handle_load_projects(context));
            }
            MessageToBackend::CreateProject(request) => {
                tokio::spawn(services::project_service::handle_create_project(
                    context, request,
                ));
            }
            MessageToBackend::DeleteProject { slug, name } => {
                tokio::spawn(services::project_service::handle_delete_project(
                    context, slug, name,
                ));
            }
            MessageToBackend::LoadRecords => {
                tokio::spawn(services::record_service::handle_load_records(context));
            }
            MessageToBackend::CreateRecord { request, overwrite } => {
                let project = self.active_project().await;
                tokio::spawn(services::record_service::handle_create_record(
                    context, project, request, overwrite,
                ));
            }
            MessageToBackend::UpdateRecord {
                id,
                previous_name,
                patch,
            } => {
                let project = self.active_project().await;
                tokio::spawn(services::record_service::handle_update_record(
                    context,
                    project,
                    id,
                    previous_name,
                    patch,
                ));
            }
            MessageToBackend::DeleteRecord { id, name } => {
                let project = self.active_project().await;
                tokio::spawn(services::record_service::handle_delete_record(
                    context, project, id, name,
                ));
            }
            MessageToBackend::ImportFile(request) => {
                tokio::spawn(services::import_service::handle_import_file(context, request));
            }
            MessageToBackend::ImportOwnFiles(request) => {
                tokio::spawn(services::import_service::handle_import_own_files(
                    context, request,
                ));
            }
        }
    }

    /// Slug of the project record commands currently target.
    async fn active_project(&self) -> Option<String> {
        self.state.read().await.config.active_project.clone()
    }

    /// Send a message to the frontend bridge.
    pub async fn send(&self, message: MessageFromBackend) {
        if let Err(e) = self.tx.send(message).await {
            log::error!("Frontend is gone, dropping message: {:?}", e.0);
        }
    }

    /// Send a notification message to the frontend bridge.
    pub async fn send_notification(&self, notification: NotificationMessage) {
        self.send(MessageFromBackend::NotificationMessage(notification))
            .await;
    }
}
