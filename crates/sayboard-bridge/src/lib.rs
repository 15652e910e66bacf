//! Communication bridge between frontend and backend.
//!
//! This crate defines the data model shared by both sides and the messages
//! used to connect the graphical frontend with the asynchronous backend that
//! talks to the content-management service over HTTP.
//!
//! Each direction has its own message type:
//! - The frontend sends commands (e.g., load the records of a project, create
//!   a record, delete a project).
//! - The backend pushes events (e.g., loaded lists, created entities, failed
//!   requests, notifications).
//!
//! Both directions use bounded [`tokio::sync::mpsc`] channels wrapped in
//! [`BridgeChannels`].

pub mod config;
pub mod error;
pub mod import;
pub mod notification;
pub mod project;
pub mod record;
pub mod source;

use tokio::sync::mpsc::{self, Receiver, Sender};

use crate::error::ApiError;

/// Messages emitted by the backend to inform the frontend of state updates.
///
/// Every command that talks to the server is answered by exactly one of the
/// `*Loaded`, `*Created`, `*Updated`, `*Deleted`, `*Imported` messages, which
/// carry either the server's answer or the classified failure.
#[derive(Debug, Clone)]
pub enum MessageFromBackend {
    /// Generic message for all notifications in the application.
    NotificationMessage(notification::NotificationMessage),
    /// Response to the configuration request from the frontend.
    ConfigurationResponse(config::Config),
    SourcesLoaded(Result<Vec<source::SourcePayload>, ApiError>),
    ProjectsLoaded(Result<Vec<project::Project>, ApiError>),
    RecordsLoaded {
        project: String,
        result: Result<Vec<record::AudioRecord>, ApiError>,
    },
    /// `project` is the slug the request was sent for, empty when no
    /// project was open.
    RecordCreated {
        project: String,
        result: Result<record::AudioRecord, ApiError>,
    },
    RecordUpdated {
        project: String,
        /// Name the record had when the edit form was opened.
        previous_name: String,
        result: Result<record::AudioRecord, ApiError>,
    },
    /// Answer to a delete whose local removal already happened.
    RecordDeleted {
        name: String,
        result: Result<(), ApiError>,
    },
    ProjectCreated(Result<project::Project, ApiError>),
    ProjectDeleted {
        name: String,
        result: Result<(), ApiError>,
    },
    FileImported(Result<import::FileImportOutcome, ApiError>),
    OwnFilesImported(Result<import::ImportReport, ApiError>),
}

/// Commands issued by the frontend to control or query the backend.
///
/// These messages drive the core functionality of the application.
#[derive(Debug, Clone)]
pub enum MessageToBackend {
    /// Request for the application configuration.
    ConfigurationRequest,
    LoadSources,
    LoadProjects,
    /// Makes `project` the active one, persists the choice and loads its
    /// records.
    OpenProject(String),
    LoadRecords,
    CreateRecord {
        request: record::NewRecord,
        /// Target the update endpoint, replacing a record with the same name.
        overwrite: bool,
    },
    UpdateRecord {
        id: u64,
        previous_name: String,
        patch: record::RecordPatch,
    },
    DeleteRecord {
        id: u64,
        name: String,
    },
    ImportFile(import::FileImport),
    ImportOwnFiles(import::OwnFilesImport),
    CreateProject(project::NewProject),
    DeleteProject {
        slug: String,
        name: String,
    },
}

/// Paired `tokio::mpsc` channels for bidirectional communication between
/// frontend and backend.
pub struct BridgeChannels {
    /// Receiver used by the frontend to get messages from the backend.
    pub frontend_rx: Receiver<MessageFromBackend>,
    /// Sender used by the frontend to send commands to the backend.
    pub frontend_tx: Sender<MessageToBackend>,

    /// Receiver used by the backend to get commands from the frontend.
    pub backend_rx: Receiver<MessageToBackend>,
    /// Sender used by the backend to send events/responses to the frontend.
    pub backend_tx: Sender<MessageFromBackend>,
}

impl BridgeChannels {
    /// Creates a new pair of bridged channels with the given buffer capacity.
    pub fn new(buffer: usize) -> Self {
        let (to_backend_tx, to_backend_rx) = mpsc::channel(buffer);
        let (to_frontend_tx, to_frontend_rx) = mpsc::channel(buffer);
        Self {
            frontend_tx: to_backend_tx,
            frontend_rx: to_frontend_rx,
            backend_rx: to_backend_rx,
            backend_tx: to_frontend_tx,
        }
    }
}

impl Default for BridgeChannels {
    fn default() -> Self {
        Self::new(64)
    }
}
