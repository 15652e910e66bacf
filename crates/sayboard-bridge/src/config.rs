use serde::{Deserialize, Serialize};

/// Where the content-management service lives and how long to wait for it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Base URL every endpoint path is resolved against. Should end with `/`.
    pub base_url: String,
    /// Upper bound for a single request, in seconds. Synthesis requests can be
    /// slow, so keep this generous.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/".to_owned(),
            request_timeout_secs: 120,
        }
    }
}

/// Endpoint path templates, relative to [`ServerConfig::base_url`].
///
/// Templates may contain `{project}`, `{id}` and `{slug}` placeholders.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EndpointsConfig {
    pub sources: String,
    pub projects_list: String,
    pub projects_create: String,
    pub projects_destroy: String,
    pub records_list: String,
    /// Record creation through the primary provider.
    pub records_create_primary: String,
    /// Record creation through any other provider.
    pub records_create_secondary: String,
    /// Create-or-overwrite by name, and edit when `{id}` is filled in.
    pub records_update: String,
    pub records_destroy: String,
    pub records_import_file: String,
    pub records_import_own: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            sources: "api/sources/list-tts".to_owned(),
            projects_list: "api/projects/".to_owned(),
            projects_create: "api/projects/make/".to_owned(),
            projects_destroy: "api/projects/destroy/{slug}".to_owned(),
            records_list: "api/audiorecords/{project}".to_owned(),
            records_create_primary: "api/audiorecords/{project}/yandex".to_owned(),
            records_create_secondary: "api/audiorecords/{project}/crt".to_owned(),
            records_update: "api/audiorecords/{project}/update-audio/{id}".to_owned(),
            records_destroy: "api/audiorecords/{project}/destroy/{id}".to_owned(),
            records_import_file: "api/audiorecords/{project}/import-file".to_owned(),
            records_import_own: "api/audiorecords/{project}/import-own".to_owned(),
        }
    }
}

/// Routing of record creation between providers.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SynthesisConfig {
    /// Source id whose records are created through
    /// [`EndpointsConfig::records_create_primary`].
    pub primary_source_id: u64,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            primary_source_id: 1,
        }
    }
}

/// Page sizes of the data tables.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TablesConfig {
    pub records_per_page: usize,
    pub projects_per_page: usize,
}

impl Default for TablesConfig {
    fn default() -> Self {
        Self {
            records_per_page: 25,
            projects_per_page: 15,
        }
    }
}

/// Behavior after imports.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImportConfig {
    /// Delay before the record list is reloaded after an own-files import,
    /// so the user can read the report first.
    pub reload_delay_secs: u64,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            reload_delay_secs: 5,
        }
    }
}

/// Global application configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub endpoints: EndpointsConfig,
    pub synthesis: SynthesisConfig,
    pub tables: TablesConfig,
    pub import: ImportConfig,
    /// Slug of the project whose records are shown on start.
    pub active_project: Option<String>,
}
