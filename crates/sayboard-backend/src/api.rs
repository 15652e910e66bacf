//! Typed client for the content-management HTTP API.
//!
//! Every call resolves a path template from [`EndpointsConfig`] against the
//! configured base URL and classifies any non-successful answer into an
//! [`ApiError`]. Nothing in here retries.

use std::{path::Path, time::Duration};

use reqwest::{
    Client, Response, StatusCode, Url,
    multipart::{Form, Part},
};
use sayboard_bridge::{
    config::{Config, EndpointsConfig},
    error::{ApiError, parse_messages},
    import::{FileImport, FileImportOutcome, ImportReport, OwnFilesImport},
    project::{NewProject, Project},
    record::{AudioRecord, NewRecord, RecordPatch},
    source::SourcePayload,
};
use serde::de::DeserializeOwned;

/// Builds the pooled HTTP client shared by every request.
pub fn build_http_client(config: &Config) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.server.request_timeout_secs))
        .build()
}

fn transport(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        return ApiError::Transport("request timed out".to_owned());
    }
    ApiError::Transport(error.without_url().to_string())
}

/// Turns a non-2xx answer into the matching [`ApiError`].
async fn check(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    log::warn!("Server answered {status}: {body}");
    Err(ApiError::from_status(status.as_u16(), &body))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    check(response).await?.json::<T>().await.map_err(transport)
}

async fn file_part(path: &Path) -> Result<(String, Part), ApiError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| ApiError::Transport(format!("{} is not a file", path.display())))?;
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ApiError::Transport(format!("failed to read {}: {e}", path.display())))?;

    let part = Part::bytes(bytes).file_name(file_name.clone());
    Ok((file_name, part))
}

/// HTTP access to one server, cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    endpoints: EndpointsConfig,
    primary_source_id: u64,
}

impl ApiClient {
    pub fn new(client: Client, config: &Config) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.server.base_url).map_err(|e| {
            ApiError::Transport(format!("invalid server URL {:?}: {e}", config.server.base_url))
        })?;

        Ok(Self {
            client,
            base_url,
            endpoints: config.endpoints.clone(),
            primary_source_id: config.synthesis.primary_source_id,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves `template`, filling `{project}`, `{id}` and `{slug}`.
    fn url(&self, template: &str, params: &[(&str, &str)]) -> Result<Url, ApiError> {
        let mut path = template.to_owned();
        for (key, value) in params {
            path = path.replace(&format!("{{{key}}}"), value);
        }

        self.base_url
            .join(&path)
            .map_err(|e| ApiError::Transport(format!("invalid endpoint {path:?}: {e}")))
    }

    pub async fn sources(&self) -> Result<Vec<SourcePayload>, ApiError> {
        let url = self.url(&self.endpoints.sources, &[])?;
        log::debug!("GET {url}");
        decode(self.client.get(url).send().await.map_err(transport)?).await
    }

    pub async fn projects(&self) -> Result<Vec<Project>, ApiError> {
        let url = self.url(&self.endpoints.projects_list, &[])?;
        log::debug!("GET {url}");
        decode(self.client.get(url).send().await.map_err(transport)?).await
    }

    pub async fn records(&self, project: &str) -> Result<Vec<AudioRecord>, ApiError> {
        let url = self.url(&self.endpoints.records_list, &[("project", project)])?;
        log::debug!("GET {url}");
        decode(self.client.get(url).send().await.map_err(transport)?).await
    }

    /// Creates a record through the endpoint of its provider, or overwrites
    /// the record with the same name through the update endpoint.
    pub async fn create_record(
        &self,
        project: &str,
        request: &NewRecord,
        overwrite: bool,
    ) -> Result<AudioRecord, ApiError> {
        let template = if overwrite {
            &self.endpoints.records_update
        } else if request.tts == self.primary_source_id {
            &self.endpoints.records_create_primary
        } else {
            &self.endpoints.records_create_secondary
        };
        let url = self.url(template, &[("project", project), ("id", "")])?;
        log::info!("Creating record {:?} via {url}", request.name);

        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }

    pub async fn update_record(
        &self,
        project: &str,
        id: u64,
        patch: &RecordPatch,
    ) -> Result<AudioRecord, ApiError> {
        let id = id.to_string();
        let url = self.url(
            &self.endpoints.records_update,
            &[("project", project), ("id", &id)],
        )?;
        log::info!("Updating record {id} via {url}");

        let response = self
            .client
            .post(url)
            .json(patch)
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }

    pub async fn delete_record(&self, project: &str, id: u64) -> Result<(), ApiError> {
        let id = id.to_string();
        let url = self.url(
            &self.endpoints.records_destroy,
            &[("project", project), ("id", &id)],
        )?;
        log::info!("DELETE {url}");
        check(self.client.delete(url).send().await.map_err(transport)?).await?;
        Ok(())
    }

    pub async fn create_project(&self, request: &NewProject) -> Result<Project, ApiError> {
        let url = self.url(&self.endpoints.projects_create, &[])?;
        log::info!("Creating project {:?}", request.name);
        decode(
            self.client
                .post(url)
                .json(request)
                .send()
                .await
                .map_err(transport)?,
        )
        .await
    }

    pub async fn delete_project(&self, slug: &str) -> Result<(), ApiError> {
        let url = self.url(&self.endpoints.projects_destroy, &[("slug", slug)])?;
        log::info!("DELETE {url}");
        check(self.client.delete(url).send().await.map_err(transport)?).await?;
        Ok(())
    }

    /// Uploads a prepared CSV/IMED/XLS file. The server answers 204 when every
    /// row was synthesized, otherwise the body lists the rows it skipped.
    pub async fn import_file(
        &self,
        project: &str,
        request: &FileImport,
    ) -> Result<FileImportOutcome, ApiError> {
        let url = self.url(&self.endpoints.records_import_file, &[("project", project)])?;
        let (_, file) = file_part(&request.path).await?;

        let mut form = Form::new()
            .part("export-file", file)
            .text("voice", request.voice.clone())
            .text("source", request.source_id.to_string())
            .text("speed", request.speed.to_string());
        if let Some(emotion) = &request.emotion {
            form = form.text("emotion", emotion.clone());
        }

        log::info!("Importing {} via {url}", request.path.display());
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;
        let response = check(response).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(FileImportOutcome::default());
        }

        let body = response.text().await.map_err(transport)?;
        let skipped = parse_messages(&body)
            .into_iter()
            .map(|message| match message.field {
                Some(field) => format!("{field}: {}", message.message),
                None => message.message,
            })
            .collect();
        Ok(FileImportOutcome { skipped })
    }

    /// Uploads recorded audio; every file is sent under its own file name.
    pub async fn import_own_files(
        &self,
        project: &str,
        request: &OwnFilesImport,
    ) -> Result<ImportReport, ApiError> {
        let url = self.url(&self.endpoints.records_import_own, &[("project", project)])?;
        let parts =
            futures_util::future::try_join_all(request.files.iter().map(|path| file_part(path)))
                .await?;

        let form = parts
            .into_iter()
            .fold(Form::new(), |form, (name, part)| form.part(name, part))
            .text("voice", request.voice.clone());

        log::info!("Uploading {} own files via {url}", request.files.len());
        decode(
            self.client
                .post(url)
                .multipart(form)
                .send()
                .await
                .map_err(transport)?,
        )
        .await
    }
}
