use sayboard_bridge::{
    MessageFromBackend,
    error::ApiError,
    import::{FileImport, OwnFilesImport},
};

pub async fn handle_import_file(context: super::AppContextHandle, request: FileImport) {
    let (api, project) = context.state.read().await.project_api();
    let result = match project {
        Some(project) => api.import_file(&project, &request).await,
        None => Err(ApiError::NoProject),
    };
    match &result {
        Ok(outcome) if !outcome.skipped.is_empty() => {
            log::warn!("Import skipped {} rows", outcome.skipped.len());
        }
        Ok(_) => log::info!("Imported {}", request.path.display()),
        Err(e) => log::error!("Import of {} failed: {e}", request.path.display()),
    }
    context.send(MessageFromBackend::FileImported(result)).await;
}

pub async fn handle_import_own_files(context: super::AppContextHandle, request: OwnFilesImport) {
    let (api, project) = context.state.read().await.project_api();
    let result = match project {
        Some(project) => api.import_own_files(&project, &request).await,
        None => Err(ApiError::NoProject),
    };
    if let Ok(report) = &result {
        log::info!(
            "Own files import: {} imported, {} refused",
            report.success.len(),
            report.errors.len()
        );
    }
    context
        .send(MessageFromBackend::OwnFilesImported(result))
        .await;
}
