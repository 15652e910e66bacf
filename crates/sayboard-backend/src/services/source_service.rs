use sayboard_bridge::MessageFromBackend;

/// Loads the provider catalog. Sent once at startup, before any record form
/// can be used.
pub async fn handle_load_sources(context: super::AppContextHandle) {
    let api = context.state.read().await.api.clone();

    let result = api.sources().await;
    match &result {
        Ok(sources) => log::info!("Server offers {} sources", sources.len()),
        Err(e) => log::error!("Failed to load sources: {e}"),
    }
    context.send(MessageFromBackend::SourcesLoaded(result)).await;
}
