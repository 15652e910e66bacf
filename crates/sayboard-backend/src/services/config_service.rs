use sayboard_bridge::{MessageFromBackend, notification::NotificationMessage};

/// Handles an incoming configuration request (see
/// [`sayboard_bridge::MessageToBackend::ConfigurationRequest`]).
pub async fn handle_config_request(context: super::AppContextHandle) {
    let config = {
        let state = context.state.read().await;
        state.config.clone()
    };
    context
        .send(MessageFromBackend::ConfigurationResponse(config))
        .await;
}

/// Makes `slug` the active project, persists the choice so it is remembered
/// across runs, and loads the project's records.
pub async fn handle_open_project(context: super::AppContextHandle, slug: String) {
    let saved = {
        let mut state = context.state.write().await;
        state.config.active_project = Some(slug.clone());
        crate::config::save_config(&state.config_path, &state.config).await
    };

    if let Err(e) = saved {
        log::error!("Failed to persist active project {slug:?}: {e}");
        context
            .send_notification(NotificationMessage::warning(format!(
                "Project {slug} is open, but it will not be remembered: {e}"
            )))
            .await;
    }

    super::record_service::handle_load_records(context).await;
}

#[cfg(test)]
mod tests {
    use axum::{Json, Router, routing::get};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::{api::tests::record_json, services::testing::context_for};

    #[tokio::test]
    async fn opening_a_project_persists_it_and_loads_records() {
        let router = Router::new().route(
            "/api/audiorecords/museum",
            get(|| async { Json(json!([record_json("intro")])) }),
        );
        let (context, mut rx) = context_for(router, Some("guide")).await;

        handle_open_project(context.clone(), "museum".to_owned()).await;

        match rx.recv().await {
            Some(MessageFromBackend::RecordsLoaded { project, result }) => {
                assert_eq!(project, "museum");
                assert_eq!(result.unwrap().len(), 1);
            }
            other => panic!("unexpected message: {other:?}"),
        }

        let path = context.state.read().await.config_path.clone();
        let saved = crate::config::load_config(&path).await.unwrap();
        assert_eq!(saved.active_project.as_deref(), Some("museum"));
        let _ = tokio::fs::remove_file(path).await;
    }

    #[tokio::test]
    async fn configuration_is_sent_back() {
        let (context, mut rx) = context_for(Router::new(), Some("guide")).await;

        handle_config_request(context).await;

        match rx.recv().await {
            Some(MessageFromBackend::ConfigurationResponse(config)) => {
                assert_eq!(config.active_project.as_deref(), Some("guide"));
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }
}
