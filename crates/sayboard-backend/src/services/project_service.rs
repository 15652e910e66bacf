use sayboard_bridge::{MessageFromBackend, project::NewProject};

pub async fn handle_load_projects(context: super::AppContextHandle) {
    let api = context.state.read().await.api.clone();
    let result = api.projects().await;
    if let Err(e) = &result {
        log::error!("Failed to load projects: {e}");
    }
    context.send(MessageFromBackend::ProjectsLoaded(result)).await;
}

pub async fn handle_create_project(context: super::AppContextHandle, request: NewProject) {
    let api = context.state.read().await.api.clone();
    let result = api.create_project(&request).await;
    if let Ok(project) = &result {
        log::info!("Created project {:?} ({})", project.name, project.slug);
    }
    context.send(MessageFromBackend::ProjectCreated(result)).await;
}

/// Deletes a project the frontend already removed from its table. Deleting
/// the active project also forgets it in the configuration.
pub async fn handle_delete_project(context: super::AppContextHandle, slug: String, name: String) {
    let api = context.state.read().await.api.clone();
    let result = api.delete_project(&slug).await;

    let mut state = context.state.write().await;
    if state.config.active_project.as_deref() == Some(slug.as_str()) {
        state.config.active_project = None;
        if let Err(e) = crate::config::save_config(&state.config_path, &state.config).await {
            log::error!("Failed to forget deleted project {slug:?}: {e}");
        }
    }
    drop(state);

    context
        .send(MessageFromBackend::ProjectDeleted { name, result })
        .await;
}

#[cfg(test)]
mod tests {
    use axum::{
        Json, Router,
        http::StatusCode,
        routing::{delete, post},
    };
    use pretty_assertions::assert_eq;
    use sayboard_bridge::error::ApiError;
    use serde_json::{Value, json};

    use super::*;
    use crate::services::testing::context_for;

    #[tokio::test]
    async fn created_project_is_returned() {
        let router = Router::new().route(
            "/api/projects/make/",
            post(|Json(body): Json<Value>| async move {
                (
                    StatusCode::CREATED,
                    Json(json!({"name": body["name"], "slug": "museum-guide", "last_updated": ""})),
                )
            }),
        );
        let (context, mut rx) = context_for(router, None).await;

        handle_create_project(
            context,
            NewProject {
                name: "Museum guide".to_owned(),
                slug: String::new(),
            },
        )
        .await;

        match rx.recv().await {
            Some(MessageFromBackend::ProjectCreated(Ok(project))) => {
                assert_eq!(project.slug, "museum-guide");
                assert_eq!(project.name, "Museum guide");
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn duplicate_slug_is_rejected_with_field_message() {
        let router = Router::new().route(
            "/api/projects/make/",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"slug": ["project with this slug already exists."]})),
                )
            }),
        );
        let (context, mut rx) = context_for(router, None).await;

        handle_create_project(
            context,
            NewProject {
                name: "Museum".to_owned(),
                slug: "museum".to_owned(),
            },
        )
        .await;

        match rx.recv().await {
            Some(MessageFromBackend::ProjectCreated(Err(error))) => {
                assert_eq!(
                    error.field_message("slug"),
                    Some("project with this slug already exists.")
                );
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn deleting_active_project_forgets_it() {
        let router = Router::new().route(
            "/api/projects/destroy/:slug",
            delete(|| async { StatusCode::NOT_FOUND }),
        );
        let (context, mut rx) = context_for(router, Some("guide")).await;

        handle_delete_project(context.clone(), "guide".to_owned(), "Guide".to_owned()).await;

        match rx.recv().await {
            Some(MessageFromBackend::ProjectDeleted { name, result }) => {
                assert_eq!(name, "Guide");
                assert_eq!(result, Err(ApiError::NotFound));
            }
            other => panic!("unexpected message: {other:?}"),
        }
        let state = context.state.read().await;
        assert_eq!(state.config.active_project, None);
        let _ = tokio::fs::remove_file(&state.config_path).await;
    }
}
