use sayboard_bridge::{
    MessageFromBackend,
    error::ApiError,
    record::{NewRecord, RecordPatch},
};

/// Loads the records of the active project. Without an open project the
/// answer is [`ApiError::NoProject`].
pub async fn handle_load_records(context: super::AppContextHandle) {
    let (api, project) = context.state.read().await.project_api();

    let (project, result) = match project {
        Some(project) => {
            let result = api.records(&project).await;
            (project, result)
        }
        None => (String::new(), Err(ApiError::NoProject)),
    };
    if let Ok(records) = &result {
        log::info!("Loaded {} records of {project:?}", records.len());
    }

    context
        .send(MessageFromBackend::RecordsLoaded { project, result })
        .await;
}

/// Creates a record in `project`, the project that was open when the
/// command was read.
pub async fn handle_create_record(
    context: super::AppContextHandle,
    project: Option<String>,
    request: NewRecord,
    overwrite: bool,
) {
    let api = context.state.read().await.api.clone();
    let result = match &project {
        Some(project) => api.create_record(project, &request, overwrite).await,
        None => Err(ApiError::NoProject),
    };
    context
        .send(MessageFromBackend::RecordCreated {
            project: project.unwrap_or_default(),
            result,
        })
        .await;
}

pub async fn handle_update_record(
    context: super::AppContextHandle,
    project: Option<String>,
    id: u64,
    previous_name: String,
    patch: RecordPatch,
) {
    let api = context.state.read().await.api.clone();
    let result = match &project {
        Some(project) => api.update_record(project, id, &patch).await,
        None => Err(ApiError::NoProject),
    };
    context
        .send(MessageFromBackend::RecordUpdated {
            project: project.unwrap_or_default(),
            previous_name,
            result,
        })
        .await;
}

/// Deletes a record the frontend already removed from its table.
pub async fn handle_delete_record(
    context: super::AppContextHandle,
    project: Option<String>,
    id: u64,
    name: String,
) {
    let api = context.state.read().await.api.clone();
    let result = match &project {
        Some(project) => api.delete_record(project, id).await,
        None => Err(ApiError::NoProject),
    };
    if let Err(e) = &result {
        log::warn!("Record {name:?} ({id}) was not deleted on the server: {e}");
    }
    context
        .send(MessageFromBackend::RecordDeleted { name, result })
        .await;
}

#[cfg(test)]
mod tests {
    use axum::{
        Json, Router,
        http::StatusCode,
        routing::{delete, get, post},
    };
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    use super::*;
    use crate::{api::tests::record_json, services::testing::context_for};

    #[tokio::test]
    async fn records_need_an_open_project() {
        let (context, mut rx) = context_for(Router::new(), None).await;

        handle_load_records(context).await;

        match rx.recv().await {
            Some(MessageFromBackend::RecordsLoaded { result, .. }) => {
                assert_eq!(result, Err(ApiError::NoProject));
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn records_of_open_project_are_loaded() {
        let router = Router::new().route(
            "/api/audiorecords/guide",
            get(|| async { Json(json!([record_json("a"), record_json("b")])) }),
        );
        let (context, mut rx) = context_for(router, Some("guide")).await;

        handle_load_records(context).await;

        match rx.recv().await {
            Some(MessageFromBackend::RecordsLoaded { project, result }) => {
                assert_eq!(project, "guide");
                let names: Vec<_> = result.unwrap().into_iter().map(|r| r.name).collect();
                assert_eq!(names, ["a", "b"]);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn patch_body_carries_only_changed_fields() {
        let router = Router::new().route(
            "/api/audiorecords/guide/update-audio/:id",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body, json!({"tts": 1, "text": "hello world"}));
                Json(record_json("greeting"))
            }),
        );
        let (context, mut rx) = context_for(router, Some("guide")).await;

        handle_update_record(
            context,
            Some("guide".to_owned()),
            3,
            "greeting".to_owned(),
            RecordPatch {
                tts: 1,
                text: Some("hello world".to_owned()),
                ..RecordPatch::default()
            },
        )
        .await;

        match rx.recv().await {
            Some(MessageFromBackend::RecordUpdated {
                project,
                previous_name,
                result,
            }) => {
                assert_eq!(project, "guide");
                assert_eq!(previous_name, "greeting");
                assert!(result.is_ok());
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn failed_delete_is_reported_back() {
        let router = Router::new().route(
            "/api/audiorecords/guide/destroy/:id",
            delete(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let (context, mut rx) = context_for(router, Some("guide")).await;

        handle_delete_record(context, Some("guide".to_owned()), 3, "greeting".to_owned()).await;

        match rx.recv().await {
            Some(MessageFromBackend::RecordDeleted { name, result }) => {
                assert_eq!(name, "greeting");
                assert_eq!(result, Err(ApiError::Server { status: 500 }));
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_goes_to_the_project_it_was_issued_for() {
        let router = Router::new().route(
            "/api/audiorecords/first/yandex",
            post(|| async { (StatusCode::CREATED, Json(record_json("intro"))) }),
        );
        let (context, mut rx) = context_for(router, Some("second")).await;
        let request = NewRecord {
            name: "intro".to_owned(),
            text: "Welcome".to_owned(),
            speed: 1.0,
            tts: 1,
            voice: "alyss".to_owned(),
            emotion: None,
        };

        handle_create_record(context, Some("first".to_owned()), request, false).await;

        match rx.recv().await {
            Some(MessageFromBackend::RecordCreated { project, result }) => {
                assert_eq!(project, "first");
                assert_eq!(result.map(|r| r.name), Ok("intro".to_owned()));
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_without_open_project_never_reaches_the_server() {
        let (context, mut rx) = context_for(Router::new(), None).await;
        let request = NewRecord {
            name: "intro".to_owned(),
            text: "Welcome".to_owned(),
            speed: 1.0,
            tts: 1,
            voice: "alyss".to_owned(),
            emotion: None,
        };

        handle_create_record(context, None, request, false).await;

        match rx.recv().await {
            Some(MessageFromBackend::RecordCreated { project, result }) => {
                assert_eq!(project, "");
                assert_eq!(result, Err(ApiError::NoProject));
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }
}
