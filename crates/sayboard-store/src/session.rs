//! The one owned state object of a running client.
//!
//! [`Session`] holds every piece of state the pages share: the source
//! catalog, both list stores and their tables, the modal forms, the active
//! project and the number of requests in flight. User actions turn into
//! [`MessageToBackend`] commands through its `submit_*`/`confirm_*` methods;
//! backend answers are folded back in with [`Session::apply`], which reports
//! what the UI should do next as [`Effects`].

use std::time::Duration;

use sayboard_bridge::{
    MessageFromBackend, MessageToBackend,
    config::Config,
    error::ApiError,
    import::{FileImportOutcome, ImportReport},
    notification::{NotificationMessage, timestamp},
    project::Project,
    record::AudioRecord,
    source::SourcePayload,
};

use crate::{
    catalog::SourceCatalog,
    feedback::Feedback,
    form::{FormController, FormError},
    import_form::{FileImportDraft, ImportVerdict, OwnFilesDraft, report_text},
    list::ListStore,
    project_form::ProjectDraft,
    record_form::{RecordDraft, RecordEditDraft},
    table::{self, TableState},
};

/// What the UI has to do after a backend message was applied.
#[derive(Debug, Default)]
pub struct Effects {
    pub notifications: Vec<NotificationMessage>,
    /// Commands to send right away.
    pub commands: Vec<MessageToBackend>,
    /// Command to send once the delay has passed.
    pub delayed: Option<(Duration, MessageToBackend)>,
}

impl Effects {
    fn notify(notification: NotificationMessage) -> Self {
        Self {
            notifications: vec![notification],
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty() && self.commands.is_empty() && self.delayed.is_none()
    }
}

#[derive(Debug)]
pub struct Session {
    catalog: SourceCatalog,
    records: ListStore<AudioRecord>,
    projects: ListStore<Project>,
    pub records_table: TableState,
    pub projects_table: TableState,
    pub record_form: FormController<RecordDraft>,
    pub edit_form: FormController<RecordEditDraft>,
    pub project_form: FormController<ProjectDraft>,
    pub file_import_form: FormController<FileImportDraft>,
    pub own_files_form: FormController<OwnFilesDraft>,
    /// Text of the last own-files import report.
    import_report: String,
    active_project: Option<String>,
    reload_delay: Duration,
    in_flight: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Self {
            catalog: SourceCatalog::default(),
            records: ListStore::default(),
            projects: ListStore::default(),
            records_table: TableState::new(config.tables.records_per_page),
            projects_table: TableState::new(config.tables.projects_per_page),
            record_form: FormController::default(),
            edit_form: FormController::default(),
            project_form: FormController::default(),
            file_import_form: FormController::default(),
            own_files_form: FormController::default(),
            import_report: String::new(),
            active_project: config.active_project.clone(),
            reload_delay: Duration::from_secs(config.import.reload_delay_secs),
            in_flight: 0,
        }
    }

    pub fn catalog(&self) -> &SourceCatalog {
        &self.catalog
    }

    pub fn records(&self) -> &ListStore<AudioRecord> {
        &self.records
    }

    pub fn projects(&self) -> &ListStore<Project> {
        &self.projects
    }

    pub fn active_project(&self) -> Option<&str> {
        self.active_project.as_deref()
    }

    pub fn import_report(&self) -> &str {
        &self.import_report
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Whether closing the window now would abandon a request in progress.
    pub fn should_warn_on_close(&self) -> bool {
        self.in_flight > 0
    }

    fn begin_task(&mut self) {
        self.in_flight += 1;
    }

    fn finish_task(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    /// Switches the records page to `slug`. Records of the previous project
    /// are dropped until the new listing arrives.
    pub fn open_project(&mut self, slug: &str) -> MessageToBackend {
        self.active_project = Some(slug.to_owned());
        self.records = ListStore::default();
        self.records_table.reset();
        MessageToBackend::OpenProject(slug.to_owned())
    }

    pub fn open_record_form(&mut self) {
        if self.catalog.get(&self.record_form.draft().source).is_some() {
            self.record_form.reopen();
        } else {
            self.record_form.open(RecordDraft::new(&self.catalog));
        }
    }

    /// Seeds the edit form from the row named `name`. Returns `false` when
    /// the row is gone.
    pub fn open_edit_form(&mut self, name: &str) -> bool {
        match table::open_edit(&self.records, name, &self.catalog) {
            Some(draft) => {
                self.edit_form.open(draft);
                true
            }
            None => false,
        }
    }

    pub fn open_project_form(&mut self) {
        self.project_form.reopen();
    }

    pub fn open_file_import_form(&mut self) {
        if self.catalog.get(&self.file_import_form.draft().source).is_some() {
            self.file_import_form.reopen();
        } else {
            self.file_import_form
                .open(FileImportDraft::new(&self.catalog));
        }
    }

    pub fn open_own_files_form(&mut self) {
        self.import_report.clear();
        self.own_files_form.reopen();
    }

    /// Bookkeeping shared by every accepted submit: the task counts as in
    /// flight and the user is told it started.
    fn dispatch(&mut self, command: MessageToBackend) -> Effects {
        self.begin_task();
        Effects {
            notifications: vec![NotificationMessage::task_in_progress()],
            commands: vec![command],
            delayed: None,
        }
    }

    pub fn submit_record(&mut self) -> Result<Effects, FormError> {
        let request = self.record_form.submit(&self.catalog)?;
        Ok(self.dispatch(MessageToBackend::CreateRecord {
            request: request.request,
            overwrite: request.overwrite,
        }))
    }

    pub fn submit_edit(&mut self) -> Result<Effects, FormError> {
        let request = self.edit_form.submit(&self.catalog)?;
        Ok(self.dispatch(MessageToBackend::UpdateRecord {
            id: request.id,
            previous_name: request.previous_name,
            patch: request.patch,
        }))
    }

    pub fn submit_project(&mut self) -> Result<Effects, FormError> {
        let request = self.project_form.submit(&())?;
        Ok(self.dispatch(MessageToBackend::CreateProject(request)))
    }

    pub fn submit_file_import(&mut self) -> Result<Effects, FormError> {
        let request = self.file_import_form.submit(&self.catalog)?;
        Ok(self.dispatch(MessageToBackend::ImportFile(request)))
    }

    pub fn submit_own_files(&mut self) -> Result<Effects, FormError> {
        self.import_report.clear();
        let request = self.own_files_form.submit(&())?;
        Ok(self.dispatch(MessageToBackend::ImportOwnFiles(request)))
    }

    /// The command could not be handed to the backend, so no answer will
    /// ever come for it. Ends the task the command started and fails its
    /// form, or reports the lost request.
    pub fn command_not_sent(&mut self, command: &MessageToBackend, reason: &str) -> Effects {
        log::error!("Command was not delivered to the backend ({reason}): {command:?}");
        let error = ApiError::Transport(format!("the request was not sent ({reason})"));

        let form_failed = match command {
            MessageToBackend::CreateRecord { .. } => {
                self.record_form.fail(&error);
                true
            }
            MessageToBackend::UpdateRecord { .. } => {
                self.edit_form.fail(&error);
                true
            }
            MessageToBackend::CreateProject(_) => {
                self.project_form.fail(&error);
                true
            }
            MessageToBackend::ImportFile(_) => {
                self.file_import_form.fail(&error);
                true
            }
            MessageToBackend::ImportOwnFiles(_) => {
                self.own_files_form.fail(&error);
                true
            }
            MessageToBackend::DeleteRecord { name, .. } => {
                return Self::apply_deleted("Record", name, Err(error));
            }
            MessageToBackend::DeleteProject { name, .. } => {
                return Self::apply_deleted("Project", name, Err(error));
            }
            MessageToBackend::ConfigurationRequest
            | MessageToBackend::LoadSources
            | MessageToBackend::LoadProjects
            | MessageToBackend::OpenProject(_)
            | MessageToBackend::LoadRecords => false,
        };

        if form_failed {
            self.finish_task();
            Effects::default()
        } else {
            Effects::notify(
                Feedback::for_api_error(&error).into_notification("Request was not sent"),
            )
        }
    }

    pub fn go_to_records_page(&mut self, page: usize) {
        self.records_table.go_to(page, &self.records);
    }

    pub fn go_to_projects_page(&mut self, page: usize) {
        self.projects_table.go_to(page, &self.projects);
    }

    pub fn toggle_details(&mut self, name: &str) -> Option<bool> {
        table::toggle_details(&mut self.records, name)
    }

    /// Removes the record awaiting confirmation and returns the delete call
    /// to issue. The removal is not rolled back if that call fails.
    pub fn confirm_record_delete(&mut self) -> Option<MessageToBackend> {
        let record = self.records_table.confirm_delete(&mut self.records)?;
        log::info!("Removed record {:?} ahead of the server", record.name);
        Some(MessageToBackend::DeleteRecord {
            id: record.id,
            name: record.name,
        })
    }

    pub fn confirm_project_delete(&mut self) -> Option<MessageToBackend> {
        let project = self.projects_table.confirm_delete(&mut self.projects)?;
        if self.active_project.as_deref() == Some(project.slug.as_str()) {
            self.active_project = None;
            self.records = ListStore::default();
            self.records_table.reset();
        }
        Some(MessageToBackend::DeleteProject {
            slug: project.slug,
            name: project.name,
        })
    }

    /// Folds a backend message into the session.
    pub fn apply(&mut self, message: MessageFromBackend) -> Effects {
        match message {
            MessageFromBackend::NotificationMessage(notification) => Effects::notify(notification),
            MessageFromBackend::ConfigurationResponse(config) => self.apply_config(&config),
            MessageFromBackend::SourcesLoaded(result) => self.apply_sources(result),
            MessageFromBackend::ProjectsLoaded(result) => self.apply_projects(result),
            MessageFromBackend::RecordsLoaded { project, result } => {
                self.apply_records(&project, result)
            }
            MessageFromBackend::RecordCreated { project, result } => {
                self.apply_record_created(&project, result)
            }
            MessageFromBackend::RecordUpdated {
                project,
                previous_name,
                result,
            } => self.apply_record_updated(&project, &previous_name, result),
            MessageFromBackend::RecordDeleted { name, result } => {
                Self::apply_deleted("Record", &name, result)
            }
            MessageFromBackend::ProjectCreated(result) => self.apply_project_created(result),
            MessageFromBackend::ProjectDeleted { name, result } => {
                Self::apply_deleted("Project", &name, result)
            }
            MessageFromBackend::FileImported(result) => self.apply_file_imported(result),
            MessageFromBackend::OwnFilesImported(result) => self.apply_own_files_imported(result),
        }
    }

    fn apply_config(&mut self, config: &Config) -> Effects {
        self.records_table = TableState::new(config.tables.records_per_page);
        self.projects_table = TableState::new(config.tables.projects_per_page);
        self.reload_delay = Duration::from_secs(config.import.reload_delay_secs);

        let mut effects = Effects::default();
        if self.active_project.is_none() {
            self.active_project = config.active_project.clone();
        }
        if self.active_project.is_some() && !self.records.is_ready() {
            effects.commands.push(MessageToBackend::LoadRecords);
        }
        effects
    }

    fn apply_sources(&mut self, result: Result<Vec<SourcePayload>, ApiError>) -> Effects {
        match result {
            Ok(payloads) => {
                self.catalog = SourceCatalog::from_payloads(payloads);
                log::info!("Loaded {} sources", self.catalog.len());
                Effects::default()
            }
            Err(error) => {
                log::error!("Sources could not be loaded: {error}");
                self.catalog = SourceCatalog::default();
                Effects::notify(
                    Feedback::for_api_error(&error).into_notification("Sources were not loaded"),
                )
            }
        }
    }

    fn apply_projects(&mut self, result: Result<Vec<Project>, ApiError>) -> Effects {
        match result {
            Ok(projects) => {
                self.projects.load(projects);
                self.projects_table.clamp(&self.projects);
                Effects::default()
            }
            Err(error) => Effects::notify(
                Feedback::for_api_error(&error).into_notification("Projects were not loaded"),
            ),
        }
    }

    fn apply_records(
        &mut self,
        project: &str,
        result: Result<Vec<AudioRecord>, ApiError>,
    ) -> Effects {
        if self.active_project.as_deref() != Some(project) {
            log::debug!("Dropping records of {project:?}, it is no longer open");
            return Effects::default();
        }

        match result {
            Ok(records) => {
                self.records.load(records);
                self.records_table.clamp(&self.records);
                Effects::default()
            }
            Err(error) => Effects::notify(
                Feedback::for_api_error(&error).into_notification("Records were not loaded"),
            ),
        }
    }

    /// Whether an answer for `project` belongs to the list on screen.
    fn is_open_project(&self, project: &str) -> bool {
        let open = self.active_project.as_deref() == Some(project);
        if !open {
            log::debug!("Answer for {project:?} arrived after the project was closed");
        }
        open
    }

    fn apply_record_created(
        &mut self,
        project: &str,
        result: Result<AudioRecord, ApiError>,
    ) -> Effects {
        self.finish_task();
        match result {
            Ok(record) => {
                let message = format!("Record {} was saved", record.name);
                let name = record.name.clone();
                if self.is_open_project(project) {
                    // An overwrite answers with a record that may already be listed.
                    if self.records.position(&name).is_some() {
                        self.records.replace(&name, record);
                    } else {
                        self.records.insert_front(record);
                    }
                }
                self.record_form.succeed();
                Effects::notify(NotificationMessage::success(message))
            }
            Err(error) => {
                log::warn!("Record was not created: {error}");
                self.record_form.fail(&error);
                Effects::default()
            }
        }
    }

    fn apply_record_updated(
        &mut self,
        project: &str,
        previous_name: &str,
        result: Result<AudioRecord, ApiError>,
    ) -> Effects {
        self.finish_task();
        match result {
            Ok(record) => {
                let message = format!("Record {} was updated", record.name);
                if self.is_open_project(project) {
                    self.records.replace(previous_name, record);
                }
                self.edit_form.succeed();
                Effects::notify(NotificationMessage::success(message))
            }
            Err(error) => {
                log::warn!("Record {previous_name:?} was not updated: {error}");
                self.edit_form.fail(&error);
                Effects::default()
            }
        }
    }

    fn apply_deleted(kind: &str, name: &str, result: Result<(), ApiError>) -> Effects {
        match result {
            Ok(()) => Effects::notify(NotificationMessage::success(format!(
                "{kind} {name} was deleted"
            ))),
            Err(error) => {
                log::warn!("{kind} {name:?} was removed locally but not on the server: {error}");
                let reason = Feedback::for_api_error(&error).message;
                Effects::notify(
                    NotificationMessage::warning(format!(
                        "{kind} {name} may still exist on the server ({reason}). Reload the list"
                    ))
                    .title(format!("Delete failed at {}", timestamp())),
                )
            }
        }
    }

    fn apply_project_created(&mut self, result: Result<Project, ApiError>) -> Effects {
        self.finish_task();
        match result {
            Ok(project) => {
                let message = format!("Project {} was created", project.name);
                self.projects.insert_front(project);
                self.project_form.succeed();
                Effects::notify(NotificationMessage::success(message))
            }
            Err(error) => {
                self.project_form.fail(&error);
                Effects::default()
            }
        }
    }

    fn apply_file_imported(&mut self, result: Result<FileImportOutcome, ApiError>) -> Effects {
        self.finish_task();
        match result {
            Ok(outcome) => {
                self.file_import_form.succeed();
                let mut effects = Effects::notify(NotificationMessage::success(
                    "File was imported. Reloading the list",
                ));
                if !outcome.skipped.is_empty() {
                    effects.notifications.push(
                        NotificationMessage::warning(format!(
                            "Skipped rows: {}",
                            outcome.skipped.join(", ")
                        ))
                        .title("Partial import"),
                    );
                }
                effects.commands.push(MessageToBackend::LoadRecords);
                effects
            }
            Err(error) => {
                self.file_import_form.fail(&error);
                match error.field_message("file") {
                    Some(message) => Effects::notify(
                        NotificationMessage::error(message)
                            .title(format!("Import error at {}", timestamp())),
                    ),
                    None => Effects::default(),
                }
            }
        }
    }

    fn apply_own_files_imported(&mut self, result: Result<ImportReport, ApiError>) -> Effects {
        self.finish_task();
        let report = match result {
            Ok(report) => report,
            Err(error) => {
                self.own_files_form.fail(&error);
                return Effects::default();
            }
        };

        let verdict = ImportVerdict::of(&report);
        self.import_report = report_text(&report);
        if verdict == ImportVerdict::Failed {
            self.own_files_form.reopen();
        } else {
            self.own_files_form.succeed();
        }

        let mut effects = Effects::notify(verdict.notification(self.reload_delay));
        if verdict.needs_reload() {
            effects.delayed = Some((self.reload_delay, MessageToBackend::LoadRecords));
        }
        effects
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sayboard_bridge::notification::NotificationType;

    use super::*;
    use crate::feedback::NO_CHANGES;

    fn sources() -> Vec<SourcePayload> {
        serde_json::from_str(
            r#"[
                {"name": "yandex", "id": 1, "voices": ["alyss"], "emote": ["good"]},
                {"name": "crt", "id": 2, "voices": ["oksana2"], "emote": null}
            ]"#,
        )
        .unwrap()
    }

    fn record(name: &str) -> AudioRecord {
        serde_json::from_value(serde_json::json!({
            "id": 7,
            "name": name,
            "text": "hello",
            "source": "yandex",
            "voice": "alyss",
            "emote": "good",
            "playing_speed": "1.00",
        }))
        .unwrap()
    }

    fn session_with(names: &[&str]) -> Session {
        let mut session = Session::default();
        session.apply(MessageFromBackend::SourcesLoaded(Ok(sources())));
        session.open_project("guide");
        session.apply(MessageFromBackend::RecordsLoaded {
            project: "guide".to_owned(),
            result: Ok(names.iter().map(|name| record(name)).collect()),
        });
        session
    }

    fn names(session: &Session) -> Vec<&str> {
        session.records().items().iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn blocking_lasts_while_a_submit_is_in_flight() {
        let mut session = session_with(&[]);
        session.open_record_form();
        session.record_form.draft_mut().name = "intro".to_owned();
        session.record_form.draft_mut().text = "Welcome".to_owned();

        let effects = session.submit_record().unwrap();
        assert!(matches!(
            effects.commands[..],
            [MessageToBackend::CreateRecord { overwrite: false, .. }]
        ));
        assert!(session.should_warn_on_close());

        session.apply(MessageFromBackend::RecordCreated {
            project: "guide".to_owned(),
            result: Err(ApiError::Server { status: 502 }),
        });
        assert!(!session.should_warn_on_close());
        assert!(session.record_form.is_open());
    }

    #[test]
    fn created_record_goes_to_front_once() {
        let mut session = session_with(&["a", "b"]);
        session.open_record_form();
        session.record_form.draft_mut().name = "intro".to_owned();
        session.record_form.draft_mut().text = "Welcome".to_owned();
        session.submit_record().unwrap();

        let effects = session.apply(MessageFromBackend::RecordCreated {
            project: "guide".to_owned(),
            result: Ok(record("intro")),
        });

        assert_eq!(names(&session), ["intro", "a", "b"]);
        assert!(!session.record_form.is_open());
        assert_eq!(effects.notifications[0].notification_type, NotificationType::Success);
    }

    #[test]
    fn overwrite_replaces_listed_record() {
        let mut session = session_with(&["a", "intro", "b"]);
        let mut updated = record("intro");
        updated.text = "new".to_owned();

        session.apply(MessageFromBackend::RecordCreated {
            project: "guide".to_owned(),
            result: Ok(updated),
        });

        assert_eq!(names(&session), ["a", "intro", "b"]);
        assert_eq!(session.records().get(1).unwrap().text, "new");
    }

    #[test]
    fn edit_replaces_in_place_by_previous_name() {
        let mut session = session_with(&["a", "b", "c"]);
        assert!(session.open_edit_form("b"));
        session.edit_form.draft_mut().text = "hello world".to_owned();
        session.submit_edit().unwrap();

        session.apply(MessageFromBackend::RecordUpdated {
            project: "guide".to_owned(),
            previous_name: "b".to_owned(),
            result: Ok(record("b2")),
        });

        assert_eq!(names(&session), ["a", "b2", "c"]);
        assert!(!session.edit_form.is_open());
    }

    #[test]
    fn unchanged_edit_sends_nothing() {
        let mut session = session_with(&["a"]);
        session.open_edit_form("a");

        assert_eq!(session.submit_edit().unwrap_err(), FormError::NoChanges);
        assert_eq!(session.in_flight(), 0);
        assert_eq!(
            session.edit_form.errors().common.as_ref().unwrap().message,
            NO_CHANGES
        );
    }

    #[test]
    fn delete_of_row_two_of_five_holds_whatever_the_server_says() {
        for outcome in [Ok(()), Err(ApiError::Server { status: 500 })] {
            let mut session = session_with(&["r0", "r1", "r2", "r3", "r4"]);
            session.records_table.request_delete("r2");

            let command = session.confirm_record_delete().unwrap();
            assert!(matches!(command, MessageToBackend::DeleteRecord { ref name, .. } if name == "r2"));
            assert_eq!(names(&session), ["r0", "r1", "r3", "r4"]);

            let failed = outcome.is_err();
            let effects = session.apply(MessageFromBackend::RecordDeleted {
                name: "r2".to_owned(),
                result: outcome,
            });
            assert_eq!(session.records().len(), 4);
            assert_eq!(session.records().position("r2"), None);
            if failed {
                assert_eq!(
                    effects.notifications[0].notification_type,
                    NotificationType::Warning
                );
            }
        }
    }

    #[test]
    fn failed_source_load_leaves_catalog_empty() {
        let mut session = Session::default();
        let effects = session.apply(MessageFromBackend::SourcesLoaded(Err(
            ApiError::Transport("connection refused".to_owned()),
        )));

        assert!(session.catalog().is_empty());
        assert_eq!(effects.notifications.len(), 1);

        session.open_record_form();
        session.record_form.draft_mut().name = "intro".to_owned();
        session.record_form.draft_mut().text = "Welcome".to_owned();
        assert!(matches!(session.submit_record(), Err(FormError::UnknownSource(_))));
    }

    #[test]
    fn records_of_a_closed_project_are_ignored() {
        let mut session = session_with(&["a"]);
        session.open_project("other");

        session.apply(MessageFromBackend::RecordsLoaded {
            project: "guide".to_owned(),
            result: Ok(vec![record("late")]),
        });

        assert!(!session.records().is_ready());
    }

    fn submit_intro(session: &mut Session) -> Effects {
        session.open_record_form();
        session.record_form.draft_mut().name = "intro".to_owned();
        session.record_form.draft_mut().text = "Welcome".to_owned();
        session.submit_record().unwrap()
    }

    #[test]
    fn created_record_of_a_closed_project_stays_out_of_the_list() {
        let mut session = session_with(&["a1"]);
        submit_intro(&mut session);
        session.open_project("other");
        session.apply(MessageFromBackend::RecordsLoaded {
            project: "other".to_owned(),
            result: Ok(vec![record("b1")]),
        });

        let effects = session.apply(MessageFromBackend::RecordCreated {
            project: "guide".to_owned(),
            result: Ok(record("intro")),
        });

        assert_eq!(names(&session), ["b1"]);
        assert!(!session.record_form.is_open());
        assert!(!session.should_warn_on_close());
        assert_eq!(effects.notifications[0].notification_type, NotificationType::Success);
    }

    #[test]
    fn edited_record_of_a_closed_project_stays_out_of_the_list() {
        let mut session = session_with(&["a1"]);
        assert!(session.open_edit_form("a1"));
        session.edit_form.draft_mut().text = "hello world".to_owned();
        session.submit_edit().unwrap();
        session.open_project("other");
        session.apply(MessageFromBackend::RecordsLoaded {
            project: "other".to_owned(),
            result: Ok(vec![record("b1")]),
        });

        session.apply(MessageFromBackend::RecordUpdated {
            project: "guide".to_owned(),
            previous_name: "a1".to_owned(),
            result: Ok(record("a1")),
        });

        assert_eq!(names(&session), ["b1"]);
        assert!(!session.edit_form.is_open());
        assert_eq!(session.in_flight(), 0);
    }

    #[test]
    fn every_submit_announces_the_task() {
        let mut session = session_with(&[]);

        let effects = submit_intro(&mut session);

        assert_eq!(effects.commands.len(), 1);
        assert_eq!(effects.notifications.len(), 1);
        assert_eq!(
            effects.notifications[0].message,
            NotificationMessage::task_in_progress().message
        );
        assert!(effects.delayed.is_none());
    }

    #[test]
    fn undelivered_submit_releases_the_form() {
        let mut session = session_with(&[]);
        let effects = submit_intro(&mut session);

        let effects = session.command_not_sent(&effects.commands[0], "channel closed");

        assert!(effects.is_empty());
        assert!(!session.should_warn_on_close());
        assert!(!session.record_form.is_submitting());
        assert!(session.record_form.close());
        let banner = session.record_form.errors().common.clone().unwrap();
        assert_eq!(banner.style, NotificationType::Error);
    }

    #[test]
    fn undelivered_delete_is_reported() {
        let mut session = session_with(&["a", "b"]);
        session.records_table.request_delete("b");
        let command = session.confirm_record_delete().unwrap();

        let effects = session.command_not_sent(&command, "channel full");

        assert_eq!(names(&session), ["a"]);
        assert_eq!(effects.notifications[0].notification_type, NotificationType::Warning);
        assert!(effects.notifications[0].message.contains("Record b may still exist"));
    }

    #[test]
    fn partial_own_import_reloads_after_delay() {
        let mut session = session_with(&["a"]);
        session.open_own_files_form();
        session.own_files_form.draft_mut().voice = "Anna".to_owned();
        session.own_files_form.draft_mut().files = vec!["/tmp/a.wav".into(), "/tmp/b.wav".into()];
        session.submit_own_files().unwrap();

        let effects = session.apply(MessageFromBackend::OwnFilesImported(Ok(ImportReport {
            success: vec!["a.wav".to_owned()],
            errors: vec!["b.wav: unknown record".to_owned()],
        })));

        assert_eq!(effects.notifications[0].notification_type, NotificationType::Warning);
        assert!(matches!(
            effects.delayed,
            Some((delay, MessageToBackend::LoadRecords)) if delay == Duration::from_secs(5)
        ));
        assert!(session.import_report().contains("0: b.wav: unknown record"));
        assert!(session.own_files_form.draft().files.is_empty());
    }

    #[test]
    fn failed_own_import_keeps_form_open() {
        let mut session = session_with(&[]);
        session.open_own_files_form();
        session.own_files_form.draft_mut().voice = "Anna".to_owned();
        session.own_files_form.draft_mut().files = vec!["/tmp/b.wav".into()];
        session.submit_own_files().unwrap();

        let effects = session.apply(MessageFromBackend::OwnFilesImported(Ok(ImportReport {
            success: Vec::new(),
            errors: vec!["b.wav: unknown record".to_owned()],
        })));

        assert!(effects.delayed.is_none());
        assert!(session.own_files_form.is_open());
        assert_eq!(session.own_files_form.draft().files.len(), 1);
    }

    #[test]
    fn file_error_is_shown_as_danger_notification() {
        let mut session = session_with(&[]);
        session.open_file_import_form();
        session.file_import_form.draft_mut().path = Some("/tmp/rows.csv".into());
        session.submit_file_import().unwrap();

        let effects = session.apply(MessageFromBackend::FileImported(Err(
            ApiError::from_status(400, r#"{"file": ["Unsupported format"]}"#),
        )));

        assert_eq!(effects.notifications[0].notification_type, NotificationType::Error);
        assert_eq!(effects.notifications[0].message, "Unsupported format");
        assert!(session.file_import_form.is_open());
    }

    #[test]
    fn deleting_open_project_clears_records() {
        let mut session = session_with(&["a"]);
        session.apply(MessageFromBackend::ProjectsLoaded(Ok(vec![Project {
            name: "Guide".to_owned(),
            slug: "guide".to_owned(),
            last_updated: String::new(),
            audiorecords: None,
        }])));

        session.projects_table.request_delete("guide");
        let command = session.confirm_project_delete();

        assert!(matches!(command, Some(MessageToBackend::DeleteProject { .. })));
        assert_eq!(session.active_project(), None);
        assert!(session.records().is_empty());
    }

    #[test]
    fn configuration_with_active_project_loads_records() {
        let mut session = Session::default();
        let config = Config {
            active_project: Some("guide".to_owned()),
            ..Config::default()
        };

        let effects = session.apply(MessageFromBackend::ConfigurationResponse(config));

        assert_eq!(session.active_project(), Some("guide"));
        assert!(matches!(effects.commands[..], [MessageToBackend::LoadRecords]));
    }

    #[test]
    fn opening_a_project_starts_on_its_first_page() {
        let names: Vec<String> = (0..30).map(|i| format!("r{i}")).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut session = session_with(&names);

        session.go_to_records_page(5);
        assert_eq!(session.records_table.page(), 2);
        assert_eq!(session.records_table.rows(session.records()).len(), 5);

        session.open_project("other");
        assert_eq!(session.records_table.page(), 1);
        assert!(!session.records().is_ready());
    }
}
