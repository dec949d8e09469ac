//! Edit form for a single microservice.
//!
//! The controller is handed an already-resolved entity, copies it into its
//! form, and kicks off the team lookup in the background. Saving picks
//! `update` or `create` by whether the form carries an id, and navigates back
//! only when the backend accepted the entity.

use crate::navigation::Navigator;
use arc_swap::ArcSwap;
use microcatalog_client::{EntityResponse, MicroserviceApi, QueryRequest, TeamApi};
use microcatalog_core::error::Result;
use microcatalog_core::form::FormGroup;
use microcatalog_core::microservice::Microservice;
use microcatalog_core::team::Team;
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Create/update controller for the microservice edit form.
pub struct MicroserviceUpdate {
    microservice_api: Arc<dyn MicroserviceApi>,
    team_api: Arc<dyn TeamApi>,
    navigator: Arc<dyn Navigator>,
    team_query: QueryRequest,

    edit_form: Mutex<FormGroup>,
    saving: watch::Sender<bool>,
    teams: Arc<ArcSwap<Vec<Team>>>,
    teams_task: Mutex<Option<JoinHandle<()>>>,
}

impl MicroserviceUpdate {
    pub fn new(
        microservice_api: Arc<dyn MicroserviceApi>,
        team_api: Arc<dyn TeamApi>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let (saving, _) = watch::channel(false);
        Self {
            microservice_api,
            team_api,
            navigator,
            team_query: QueryRequest::default(),
            edit_form: Mutex::new(Microservice::form()),
            saving,
            teams: Arc::new(ArcSwap::from_pointee(Vec::new())),
            teams_task: Mutex::new(None),
        }
    }

    /// Paging used for the team lookup. Defaults to the whole list.
    pub fn with_team_query(mut self, query: QueryRequest) -> Self {
        self.team_query = query;
        self
    }

    /// Populate the form from the resolved entity and start the team lookup.
    ///
    /// Returns immediately; the team list fills in whenever the lookup
    /// completes. Must be called from within a tokio runtime.
    pub fn init(&self, microservice: &Microservice) {
        self.update_form(microservice);
        self.load_teams();
    }

    fn load_teams(&self) {
        let api = Arc::clone(&self.team_api);
        let teams = Arc::clone(&self.teams);
        let query = self.team_query.clone();
        let task = tokio::spawn(async move {
            match api.query(&query).await {
                Ok(res) => {
                    let list = res.into_body().unwrap_or_default();
                    debug!(count = list.len(), "Teams loaded");
                    teams.store(Arc::new(list));
                }
                Err(e) => warn!(error = %e, "Team lookup failed"),
            }
        });
        *lock(&self.teams_task) = Some(task);
    }

    /// Wait for an in-flight team lookup, if any. Nothing in the controller
    /// depends on this; it is for callers that want the full selector.
    pub async fn teams_loaded(&self) {
        let task = lock(&self.teams_task).take();
        if let Some(task) = task {
            if let Err(e) = task.await {
                warn!(error = %e, "Team lookup task aborted");
            }
        }
    }

    /// Current team list; empty until the lookup has answered.
    pub fn teams(&self) -> Arc<Vec<Team>> {
        self.teams.load_full()
    }

    pub fn update_form(&self, microservice: &Microservice) {
        lock(&self.edit_form).patch_value(microservice.to_form_patch());
    }

    /// Snapshot of the form.
    pub fn form(&self) -> FormGroup {
        lock(&self.edit_form).clone()
    }

    /// Form as a JSON object keyed by control name.
    pub fn form_value(&self) -> Value {
        lock(&self.edit_form).value()
    }

    pub fn is_valid(&self) -> bool {
        lock(&self.edit_form).is_valid()
    }

    /// Raw edit of one control.
    pub fn set_value(&self, field: &str, value: Value) -> Result<()> {
        lock(&self.edit_form).set(field, value)
    }

    /// Edit a text control; `None` empties it.
    pub fn set_text(&self, field: &str, text: Option<&str>) -> Result<()> {
        self.set_value(field, Value::from(text.map(str::to_string)))
    }

    pub fn select_team(&self, team: Option<&Team>) -> Result<()> {
        self.set_value("team", team.map_or(Value::Null, Value::from))
    }

    pub fn is_saving(&self) -> bool {
        *self.saving.borrow()
    }

    /// Follow the saving flag, e.g. to disable a submit trigger.
    pub fn subscribe_saving(&self) -> watch::Receiver<bool> {
        self.saving.subscribe()
    }

    pub fn previous_state(&self) {
        self.navigator.back();
    }

    /// Submit the form. The saving flag is raised but not checked, so a
    /// second call while one is in flight sends a second request.
    pub async fn save(&self) {
        self.saving.send_replace(true);
        let result = match self.create_from_form() {
            Ok(microservice) if microservice.id.is_some() => {
                info!(id = ?microservice.id, "Updating microservice");
                self.microservice_api.update(microservice).await
            }
            Ok(microservice) => {
                info!(name = ?microservice.name, "Creating microservice");
                self.microservice_api.create(microservice).await
            }
            Err(e) => Err(e),
        };
        self.on_save_response(result);
    }

    fn create_from_form(&self) -> Result<Microservice> {
        Microservice::from_form(&lock(&self.edit_form))
    }

    fn on_save_response(&self, result: Result<EntityResponse<Microservice>>) {
        match result {
            Ok(res) => {
                debug!(status = res.status.as_u16(), "Save accepted");
                self.on_save_success();
            }
            Err(e) => {
                warn!(error = %e, "Save failed");
                self.on_save_error();
            }
        }
    }

    fn on_save_success(&self) {
        self.saving.send_replace(false);
        self.previous_state();
    }

    fn on_save_error(&self) {
        self.saving.send_replace(false);
    }

    /// Stable key for a team option.
    pub fn track_by_id(_index: usize, item: &Team) -> Option<i64> {
        item.id
    }
}
