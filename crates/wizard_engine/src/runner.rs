use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use wizard_core::{
    fallback_employee_id, next_employee_id, update, Department, Effect, Field, Location, Msg,
    Route, SubmitStage, WizardRole, WizardState, WizardViewModel,
};
use wizard_logging::{mask_email, wizard_debug, wizard_error, wizard_info, wizard_warn};

use crate::search::{department_search, location_search};
use crate::{lock, DraftAutosave, DraftStore, EmployeeApi, SearchController, SearchSettings};

/// Receives the route to show next, e.g. the employee listing after a
/// successful submission.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerSettings {
    pub search: SearchSettings,
    pub autosave_delay: Duration,
    pub autosave_enabled: bool,
    /// Pause between "all done" and navigating away.
    pub navigation_delay: Duration,
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            search: SearchSettings::default(),
            autosave_delay: DraftAutosave::DEFAULT_DELAY,
            autosave_enabled: true,
            navigation_delay: Duration::from_secs(1),
        }
    }
}

struct Inner {
    state: Mutex<WizardState>,
    api: Arc<dyn EmployeeApi>,
    autosave: DraftAutosave,
    navigator: Arc<dyn Navigator>,
    departments: SearchController<Department>,
    locations: SearchController<Location>,
    navigation_delay: Duration,
    shutdown: CancellationToken,
}

/// Drives the wizard state machine and executes its effects.
///
/// Remote writes run on spawned tasks and report back through
/// [`WizardRunner::dispatch`]; the state machine only asks for the details
/// write after the basic-info write succeeded. After [`WizardRunner::shutdown`]
/// every late outcome is ignored and all timers are cancelled.
#[derive(Clone)]
pub struct WizardRunner {
    inner: Arc<Inner>,
}

impl WizardRunner {
    /// Must be called from within a Tokio runtime.
    pub fn new(
        role: WizardRole,
        api: Arc<dyn EmployeeApi>,
        store: Arc<dyn DraftStore>,
        navigator: Arc<dyn Navigator>,
        settings: RunnerSettings,
    ) -> Self {
        let autosave = DraftAutosave::new(role, store, settings.autosave_delay);
        autosave.set_enabled(settings.autosave_enabled);
        let inner = Inner {
            state: Mutex::new(WizardState::new(role)),
            departments: department_search(Arc::clone(&api), settings.search),
            locations: location_search(Arc::clone(&api), settings.search),
            api,
            autosave,
            navigator,
            navigation_delay: settings.navigation_delay,
            shutdown: CancellationToken::new(),
        };
        Self {
            inner: Arc::new(inner),
        }
    }

    pub fn role(&self) -> WizardRole {
        self.inner.autosave.role()
    }

    pub fn departments(&self) -> &SearchController<Department> {
        &self.inner.departments
    }

    pub fn locations(&self) -> &SearchController<Location> {
        &self.inner.locations
    }

    /// Restores the stored draft (at most one read) and syncs the
    /// suggestion fields with the restored values.
    pub fn mount(&self) {
        let draft = self.inner.autosave.restore();
        self.dispatch(Msg::DraftRestored(draft));
        self.sync_search_fields();
    }

    pub fn view(&self) -> WizardViewModel {
        lock(&self.inner.state).view()
    }

    /// Returns a fresh view only if something changed since the last call.
    pub fn take_view_if_dirty(&self) -> Option<WizardViewModel> {
        let mut state = lock(&self.inner.state);
        let view = state.view();
        state.consume_dirty().then_some(view)
    }

    /// Field edit from the user. Suggestion fields also drive their search.
    pub fn edit(&self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Department => self.inner.departments.set_query(value.clone()),
            Field::OfficeLocation => self.inner.locations.set_query(value.clone()),
            _ => {}
        }
        self.dispatch(Msg::FieldChanged { field, value });
    }

    /// Picks suggestion `index` for a suggestion field and writes its name
    /// into the form. Returns the chosen name.
    pub fn choose_suggestion(&self, field: Field, index: usize) -> Option<String> {
        let chosen = match field {
            Field::Department => self
                .inner
                .departments
                .select_index(index)
                .map(|dept| dept.name),
            Field::OfficeLocation => self
                .inner
                .locations
                .select_index(index)
                .map(|loc| loc.name),
            _ => None,
        }?;
        self.dispatch(Msg::FieldChanged {
            field,
            value: chosen.clone(),
        });
        Some(chosen)
    }

    /// The user moved away from `field`; its suggestion panel closes after
    /// the grace period unless [`WizardRunner::focus`] brings it back.
    pub fn leave(&self, field: Field) {
        match field {
            Field::Department => self.inner.departments.blur(),
            Field::OfficeLocation => self.inner.locations.blur(),
            _ => {}
        }
    }

    pub fn focus(&self, field: Field) {
        match field {
            Field::Department => self.inner.departments.focus(),
            Field::OfficeLocation => self.inner.locations.focus(),
            _ => {}
        }
    }

    pub fn next(&self) {
        self.dispatch(Msg::NextClicked);
    }

    pub fn submit(&self) {
        self.dispatch(Msg::SubmitClicked);
    }

    pub fn clear_draft(&self) {
        self.dispatch(Msg::ClearDraftClicked);
        self.sync_search_fields();
    }

    pub fn dispatch(&self, msg: Msg) {
        if self.inner.shutdown.is_cancelled() {
            wizard_debug!("Runner shut down; dropping message");
            return;
        }
        let effects = {
            let mut guard = lock(&self.inner.state);
            let state = std::mem::take(&mut *guard);
            let (state, effects) = update(state, msg);
            *guard = state;
            // Snapshots reach the autosave in state order, even with several
            // dispatchers; scheduling only spawns a timer.
            effects
                .into_iter()
                .filter_map(|effect| match effect {
                    Effect::SaveDraft { draft, .. } => {
                        self.inner.autosave.schedule(draft);
                        None
                    }
                    other => Some(other),
                })
                .collect::<Vec<_>>()
        };
        for effect in effects {
            self.run_effect(effect);
        }
    }

    /// Cancels timers and pending work. Outcomes of writes already sent are
    /// ignored when they arrive.
    pub fn shutdown(&self) {
        self.inner.shutdown.cancel();
        self.inner.autosave.shutdown();
        self.inner.departments.shutdown();
        self.inner.locations.shutdown();
    }

    fn sync_search_fields(&self) {
        let (department, location) = {
            let state = lock(&self.inner.state);
            (
                state.step1().department.clone(),
                state.step2().office_location.clone(),
            )
        };
        self.inner.departments.sync_external_value(&department);
        self.inner.locations.sync_external_value(&location);
    }

    fn run_effect(&self, effect: Effect) {
        match effect {
            // Scheduled under the state lock in `dispatch`.
            Effect::SaveDraft { .. } => {}
            Effect::ClearDraft { .. } => {
                self.inner.autosave.clear();
            }
            Effect::ResolveEmployeeId { department } => {
                let api = Arc::clone(&self.inner.api);
                let runner = self.clone();
                self.spawn_cancellable(async move {
                    let employee_id = match api.list_basic_info().await {
                        Ok(existing) => next_employee_id(&department, &existing),
                        Err(err) => {
                            wizard_warn!("Falling back to timestamp employee id: {err}");
                            fallback_employee_id(&department, epoch_millis())
                        }
                    };
                    runner.dispatch(Msg::EmployeeIdResolved {
                        department,
                        employee_id,
                    });
                });
            }
            Effect::CreateBasicInfo(record) => {
                wizard_info!(
                    "Submitting basicInfo employee_id={} email={}",
                    record.employee_id,
                    mask_email(&record.email)
                );
                let api = Arc::clone(&self.inner.api);
                let runner = self.clone();
                tokio::spawn(async move {
                    let msg = match api.create_basic_info(&record).await {
                        Ok(saved) => Msg::BasicInfoSaved(saved),
                        Err(err) => {
                            wizard_error!("basicInfo submission failed: {err}");
                            Msg::SubmissionFailed {
                                stage: SubmitStage::BasicInfo,
                                message: err.to_string(),
                            }
                        }
                    };
                    runner.dispatch(msg);
                });
            }
            Effect::CreateDetails(record) => {
                wizard_info!("Submitting details employee_id={}", record.employee_id);
                let api = Arc::clone(&self.inner.api);
                let runner = self.clone();
                tokio::spawn(async move {
                    let msg = match api.create_details(&record).await {
                        Ok(saved) => Msg::DetailsSaved(saved),
                        Err(err) => {
                            wizard_error!("details submission failed: {err}");
                            Msg::SubmissionFailed {
                                stage: SubmitStage::Details,
                                message: err.to_string(),
                            }
                        }
                    };
                    runner.dispatch(msg);
                });
            }
            Effect::ScheduleNavigation(route) => {
                let navigator = Arc::clone(&self.inner.navigator);
                let delay = self.inner.navigation_delay;
                self.spawn_cancellable(async move {
                    tokio::time::sleep(delay).await;
                    wizard_info!("Navigating to {}", route.path());
                    navigator.navigate(route);
                });
            }
        }
    }

    fn spawn_cancellable<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = self.inner.shutdown.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = task => {}
            }
        });
    }
}

fn epoch_millis() -> u64 {
    chrono::Utc::now().timestamp_millis().unsigned_abs()
}
