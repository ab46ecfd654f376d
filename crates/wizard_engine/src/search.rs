use std::sync::{Arc, Mutex};
use std::time::Duration;

use wizard_core::{Department, Location, LookupTicket, QueryOutcome, SearchState};
use wizard_logging::{wizard_debug, wizard_warn};

use crate::{lock, ApiError, Debouncer, EmployeeApi};

/// Async lookup behind a suggestion field.
#[async_trait::async_trait]
pub trait SearchSource<T>: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<T>, ApiError>;
}

pub struct DepartmentSearch {
    api: Arc<dyn EmployeeApi>,
}

impl DepartmentSearch {
    pub fn new(api: Arc<dyn EmployeeApi>) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait]
impl SearchSource<Department> for DepartmentSearch {
    async fn search(&self, query: &str) -> Result<Vec<Department>, ApiError> {
        self.api.search_departments(query).await
    }
}

pub struct LocationSearch {
    api: Arc<dyn EmployeeApi>,
}

impl LocationSearch {
    pub fn new(api: Arc<dyn EmployeeApi>) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait]
impl SearchSource<Location> for LocationSearch {
    async fn search(&self, query: &str) -> Result<Vec<Location>, ApiError> {
        self.api.search_locations(query).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    pub debounce: Duration,
    /// How long the panel stays open after focus is lost, so a click on a
    /// suggestion still lands.
    pub blur_grace: Duration,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            blur_grace: Duration::from_millis(200),
        }
    }
}

type DisplayFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Debounced autocomplete over a [`SearchSource`].
///
/// Lookups run on spawned tasks; their results go through the generation
/// check in [`SearchState`], so only the newest query can fill the list.
/// All scheduled work is cancelled on [`SearchController::shutdown`] or drop.
pub struct SearchController<T> {
    state: Arc<Mutex<SearchState<T>>>,
    display: DisplayFn<T>,
    lookup: Debouncer<LookupTicket>,
    blur: Debouncer<()>,
}

impl<T: Clone + Send + 'static> SearchController<T> {
    pub fn new<D>(source: Arc<dyn SearchSource<T>>, display: D, settings: SearchSettings) -> Self
    where
        D: Fn(&T) -> String + Send + Sync + 'static,
    {
        let state = Arc::new(Mutex::new(SearchState::new()));

        let lookup_state = Arc::clone(&state);
        let lookup = Debouncer::new(settings.debounce, move |ticket| {
            run_lookup(Arc::clone(&lookup_state), Arc::clone(&source), ticket)
        });

        let blur_state = Arc::clone(&state);
        let blur = Debouncer::new(settings.blur_grace, move |()| {
            let state = Arc::clone(&blur_state);
            async move {
                lock(&state).close();
            }
        });

        Self {
            state,
            display: Arc::new(display),
            lookup,
            blur,
        }
    }

    /// Swaps the search source; lookups that fire afterwards use it. Front
    /// ends use this to re-scope a field, e.g. locations per region.
    pub fn set_source(&self, source: Arc<dyn SearchSource<T>>) {
        let state = Arc::clone(&self.state);
        self.lookup.set_action(move |ticket| {
            run_lookup(Arc::clone(&state), Arc::clone(&source), ticket)
        });
    }

    pub fn set_query(&self, text: impl Into<String>) {
        self.blur.cancel();
        let outcome = lock(&self.state).set_query(text);
        match outcome {
            QueryOutcome::Lookup(ticket) => self.lookup.call(ticket),
            QueryOutcome::Cleared => self.lookup.cancel(),
        }
    }

    pub fn select(&self, item: T) {
        let display = (self.display)(&item);
        self.lookup.cancel();
        self.blur.cancel();
        lock(&self.state).select(item, display);
    }

    /// Picks the suggestion at `index`, returning it.
    pub fn select_index(&self, index: usize) -> Option<T> {
        let item = lock(&self.state).suggestions().get(index).cloned()?;
        self.select(item.clone());
        Some(item)
    }

    /// Focus left the field. The panel closes once the grace period passes.
    pub fn blur(&self) {
        self.blur.call(());
    }

    /// Focus came back before the grace period ended; keep the panel open.
    pub fn focus(&self) {
        self.blur.cancel();
    }

    /// Returns true when the current selection still matches `text`.
    pub fn sync_external_value(&self, text: &str) -> bool {
        let display = Arc::clone(&self.display);
        lock(&self.state).sync_external_value(text, |item| display(item))
    }

    pub fn clear(&self) {
        self.lookup.cancel();
        self.blur.cancel();
        lock(&self.state).clear();
    }

    pub fn snapshot(&self) -> SearchState<T> {
        lock(&self.state).clone()
    }

    pub fn display(&self, item: &T) -> String {
        (self.display)(item)
    }

    /// Cancels scheduled work. A lookup already running finds its generation
    /// gone and is discarded.
    pub fn shutdown(&self) {
        self.lookup.close();
        self.blur.close();
        lock(&self.state).clear();
    }
}

async fn run_lookup<T: Clone + Send + 'static>(
    state: Arc<Mutex<SearchState<T>>>,
    source: Arc<dyn SearchSource<T>>,
    ticket: LookupTicket,
) {
    let started = lock(&state).begin_lookup(&ticket);
    if !started {
        wizard_debug!("skipping superseded lookup #{}", ticket.generation);
        return;
    }

    let result = source.search(&ticket.query).await.map_err(|err| {
        wizard_warn!("suggestion lookup failed: {err}");
        err.message
    });

    let applied = lock(&state).finish_lookup(&ticket, result);
    if !applied {
        wizard_debug!("discarding stale results for lookup #{}", ticket.generation);
    }
}

/// Department autocomplete, displayed by name.
pub fn department_search(
    api: Arc<dyn EmployeeApi>,
    settings: SearchSettings,
) -> SearchController<Department> {
    SearchController::new(
        Arc::new(DepartmentSearch::new(api)),
        |dept: &Department| dept.name.clone(),
        settings,
    )
}

/// Office location autocomplete, displayed by name.
pub fn location_search(
    api: Arc<dyn EmployeeApi>,
    settings: SearchSettings,
) -> SearchController<Location> {
    SearchController::new(
        Arc::new(LocationSearch::new(api)),
        |loc: &Location| loc.name.clone(),
        settings,
    )
}
