//! Wizard engine: remote calls, timers, draft storage and effect execution.
mod api;
mod config;
mod debounce;
mod draft;
mod listing;
mod persist;
mod runner;
mod search;
mod types;

use std::sync::{Mutex, MutexGuard, PoisonError};

pub use api::{ApiSettings, EmployeeApi, ReqwestEmployeeApi};
pub use config::WizardConfig;
pub use debounce::Debouncer;
pub use draft::{
    clear_draft, restore_draft, save_draft, DraftAutosave, DraftStore, DraftStoreError,
    FileDraftStore, MemoryDraftStore,
};
pub use listing::load_employees;
pub use persist::{ensure_store_dir, AtomicFileWriter, PersistError};
pub use runner::{Navigator, RunnerSettings, WizardRunner};
pub use search::{
    department_search, location_search, DepartmentSearch, LocationSearch, SearchController,
    SearchSettings, SearchSource,
};
pub use types::{ApiError, ApiErrorKind};

/// A panicked holder leaves plain data behind; keep using it.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
