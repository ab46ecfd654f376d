use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use thiserror::Error;
use wizard_core::{Draft, WizardRole};
use wizard_logging::{wizard_debug, wizard_error, wizard_info, wizard_warn};

use crate::persist::{AtomicFileWriter, PersistError};
use crate::{lock, Debouncer};

#[derive(Debug, Error)]
pub enum DraftStoreError {
    #[error("draft serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("draft persistence failed: {0}")]
    Persist(#[from] PersistError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Key-value persistence for drafts, one entry per wizard role.
pub trait DraftStore: Send + Sync {
    fn get(&self, role: WizardRole) -> Result<Option<Draft>, DraftStoreError>;
    fn set(&self, role: WizardRole, draft: &Draft) -> Result<(), DraftStoreError>;
    fn delete(&self, role: WizardRole) -> Result<(), DraftStoreError>;
}

/// Stores each role's draft as `<dir>/<role key>.json`.
#[derive(Debug, Clone)]
pub struct FileDraftStore {
    writer: AtomicFileWriter,
}

impl FileDraftStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            writer: AtomicFileWriter::new(dir.into()),
        }
    }

    fn filename(role: WizardRole) -> String {
        format!("{}.json", role.draft_key())
    }
}

impl DraftStore for FileDraftStore {
    fn get(&self, role: WizardRole) -> Result<Option<Draft>, DraftStoreError> {
        let path = self.writer.dir().join(Self::filename(role));
        let content = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_slice(&content)?))
    }

    fn set(&self, role: WizardRole, draft: &Draft) -> Result<(), DraftStoreError> {
        let content = serde_json::to_vec_pretty(draft)?;
        self.writer.write(&Self::filename(role), &content)?;
        Ok(())
    }

    fn delete(&self, role: WizardRole) -> Result<(), DraftStoreError> {
        self.writer.remove(&Self::filename(role))?;
        Ok(())
    }
}

/// In-process store; contents die with the process.
#[derive(Debug, Default)]
pub struct MemoryDraftStore {
    drafts: Mutex<HashMap<WizardRole, Draft>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DraftStore for MemoryDraftStore {
    fn get(&self, role: WizardRole) -> Result<Option<Draft>, DraftStoreError> {
        Ok(lock(&self.drafts).get(&role).cloned())
    }

    fn set(&self, role: WizardRole, draft: &Draft) -> Result<(), DraftStoreError> {
        lock(&self.drafts).insert(role, draft.clone());
        Ok(())
    }

    fn delete(&self, role: WizardRole) -> Result<(), DraftStoreError> {
        lock(&self.drafts).remove(&role);
        Ok(())
    }
}

/// Reads the stored draft once. Failures are logged and treated as "no draft".
pub fn restore_draft(store: &dyn DraftStore, role: WizardRole) -> Option<Draft> {
    match store.get(role) {
        Ok(Some(draft)) => {
            wizard_info!("Restored {role} draft");
            Some(draft)
        }
        Ok(None) => None,
        Err(err) => {
            wizard_warn!("Failed to load {role} draft: {err}");
            None
        }
    }
}

/// Best-effort overwrite; returns whether the write succeeded.
pub fn save_draft(store: &dyn DraftStore, role: WizardRole, draft: &Draft) -> bool {
    match store.set(role, draft) {
        Ok(()) => {
            wizard_debug!("Saved {role} draft");
            true
        }
        Err(err) => {
            wizard_error!("Failed to save {role} draft: {err}");
            false
        }
    }
}

pub fn clear_draft(store: &dyn DraftStore, role: WizardRole) -> bool {
    match store.delete(role) {
        Ok(()) => {
            wizard_info!("Cleared {role} draft");
            true
        }
        Err(err) => {
            wizard_error!("Failed to clear {role} draft: {err}");
            false
        }
    }
}

/// Debounced writer from in-memory step data to a [`DraftStore`].
///
/// Every [`DraftAutosave::schedule`] replaces the pending snapshot; only the
/// last one inside the quiet period is written.
pub struct DraftAutosave {
    role: WizardRole,
    store: Arc<dyn DraftStore>,
    enabled: Arc<AtomicBool>,
    writer: Debouncer<Draft>,
}

impl DraftAutosave {
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(2);

    pub fn new(role: WizardRole, store: Arc<dyn DraftStore>, delay: Duration) -> Self {
        let enabled = Arc::new(AtomicBool::new(true));
        let writer = {
            let store = Arc::clone(&store);
            let enabled = Arc::clone(&enabled);
            Debouncer::new(delay, move |draft: Draft| {
                let store = Arc::clone(&store);
                let enabled = Arc::clone(&enabled);
                async move {
                    if enabled.load(Ordering::Relaxed) {
                        save_draft(store.as_ref(), role, &draft);
                    }
                }
            })
        };
        Self {
            role,
            store,
            enabled,
            writer,
        }
    }

    pub fn role(&self) -> WizardRole {
        self.role
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn schedule(&self, draft: Draft) {
        self.writer.call(draft);
    }

    pub fn restore(&self) -> Option<Draft> {
        restore_draft(self.store.as_ref(), self.role)
    }

    /// Drops any pending write and deletes the stored draft.
    pub fn clear(&self) -> bool {
        self.writer.cancel();
        clear_draft(self.store.as_ref(), self.role)
    }

    pub fn shutdown(&self) {
        self.writer.close();
    }
}
