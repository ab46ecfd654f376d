use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ApiSettings, RunnerSettings, SearchSettings};

/// Everything the wizard needs to run. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    pub api: ApiSettings,
    pub search_debounce_ms: u64,
    pub blur_grace_ms: u64,
    pub autosave_debounce_ms: u64,
    pub autosave_enabled: bool,
    pub navigation_delay_ms: u64,
    pub draft_dir: PathBuf,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            api: ApiSettings::default(),
            search_debounce_ms: 300,
            blur_grace_ms: 200,
            autosave_debounce_ms: 2_000,
            autosave_enabled: true,
            navigation_delay_ms: 1_000,
            draft_dir: PathBuf::from(".wizard_drafts"),
        }
    }
}

impl WizardConfig {
    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            debounce: Duration::from_millis(self.search_debounce_ms),
            blur_grace: Duration::from_millis(self.blur_grace_ms),
        }
    }

    pub fn runner_settings(&self) -> RunnerSettings {
        RunnerSettings {
            search: self.search_settings(),
            autosave_delay: Duration::from_millis(self.autosave_debounce_ms),
            autosave_enabled: self.autosave_enabled,
            navigation_delay: Duration::from_millis(self.navigation_delay_ms),
        }
    }
}
