use crate::{FieldErrors, ProgressStep, Step1Form, Step2Form, SubmissionPhase, WizardRole, WizardStep};

/// Plain data handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardViewModel {
    pub role: WizardRole,
    pub step: WizardStep,
    pub step1: Step1Form,
    pub step2: Step2Form,
    pub errors: FieldErrors,
    pub next_enabled: bool,
    pub submit_enabled: bool,
    pub phase: SubmissionPhase,
    pub show_progress: bool,
    pub progress: Vec<ProgressStep>,
    pub last_error: Option<String>,
    pub dirty: bool,
}
