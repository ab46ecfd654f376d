use crate::view_model::WizardViewModel;
use crate::{
    validate_step1, validate_step2, BasicInfo, Details, Draft, FieldErrors, ProgressPipeline,
    Step1Form, Step2Form, WizardRole,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    #[default]
    BasicInfo,
    Details,
}

impl WizardStep {
    pub fn number(self) -> u8 {
        match self {
            WizardStep::BasicInfo => 1,
            WizardStep::Details => 2,
        }
    }
}

/// Which remote write a submission is waiting on (or failed at).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStage {
    BasicInfo,
    Details,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Submitting(SubmitStage),
    Succeeded,
    Failed(SubmitStage),
}

impl SubmissionPhase {
    pub fn is_busy(self) -> bool {
        matches!(self, SubmissionPhase::Submitting(_) | SubmissionPhase::Succeeded)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardState {
    role: WizardRole,
    step: WizardStep,
    step1: Step1Form,
    /// Step 1 values captured when Next passed validation.
    step1_confirmed: Option<Step1Form>,
    step2: Step2Form,
    errors: FieldErrors,
    phase: SubmissionPhase,
    progress: ProgressPipeline,
    last_error: Option<String>,
    dirty: bool,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new(WizardRole::default())
    }
}

impl WizardState {
    /// Admins start on step 1; ops users only ever see step 2.
    pub fn new(role: WizardRole) -> Self {
        let step = match role {
            WizardRole::Admin => WizardStep::BasicInfo,
            WizardRole::Ops => WizardStep::Details,
        };
        Self {
            role,
            step,
            step1: Step1Form::default(),
            step1_confirmed: None,
            step2: Step2Form::default(),
            errors: FieldErrors::new(),
            phase: SubmissionPhase::Idle,
            progress: ProgressPipeline::new(),
            last_error: None,
            dirty: true,
        }
    }

    pub fn role(&self) -> WizardRole {
        self.role
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn progress(&self) -> &ProgressPipeline {
        &self.progress
    }

    pub fn step1(&self) -> &Step1Form {
        &self.step1
    }

    pub fn step2(&self) -> &Step2Form {
        &self.step2
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn view(&self) -> WizardViewModel {
        WizardViewModel {
            role: self.role,
            step: self.step,
            step1: self.step1.clone(),
            step2: self.step2.clone(),
            errors: self.errors.clone(),
            next_enabled: self.next_enabled(),
            submit_enabled: self.submit_enabled(),
            phase: self.phase,
            show_progress: self.phase != SubmissionPhase::Idle,
            progress: self.progress.steps().to_vec(),
            last_error: self.last_error.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether state changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn draft(&self) -> Draft {
        Draft {
            step1: Some(self.step1.clone()),
            step2: Some(self.step2.clone()),
        }
    }

    pub(crate) fn restore(&mut self, draft: Draft) {
        if let Some(step1) = draft.step1 {
            self.step1 = step1;
        }
        if let Some(step2) = draft.step2 {
            self.step2 = step2;
        }
        self.mark_dirty();
    }

    pub(crate) fn step1_mut(&mut self) -> &mut Step1Form {
        &mut self.step1
    }

    pub(crate) fn step2_mut(&mut self) -> &mut Step2Form {
        &mut self.step2
    }

    pub(crate) fn errors_mut(&mut self) -> &mut FieldErrors {
        &mut self.errors
    }

    pub(crate) fn set_step(&mut self, step: WizardStep) {
        self.step = step;
    }

    pub(crate) fn confirm_step1(&mut self) {
        self.step1_confirmed = Some(self.step1.clone());
    }

    pub(crate) fn reset_forms(&mut self) {
        self.step1 = Step1Form::default();
        self.step2 = Step2Form::default();
        if self.step == WizardStep::BasicInfo {
            self.step1_confirmed = None;
        }
        self.mark_dirty();
    }

    fn next_enabled(&self) -> bool {
        self.step == WizardStep::BasicInfo
            && !self.step1.full_name.trim().is_empty()
            && !self.step1.email.trim().is_empty()
            && !self.step1.department.trim().is_empty()
            && self.step1.role.is_some()
            && self.errors.is_empty()
    }

    fn submit_enabled(&self) -> bool {
        self.step == WizardStep::Details
            && self.step2.employment_type.is_some()
            && !self.step2.office_location.trim().is_empty()
            && self.errors.is_empty()
            && !self.phase.is_busy()
    }

    /// Step 1 data the submission is built from: the confirmed values for
    /// admins, the step 1 draft without an id for ops.
    fn step1_source(&self) -> Step1Form {
        match self.role {
            WizardRole::Admin => self
                .step1_confirmed
                .clone()
                .unwrap_or_else(|| self.step1.clone()),
            WizardRole::Ops => Step1Form {
                employee_id: String::new(),
                ..self.step1.clone()
            },
        }
    }

    /// Validation over the combined step data. Ops users are not shown step 1,
    /// so only step 2 rules apply to them.
    pub(crate) fn validate_for_submit(&self) -> FieldErrors {
        let mut errors = validate_step2(&self.step2);
        if self.role == WizardRole::Admin {
            errors.extend(validate_step1(&self.step1_source()));
        }
        errors
    }

    pub(crate) fn basic_info_payload(&self) -> BasicInfo {
        let step1 = self.step1_source();
        BasicInfo {
            id: None,
            full_name: step1.full_name,
            email: step1.email,
            department: step1.department,
            role: step1.role.unwrap_or_default(),
            employee_id: step1.employee_id,
        }
    }

    /// Details payload, keyed by the identifiers the basic-info write stored.
    pub(crate) fn details_payload(&self, saved: &BasicInfo) -> Details {
        Details {
            id: None,
            employee_id: saved.employee_id.clone(),
            email: saved.email.clone(),
            employment_type: self.step2.employment_type.unwrap_or_default(),
            office_location: self.step2.office_location.clone(),
            notes: self.step2.notes.clone(),
            photo: self.step2.photo.clone(),
        }
    }

    pub(crate) fn start_submission(&mut self) {
        self.progress.begin_attempt();
        self.phase = SubmissionPhase::Submitting(SubmitStage::BasicInfo);
        self.last_error = None;
        self.mark_dirty();
    }

    pub(crate) fn basic_info_saved(&mut self) {
        self.progress.basic_info_saved();
        self.phase = SubmissionPhase::Submitting(SubmitStage::Details);
        self.mark_dirty();
    }

    pub(crate) fn details_saved(&mut self) {
        self.progress.details_saved();
        self.phase = SubmissionPhase::Succeeded;
        self.mark_dirty();
    }

    pub(crate) fn submission_failed(&mut self, stage: SubmitStage, message: String) {
        self.progress.fail_in_progress();
        self.phase = SubmissionPhase::Failed(stage);
        self.last_error = Some(message);
        self.mark_dirty();
    }
}
