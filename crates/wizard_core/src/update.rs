use crate::{Effect, Field, Msg, Route, SubmissionPhase, SubmitStage, WizardState, WizardStep};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: WizardState, msg: Msg) -> (WizardState, Vec<Effect>) {
    let effects = match msg {
        Msg::DraftRestored(draft) => {
            let Some(draft) = draft else {
                return (state, Vec::new());
            };
            state.restore(draft);
            // A stored id may predate newer records; derive it again.
            let department = state.step1().department.clone();
            if state.step() == WizardStep::BasicInfo && !department.trim().is_empty() {
                vec![Effect::ResolveEmployeeId { department }]
            } else {
                Vec::new()
            }
        }
        Msg::FieldChanged { field, value } => {
            // Step 1 is only editable while it is on screen.
            if field.is_step1() && state.step() != WizardStep::BasicInfo {
                return (state, Vec::new());
            }
            let mut effects = Vec::with_capacity(2);
            if field.is_step1() {
                state.step1_mut().apply(field, value);
            } else {
                state.step2_mut().apply(field, value);
            }
            state.errors_mut().remove(&field);
            if field == Field::Department {
                let department = state.step1().department.clone();
                if department.is_empty() {
                    state.step1_mut().employee_id.clear();
                } else {
                    effects.push(Effect::ResolveEmployeeId { department });
                }
            }
            state.mark_dirty();
            effects.push(save_draft(&state));
            effects
        }
        Msg::EmployeeIdResolved {
            department,
            employee_id,
        } => {
            // A slower lookup for an earlier department must not win.
            if state.step1().department != department {
                return (state, Vec::new());
            }
            state.step1_mut().employee_id = employee_id;
            state.mark_dirty();
            vec![save_draft(&state)]
        }
        Msg::NextClicked => {
            if state.step() != WizardStep::BasicInfo {
                return (state, Vec::new());
            }
            let errors = crate::validate_step1(state.step1());
            state.mark_dirty();
            if errors.is_empty() {
                state.confirm_step1();
                state.set_step(WizardStep::Details);
            } else {
                *state.errors_mut() = errors;
            }
            Vec::new()
        }
        Msg::SubmitClicked => {
            if state.step() != WizardStep::Details || state.phase().is_busy() {
                return (state, Vec::new());
            }
            let errors = state.validate_for_submit();
            if !errors.is_empty() {
                *state.errors_mut() = errors;
                state.mark_dirty();
                return (state, Vec::new());
            }
            state.start_submission();
            vec![Effect::CreateBasicInfo(state.basic_info_payload())]
        }
        Msg::BasicInfoSaved(saved) => {
            if state.phase() != SubmissionPhase::Submitting(SubmitStage::BasicInfo) {
                return (state, Vec::new());
            }
            state.basic_info_saved();
            vec![Effect::CreateDetails(state.details_payload(&saved))]
        }
        Msg::DetailsSaved(_) => {
            if state.phase() != SubmissionPhase::Submitting(SubmitStage::Details) {
                return (state, Vec::new());
            }
            state.details_saved();
            vec![Effect::ScheduleNavigation(Route::Employees)]
        }
        Msg::SubmissionFailed { stage, message } => {
            if state.phase() != SubmissionPhase::Submitting(stage) {
                return (state, Vec::new());
            }
            state.submission_failed(stage, message);
            Vec::new()
        }
        Msg::ClearDraftClicked => {
            state.reset_forms();
            vec![Effect::ClearDraft { role: state.role() }]
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn save_draft(state: &WizardState) -> Effect {
    Effect::SaveDraft {
        role: state.role(),
        draft: state.draft(),
    }
}
