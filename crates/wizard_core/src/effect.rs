use crate::{BasicInfo, Details, Draft, Route, WizardRole};

/// Side effects requested by [`crate::update`]; executed by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Schedule a debounced, full-overwrite draft save.
    SaveDraft { role: WizardRole, draft: Draft },
    ClearDraft { role: WizardRole },
    /// Derive an employee id for the department (needs the existing records).
    ResolveEmployeeId { department: String },
    CreateBasicInfo(BasicInfo),
    CreateDetails(Details),
    /// Navigate after the post-success delay.
    ScheduleNavigation(Route),
}
