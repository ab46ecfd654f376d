use crate::{BasicInfo, Details, Draft, Field, SubmitStage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Draft read once when the wizard is mounted; `None` when nothing was stored.
    DraftRestored(Option<Draft>),
    /// User edited a field.
    FieldChanged { field: Field, value: String },
    /// Employee id derived for `department`.
    EmployeeIdResolved {
        department: String,
        employee_id: String,
    },
    /// User clicked Next on step 1.
    NextClicked,
    /// User clicked Submit on step 2.
    SubmitClicked,
    /// Basic-info write succeeded; carries the stored record.
    BasicInfoSaved(BasicInfo),
    /// Details write succeeded.
    DetailsSaved(Details),
    /// A remote write failed.
    SubmissionFailed { stage: SubmitStage, message: String },
    /// User clicked Clear Draft.
    ClearDraftClicked,
    NoOp,
}
