//! Wizard core: pure state machines, records and validation.
mod draft;
mod effect;
mod employee_id;
mod listing;
mod msg;
mod progress;
mod record;
mod search;
mod state;
mod update;
mod validation;
mod view_model;

pub use draft::{Draft, Field, Step1Form, Step2Form};
pub use effect::Effect;
pub use employee_id::{department_prefix, fallback_employee_id, next_employee_id};
pub use listing::{merge_employees, paginate, Page, DEFAULT_PAGE_SIZE};
pub use msg::Msg;
pub use progress::{ProgressPipeline, ProgressStatus, ProgressStep, Stage};
pub use record::{
    BasicInfo, Department, Details, Employee, EmployeeRole, EmploymentType, Location,
    ParseEnumError, Route, WizardRole, MISSING_FIELD,
};
pub use search::{Generation, LookupTicket, QueryOutcome, SearchState, LOOKUP_FALLBACK_ERROR};
pub use state::{SubmissionPhase, SubmitStage, WizardState, WizardStep};
pub use update::update;
pub use validation::{validate_email, validate_step1, validate_step2, FieldErrors};
pub use view_model::WizardViewModel;
