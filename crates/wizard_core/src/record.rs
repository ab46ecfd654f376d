use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Placeholder shown for columns a joined employee row has no source for.
pub const MISSING_FIELD: &str = "—";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

/// Who is filling in the wizard. Drafts are stored per role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardRole {
    #[default]
    Admin,
    Ops,
}

impl WizardRole {
    pub fn as_str(self) -> &'static str {
        match self {
            WizardRole::Admin => "admin",
            WizardRole::Ops => "ops",
        }
    }

    /// Storage key for this role's draft.
    pub fn draft_key(self) -> &'static str {
        match self {
            WizardRole::Admin => "draft_admin",
            WizardRole::Ops => "draft_ops",
        }
    }

    /// Lenient parse used for query-string style input: anything other than
    /// `ops` selects the admin flow.
    pub fn from_param(param: Option<&str>) -> Self {
        match param.map(str::trim) {
            Some(p) if p.eq_ignore_ascii_case("ops") => WizardRole::Ops,
            _ => WizardRole::Admin,
        }
    }
}

impl fmt::Display for WizardRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EmployeeRole {
    #[default]
    Ops,
    Admin,
    Engineer,
    Finance,
}

impl EmployeeRole {
    pub const ALL: [EmployeeRole; 4] = [
        EmployeeRole::Ops,
        EmployeeRole::Admin,
        EmployeeRole::Engineer,
        EmployeeRole::Finance,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EmployeeRole::Ops => "Ops",
            EmployeeRole::Admin => "Admin",
            EmployeeRole::Engineer => "Engineer",
            EmployeeRole::Finance => "Finance",
        }
    }
}

impl FromStr for EmployeeRole {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseEnumError {
                kind: "role",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EmploymentType {
    #[default]
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
    Intern,
}

impl EmploymentType {
    pub const ALL: [EmploymentType; 4] = [
        EmploymentType::FullTime,
        EmploymentType::PartTime,
        EmploymentType::Contract,
        EmploymentType::Intern,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EmploymentType::FullTime => "Full-time",
            EmploymentType::PartTime => "Part-time",
            EmploymentType::Contract => "Contract",
            EmploymentType::Intern => "Intern",
        }
    }
}

impl FromStr for EmploymentType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseEnumError {
                kind: "employment type",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: u64,
    pub name: String,
}

/// Step 1 record, owned by the basic-info service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub full_name: String,
    pub email: String,
    pub department: String,
    pub role: EmployeeRole,
    pub employee_id: String,
}

/// Step 2 record, owned by the details service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Details {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub employee_id: String,
    pub email: String,
    pub employment_type: EmploymentType,
    pub office_location: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

/// A listing row: basic info joined with its details, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub full_name: String,
    pub email: String,
    pub department: String,
    pub role: EmployeeRole,
    pub employee_id: String,
    pub employment_type: Option<EmploymentType>,
    pub office_location: Option<String>,
    pub notes: Option<String>,
    pub photo: Option<String>,
}

/// Destinations the wizard can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Employees,
    Wizard(WizardRole),
}

impl Route {
    pub fn path(self) -> String {
        match self {
            Route::Employees => "/employees".to_string(),
            Route::Wizard(role) => format!("/wizard?role={role}"),
        }
    }
}
