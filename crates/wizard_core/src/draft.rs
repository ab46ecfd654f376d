use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::{EmployeeRole, EmploymentType};

/// Editable fields across both wizard steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    FullName,
    Email,
    Department,
    Role,
    EmploymentType,
    OfficeLocation,
    Notes,
    Photo,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::FullName => "fullName",
            Field::Email => "email",
            Field::Department => "department",
            Field::Role => "role",
            Field::EmploymentType => "employmentType",
            Field::OfficeLocation => "officeLocation",
            Field::Notes => "notes",
            Field::Photo => "photo",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        const ALL: [Field; 8] = [
            Field::FullName,
            Field::Email,
            Field::Department,
            Field::Role,
            Field::EmploymentType,
            Field::OfficeLocation,
            Field::Notes,
            Field::Photo,
        ];
        ALL.into_iter().find(|field| field.name().eq_ignore_ascii_case(name))
    }

    pub fn is_step1(self) -> bool {
        matches!(
            self,
            Field::FullName | Field::Email | Field::Department | Field::Role
        )
    }
}

/// Reads a stored choice as text; a value this build does not know becomes
/// `None` instead of rejecting the whole draft.
fn lenient_choice<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|text| text.parse().ok()))
}

/// In-progress step 1 values. Missing keys in stored JSON fall back to defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Step1Form {
    pub full_name: String,
    pub email: String,
    pub department: String,
    #[serde(deserialize_with = "lenient_choice")]
    pub role: Option<EmployeeRole>,
    pub employee_id: String,
}

impl Default for Step1Form {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            email: String::new(),
            department: String::new(),
            role: Some(EmployeeRole::default()),
            employee_id: String::new(),
        }
    }
}

impl Step1Form {
    /// Applies a text edit. Returns false when `field` belongs to step 2.
    pub fn apply(&mut self, field: Field, value: String) -> bool {
        match field {
            Field::FullName => self.full_name = value,
            Field::Email => self.email = value,
            Field::Department => self.department = value,
            Field::Role => self.role = value.parse().ok(),
            _ => return false,
        }
        true
    }
}

/// In-progress step 2 values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Step2Form {
    #[serde(deserialize_with = "lenient_choice")]
    pub employment_type: Option<EmploymentType>,
    pub office_location: String,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl Default for Step2Form {
    fn default() -> Self {
        Self {
            employment_type: Some(EmploymentType::default()),
            office_location: String::new(),
            notes: String::new(),
            photo: None,
        }
    }
}

impl Step2Form {
    /// Applies a text edit. Returns false when `field` belongs to step 1.
    pub fn apply(&mut self, field: Field, value: String) -> bool {
        match field {
            Field::EmploymentType => self.employment_type = value.parse().ok(),
            Field::OfficeLocation => self.office_location = value,
            Field::Notes => self.notes = value,
            Field::Photo => self.photo = (!value.is_empty()).then_some(value),
            _ => return false,
        }
        true
    }
}

/// Persisted snapshot of both steps. Saves are full overwrites.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Draft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step1: Option<Step1Form>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step2: Option<Step2Form>,
}

impl Draft {
    pub fn is_empty(&self) -> bool {
        self.step1.is_none() && self.step2.is_none()
    }
}
