use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::{Field, Step1Form, Step2Form};

/// Field-level validation messages, keyed by field.
pub type FieldErrors = BTreeMap<Field, String>;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

pub fn validate_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

pub fn validate_step1(form: &Step1Form) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if form.full_name.trim().is_empty() {
        errors.insert(Field::FullName, "Full name is required".into());
    }

    if form.email.trim().is_empty() {
        errors.insert(Field::Email, "Email is required".into());
    } else if !validate_email(&form.email) {
        errors.insert(Field::Email, "Please enter a valid email address".into());
    }

    if form.department.trim().is_empty() {
        errors.insert(Field::Department, "Department is required".into());
    }

    if form.role.is_none() {
        errors.insert(Field::Role, "Role is required".into());
    }

    errors
}

pub fn validate_step2(form: &Step2Form) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if form.employment_type.is_none() {
        errors.insert(Field::EmploymentType, "Employment type is required".into());
    }

    if form.office_location.trim().is_empty() {
        errors.insert(Field::OfficeLocation, "Office location is required".into());
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_pattern_matches_simple_addresses() {
        assert!(validate_email("jane@example.com"));
        assert!(!validate_email("jane@example"));
        assert!(!validate_email("jane doe@example.com"));
        assert!(!validate_email("@example.com"));
    }

    #[test]
    fn blank_step1_reports_every_required_field() {
        let form = Step1Form {
            role: None,
            ..Step1Form::default()
        };
        let errors = validate_step1(&form);
        assert_eq!(
            errors.keys().copied().collect::<Vec<_>>(),
            vec![Field::FullName, Field::Email, Field::Department, Field::Role]
        );
    }

    #[test]
    fn invalid_email_gets_format_message() {
        let form = Step1Form {
            full_name: "Jane".into(),
            email: "jane.example.com".into(),
            department: "Engineering".into(),
            ..Step1Form::default()
        };
        let errors = validate_step1(&form);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[&Field::Email], "Please enter a valid email address");
    }

    #[test]
    fn whitespace_location_is_rejected() {
        let form = Step2Form {
            office_location: "  ".into(),
            ..Step2Form::default()
        };
        let errors = validate_step2(&form);
        assert_eq!(errors[&Field::OfficeLocation], "Office location is required");
        assert!(!errors.contains_key(&Field::EmploymentType));
    }
}
