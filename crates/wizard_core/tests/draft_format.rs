use serde_json::json;
use wizard_core::{BasicInfo, Draft, EmployeeRole, EmploymentType, Step2Form, WizardRole};

#[test]
fn partial_draft_json_fills_defaults() {
    let draft: Draft = serde_json::from_value(json!({
        "step1": { "fullName": "Jane", "role": "Finance" },
        "step2": { "officeLocation": "Oslo", "employmentType": "Part-time" }
    }))
    .unwrap();

    let step1 = draft.step1.unwrap();
    assert_eq!(step1.full_name, "Jane");
    assert_eq!(step1.email, "");
    assert_eq!(step1.role, Some(EmployeeRole::Finance));

    let step2 = draft.step2.unwrap();
    assert_eq!(step2.employment_type, Some(EmploymentType::PartTime));
    assert_eq!(step2.office_location, "Oslo");
    assert_eq!(step2.photo, None);
}

#[test]
fn absent_steps_are_omitted_when_saving() {
    let draft = Draft {
        step1: None,
        step2: Some(Step2Form::default()),
    };
    let value = serde_json::to_value(&draft).unwrap();
    assert_eq!(
        value,
        json!({
            "step2": {
                "employmentType": "Full-time",
                "officeLocation": "",
                "notes": ""
            }
        })
    );
}

#[test]
fn records_use_camel_case_wire_names() {
    let info: BasicInfo = serde_json::from_value(json!({
        "id": 3,
        "fullName": "Ann",
        "email": "ann@example.com",
        "department": "Ops",
        "role": "Admin",
        "employeeId": "OPS-001"
    }))
    .unwrap();
    assert_eq!(info.role, EmployeeRole::Admin);
    assert_eq!(info.id, Some(3));

    let unsaved = BasicInfo { id: None, ..info };
    let value = serde_json::to_value(&unsaved).unwrap();
    assert!(value.get("id").is_none());
    assert_eq!(value["employeeId"], "OPS-001");
}

#[test]
fn role_keys_and_params() {
    assert_eq!(WizardRole::Admin.draft_key(), "draft_admin");
    assert_eq!(WizardRole::Ops.draft_key(), "draft_ops");
    assert_eq!(WizardRole::from_param(Some("ops")), WizardRole::Ops);
    assert_eq!(WizardRole::from_param(Some("guest")), WizardRole::Admin);
    assert_eq!(WizardRole::from_param(None), WizardRole::Admin);
}

#[test]
fn unknown_choices_do_not_discard_the_draft() {
    let draft: Draft = serde_json::from_value(json!({
        "step1": { "fullName": "Jane", "department": "Engineering", "role": "Wizard" },
        "step2": { "officeLocation": "Oslo", "employmentType": "Gig", "notes": "keep me" }
    }))
    .unwrap();

    let step1 = draft.step1.unwrap();
    assert_eq!(step1.full_name, "Jane");
    assert_eq!(step1.department, "Engineering");
    assert_eq!(step1.role, None);

    let step2 = draft.step2.unwrap();
    assert_eq!(step2.employment_type, None);
    assert_eq!(step2.office_location, "Oslo");
    assert_eq!(step2.notes, "keep me");
}

#[test]
fn null_choice_reads_as_unset() {
    let draft: Draft = serde_json::from_value(json!({
        "step2": { "employmentType": null }
    }))
    .unwrap();

    assert_eq!(draft.step2.unwrap().employment_type, None);
}
