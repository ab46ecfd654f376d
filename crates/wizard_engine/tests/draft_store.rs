use std::fs;

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use wizard_core::{Draft, EmployeeRole, EmploymentType, Step1Form, Step2Form, WizardRole};
use wizard_engine::{
    clear_draft, ensure_store_dir, restore_draft, save_draft, AtomicFileWriter, DraftStore,
    FileDraftStore, MemoryDraftStore,
};

fn sample_draft() -> Draft {
    Draft {
        step1: Some(Step1Form {
            full_name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            department: "Engineering".into(),
            role: Some(EmployeeRole::Engineer),
            employee_id: "ENG-001".into(),
        }),
        step2: Some(Step2Form {
            employment_type: Some(EmploymentType::Contract),
            office_location: "Berlin".into(),
            notes: "Remote first".into(),
            photo: None,
        }),
    }
}

#[test]
fn file_store_round_trips_per_role() {
    wizard_logging::initialize_for_tests();
    let temp = TempDir::new().unwrap();
    let store = FileDraftStore::new(temp.path().join("drafts"));

    store.set(WizardRole::Admin, &sample_draft()).unwrap();

    assert_eq!(store.get(WizardRole::Admin).unwrap(), Some(sample_draft()));
    assert_eq!(store.get(WizardRole::Ops).unwrap(), None);
    assert!(temp.path().join("drafts/draft_admin.json").is_file());
}

#[test]
fn file_store_uses_camel_case_json() {
    let temp = TempDir::new().unwrap();
    let store = FileDraftStore::new(temp.path());

    store.set(WizardRole::Ops, &sample_draft()).unwrap();

    let raw = fs::read_to_string(temp.path().join("draft_ops.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["step1"]["fullName"], "Jane Doe");
    assert_eq!(value["step2"]["officeLocation"], "Berlin");
}

#[test]
fn corrupt_draft_is_treated_as_absent() {
    wizard_logging::initialize_for_tests();
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("draft_admin.json"), "{ not json").unwrap();
    let store = FileDraftStore::new(temp.path());

    assert!(store.get(WizardRole::Admin).is_err());
    assert_eq!(restore_draft(&store, WizardRole::Admin), None);
}

#[test]
fn delete_removes_the_entry_and_tolerates_missing_file() {
    let temp = TempDir::new().unwrap();
    let store = FileDraftStore::new(temp.path());

    assert!(save_draft(&store, WizardRole::Admin, &sample_draft()));
    assert!(clear_draft(&store, WizardRole::Admin));
    assert_eq!(store.get(WizardRole::Admin).unwrap(), None);
    assert!(clear_draft(&store, WizardRole::Admin));
}

#[test]
fn save_into_a_file_path_reports_failure() {
    wizard_logging::initialize_for_tests();
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("not_a_dir");
    fs::write(&blocker, "x").unwrap();
    let store = FileDraftStore::new(&blocker);

    assert!(!save_draft(&store, WizardRole::Admin, &sample_draft()));
}

#[test]
fn memory_store_keeps_roles_apart() {
    let store = MemoryDraftStore::new();
    store.set(WizardRole::Ops, &sample_draft()).unwrap();

    assert_eq!(store.get(WizardRole::Admin).unwrap(), None);
    assert_eq!(store.get(WizardRole::Ops).unwrap(), Some(sample_draft()));

    store.delete(WizardRole::Ops).unwrap();
    assert_eq!(store.get(WizardRole::Ops).unwrap(), None);
}

#[test]
fn creates_missing_store_dir() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("nested/drafts");
    ensure_store_dir(&dir).unwrap();
    assert!(dir.is_dir());
}

#[test]
fn atomic_write_replaces_existing_content() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("draft.json", b"{}").unwrap();
    let second = writer.write("draft.json", b"{\"step1\":null}").unwrap();

    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "{\"step1\":null}");
}
