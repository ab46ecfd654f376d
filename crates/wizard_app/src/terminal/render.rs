use wizard_core::{
    Employee, Field, Page, ProgressStatus, SearchState, WizardStep, WizardViewModel, MISSING_FIELD,
};

fn label(field: Field) -> &'static str {
    match field {
        Field::FullName => "Full name",
        Field::Email => "Email",
        Field::Department => "Department",
        Field::Role => "Role",
        Field::EmploymentType => "Employment type",
        Field::OfficeLocation => "Office location",
        Field::Notes => "Notes",
        Field::Photo => "Photo",
    }
}

fn field_line(view: &WizardViewModel, field: Field, value: &str) -> Vec<String> {
    let mut lines = vec![format!("  {:<16} {}", format!("{}:", label(field)), value)];
    if let Some(error) = view.errors.get(&field) {
        lines.push(format!("  {:<16} ! {error}", ""));
    }
    lines
}

fn marker(status: ProgressStatus) -> &'static str {
    match status {
        ProgressStatus::Pending => "[ ]",
        ProgressStatus::InProgress => "[~]",
        ProgressStatus::Completed => "[x]",
        ProgressStatus::Error => "[!]",
    }
}

fn enabled(flag: bool) -> &'static str {
    if flag {
        "ready"
    } else {
        "disabled"
    }
}

pub(crate) fn render_wizard(view: &WizardViewModel) -> String {
    let mut lines = vec![format!(
        "== {} wizard: step {} of 2 ==",
        view.role,
        view.step.number()
    )];

    match view.step {
        WizardStep::BasicInfo => {
            let step1 = &view.step1;
            lines.extend(field_line(view, Field::FullName, &step1.full_name));
            lines.extend(field_line(view, Field::Email, &step1.email));
            lines.extend(field_line(view, Field::Department, &step1.department));
            lines.extend(field_line(
                view,
                Field::Role,
                step1.role.map(|r| r.as_str()).unwrap_or(""),
            ));
            lines.push(format!("  {:<16} {}", "Employee ID:", step1.employee_id));
            lines.push(format!("  next: {}", enabled(view.next_enabled)));
        }
        WizardStep::Details => {
            let step2 = &view.step2;
            lines.extend(field_line(
                view,
                Field::EmploymentType,
                step2.employment_type.map(|t| t.as_str()).unwrap_or(""),
            ));
            lines.extend(field_line(view, Field::OfficeLocation, &step2.office_location));
            lines.extend(field_line(view, Field::Notes, &step2.notes));
            lines.extend(field_line(
                view,
                Field::Photo,
                step2.photo.as_deref().unwrap_or(""),
            ));
            lines.push(format!("  submit: {}", enabled(view.submit_enabled)));
        }
    }

    if view.show_progress {
        lines.push("  Progress:".to_string());
        lines.extend(
            view.progress
                .iter()
                .map(|step| format!("    {} {}", marker(step.status), step.label)),
        );
    }
    if let Some(error) = &view.last_error {
        lines.push(format!("  Error: {error}"));
    }
    lines.join("\n")
}

/// Suggestion panel text, or `None` when nothing should be shown.
pub(crate) fn render_suggestions<T, F>(
    name: &str,
    state: &SearchState<T>,
    display: F,
) -> Option<String>
where
    T: Clone,
    F: Fn(&T) -> String,
{
    if let Some(error) = state.error() {
        return Some(format!("  {name}: {error}"));
    }
    if !state.is_open() {
        return None;
    }
    if state.is_loading() {
        return Some(format!("  {name}: searching \"{}\"...", state.query()));
    }
    let mut lines = vec![format!("  {name} suggestions:")];
    lines.extend(
        state
            .suggestions()
            .iter()
            .enumerate()
            .map(|(i, item)| format!("    {}. {}", i + 1, display(item))),
    );
    Some(lines.join("\n"))
}

pub(crate) fn render_employees(page: &Page<Employee>) -> String {
    if page.total_items == 0 {
        return "No employees yet.".to_string();
    }
    let mut lines = vec![format!(
        "{:<20} {:<26} {:<14} {:<9} {:<8} {:<10} {}",
        "Name", "Email", "Department", "Role", "ID", "Type", "Location"
    )];
    for employee in &page.items {
        lines.push(format!(
            "{:<20} {:<26} {:<14} {:<9} {:<8} {:<10} {}",
            employee.full_name,
            employee.email,
            employee.department,
            employee.role.as_str(),
            employee.employee_id,
            employee
                .employment_type
                .map(|t| t.as_str())
                .unwrap_or(MISSING_FIELD),
            employee.office_location.as_deref().unwrap_or(MISSING_FIELD),
        ));
    }
    lines.push(format!(
        "Page {} of {} ({} employees)",
        page.page, page.total_pages, page.total_items
    ));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use wizard_core::{
        paginate, update, Department, EmployeeRole, EmploymentType, Msg, WizardRole, WizardState,
    };

    use super::*;

    fn employee(name: &str, location: Option<&str>) -> Employee {
        Employee {
            full_name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            department: "Engineering".into(),
            role: EmployeeRole::Engineer,
            employee_id: "ENG-001".into(),
            employment_type: location.map(|_| EmploymentType::Contract),
            office_location: location.map(str::to_string),
            notes: None,
            photo: None,
        }
    }

    #[test]
    fn step_one_shows_validation_messages() {
        let (state, _) = update(WizardState::new(WizardRole::Admin), Msg::NextClicked);
        let text = render_wizard(&state.view());

        assert!(text.starts_with("== admin wizard: step 1 of 2 =="));
        assert!(text.contains("Full name:"));
        assert!(text.contains("! "));
        assert!(text.contains("next: disabled"));
    }

    #[test]
    fn ops_sees_details_without_progress() {
        let text = render_wizard(&WizardState::new(WizardRole::Ops).view());

        assert!(text.contains("step 2 of 2"));
        assert!(text.contains("Employment type: Full-time"));
        assert!(!text.contains("Progress:"));
    }

    #[test]
    fn missing_details_render_placeholders() {
        let rows = vec![employee("Jane", Some("Berlin")), employee("Sam", None)];
        let text = render_employees(&paginate(&rows, 1, 10));

        assert!(text.contains("Berlin"));
        assert!(text.contains(MISSING_FIELD));
        assert!(text.ends_with("Page 1 of 1 (2 employees)"));
    }

    #[test]
    fn closed_panel_renders_nothing() {
        let mut state: SearchState<Department> = SearchState::new();
        assert_eq!(render_suggestions("department", &state, |d| d.name.clone()), None);

        let _ = state.set_query("Eng");
        let text = render_suggestions("department", &state, |d| d.name.clone());
        assert_eq!(text, None);
    }
}
