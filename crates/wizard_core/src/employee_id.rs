use crate::BasicInfo;

/// Three-letter department prefix: uppercased, padded with `X`.
pub fn department_prefix(department: &str) -> String {
    let mut prefix: String = department.chars().take(3).collect::<String>().to_uppercase();
    while prefix.chars().count() < 3 {
        prefix.push('X');
    }
    prefix
}

/// Next sequential id for `department`, e.g. `ENG-004` when three `ENG` ids exist.
pub fn next_employee_id(department: &str, existing: &[BasicInfo]) -> String {
    let prefix = department_prefix(department);
    let taken = existing
        .iter()
        .filter(|info| info.employee_id.starts_with(&prefix))
        .count();
    format!("{prefix}-{:03}", taken + 1)
}

/// Id used when existing records cannot be listed: the last three digits of
/// the current epoch milliseconds.
pub fn fallback_employee_id(department: &str, epoch_millis: u64) -> String {
    format!("{}-{:03}", department_prefix(department), epoch_millis % 1000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EmployeeRole;

    fn info(employee_id: &str) -> BasicInfo {
        BasicInfo {
            id: None,
            full_name: "Someone".into(),
            email: "someone@example.com".into(),
            department: "Engineering".into(),
            role: EmployeeRole::Engineer,
            employee_id: employee_id.into(),
        }
    }

    #[test]
    fn prefix_is_padded_and_uppercased() {
        assert_eq!(department_prefix("Engineering"), "ENG");
        assert_eq!(department_prefix("hr"), "HRX");
        assert_eq!(department_prefix(""), "XXX");
    }

    #[test]
    fn sequence_counts_matching_prefix_only() {
        let existing = vec![info("ENG-001"), info("ENG-002"), info("FIN-001")];
        assert_eq!(next_employee_id("engineering", &existing), "ENG-003");
        assert_eq!(next_employee_id("Finance", &existing), "FIN-002");
        assert_eq!(next_employee_id("Ops", &existing), "OPS-001");
    }

    #[test]
    fn fallback_uses_last_three_millis_digits() {
        assert_eq!(fallback_employee_id("Ops", 1_700_000_000_042), "OPS-042");
        assert_eq!(fallback_employee_id("Ops", 1_700_000_000_987), "OPS-987");
    }
}
