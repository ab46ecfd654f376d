use crate::{BasicInfo, Details, Employee, EmployeeRole, MISSING_FIELD};

pub const DEFAULT_PAGE_SIZE: usize = 10;

fn same_person(basic_email: &str, basic_id: &str, details: &Details) -> bool {
    details.email == basic_email || details.employee_id == basic_id
}

/// Outer-joins the two services' records by email or employee id.
///
/// Basic-info rows keep their order and take the first matching details row.
/// Details rows that match no basic-info row are appended with placeholders.
pub fn merge_employees(basic: Vec<BasicInfo>, details: Vec<Details>) -> Vec<Employee> {
    let mut employees: Vec<Employee> = basic
        .into_iter()
        .map(|info| {
            let matching = details
                .iter()
                .find(|d| same_person(&info.email, &info.employee_id, d));
            Employee {
                employment_type: matching.map(|d| d.employment_type),
                office_location: matching.map(|d| d.office_location.clone()),
                notes: matching.map(|d| d.notes.clone()),
                photo: matching.and_then(|d| d.photo.clone()),
                full_name: info.full_name,
                email: info.email,
                department: info.department,
                role: info.role,
                employee_id: info.employee_id,
            }
        })
        .collect();

    for detail in details {
        let known = employees
            .iter()
            .any(|emp| same_person(&emp.email, &emp.employee_id, &detail));
        if known {
            continue;
        }
        employees.push(Employee {
            full_name: MISSING_FIELD.to_string(),
            email: detail.email,
            department: MISSING_FIELD.to_string(),
            role: EmployeeRole::Ops,
            employee_id: detail.employee_id,
            employment_type: Some(detail.employment_type),
            office_location: Some(detail.office_location),
            notes: Some(detail.notes),
            photo: detail.photo,
        });
    }

    employees
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number, clamped into range.
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_pages = items.len().div_ceil(page_size);
    let page = page.clamp(1, total_pages.max(1));
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(items.len());
    Page {
        items: items.get(start..end).map(<[T]>::to_vec).unwrap_or_default(),
        page,
        page_size,
        total_pages,
        total_items: items.len(),
    }
}
