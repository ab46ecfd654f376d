use futures_util::future::try_join;
use wizard_core::{merge_employees, Employee};
use wizard_logging::wizard_info;

use crate::{ApiError, EmployeeApi};

/// Fetches both record sets concurrently and outer-joins them.
pub async fn load_employees(api: &dyn EmployeeApi) -> Result<Vec<Employee>, ApiError> {
    let (basic, details) = try_join(api.list_basic_info(), api.list_details()).await?;
    wizard_info!(
        "Loaded {} basic-info and {} details records",
        basic.len(),
        details.len()
    );
    Ok(merge_employees(basic, details))
}
