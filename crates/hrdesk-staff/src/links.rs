//! Application paths

pub const HOME: &str = "/";
pub const LOGIN: &str = "/login";

pub const EMPLOYEES: &str = "/employees";
pub const CREATE_EMPLOYEE: &str = "/employees/create";
pub const DEPARTMENTS: &str = "/departments";
pub const CREATE_DEPARTMENT: &str = "/departments/create";

pub fn edit_employee(id: &str) -> String {
	format!("/employees/{}/edit", id)
}

pub fn edit_department(id: &str) -> String {
	format!("/departments/{}/edit", id)
}
