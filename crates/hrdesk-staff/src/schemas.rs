//! Form schemas for staff records
//!
//! Each schema is defined once and shared by the handlers (validation) and
//! the form layouts (rendering). The typed inputs are what a successful
//! validation deserializes into.

use crate::models::RecordStatus;
use hrdesk_forms::{FieldSpec, FormSchema, Widget};
use serde::Deserialize;
use std::sync::LazyLock;

fn status_field() -> FieldSpec {
	FieldSpec::text("status")
		.with_label("Status")
		.with_min_length(1)
		.with_choices(RecordStatus::ALL.iter().map(RecordStatus::as_str))
		.with_widget(Widget::Select)
}

fn manager_field() -> FieldSpec {
	FieldSpec::text("managerId")
		.with_label("Manager")
		.with_min_length(1)
		.with_widget(Widget::Select)
}

fn search_field() -> FieldSpec {
	FieldSpec::text("q").with_label("Search").optional()
}

fn employee_fields() -> Vec<FieldSpec> {
	vec![
		FieldSpec::text("firstName").with_label("Name").with_min_length(3),
		FieldSpec::text("lastName").with_label("Surname").with_min_length(3),
		FieldSpec::text("phone")
			.with_label("Phone")
			.with_min_length(6)
			.with_widget(Widget::TelInput),
		FieldSpec::email("email").with_label("Email"),
		manager_field(),
	]
}

fn department_fields() -> Vec<FieldSpec> {
	vec![
		FieldSpec::text("name").with_label("Name").with_min_length(3),
		manager_field(),
	]
}

pub static EMPLOYEE_CREATE: LazyLock<FormSchema> = LazyLock::new(|| {
	FormSchema::new("employee_create", employee_fields())
		.expect("EMPLOYEE_CREATE: invalid schema")
});

pub static EMPLOYEE_EDIT: LazyLock<FormSchema> = LazyLock::new(|| {
	let mut fields = employee_fields();
	fields.push(status_field());
	FormSchema::new("employee_edit", fields).expect("EMPLOYEE_EDIT: invalid schema")
});

pub static DEPARTMENT_CREATE: LazyLock<FormSchema> = LazyLock::new(|| {
	FormSchema::new("department_create", department_fields())
		.expect("DEPARTMENT_CREATE: invalid schema")
});

pub static DEPARTMENT_EDIT: LazyLock<FormSchema> = LazyLock::new(|| {
	let mut fields = department_fields();
	fields.push(status_field());
	FormSchema::new("department_edit", fields).expect("DEPARTMENT_EDIT: invalid schema")
});

pub static EMPLOYEE_TOGGLE: LazyLock<FormSchema> = LazyLock::new(|| {
	FormSchema::new(
		"employee_toggle",
		vec![FieldSpec::text("employeeId").with_widget(Widget::HiddenInput)],
	)
	.expect("EMPLOYEE_TOGGLE: invalid schema")
});

pub static DEPARTMENT_TOGGLE: LazyLock<FormSchema> = LazyLock::new(|| {
	FormSchema::new(
		"department_toggle",
		vec![FieldSpec::text("departmentId").with_widget(Widget::HiddenInput)],
	)
	.expect("DEPARTMENT_TOGGLE: invalid schema")
});

pub static LOGIN: LazyLock<FormSchema> = LazyLock::new(|| {
	FormSchema::builder("login")
		.field(FieldSpec::text("username").with_label("Username").with_min_length(1))
		.field(
			FieldSpec::text("password")
				.with_label("Password")
				.with_widget(Widget::PasswordInput)
				.no_strip(),
		)
		.build()
		.expect("LOGIN: invalid schema")
});

// Filters come from the query string; blank values are dropped before
// validation so an empty select means "all".
pub static EMPLOYEE_FILTER: LazyLock<FormSchema> = LazyLock::new(|| {
	FormSchema::builder("employee_filter")
		.field(status_field().optional())
		.field(FieldSpec::text("departmentId").optional())
		.field(FieldSpec::text("managerId").optional())
		.field(search_field())
		.build()
		.expect("EMPLOYEE_FILTER: invalid schema")
});

pub static DEPARTMENT_FILTER: LazyLock<FormSchema> = LazyLock::new(|| {
	FormSchema::builder("department_filter")
		.field(status_field().optional())
		.field(FieldSpec::text("managerId").optional())
		.field(search_field())
		.build()
		.expect("DEPARTMENT_FILTER: invalid schema")
});

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
	pub first_name: String,
	pub last_name: String,
	pub phone: String,
	pub email: String,
	pub manager_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeChanges {
	pub first_name: String,
	pub last_name: String,
	pub phone: String,
	pub email: String,
	pub manager_id: String,
	pub status: RecordStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDepartment {
	pub name: String,
	pub manager_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentChanges {
	pub name: String,
	pub manager_id: String,
	pub status: RecordStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
	pub username: String,
	pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeeFilter {
	pub status: Option<RecordStatus>,
	pub department_id: Option<String>,
	pub manager_id: Option<String>,
	/// Case-insensitive term matched against name, manager and status
	#[serde(rename = "q")]
	pub search: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DepartmentFilter {
	pub status: Option<RecordStatus>,
	pub manager_id: Option<String>,
	#[serde(rename = "q")]
	pub search: Option<String>,
}
