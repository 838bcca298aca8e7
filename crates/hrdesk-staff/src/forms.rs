//! Form layouts
//!
//! A layout is the list of inputs a page renders, in order. Keeping it as
//! data lets tests check every page against its schema.

use crate::schemas;
use hrdesk_forms::FormSchema;

/// One rendered input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutField {
	pub label: &'static str,
	pub name: &'static str,
}

const fn field(label: &'static str, name: &'static str) -> LayoutField {
	LayoutField { label, name }
}

/// The inputs of one page and the schema they submit to
#[derive(Debug, Clone, Copy)]
pub struct FormLayout {
	pub title: &'static str,
	pub fields: &'static [LayoutField],
	schema: fn() -> &'static FormSchema,
}

impl FormLayout {
	pub fn schema(&self) -> &'static FormSchema {
		(self.schema)()
	}

	pub fn names(&self) -> impl Iterator<Item = &'static str> {
		self.fields.iter().map(|f| f.name)
	}

	/// Rendered names the schema does not declare
	pub fn undeclared(&self) -> Vec<&'static str> {
		self.schema().undeclared_fields(self.names())
	}

	/// Declared names the page never renders
	pub fn unrendered(&self) -> Vec<&'static str> {
		self.schema().unrendered_fields(self.names())
	}
}

pub const EMPLOYEE_CREATE: FormLayout = FormLayout {
	title: "New Employee",
	fields: &[
		field("Name", "firstName"),
		field("Surname", "lastName"),
		field("Phone", "phone"),
		field("Email", "email"),
		field("Manager", "managerId"),
	],
	schema: || &*schemas::EMPLOYEE_CREATE,
};

pub const EMPLOYEE_EDIT: FormLayout = FormLayout {
	title: "Edit Employee",
	fields: &[
		field("Name", "firstName"),
		field("Surname", "lastName"),
		field("Phone", "phone"),
		field("Email", "email"),
		field("Manager", "managerId"),
		field("Status", "status"),
	],
	schema: || &*schemas::EMPLOYEE_EDIT,
};

pub const DEPARTMENT_CREATE: FormLayout = FormLayout {
	title: "New Department",
	fields: &[field("Name", "name"), field("Manager", "managerId")],
	schema: || &*schemas::DEPARTMENT_CREATE,
};

pub const DEPARTMENT_EDIT: FormLayout = FormLayout {
	title: "Edit Department",
	fields: &[
		field("Name", "name"),
		field("Manager", "managerId"),
		field("Status", "status"),
	],
	schema: || &*schemas::DEPARTMENT_EDIT,
};

pub const LOGIN: FormLayout = FormLayout {
	title: "Login",
	fields: &[field("Username", "username"), field("Password", "password")],
	schema: || &*schemas::LOGIN,
};

pub const EMPLOYEE_FILTER: FormLayout = FormLayout {
	title: "Employees",
	fields: &[
		field("Status", "status"),
		field("Department", "departmentId"),
		field("Manager", "managerId"),
		field("Search", "q"),
	],
	schema: || &*schemas::EMPLOYEE_FILTER,
};

pub const DEPARTMENT_FILTER: FormLayout = FormLayout {
	title: "Departments",
	fields: &[
		field("Status", "status"),
		field("Manager", "managerId"),
		field("Search", "q"),
	],
	schema: || &*schemas::DEPARTMENT_FILTER,
};

pub const ALL: &[FormLayout] = &[
	EMPLOYEE_CREATE,
	EMPLOYEE_EDIT,
	DEPARTMENT_CREATE,
	DEPARTMENT_EDIT,
	LOGIN,
	EMPLOYEE_FILTER,
	DEPARTMENT_FILTER,
];

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_every_rendered_input_is_declared() {
		for layout in ALL {
			assert!(
				layout.undeclared().is_empty(),
				"{} renders undeclared fields {:?}",
				layout.title,
				layout.undeclared()
			);
		}
	}

	#[rstest]
	fn test_every_declared_field_is_rendered() {
		for layout in ALL {
			assert!(
				layout.unrendered().is_empty(),
				"{} never renders {:?}",
				layout.title,
				layout.unrendered()
			);
		}
	}

	#[rstest]
	fn test_labels_match_schema_labels() {
		for layout in ALL {
			for rendered in layout.fields {
				if let Some(spec) = layout.schema().field(rendered.name)
					&& spec.label.is_some()
				{
					assert_eq!(spec.display_label(), rendered.label, "{}", layout.title);
				}
			}
		}
	}
}
