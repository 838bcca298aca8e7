//! Staff records

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a record is in use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RecordStatus {
	#[default]
	Active,
	Inactive,
}

impl RecordStatus {
	pub const ALL: [RecordStatus; 2] = [RecordStatus::Active, RecordStatus::Inactive];

	/// The other status
	pub fn toggled(self) -> Self {
		match self {
			Self::Active => Self::Inactive,
			Self::Inactive => Self::Active,
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Active => "Active",
			Self::Inactive => "Inactive",
		}
	}
}

impl fmt::Display for RecordStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Unknown status string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown record status: {0}")]
pub struct ParseStatusError(pub String);

impl FromStr for RecordStatus {
	type Err = ParseStatusError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"Active" => Ok(Self::Active),
			"Inactive" => Ok(Self::Inactive),
			other => Err(ParseStatusError(other.to_string())),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
	pub id: String,
	pub first_name: String,
	pub last_name: String,
	pub phone: String,
	pub email: String,
	pub status: RecordStatus,
	/// The manager this employee reports to
	pub manager_id: Option<String>,
}

impl Employee {
	pub fn full_name(&self) -> String {
		format!("{} {}", self.first_name, self.last_name)
	}
}

/// An employee who manages others and owns departments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manager {
	pub id: String,
	pub employee_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
	pub id: String,
	pub name: String,
	pub status: RecordStatus,
	pub manager_id: String,
}

/// A login account; the password hash never leaves the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
	pub id: String,
	pub username: String,
}

/// Employee as shown in the listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRow {
	pub id: String,
	pub status: RecordStatus,
	pub first_name: String,
	pub last_name: String,
	pub phone: String,
	pub email: String,
	/// Manager's full name, empty when there is none
	pub manager: String,
}

impl EmployeeRow {
	/// True when `term` occurs in the full name, manager or status, ignoring case
	pub fn matches_search(&self, term: &str) -> bool {
		let full_name = format!("{} {}", self.first_name, self.last_name);
		contains_ignore_case(&[&full_name, &self.manager, self.status.as_str()], term)
	}
}

/// Department as shown in the listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentRow {
	pub id: String,
	pub name: String,
	pub status: RecordStatus,
	pub manager: String,
}

impl DepartmentRow {
	/// True when `term` occurs in the name, manager or status, ignoring case
	pub fn matches_search(&self, term: &str) -> bool {
		contains_ignore_case(&[&self.name, &self.manager, self.status.as_str()], term)
	}
}

fn contains_ignore_case(haystacks: &[&str], term: &str) -> bool {
	let term = term.to_lowercase();
	haystacks.iter().any(|h| h.to_lowercase().contains(&term))
}

/// A manager as offered in a select input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerOption {
	pub id: String,
	pub name: String,
}
