//! Validation outcomes

use crate::error::{FormError, FormResult};
use crate::field::FieldError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Cleaned values of a successful validation, keyed by field name
///
/// Text fields map to JSON strings and list fields to arrays of strings.
/// Absent optional fields have no entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CleanedData(Map<String, Value>);

impl CleanedData {
	pub fn new() -> Self {
		Self::default()
	}

	pub(crate) fn insert(&mut self, name: &str, value: Value) {
		self.0.insert(name.to_string(), value);
	}

	pub fn get(&self, name: &str) -> Option<&Value> {
		self.0.get(name)
	}

	pub fn get_str(&self, name: &str) -> Option<&str> {
		self.0.get(name).and_then(Value::as_str)
	}

	pub fn get_list(&self, name: &str) -> Option<Vec<&str>> {
		self.0
			.get(name)
			.and_then(Value::as_array)
			.map(|items| items.iter().filter_map(Value::as_str).collect())
	}

	pub fn contains(&self, name: &str) -> bool {
		self.0.contains_key(name)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn into_value(self) -> Value {
		Value::Object(self.0)
	}

	/// Convert into a typed record through serde
	pub fn deserialize<T: DeserializeOwned>(self) -> FormResult<T> {
		serde_json::from_value(self.into_value()).map_err(FormError::Deserialize)
	}
}

/// Outcome of validating [`RawFields`](crate::RawFields) against a schema
///
/// Never partially successful: either every field cleaned or the full list of
/// field errors, ordered by field declaration then constraint declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult<T = CleanedData> {
	Success(T),
	Failure(Vec<FieldError>),
}

impl<T> ValidationResult<T> {
	pub fn is_success(&self) -> bool {
		matches!(self, Self::Success(_))
	}

	pub fn is_failure(&self) -> bool {
		matches!(self, Self::Failure(_))
	}

	pub fn success(&self) -> Option<&T> {
		match self {
			Self::Success(value) => Some(value),
			Self::Failure(_) => None,
		}
	}

	/// Errors of a failure; empty on success
	pub fn errors(&self) -> &[FieldError] {
		match self {
			Self::Success(_) => &[],
			Self::Failure(errors) => errors,
		}
	}

	/// Errors reported for one field, in order
	pub fn errors_for(&self, field: &str) -> Vec<&FieldError> {
		self.errors().iter().filter(|e| e.field == field).collect()
	}

	pub fn into_result(self) -> Result<T, Vec<FieldError>> {
		match self {
			Self::Success(value) => Ok(value),
			Self::Failure(errors) => Err(errors),
		}
	}

	pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ValidationResult<U> {
		match self {
			Self::Success(value) => ValidationResult::Success(f(value)),
			Self::Failure(errors) => ValidationResult::Failure(errors),
		}
	}
}

impl ValidationResult<CleanedData> {
	/// Turn a successful result into a typed record
	///
	/// Failures pass through unchanged. A cleaned value that does not fit `T`
	/// means the record type and the schema disagree, reported as
	/// [`FormError::Deserialize`].
	pub fn deserialize<T: DeserializeOwned>(self) -> FormResult<ValidationResult<T>> {
		match self {
			Self::Success(data) => data.deserialize().map(ValidationResult::Success),
			Self::Failure(errors) => Ok(ValidationResult::Failure(errors)),
		}
	}
}
