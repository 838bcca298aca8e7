//! Errors raised while defining schemas or converting cleaned data

use thiserror::Error;

/// Schema definition and conversion errors
///
/// Bad user input never produces a `FormError`; it is reported through
/// [`ValidationResult::Failure`](crate::ValidationResult::Failure).
#[derive(Debug, Error)]
pub enum FormError {
	#[error("Duplicate field name in schema: {0}")]
	DuplicateField(String),
	#[error("Invalid pattern for field {field}: {source}")]
	InvalidPattern {
		field: String,
		#[source]
		source: regex::Error,
	},
	#[error("Constraint {constraint} does not apply to field {field}")]
	InvalidConstraint { field: String, constraint: String },
	#[error("Cleaned data does not match the record type: {0}")]
	Deserialize(#[source] serde_json::Error),
}

pub type FormResult<T> = Result<T, FormError>;
