//! Submission responses
//!
//! A [`SubmissionResponse`] is what the client receives after submitting a
//! form: the echoed input plus field-level and form-level errors. Absence of
//! both error kinds means the submission succeeded.

use crate::response::Response;
use hrdesk_forms::{FieldError, RawFields};
use hyper::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Result of one submission, as sent over the wire
///
/// # JSON shape
///
/// ```json
/// { "fields": {"name": "Al"}, "fieldErrors": {"name": ["..."]}, "formError": "..." }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
	/// The submitted values, echoed unchanged
	#[serde(default)]
	pub fields: RawFields,
	/// Error messages per field, in the order they were reported
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub field_errors: Option<BTreeMap<String, Vec<String>>>,
	/// An error about the submission as a whole
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub form_error: Option<String>,
}

impl SubmissionResponse {
	/// A successful submission echoing `fields`
	pub fn success(fields: RawFields) -> Self {
		Self {
			fields,
			field_errors: None,
			form_error: None,
		}
	}

	/// A submission rejected with a form-level message
	///
	/// # Examples
	///
	/// ```
	/// use hrdesk_forms::RawFields;
	/// use hrdesk_http::SubmissionResponse;
	///
	/// let response = SubmissionResponse::rejected("Invalid credentials", RawFields::new());
	/// assert_eq!(response.form_error.as_deref(), Some("Invalid credentials"));
	/// assert!(!response.is_success());
	/// ```
	pub fn rejected(message: impl Into<String>, fields: RawFields) -> Self {
		Self::success(fields).with_form_error(message)
	}

	pub fn with_form_error(mut self, message: impl Into<String>) -> Self {
		self.form_error = Some(message.into());
		self
	}

	pub fn is_success(&self) -> bool {
		self.field_errors.is_none() && self.form_error.is_none()
	}

	/// Messages for `field`, empty when it has none
	pub fn errors_of(&self, field: &str) -> &[String] {
		self.field_errors
			.as_ref()
			.and_then(|errors| errors.get(field))
			.map(Vec::as_slice)
			.unwrap_or(&[])
	}

	/// HTTP response for this submission: 200 on success, 400 otherwise
	pub fn into_response(self) -> Response {
		if self.is_success() {
			json_response(StatusCode::OK, &self)
		} else {
			bad_request(&self)
		}
	}
}

/// Build the response for a failed validation
///
/// `fields` is echoed unchanged so the form can re-render with what the user
/// typed. Errors are grouped by field keeping their order. No form-level
/// error is set.
///
/// # Examples
///
/// ```
/// use hrdesk_forms::{FieldSpec, FormSchema, RawFields};
/// use hrdesk_http::process_bad_request;
///
/// let schema = FormSchema::builder("department")
///     .field(FieldSpec::text("name").with_min_length(3))
///     .build()
///     .unwrap();
/// let fields = RawFields::from_pairs([("name", "Al")]);
/// let errors = schema.validate(&fields).into_result().unwrap_err();
///
/// let response = process_bad_request(errors, fields.clone());
/// assert_eq!(response.fields, fields);
/// assert_eq!(response.errors_of("name").len(), 1);
/// assert!(response.form_error.is_none());
/// ```
pub fn process_bad_request(errors: Vec<FieldError>, fields: RawFields) -> SubmissionResponse {
	let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
	for error in errors {
		grouped.entry(error.field).or_default().push(error.message);
	}
	SubmissionResponse {
		fields,
		field_errors: (!grouped.is_empty()).then_some(grouped),
		form_error: None,
	}
}

/// A 400 response carrying `submission` as JSON
pub fn bad_request(submission: &SubmissionResponse) -> Response {
	json_response(StatusCode::BAD_REQUEST, submission)
}

fn json_response(status: StatusCode, submission: &SubmissionResponse) -> Response {
	match Response::new(status).with_json(submission) {
		Ok(response) => response,
		Err(e) => {
			tracing::error!(error = %e, "failed to serialize submission response");
			Response::new(status)
		}
	}
}
