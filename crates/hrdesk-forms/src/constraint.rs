//! Field constraints
//!
//! Constraints are plain data so a schema can be serialized and shipped to
//! the presentation tier unchanged. Each one checks a single string value.

use crate::field::ErrorCode;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

// Same pattern the client-side email validator uses.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("EMAIL_REGEX: invalid regex pattern")
});

/// A declarative check applied to one field value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Constraint {
	/// At least `value` characters
	MinLength { value: usize },
	/// At most `value` characters
	MaxLength { value: usize },
	/// A plausible email address
	Email,
	/// Must match `regex` in full
	Pattern {
		regex: String,
		#[serde(default, skip_serializing_if = "Option::is_none")]
		message: Option<String>,
	},
	/// Must be one of `values`
	OneOf { values: Vec<String> },
}

/// A failed constraint check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
	pub code: ErrorCode,
	pub message: String,
}

impl Violation {
	fn new(code: ErrorCode, message: impl Into<String>) -> Self {
		Self {
			code,
			message: message.into(),
		}
	}
}

impl Constraint {
	/// Identifier used in client metadata (e.g. `"min_length"`)
	pub fn id(&self) -> &'static str {
		match self {
			Self::MinLength { .. } => "min_length",
			Self::MaxLength { .. } => "max_length",
			Self::Email => "email",
			Self::Pattern { .. } => "pattern",
			Self::OneOf { .. } => "one_of",
		}
	}

	/// Check `value`, returning the violation if it fails
	///
	/// Lengths count characters, not bytes. An empty value failing a minimum
	/// length reads as a missing required value. A `Pattern` is compiled on
	/// every call here; schemas validate through their compiled patterns.
	pub fn check(&self, value: &str) -> Option<Violation> {
		self.check_with(value, &CompiledPatterns::default())
	}

	pub(crate) fn check_with(&self, value: &str, patterns: &CompiledPatterns) -> Option<Violation> {
		match self {
			Self::MinLength { value: min } => {
				let len = value.chars().count();
				if len >= *min {
					None
				} else if len == 0 {
					Some(Violation::new(ErrorCode::Required, REQUIRED_MESSAGE))
				} else {
					Some(Violation::new(
						ErrorCode::TooShort,
						format!(
							"Ensure this value has at least {} characters (it has {}).",
							min, len
						),
					))
				}
			}
			Self::MaxLength { value: max } => {
				let len = value.chars().count();
				(len > *max).then(|| {
					Violation::new(
						ErrorCode::TooLong,
						format!(
							"Ensure this value has at most {} characters (it has {}).",
							max, len
						),
					)
				})
			}
			Self::Email => (!EMAIL_REGEX.is_match(value))
				.then(|| Violation::new(ErrorCode::InvalidEmail, "Enter a valid email address.")),
			Self::Pattern { regex, message } => {
				let matched = match patterns.get(regex) {
					Some(re) => re.is_match(value),
					None => match Regex::new(&anchored(regex)) {
						Ok(re) => re.is_match(value),
						Err(e) => {
							tracing::error!(error = %e, pattern = %regex, "constraint pattern failed to compile");
							false
						}
					},
				};
				let message = message.as_deref().unwrap_or("Enter a valid value.");
				(!matched).then(|| Violation::new(ErrorCode::PatternMismatch, message))
			}
			// Empty values are left to the required check
			Self::OneOf { values } => {
				(!value.is_empty() && !values.iter().any(|v| v == value)).then(|| {
					Violation::new(
						ErrorCode::InvalidChoice,
						format!(
							"Select a valid choice. {} is not one of the available choices.",
							value
						),
					)
				})
			}
		}
	}

	/// Parameters for client metadata
	pub fn params(&self) -> serde_json::Value {
		match self {
			Self::MinLength { value } => serde_json::json!({ "min": value }),
			Self::MaxLength { value } => serde_json::json!({ "max": value }),
			Self::Email => serde_json::json!({}),
			Self::Pattern { regex, .. } => serde_json::json!({ "regex": regex }),
			Self::OneOf { values } => serde_json::json!({ "values": values }),
		}
	}
}

pub(crate) const REQUIRED_MESSAGE: &str = "This field is required.";

/// `Pattern` constraints compiled once, keyed by their source
#[derive(Debug, Clone, Default)]
pub(crate) struct CompiledPatterns(HashMap<String, Regex>);

impl CompiledPatterns {
	pub(crate) fn compile(&mut self, source: &str) -> Result<(), regex::Error> {
		if !self.0.contains_key(source) {
			self.0.insert(source.to_string(), Regex::new(&anchored(source))?);
		}
		Ok(())
	}

	pub(crate) fn get(&self, source: &str) -> Option<&Regex> {
		self.0.get(source)
	}

	#[cfg(test)]
	pub(crate) fn len(&self) -> usize {
		self.0.len()
	}
}

// Derived from the field specs, which are compared on their own
impl PartialEq for CompiledPatterns {
	fn eq(&self, _other: &Self) -> bool {
		true
	}
}

impl Eq for CompiledPatterns {}

/// Wrap a pattern so it must match the whole value
pub(crate) fn anchored(pattern: &str) -> String {
	format!("^(?:{})$", pattern)
}
