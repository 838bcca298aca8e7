//! Serializable rendering metadata
//!
//! The presentation tier renders from [`FormMetadata`], a flat projection of a
//! [`FormSchema`] that carries labels, widgets, initial values and the
//! client-side validation rules. It is derived, never written by hand.

use crate::field::{FieldKind, Widget};
use crate::raw::RawFields;
use crate::schema::FormSchema;
use serde::{Deserialize, Serialize};

/// A client-side check mirroring one server constraint
///
/// Client-side checks are a convenience only; the server always validates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRule {
	/// Constraint identifier (e.g. `"email"`, `"min_length"`)
	pub validator_id: String,
	/// Constraint parameters, e.g. `{"min": 3}`
	pub params: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMetadata {
	pub name: String,
	pub label: String,
	pub kind: FieldKind,
	pub required: bool,
	pub widget: Widget,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub help_text: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub initial: Option<String>,
	#[serde(default)]
	pub validation_rules: Vec<ValidationRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormMetadata {
	pub name: String,
	pub fields: Vec<FieldMetadata>,
	/// Form-level initial values (schema initials)
	pub initial: RawFields,
}

impl FormMetadata {
	pub fn field(&self, name: &str) -> Option<&FieldMetadata> {
		self.fields.iter().find(|f| f.name == name)
	}
}

impl FormSchema {
	/// Project the schema into rendering metadata
	///
	/// # Examples
	///
	/// ```
	/// use hrdesk_forms::{FieldSpec, FormSchema};
	///
	/// let schema = FormSchema::builder("login")
	///     .field(FieldSpec::text("username").with_label("Username").with_min_length(1))
	///     .build()
	///     .unwrap();
	///
	/// let metadata = schema.to_metadata();
	/// assert_eq!(metadata.fields[0].label, "Username");
	/// assert_eq!(metadata.fields[0].validation_rules[0].validator_id, "min_length");
	/// ```
	pub fn to_metadata(&self) -> FormMetadata {
		FormMetadata {
			name: self.name().to_string(),
			fields: self
				.fields()
				.iter()
				.map(|f| FieldMetadata {
					name: f.name.clone(),
					label: f.display_label().to_string(),
					kind: f.kind,
					required: f.required,
					widget: f.widget,
					help_text: f.help_text.clone(),
					initial: f.initial.clone(),
					validation_rules: f
						.constraints
						.iter()
						.map(|c| ValidationRule {
							validator_id: c.id().to_string(),
							params: c.params(),
						})
						.collect(),
				})
				.collect(),
			initial: self.defaults(),
		}
	}
}
