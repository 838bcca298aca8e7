//! Field declarations and field-level errors

use crate::constraint::Constraint;
use serde::{Deserialize, Serialize};

/// The value shape a field accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
	/// One string value
	#[default]
	Text,
	/// An ordered list of strings (multi-select, repeated checkboxes)
	List,
}

/// How the presentation tier renders a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Widget {
	#[default]
	TextInput,
	EmailInput,
	PasswordInput,
	TelInput,
	TextArea,
	Select,
	SelectMultiple,
	HiddenInput,
}

impl Widget {
	/// The `type` attribute of the rendered `<input>`, if it is one
	pub fn input_type(&self) -> Option<&'static str> {
		match self {
			Self::TextInput => Some("text"),
			Self::EmailInput => Some("email"),
			Self::PasswordInput => Some("password"),
			Self::TelInput => Some("tel"),
			Self::HiddenInput => Some("hidden"),
			Self::TextArea | Self::Select | Self::SelectMultiple => None,
		}
	}
}

/// One declared field of a [`FormSchema`](crate::FormSchema)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
	pub name: String,
	#[serde(default)]
	pub kind: FieldKind,
	#[serde(default = "default_true")]
	pub required: bool,
	#[serde(default)]
	pub constraints: Vec<Constraint>,
	#[serde(default = "default_true")]
	pub strip: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub help_text: Option<String>,
	#[serde(default)]
	pub widget: Widget,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub initial: Option<String>,
}

fn default_true() -> bool {
	true
}

impl FieldSpec {
	/// A required text field with no constraints
	///
	/// # Examples
	///
	/// ```
	/// use hrdesk_forms::{FieldKind, FieldSpec};
	///
	/// let field = FieldSpec::text("firstName").with_min_length(3);
	/// assert_eq!(field.kind, FieldKind::Text);
	/// assert!(field.required);
	/// assert_eq!(field.constraints.len(), 1);
	/// ```
	pub fn text(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			kind: FieldKind::Text,
			required: true,
			constraints: Vec::new(),
			strip: true,
			label: None,
			help_text: None,
			widget: Widget::TextInput,
			initial: None,
		}
	}

	/// A required text field that must hold an email address
	pub fn email(name: impl Into<String>) -> Self {
		Self::text(name)
			.with_widget(Widget::EmailInput)
			.with_constraint(Constraint::Email)
	}

	/// A required list field
	pub fn list(name: impl Into<String>) -> Self {
		Self {
			kind: FieldKind::List,
			widget: Widget::SelectMultiple,
			..Self::text(name)
		}
	}

	/// Mark the field optional: an absent value is left out of cleaned data
	pub fn optional(mut self) -> Self {
		self.required = false;
		self
	}

	pub fn with_min_length(self, min_length: usize) -> Self {
		self.with_constraint(Constraint::MinLength { value: min_length })
	}

	pub fn with_max_length(self, max_length: usize) -> Self {
		self.with_constraint(Constraint::MaxLength { value: max_length })
	}

	pub fn with_pattern(self, regex: impl Into<String>, message: impl Into<String>) -> Self {
		self.with_constraint(Constraint::Pattern {
			regex: regex.into(),
			message: Some(message.into()),
		})
	}

	pub fn with_choices<I, S>(self, values: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.with_constraint(Constraint::OneOf {
			values: values.into_iter().map(Into::into).collect(),
		})
	}

	/// Append a constraint; constraints are checked in the order added
	pub fn with_constraint(mut self, constraint: Constraint) -> Self {
		self.constraints.push(constraint);
		self
	}

	/// Keep surrounding whitespace instead of trimming it
	pub fn no_strip(mut self) -> Self {
		self.strip = false;
		self
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn with_help_text(mut self, help_text: impl Into<String>) -> Self {
		self.help_text = Some(help_text.into());
		self
	}

	pub fn with_widget(mut self, widget: Widget) -> Self {
		self.widget = widget;
		self
	}

	pub fn with_initial(mut self, initial: impl Into<String>) -> Self {
		self.initial = Some(initial.into());
		self
	}

	/// Label to display, falling back to the field name
	pub fn display_label(&self) -> &str {
		self.label.as_deref().unwrap_or(&self.name)
	}
}

/// Machine-readable kind of a field-level error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
	Required,
	TooShort,
	TooLong,
	InvalidEmail,
	PatternMismatch,
	InvalidChoice,
	ExpectedSingle,
}

/// A validation error attached to one declared field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
	pub field: String,
	pub code: ErrorCode,
	pub message: String,
}

impl FieldError {
	pub fn new(field: impl Into<String>, code: ErrorCode, message: impl Into<String>) -> Self {
		Self {
			field: field.into(),
			code,
			message: message.into(),
		}
	}
}

impl std::fmt::Display for FieldError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}: {}", self.field, self.message)
	}
}
