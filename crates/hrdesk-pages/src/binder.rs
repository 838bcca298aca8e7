//! Field Binder
//!
//! Computes the properties an input needs from the current context state.
//! Nothing is cached: binding again after a state change yields fresh props.

use crate::context::SubmissionContext;
use hrdesk_forms::Widget;

/// Everything needed to render one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldProps {
	pub name: String,
	pub label: String,
	pub widget: Widget,
	pub required: bool,
	pub value: String,
	/// Every value, for multi-valued widgets
	pub values: Vec<String>,
	pub errors: Vec<String>,
	pub disabled: bool,
}

impl FieldProps {
	/// DOM id, as used by `<label for=...>`
	pub fn html_id(&self) -> String {
		format!("id_{}", self.name)
	}

	pub fn has_errors(&self) -> bool {
		!self.errors.is_empty()
	}

	/// Errors joined for display under the input
	pub fn error_text(&self) -> Option<String> {
		self.has_errors().then(|| self.errors.join(" "))
	}

	/// Also disable when `disabled` is set (e.g. a read-only field)
	pub fn with_disabled(mut self, disabled: bool) -> Self {
		self.disabled |= disabled;
		self
	}
}

/// Submit control state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButtonProps {
	pub label: String,
	pub disabled: bool,
}

/// Binds fields of one [`SubmissionContext`]
///
/// # Examples
///
/// ```
/// use hrdesk_forms::{FieldSpec, FormSchema, RawFields};
/// use hrdesk_pages::{FieldBinder, SubmissionContext};
///
/// let schema = FormSchema::builder("department")
///     .field(FieldSpec::text("name").with_label("Name"))
///     .build()
///     .unwrap();
/// let ctx = SubmissionContext::mount(&schema, RawFields::from_pairs([("name", "Sales")]));
///
/// let props = FieldBinder::new(&ctx).bind("name");
/// assert_eq!(props.value, "Sales");
/// assert_eq!(props.label, "Name");
/// assert!(!props.disabled);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FieldBinder<'a> {
	ctx: &'a SubmissionContext,
}

impl<'a> FieldBinder<'a> {
	pub fn new(ctx: &'a SubmissionContext) -> Self {
		Self { ctx }
	}

	/// Props for `name` from the context's current state
	pub fn bind(&self, name: &str) -> FieldProps {
		let snapshot = self.ctx.snapshot();
		let metadata = self.ctx.metadata().field(name);
		FieldProps {
			name: name.to_string(),
			label: metadata.map_or_else(|| name.to_string(), |m| m.label.clone()),
			widget: metadata.map(|m| m.widget).unwrap_or_default(),
			required: metadata.is_some_and(|m| m.required),
			value: snapshot.value_of(name),
			values: snapshot.values_of(name),
			errors: snapshot.errors_of(name),
			disabled: snapshot.is_submitting(),
		}
	}

	/// Props for every declared field, in declaration order
	pub fn bind_all(&self) -> Vec<FieldProps> {
		self.ctx
			.metadata()
			.fields
			.iter()
			.map(|f| self.bind(&f.name))
			.collect()
	}

	pub fn submit_button(&self) -> SubmitButtonProps {
		let submitting = self.ctx.is_submitting();
		SubmitButtonProps {
			label: if submitting { "Saving..." } else { "Save" }.to_string(),
			disabled: submitting,
		}
	}
}
