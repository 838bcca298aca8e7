//! Declarative form schemas and the validator
//!
//! A [`FormSchema`] is the single definition of a form. The server validates
//! submissions with [`FormSchema::validate`]; the presentation tier derives
//! default values and rendering metadata from the very same value, either in
//! process or after a JSON round trip.

use crate::constraint::{CompiledPatterns, Constraint, REQUIRED_MESSAGE};
use crate::error::{FormError, FormResult};
use crate::field::{ErrorCode, FieldError, FieldKind, FieldSpec};
use crate::raw::{RawFields, RawValue};
use crate::result::{CleanedData, ValidationResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An ordered, named collection of field declarations
///
/// # Examples
///
/// ```
/// use hrdesk_forms::{FieldSpec, FormSchema, RawFields};
///
/// let schema = FormSchema::builder("department")
///     .field(FieldSpec::text("name").with_min_length(3))
///     .field(FieldSpec::text("managerId").with_min_length(1))
///     .build()
///     .unwrap();
///
/// let result = schema.validate(&RawFields::from_pairs([("name", "Al"), ("managerId", "")]));
/// let fields: Vec<_> = result.errors().iter().map(|e| e.field.as_str()).collect();
/// assert_eq!(fields, vec!["name", "managerId"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SchemaDef")]
pub struct FormSchema {
	name: String,
	fields: Vec<FieldSpec>,
	#[serde(skip)]
	patterns: CompiledPatterns,
}

// Unchecked wire form; every deserialized schema goes through `FormSchema::new`.
#[derive(Deserialize)]
struct SchemaDef {
	name: String,
	fields: Vec<FieldSpec>,
}

impl TryFrom<SchemaDef> for FormSchema {
	type Error = FormError;

	fn try_from(def: SchemaDef) -> Result<Self, Self::Error> {
		Self::new(def.name, def.fields)
	}
}

impl FormSchema {
	/// Create a schema, rejecting duplicate names and invalid constraints
	pub fn new(name: impl Into<String>, fields: Vec<FieldSpec>) -> FormResult<Self> {
		let mut patterns = CompiledPatterns::default();
		for (index, field) in fields.iter().enumerate() {
			if fields[..index].iter().any(|f| f.name == field.name) {
				return Err(FormError::DuplicateField(field.name.clone()));
			}
			check_constraints(field, &mut patterns)?;
		}
		Ok(Self {
			name: name.into(),
			fields,
			patterns,
		})
	}

	pub fn builder(name: impl Into<String>) -> FormSchemaBuilder {
		FormSchemaBuilder {
			name: name.into(),
			fields: Vec::new(),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn fields(&self) -> &[FieldSpec] {
		&self.fields
	}

	pub fn field(&self, name: &str) -> Option<&FieldSpec> {
		self.fields.iter().find(|f| f.name == name)
	}

	pub fn field_names(&self) -> impl Iterator<Item = &str> {
		self.fields.iter().map(|f| f.name.as_str())
	}

	pub fn contains(&self, name: &str) -> bool {
		self.field(name).is_some()
	}

	/// Names in `names` that the schema does not declare
	pub fn undeclared_fields<'a, I>(&self, names: I) -> Vec<&'a str>
	where
		I: IntoIterator<Item = &'a str>,
	{
		names.into_iter().filter(|n| !self.contains(n)).collect()
	}

	/// Declared fields missing from `names`
	pub fn unrendered_fields<'a, I>(&self, names: I) -> Vec<&str>
	where
		I: IntoIterator<Item = &'a str>,
	{
		let names: Vec<&str> = names.into_iter().collect();
		self.field_names()
			.filter(|declared| !names.contains(declared))
			.collect()
	}

	/// Initial values declared on the schema
	pub fn defaults(&self) -> RawFields {
		self.fields
			.iter()
			.filter_map(|f| {
				f.initial
					.as_ref()
					.map(|initial| (f.name.clone(), RawValue::Single(initial.clone())))
			})
			.collect()
	}

	/// Validate submitted fields
	///
	/// Every declared field is checked so the failure lists all problems at
	/// once. Fields present in `raw` but not declared are ignored.
	pub fn validate(&self, raw: &RawFields) -> ValidationResult {
		let mut cleaned = CleanedData::new();
		let mut errors = Vec::new();

		for field in &self.fields {
			match clean_field(field, raw.get(&field.name), &self.patterns) {
				Ok(Some(value)) => cleaned.insert(&field.name, value),
				Ok(None) => {}
				Err(field_errors) => errors.extend(field_errors),
			}
		}

		if errors.is_empty() {
			tracing::debug!(form = %self.name, field_count = cleaned.len(), "form validated");
			ValidationResult::Success(cleaned)
		} else {
			tracing::debug!(form = %self.name, error_count = errors.len(), "form failed validation");
			ValidationResult::Failure(errors)
		}
	}
}

/// Builder for [`FormSchema`]
#[derive(Debug, Clone)]
pub struct FormSchemaBuilder {
	name: String,
	fields: Vec<FieldSpec>,
}

impl FormSchemaBuilder {
	pub fn field(mut self, field: FieldSpec) -> Self {
		self.fields.push(field);
		self
	}

	pub fn build(self) -> FormResult<FormSchema> {
		FormSchema::new(self.name, self.fields)
	}
}

fn check_constraints(field: &FieldSpec, patterns: &mut CompiledPatterns) -> FormResult<()> {
	for constraint in &field.constraints {
		match constraint {
			Constraint::Pattern { regex, .. } => {
				patterns.compile(regex).map_err(|source| FormError::InvalidPattern {
					field: field.name.clone(),
					source,
				})?;
			}
			Constraint::OneOf { values } if values.is_empty() => {
				return Err(FormError::InvalidConstraint {
					field: field.name.clone(),
					constraint: constraint.id().to_string(),
				});
			}
			_ => {}
		}
	}
	Ok(())
}

fn clean_field(
	field: &FieldSpec,
	raw: Option<&RawValue>,
	patterns: &CompiledPatterns,
) -> Result<Option<Value>, Vec<FieldError>> {
	let Some(raw) = raw else {
		return if field.required {
			Err(vec![FieldError::new(
				&field.name,
				ErrorCode::Required,
				REQUIRED_MESSAGE,
			)])
		} else {
			Ok(None)
		};
	};

	match field.kind {
		FieldKind::Text => {
			let RawValue::Single(value) = raw else {
				return Err(vec![FieldError::new(
					&field.name,
					ErrorCode::ExpectedSingle,
					"Expected a single value.",
				)]);
			};
			let value = if field.strip { value.trim() } else { value.as_str() };
			let errors: Vec<FieldError> = field
				.constraints
				.iter()
				.filter_map(|c| c.check_with(value, patterns))
				.map(|v| FieldError::new(&field.name, v.code, v.message))
				.collect();
			if errors.is_empty() {
				Ok(Some(Value::String(value.to_string())))
			} else {
				Err(errors)
			}
		}
		FieldKind::List => {
			let items: Vec<&str> = raw
				.as_list()
				.into_iter()
				.map(|item| if field.strip { item.trim() } else { item })
				.collect();
			if field.required && items.is_empty() {
				return Err(vec![FieldError::new(
					&field.name,
					ErrorCode::Required,
					REQUIRED_MESSAGE,
				)]);
			}
			let mut errors = Vec::new();
			for constraint in &field.constraints {
				for item in &items {
					if let Some(v) = constraint.check_with(item, patterns) {
						errors.push(FieldError::new(&field.name, v.code, v.message));
					}
				}
			}
			if errors.is_empty() {
				Ok(Some(Value::from(
					items.into_iter().map(str::to_string).collect::<Vec<_>>(),
				)))
			} else {
				Err(errors)
			}
		}
	}
}
