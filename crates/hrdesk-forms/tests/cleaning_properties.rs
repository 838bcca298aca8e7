//! Cleaning property tests
//!
//! # Properties Tested
//!
//! - Surrounding whitespace never changes the outcome of a stripped field
//! - A single value on a list field behaves as a one-element list
//! - Errors come out in field declaration order

use hrdesk_forms::{FieldSpec, FormSchema, RawFields, RawValue};
use proptest::prelude::*;

fn schema() -> FormSchema {
	FormSchema::builder("employee")
		.field(FieldSpec::text("firstName").with_min_length(3).with_max_length(12))
		.field(FieldSpec::email("email"))
		.field(FieldSpec::list("tags").with_choices(["a", "b", "c"]))
		.build()
		.expect("valid schema")
}

fn padding() -> impl Strategy<Value = String> {
	prop::string::string_regex("[ \t\n]{0,3}").expect("Valid regex for padding")
}

proptest! {
	/// Property: stripping makes padded and trimmed input equivalent
	#[test]
	fn test_padding_is_ignored(
		value in "[a-zA-Z@. ]{0,16}",
		left in padding(),
		right in padding(),
	) {
		let schema = schema();
		let padded = RawFields::from_pairs([("firstName", format!("{left}{value}{right}"))]);
		let trimmed = RawFields::from_pairs([("firstName", value.trim().to_string())]);

		prop_assert_eq!(schema.validate(&padded), schema.validate(&trimmed));
	}

	/// Property: `Single(x)` and `Multiple([x])` are the same submission
	#[test]
	fn test_single_value_is_one_element_list(item in "[a-e]{1,2}") {
		let schema = schema();
		let mut single = RawFields::from_pairs([("firstName", "Jane"), ("email", "jane@example.com")]);
		let mut multiple = single.clone();
		single.insert("tags", RawValue::Single(item.clone()));
		multiple.insert("tags", RawValue::Multiple(vec![item]));

		prop_assert_eq!(schema.validate(&single), schema.validate(&multiple));
	}

	/// Property: error fields follow the schema's declaration order
	#[test]
	fn test_errors_follow_declaration_order(
		first_name in ".{0,16}",
		email in ".{0,16}",
		tags in prop::collection::vec("[a-e]", 0..4),
	) {
		let schema = schema();
		let mut raw = RawFields::from_pairs([("firstName", first_name), ("email", email)]);
		raw.insert("tags", tags);

		let result = schema.validate(&raw);

		let positions: Vec<usize> = result
			.errors()
			.iter()
			.map(|e| {
				schema
					.field_names()
					.position(|name| name == e.field)
					.expect("declared field")
			})
			.collect();
		prop_assert!(positions.windows(2).all(|w| w[0] <= w[1]));
	}
}
