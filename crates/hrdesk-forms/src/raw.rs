//! Raw submitted field values
//!
//! [`RawFields`] is the untyped input of every form submission: a mapping from
//! field name to either a single string or an ordered list of strings. It is
//! also the shape echoed back to the client on failure, so lookups never fail:
//! a missing key reads as the empty value.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// A single submitted value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
	/// One string value
	Single(String),
	/// Every occurrence of a multi-valued key, in submission order
	Multiple(Vec<String>),
}

impl RawValue {
	/// The scalar reading of this value.
	///
	/// A multi-valued entry reads as its last element, matching how duplicate
	/// scalar keys collapse by default.
	pub fn as_str(&self) -> &str {
		match self {
			Self::Single(value) => value,
			Self::Multiple(values) => values.last().map(String::as_str).unwrap_or(""),
		}
	}

	/// Every value as a slice-like list
	pub fn as_list(&self) -> Vec<&str> {
		match self {
			Self::Single(value) => vec![value.as_str()],
			Self::Multiple(values) => values.iter().map(String::as_str).collect(),
		}
	}

	pub fn is_multiple(&self) -> bool {
		matches!(self, Self::Multiple(_))
	}
}

impl From<String> for RawValue {
	fn from(value: String) -> Self {
		Self::Single(value)
	}
}

impl From<&str> for RawValue {
	fn from(value: &str) -> Self {
		Self::Single(value.to_string())
	}
}

impl From<Vec<String>> for RawValue {
	fn from(values: Vec<String>) -> Self {
		Self::Multiple(values)
	}
}

impl From<Vec<&str>> for RawValue {
	fn from(values: Vec<&str>) -> Self {
		Self::Multiple(values.into_iter().map(str::to_string).collect())
	}
}

/// Submitted fields keyed by name
///
/// Backed by an ordered map so iteration and serialization are deterministic.
///
/// # Examples
///
/// ```
/// use hrdesk_forms::RawFields;
///
/// let fields = RawFields::from_pairs([("name", "Al"), ("managerId", "")]);
/// assert_eq!(fields.value_of("name"), "Al");
/// assert_eq!(fields.value_of("missing"), "");
/// assert!(fields.contains("managerId"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawFields(BTreeMap<String, RawValue>);

impl RawFields {
	pub fn new() -> Self {
		Self::default()
	}

	/// Build from `(name, value)` pairs, later pairs replacing earlier ones
	pub fn from_pairs<I, K, V>(pairs: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<RawValue>,
	{
		let mut fields = Self::new();
		for (name, value) in pairs {
			fields.insert(name, value);
		}
		fields
	}

	/// Set a field, replacing any previous value
	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<RawValue>) {
		self.0.insert(name.into(), value.into());
	}

	/// Append one occurrence to a field, promoting it to a list if needed
	pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
		let value = value.into();
		match self.0.entry(name.into()) {
			Entry::Vacant(entry) => {
				entry.insert(RawValue::Single(value));
			}
			Entry::Occupied(mut entry) => {
				let slot = entry.get_mut();
				let mut values = match std::mem::replace(slot, RawValue::Multiple(Vec::new())) {
					RawValue::Single(first) => vec![first],
					RawValue::Multiple(values) => values,
				};
				values.push(value);
				*slot = RawValue::Multiple(values);
			}
		}
	}

	pub fn get(&self, name: &str) -> Option<&RawValue> {
		self.0.get(name)
	}

	/// Scalar value of `name`, or `""` when the field is missing
	pub fn value_of(&self, name: &str) -> &str {
		self.0.get(name).map(RawValue::as_str).unwrap_or("")
	}

	/// Every value of `name`, or an empty list when the field is missing
	pub fn values_of(&self, name: &str) -> Vec<&str> {
		self.0.get(name).map(RawValue::as_list).unwrap_or_default()
	}

	pub fn contains(&self, name: &str) -> bool {
		self.0.contains_key(name)
	}

	pub fn remove(&mut self, name: &str) -> Option<RawValue> {
		self.0.remove(name)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
		self.0.iter().map(|(name, value)| (name.as_str(), value))
	}

	/// Keep only the listed field names
	pub fn retain_names(&mut self, names: &[&str]) {
		self.0.retain(|name, _| names.contains(&name.as_str()));
	}
}

impl<K: Into<String>> FromIterator<(K, RawValue)> for RawFields {
	fn from_iter<I: IntoIterator<Item = (K, RawValue)>>(iter: I) -> Self {
		Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
	}
}

impl IntoIterator for RawFields {
	type Item = (String, RawValue);
	type IntoIter = std::collections::btree_map::IntoIter<String, RawValue>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}
