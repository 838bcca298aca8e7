//! Environment variable handling
//!
//! [`Env`] reads variables either from the process environment or from an
//! explicit map, optionally behind a prefix.

use std::collections::HashMap;
use std::env;

/// Where variables are read from
#[derive(Debug, Clone, Default)]
enum Source {
	#[default]
	Process,
	Map(HashMap<String, String>),
}

/// Typed access to environment variables
///
/// # Examples
///
/// ```
/// use hrdesk_conf::env::Env;
/// use std::collections::HashMap;
///
/// let env = Env::from_map(HashMap::from([("HR_LOG_LEVEL".to_string(), "debug".to_string())]))
///     .with_prefix("HR_");
///
/// assert_eq!(env.str("LOG_LEVEL").unwrap(), "debug");
/// assert_eq!(env.str_with_default("MISSING", Some("x")).unwrap(), "x");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Env {
	pub prefix: Option<String>,
	source: Source,
}

impl Env {
	/// Read from the process environment
	pub fn new() -> Self {
		Self::default()
	}

	/// Read from `vars` instead of the process environment
	pub fn from_map(vars: HashMap<String, String>) -> Self {
		Self {
			prefix: None,
			source: Source::Map(vars),
		}
	}

	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = Some(prefix.into());
		self
	}

	fn get_key_name(&self, key: &str) -> String {
		match &self.prefix {
			Some(prefix) => format!("{}{}", prefix, key),
			None => key.to_string(),
		}
	}

	fn lookup(&self, full_key: &str) -> Option<String> {
		match &self.source {
			Source::Process => env::var(full_key).ok(),
			Source::Map(vars) => vars.get(full_key).cloned(),
		}
	}

	pub fn str(&self, key: &str) -> Result<String, EnvError> {
		self.str_with_default(key, None)
	}

	pub fn str_with_default(&self, key: &str, default: Option<&str>) -> Result<String, EnvError> {
		let full_key = self.get_key_name(key);
		validate_env_var_name(&full_key)?;

		match self.lookup(&full_key) {
			Some(val) => Ok(val),
			None => match default {
				Some(d) => Ok(d.to_string()),
				None => Err(EnvError::MissingVariable(full_key)),
			},
		}
	}

	/// Like [`str`](Self::str) but a blank value counts as missing
	pub fn present_str(&self, key: &str) -> Result<String, EnvError> {
		let value = self.str(key)?;
		if value.trim().is_empty() {
			return Err(EnvError::EmptyVariable(self.get_key_name(key)));
		}
		Ok(value)
	}

	pub fn usize_with_default(&self, key: &str, default: usize) -> Result<usize, EnvError> {
		let full_key = self.get_key_name(key);
		validate_env_var_name(&full_key)?;

		match self.lookup(&full_key) {
			Some(val) => val.trim().parse::<usize>().map_err(|e| EnvError::ParseError {
				key: full_key,
				value_len: val.len(),
				error: e.to_string(),
			}),
			None => Ok(default),
		}
	}
}

fn validate_env_var_name(name: &str) -> Result<(), EnvError> {
	if name.is_empty() {
		return Err(EnvError::InvalidVariableName {
			name: name.to_string(),
			reason: "name is empty".to_string(),
		});
	}
	if name.contains('=') || name.contains('\0') {
		return Err(EnvError::InvalidVariableName {
			name: name.to_string(),
			reason: "name contains '=' or NUL".to_string(),
		});
	}
	Ok(())
}

/// Environment variable errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvError {
	#[error("Missing environment variable: {0}")]
	MissingVariable(String),

	#[error("Environment variable is empty: {0}")]
	EmptyVariable(String),

	#[error("Failed to parse environment variable '{key}' (value length: {value_len}): {error}")]
	ParseError {
		key: String,
		/// Length of the original value, never the value itself
		value_len: usize,
		error: String,
	},

	#[error("Invalid environment variable name '{name}': {reason}")]
	InvalidVariableName { name: String, reason: String },
}
