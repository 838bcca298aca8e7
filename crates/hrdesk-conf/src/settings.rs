//! Application settings
//!
//! Loaded once at startup. Every problem is collected so a misconfigured
//! deployment reports all of them in one go.

use crate::env::{Env, EnvError};
use std::collections::HashMap;
use std::fmt;
use url::Url;

/// Default log filter when `LOG_LEVEL` is unset
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default form body limit when `MAX_BODY_SIZE` is unset
pub const DEFAULT_MAX_BODY_SIZE: usize = 2 * 1024 * 1024;

const DATABASE_SCHEMES: &[&str] = &["postgres", "postgresql", "mysql", "sqlite", "file"];

/// Invalid configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
	#[error("Invalid configuration: {}", format_errors(.0))]
	Invalid(Vec<EnvError>),
}

fn format_errors(errors: &[EnvError]) -> String {
	errors
		.iter()
		.map(ToString::to_string)
		.collect::<Vec<_>>()
		.join("; ")
}

impl SettingsError {
	pub fn errors(&self) -> &[EnvError] {
		match self {
			Self::Invalid(errors) => errors,
		}
	}
}

/// A secret that never shows up in `Debug` output
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
	pub fn expose(&self) -> &str {
		&self.0
	}
}

impl fmt::Debug for Secret {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("Secret(***)")
	}
}

/// Validated settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
	pub database_url: Url,
	pub session_secret: Secret,
	pub log_level: String,
	pub max_body_size: usize,
}

impl Settings {
	/// Load from the process environment
	pub fn from_env() -> Result<Self, SettingsError> {
		Self::load(&Env::new())
	}

	/// Load from an explicit map of variables
	///
	/// # Examples
	///
	/// ```
	/// use hrdesk_conf::Settings;
	/// use std::collections::HashMap;
	///
	/// let settings = Settings::from_map(HashMap::from([
	///     ("DATABASE_URL".to_string(), "postgres://hr@localhost/hr".to_string()),
	///     ("SESSION_SECRET".to_string(), "s3cret".to_string()),
	/// ]))
	/// .unwrap();
	///
	/// assert_eq!(settings.database_url.scheme(), "postgres");
	/// assert_eq!(settings.log_level, "info");
	/// ```
	pub fn from_map(vars: HashMap<String, String>) -> Result<Self, SettingsError> {
		Self::load(&Env::from_map(vars))
	}

	/// Load through `env`, reporting every invalid variable
	pub fn load(env: &Env) -> Result<Self, SettingsError> {
		let mut errors = Vec::new();

		let database_url = env
			.present_str("DATABASE_URL")
			.and_then(|raw| parse_database_url(env, &raw))
			.map_err(|e| errors.push(e))
			.ok();
		let session_secret = env
			.present_str("SESSION_SECRET")
			.map(Secret)
			.map_err(|e| errors.push(e))
			.ok();
		let log_level = env
			.str_with_default("LOG_LEVEL", Some(DEFAULT_LOG_LEVEL))
			.map_err(|e| errors.push(e))
			.ok();
		let max_body_size = env
			.usize_with_default("MAX_BODY_SIZE", DEFAULT_MAX_BODY_SIZE)
			.map_err(|e| errors.push(e))
			.ok();

		match (database_url, session_secret, log_level, max_body_size) {
			(Some(database_url), Some(session_secret), Some(log_level), Some(max_body_size))
				if errors.is_empty() =>
			{
				Ok(Self {
					database_url,
					session_secret,
					log_level,
					max_body_size,
				})
			}
			_ => {
				tracing::error!(error_count = errors.len(), "invalid configuration");
				Err(SettingsError::Invalid(errors))
			}
		}
	}
}

fn parse_database_url(env: &Env, raw: &str) -> Result<Url, EnvError> {
	let key = match &env.prefix {
		Some(prefix) => format!("{}DATABASE_URL", prefix),
		None => "DATABASE_URL".to_string(),
	};
	let url = Url::parse(raw).map_err(|e| EnvError::ParseError {
		key: key.clone(),
		value_len: raw.len(),
		error: e.to_string(),
	})?;
	if !DATABASE_SCHEMES.contains(&url.scheme()) {
		return Err(EnvError::ParseError {
			key,
			value_len: raw.len(),
			error: format!("unsupported database scheme '{}'", url.scheme()),
		});
	}
	Ok(url)
}
