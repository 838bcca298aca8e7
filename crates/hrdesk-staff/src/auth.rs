//! Per-request context
//!
//! The session layer resolves the signed-in user and hands it to every
//! handler through [`RequestContext`]. Nothing here is global.

use crate::error::{StaffError, StaffResult};
use crate::models::User;
use hrdesk_http::ExtractOptions;

/// What a handler knows about the request beyond its body
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
	user: Option<User>,
	extract: ExtractOptions,
}

impl RequestContext {
	/// A request with nobody signed in
	pub fn anonymous() -> Self {
		Self::default()
	}

	/// A request made by `user`
	pub fn authenticated(user: User) -> Self {
		Self {
			user: Some(user),
			extract: ExtractOptions::default(),
		}
	}

	/// Body extraction settings, e.g. a configured size limit
	pub fn with_extract_options(mut self, extract: ExtractOptions) -> Self {
		self.extract = extract;
		self
	}

	pub fn user(&self) -> Option<&User> {
		self.user.as_ref()
	}

	pub fn extract_options(&self) -> &ExtractOptions {
		&self.extract
	}

	/// The signed-in user, or [`StaffError::Unauthenticated`]
	pub fn require_user(&self) -> StaffResult<&User> {
		self.user.as_ref().ok_or(StaffError::Unauthenticated)
	}
}
