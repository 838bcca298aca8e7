//! Wiring loaded [`Settings`] into the other crates
//!
//! ```no_run
//! use hrdesk::conf::Settings;
//! use hrdesk::configure;
//!
//! let settings = Settings::from_env().expect("valid configuration");
//! hrdesk::logging::init_from(&settings);
//! let anonymous = configure::request_context(&settings, None);
//! ```

use hrdesk_conf::Settings;
use hrdesk_http::ExtractOptions;

/// Body extraction options honoring `MAX_BODY_SIZE`
pub fn extract_options(settings: &Settings) -> ExtractOptions {
	ExtractOptions::new().with_max_body_size(settings.max_body_size)
}

/// Context for one request, as resolved by the session layer
#[cfg(feature = "staff")]
pub fn request_context(
	settings: &Settings,
	user: Option<hrdesk_staff::User>,
) -> hrdesk_staff::RequestContext {
	let ctx = match user {
		Some(user) => hrdesk_staff::RequestContext::authenticated(user),
		None => hrdesk_staff::RequestContext::anonymous(),
	};
	ctx.with_extract_options(extract_options(settings))
}
