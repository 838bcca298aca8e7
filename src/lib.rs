//! # hrdesk
//!
//! Toolkit for an HR administration application: staff manage employee and
//! department records through server-validated forms.
//!
//! The interesting part is the form pipeline. One [`forms::FormSchema`] per
//! form drives both server-side validation and the client-side state that
//! renders errors next to the right inputs:
//!
//! ```text
//! request body ──extract──▶ RawFields ──validate──▶ CleanedData ──▶ store
//!                                         │
//!                                         └─ FieldErrors ──▶ SubmissionResponse (400)
//!                                                                   │
//!                              SubmissionContext ◀── transport ─────┘
//!                                      │
//!                                FieldBinder ──▶ FieldProps
//! ```
//!
//! ## Feature Flags
//!
//! - `forms` - schemas and validation
//! - `http` - request/response types, field extraction, bad-request responses
//! - `pages` - client-side submission state and field binding
//! - `conf` - settings from environment variables
//! - `staff` - employee and department handlers
//! - `logging` - `tracing-subscriber` setup
//! - `full` (default) - everything

#[cfg(feature = "forms")]
pub use hrdesk_forms as forms;

#[cfg(feature = "http")]
pub use hrdesk_http as http;

#[cfg(feature = "pages")]
pub use hrdesk_pages as pages;

#[cfg(feature = "conf")]
pub use hrdesk_conf as conf;

#[cfg(feature = "staff")]
pub use hrdesk_staff as staff;

#[cfg(feature = "logging")]
pub mod logging;

#[cfg(all(feature = "conf", feature = "http"))]
pub mod configure;

#[cfg(feature = "forms")]
pub use hrdesk_forms::{
	CleanedData, FieldError, FieldSpec, FormSchema, RawFields, RawValue, ValidationResult,
};

#[cfg(feature = "http")]
pub use hrdesk_http::{Request, Response, SubmissionResponse, process_bad_request};

#[cfg(feature = "pages")]
pub use hrdesk_pages::{FieldBinder, SubmissionContext, SubmissionTransport};

#[cfg(feature = "conf")]
pub use hrdesk_conf::Settings;

/// Commonly used items
pub mod prelude {
	#[cfg(feature = "forms")]
	pub use hrdesk_forms::{FieldSpec, FormSchema, RawFields, ValidationResult};

	#[cfg(feature = "http")]
	pub use hrdesk_http::{ExtractOptions, Request, Response, SubmissionResponse};

	#[cfg(feature = "pages")]
	pub use hrdesk_pages::{Delivery, FieldBinder, SubmissionContext, SubmissionTransport, submit};

	#[cfg(feature = "staff")]
	pub use hrdesk_staff::{ActionOutcome, MemoryStore, RequestContext, StaffStore};
}
