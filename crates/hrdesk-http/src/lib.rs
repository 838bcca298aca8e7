//! HTTP plumbing for hrdesk forms
//!
//! - [`Request`] / [`Response`]: fully buffered request and response types
//! - [`extract`]: raw field extraction from bodies and query strings
//! - [`submission`]: the [`SubmissionResponse`] wire type and bad-request responses

pub mod error;
pub mod extract;
pub mod request;
pub mod response;
pub mod submission;

pub use error::{HttpError, HttpResult};
pub use extract::{
	DEFAULT_MAX_FORM_BODY_SIZE, DuplicatePolicy, ExtractOptions, extract_body_fields,
	extract_query_fields, extract_query_fields_with, extract_request_fields,
};
pub use request::{Request, RequestBuilder};
pub use response::Response;
pub use submission::{SubmissionResponse, bad_request, process_bad_request};

// Re-export hyper types used in the public API
pub use hyper::{HeaderMap, Method, StatusCode, Uri};
