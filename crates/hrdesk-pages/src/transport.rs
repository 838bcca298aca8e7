//! Submission transport
//!
//! The transport carries a form's [`RawFields`] to the server and eventually
//! yields either a [`SubmissionResponse`] or a [`TransportError`]. The
//! submission context never talks to the network itself.

use async_trait::async_trait;
use hrdesk_forms::RawFields;
use hrdesk_http::{Response, StatusCode, SubmissionResponse};
use std::future::Future;
use thiserror::Error;

/// Failures below the level of form validation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
	#[error("Network error: {0}")]
	Network(String),
	#[error("Unexpected response status {0}")]
	Status(u16),
	#[error("Malformed response body: {0}")]
	MalformedBody(String),
	#[error("The submission was abandoned before a response arrived")]
	Abandoned,
}

/// Sends form data and returns the server's verdict
#[async_trait(?Send)]
pub trait SubmissionTransport {
	async fn send(&self, fields: RawFields) -> Result<SubmissionResponse, TransportError>;
}

/// Interpret an HTTP reply to a form submission
///
/// Success and redirect statuses may carry a JSON submission body or none at
/// all. A 400 must carry one. Any other status is a transport error.
///
/// # Examples
///
/// ```
/// use hrdesk_http::StatusCode;
/// use hrdesk_pages::transport::{decode_response, TransportError};
///
/// let ok = decode_response(StatusCode::FOUND, b"").unwrap();
/// assert!(ok.is_success());
///
/// let failed = decode_response(
///     StatusCode::BAD_REQUEST,
///     br#"{"fields":{"name":"Al"},"fieldErrors":{"name":["too short"]}}"#,
/// )
/// .unwrap();
/// assert_eq!(failed.errors_of("name"), ["too short"]);
///
/// assert_eq!(
///     decode_response(StatusCode::BAD_GATEWAY, b""),
///     Err(TransportError::Status(502))
/// );
/// ```
pub fn decode_response(
	status: StatusCode,
	body: &[u8],
) -> Result<SubmissionResponse, TransportError> {
	let is_blank = body.iter().all(u8::is_ascii_whitespace);
	if status.is_success() || status.is_redirection() {
		if is_blank {
			return Ok(SubmissionResponse::default());
		}
		return parse(body);
	}
	if status == StatusCode::BAD_REQUEST {
		if is_blank {
			return Err(TransportError::MalformedBody("empty 400 body".to_string()));
		}
		return parse(body);
	}
	Err(TransportError::Status(status.as_u16()))
}

fn parse(body: &[u8]) -> Result<SubmissionResponse, TransportError> {
	serde_json::from_slice(body).map_err(|e| TransportError::MalformedBody(e.to_string()))
}

/// Transport that calls an in-process handler
///
/// Useful for server-rendered setups and tests: the handler receives the
/// fields and returns the same [`Response`] it would send over the wire.
pub struct LoopbackTransport<F> {
	handler: F,
}

impl<F> LoopbackTransport<F> {
	pub fn new(handler: F) -> Self {
		Self { handler }
	}
}

#[async_trait(?Send)]
impl<F, Fut> SubmissionTransport for LoopbackTransport<F>
where
	F: Fn(RawFields) -> Fut,
	Fut: Future<Output = Response>,
{
	async fn send(&self, fields: RawFields) -> Result<SubmissionResponse, TransportError> {
		let response = (self.handler)(fields).await;
		decode_response(response.status, &response.body)
	}
}
