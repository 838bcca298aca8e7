//! HTTP-layer errors

use thiserror::Error;

/// Errors raised while reading a request or building a response
///
/// These are the exceptional cases: a body that cannot be read at all. Bad
/// field values are never an `HttpError`; they go through validation.
#[derive(Debug, Error)]
pub enum HttpError {
	#[error("Unsupported content type: {0}")]
	UnsupportedMediaType(String),
	#[error("Invalid multipart boundary: {0}")]
	InvalidBoundary(String),
	#[error("Body size {size} bytes exceeds maximum allowed size of {limit} bytes")]
	PayloadTooLarge { size: usize, limit: usize },
	#[error("Failed to read body: {0}")]
	Body(String),
	#[error("Invalid URI: {0}")]
	InvalidUri(String),
	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

impl HttpError {
	/// HTTP status code for this error
	pub fn status_code(&self) -> u16 {
		match self {
			Self::UnsupportedMediaType(_) => 415,
			Self::PayloadTooLarge { .. } => 413,
			Self::InvalidBoundary(_) | Self::Body(_) | Self::InvalidUri(_) => 400,
			Self::Serialization(_) => 500,
		}
	}
}

pub type HttpResult<T> = Result<T, HttpError>;
