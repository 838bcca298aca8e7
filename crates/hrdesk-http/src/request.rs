//! Incoming requests

use crate::error::{HttpError, HttpResult};
use bytes::Bytes;
use hyper::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use hyper::{HeaderMap, Method, Uri};
use std::collections::HashMap;

/// A fully received HTTP request
///
/// Handlers run once the body has been read completely, so the body is held
/// as [`Bytes`] rather than a stream.
#[derive(Debug, Clone)]
pub struct Request {
	pub method: Method,
	pub uri: Uri,
	pub headers: HeaderMap,
	pub path_params: HashMap<String, String>,
	body: Bytes,
}

impl Request {
	/// Start building a request
	///
	/// # Examples
	///
	/// ```
	/// use hrdesk_http::Request;
	/// use hyper::Method;
	///
	/// let request = Request::builder()
	///     .method(Method::POST)
	///     .uri("/departments/create")
	///     .header("content-type", "application/x-www-form-urlencoded")
	///     .body("name=Sales")
	///     .build()
	///     .unwrap();
	///
	/// assert_eq!(request.path(), "/departments/create");
	/// assert_eq!(request.content_type(), Some("application/x-www-form-urlencoded"));
	/// ```
	pub fn builder() -> RequestBuilder {
		RequestBuilder::default()
	}

	pub fn path(&self) -> &str {
		self.uri.path()
	}

	pub fn body(&self) -> &Bytes {
		&self.body
	}

	/// The `Content-Type` header, if present and valid UTF-8
	pub fn content_type(&self) -> Option<&str> {
		self.headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
	}

	/// A path parameter captured by the router (e.g. `id` in `/employees/{id}/edit`)
	pub fn path_param(&self, name: &str) -> Option<&str> {
		self.path_params.get(name).map(String::as_str)
	}

	/// Set a path parameter
	pub fn set_path_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
		self.path_params.insert(key.into(), value.into());
	}
}

/// Builder for [`Request`]
#[derive(Debug, Default)]
pub struct RequestBuilder {
	method: Method,
	uri: Option<String>,
	headers: HeaderMap,
	path_params: HashMap<String, String>,
	body: Bytes,
	invalid_header: Option<String>,
}

impl RequestBuilder {
	pub fn method(mut self, method: Method) -> Self {
		self.method = method;
		self
	}

	pub fn uri(mut self, uri: impl Into<String>) -> Self {
		self.uri = Some(uri.into());
		self
	}

	pub fn header(mut self, name: &str, value: &str) -> Self {
		match (
			HeaderName::from_bytes(name.as_bytes()),
			HeaderValue::from_str(value),
		) {
			(Ok(name), Ok(value)) => {
				self.headers.insert(name, value);
			}
			_ => self.invalid_header = Some(name.to_string()),
		}
		self
	}

	pub fn headers(mut self, headers: HeaderMap) -> Self {
		self.headers = headers;
		self
	}

	pub fn path_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.path_params.insert(key.into(), value.into());
		self
	}

	pub fn body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	pub fn build(self) -> HttpResult<Request> {
		if let Some(name) = self.invalid_header {
			return Err(HttpError::Body(format!("Invalid header: {}", name)));
		}
		let uri = self.uri.as_deref().unwrap_or("/");
		let uri = uri
			.parse::<Uri>()
			.map_err(|e| HttpError::InvalidUri(format!("{}: {}", uri, e)))?;
		Ok(Request {
			method: self.method,
			uri,
			headers: self.headers,
			path_params: self.path_params,
			body: self.body,
		})
	}
}
