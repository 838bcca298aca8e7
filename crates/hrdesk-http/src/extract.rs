//! Raw field extraction
//!
//! Turns a request body (url-encoded or multipart) or a query string into
//! [`RawFields`]. Bodies keep every submitted field; query strings keep only
//! the names the caller asks for.

use crate::error::{HttpError, HttpResult};
use crate::request::Request;
use bytes::Bytes;
use futures_util::{future::ready, stream::once};
use hrdesk_forms::RawFields;
use hyper::Uri;
use percent_encoding::percent_decode_str;

/// Largest accepted form body
pub const DEFAULT_MAX_FORM_BODY_SIZE: usize = 2 * 1024 * 1024;

const URLENCODED: &str = "application/x-www-form-urlencoded";
const MULTIPART: &str = "multipart/form-data";

/// How repeated keys collapse for single-valued fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
	/// The last occurrence wins
	#[default]
	LastWins,
	/// The first occurrence wins
	FirstWins,
}

/// Extraction settings
#[derive(Debug, Clone)]
pub struct ExtractOptions {
	pub max_body_size: usize,
	/// Names that keep every occurrence as a list
	pub multi_valued: Vec<String>,
	pub duplicate_policy: DuplicatePolicy,
}

impl Default for ExtractOptions {
	fn default() -> Self {
		Self {
			max_body_size: DEFAULT_MAX_FORM_BODY_SIZE,
			multi_valued: Vec::new(),
			duplicate_policy: DuplicatePolicy::default(),
		}
	}
}

impl ExtractOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_max_body_size(mut self, max_body_size: usize) -> Self {
		self.max_body_size = max_body_size;
		self
	}

	pub fn with_multi_valued(mut self, name: impl Into<String>) -> Self {
		self.multi_valued.push(name.into());
		self
	}

	pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
		self.duplicate_policy = policy;
		self
	}

	fn is_multi_valued(&self, name: &str) -> bool {
		self.multi_valued.iter().any(|n| n == name)
	}

	fn collect<I>(&self, pairs: I) -> RawFields
	where
		I: IntoIterator<Item = (String, String)>,
	{
		let mut fields = RawFields::new();
		for (name, value) in pairs {
			if self.is_multi_valued(&name) {
				if fields.contains(&name) {
					fields.append(name, value);
				} else {
					fields.insert(name, vec![value]);
				}
				continue;
			}
			match self.duplicate_policy {
				DuplicatePolicy::LastWins => fields.insert(name, value),
				DuplicatePolicy::FirstWins => {
					if !fields.contains(&name) {
						fields.insert(name, value);
					}
				}
			}
		}
		fields
	}
}

/// Extract every field of a form body
///
/// # Examples
///
/// ```
/// use hrdesk_http::extract::{extract_body_fields, ExtractOptions};
/// use bytes::Bytes;
///
/// # tokio_test_block_on(async {
/// let fields = extract_body_fields(
///     "application/x-www-form-urlencoded",
///     Bytes::from("name=Sales&managerId=42"),
///     &ExtractOptions::default(),
/// )
/// .await
/// .unwrap();
///
/// assert_eq!(fields.value_of("name"), "Sales");
/// assert_eq!(fields.value_of("managerId"), "42");
/// # });
/// # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
/// # }
/// ```
pub async fn extract_body_fields(
	content_type: &str,
	body: Bytes,
	options: &ExtractOptions,
) -> HttpResult<RawFields> {
	if body.len() > options.max_body_size {
		return Err(HttpError::PayloadTooLarge {
			size: body.len(),
			limit: options.max_body_size,
		});
	}

	if content_type.contains(URLENCODED) {
		let body_str = std::str::from_utf8(&body)
			.map_err(|e| HttpError::Body(format!("Invalid UTF-8 in body: {}", e)))?;
		let pairs: Vec<(String, String)> = serde_urlencoded::from_str(body_str)
			.map_err(|e| HttpError::Body(format!("Invalid form body: {}", e)))?;
		Ok(options.collect(pairs))
	} else if content_type.contains(MULTIPART) {
		extract_multipart(content_type, body, options).await
	} else {
		tracing::warn!(content_type = %content_type, "rejected form body");
		Err(HttpError::UnsupportedMediaType(content_type.to_string()))
	}
}

async fn extract_multipart(
	content_type: &str,
	body: Bytes,
	options: &ExtractOptions,
) -> HttpResult<RawFields> {
	let boundary =
		multer::parse_boundary(content_type).map_err(|e| HttpError::InvalidBoundary(e.to_string()))?;

	let stream = once(ready(Ok::<_, std::io::Error>(body)));
	let mut multipart = multer::Multipart::new(stream, boundary);

	let mut pairs = Vec::new();
	while let Some(field) = multipart
		.next_field()
		.await
		.map_err(|e| HttpError::Body(format!("Failed to read multipart field: {}", e)))?
	{
		let name = field
			.name()
			.ok_or_else(|| HttpError::Body("Field name missing".to_string()))?
			.to_string();

		// Only text fields, file uploads are skipped
		if field.file_name().is_none() {
			let text = field
				.text()
				.await
				.map_err(|e| HttpError::Body(format!("Failed to read text field: {}", e)))?;
			pairs.push((name, text));
		}
	}

	Ok(options.collect(pairs))
}

/// Extract every field of a request body, reading its `Content-Type` header
pub async fn extract_request_fields(
	request: &Request,
	options: &ExtractOptions,
) -> HttpResult<RawFields> {
	let content_type = request.content_type().unwrap_or("");
	extract_body_fields(content_type, request.body().clone(), options).await
}

/// Extract the `expected` parameters of a query string
///
/// Parameters not listed in `expected` are dropped.
///
/// # Examples
///
/// ```
/// use hrdesk_http::extract::extract_query_fields;
/// use hyper::Uri;
///
/// let uri: Uri = "/employees?status=Active&page=2".parse().unwrap();
/// let fields = extract_query_fields(&uri, &["status"]);
///
/// assert_eq!(fields.value_of("status"), "Active");
/// assert!(!fields.contains("page"));
/// ```
pub fn extract_query_fields(uri: &Uri, expected: &[&str]) -> RawFields {
	extract_query_fields_with(uri, expected, &ExtractOptions::default())
}

/// [`extract_query_fields`] with explicit duplicate handling
pub fn extract_query_fields_with(
	uri: &Uri,
	expected: &[&str],
	options: &ExtractOptions,
) -> RawFields {
	let pairs = uri
		.query()
		.map(parse_query)
		.unwrap_or_default()
		.into_iter()
		.filter(|(name, _)| expected.contains(&name.as_str()));
	options.collect(pairs)
}

fn parse_query(query: &str) -> Vec<(String, String)> {
	query
		.split('&')
		.filter(|pair| !pair.is_empty())
		.filter_map(|pair| {
			// Split on first '=' only to preserve '=' in values
			let mut parts = pair.splitn(2, '=');
			Some((decode(parts.next()?), decode(parts.next().unwrap_or(""))))
		})
		.collect()
}

fn decode(component: &str) -> String {
	let component = component.replace('+', " ");
	percent_decode_str(&component).decode_utf8_lossy().into_owned()
}
