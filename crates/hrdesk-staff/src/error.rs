//! Handler errors and their HTTP responses

use crate::links;
use crate::store::StoreError;
use hrdesk_forms::FormError;
use hrdesk_http::{HttpError, Response};

/// Message returned when a list filter fails validation
pub const INVALID_FILTER_MESSAGE: &str = "Invalid input provided, please try again";

/// Errors a handler cannot express as a form response
#[derive(Debug, thiserror::Error)]
pub enum StaffError {
	#[error("Authentication required")]
	Unauthenticated,

	#[error("Invalid or missing record id")]
	InvalidId,

	/// A record the page depends on does not exist
	#[error("{0}")]
	NotFound(&'static str),

	#[error("{}", INVALID_FILTER_MESSAGE)]
	InvalidFilter,

	#[error("Password hashing failed: {0}")]
	PasswordHash(String),

	#[error(transparent)]
	Http(#[from] HttpError),

	#[error(transparent)]
	Form(#[from] FormError),

	#[error(transparent)]
	Store(#[from] StoreError),
}

/// Result type for staff handlers
pub type StaffResult<T> = Result<T, StaffError>;

impl From<StaffError> for Response {
	fn from(error: StaffError) -> Self {
		match error {
			StaffError::Unauthenticated => Response::redirect(links::LOGIN),
			StaffError::InvalidId => Response::bad_request().with_body(error.to_string()),
			StaffError::NotFound(message) => Response::not_found().with_body(message),
			StaffError::InvalidFilter => Response::bad_request().with_body(INVALID_FILTER_MESSAGE),
			StaffError::Http(e) => Response::from(e),
			StaffError::PasswordHash(_) | StaffError::Form(_) | StaffError::Store(_) => {
				tracing::error!(error = %error, "staff handler failed");
				Response::internal_server_error()
			}
		}
	}
}
