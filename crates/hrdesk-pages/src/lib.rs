//! Client-side form state for hrdesk
//!
//! ## Architecture
//!
//! ```text
//! Server-side:                      Client-side:
//! ┌────────────┐                    ┌───────────────────┐
//! │ FormSchema │──to_metadata()──▶  │ SubmissionContext │◀── SubmissionTicket ◀── transport
//! └────────────┘                    └─────────┬─────────┘
//!                                             │ snapshot
//!                                       ┌─────▼──────┐
//!                                       │ FieldBinder │──▶ FieldProps
//!                                       └────────────┘
//! ```
//!
//! Everything here is single-threaded (`Rc`/`RefCell`).

pub mod binder;
pub mod context;
pub mod signal;
pub mod transport;

pub use binder::{FieldBinder, FieldProps, SubmitButtonProps};
pub use context::{
	ContextSnapshot, Delivery, SubmissionContext, SubmissionState, SubmissionTicket, SubmitError,
	submit,
};
pub use signal::{Signal, Subscription, WeakSignal};
pub use transport::{LoopbackTransport, SubmissionTransport, TransportError, decode_response};
