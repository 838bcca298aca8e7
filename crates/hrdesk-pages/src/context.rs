//! Submission Context
//!
//! One [`SubmissionContext`] exists per mounted form. It remembers the latest
//! [`SubmissionResponse`], whether a submission is in flight, and the form's
//! default values. Only the transport lifecycle mutates it:
//!
//! ```text
//! Idle ──begin_submit()──▶ Pending ──ticket.complete(resp)──▶ IdleWithErrors | IdleSuccess
//!                             │
//!                             └──ticket.fail(err) / ticket dropped──▶ IdleWithErrors
//! ```
//!
//! Tickets only hold a weak handle. Once the context is unmounted (dropped), a
//! late response is discarded without touching anything.

use crate::signal::{Signal, Subscription, WeakSignal};
use crate::transport::{SubmissionTransport, TransportError};
use hrdesk_forms::{FormMetadata, FormSchema, RawFields};
use hrdesk_http::SubmissionResponse;
use std::rc::Rc;
use thiserror::Error;

/// Errors starting a submission
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
	#[error("A submission is already in flight for form {0}")]
	AlreadySubmitting(String),
	#[error(transparent)]
	Transport(#[from] TransportError),
}

/// Observable lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
	/// Nothing submitted yet, or reset since
	Idle,
	/// A submission is in flight
	Pending,
	/// The last submission came back with field or form errors
	IdleWithErrors,
	/// The last submission succeeded
	IdleSuccess,
}

/// What happened to a settled ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
	/// The outcome was applied to the context
	Applied,
	/// The context was unmounted or reset first; nothing changed
	Discarded,
}

/// Plain copy of a context's state, handed to subscribers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextSnapshot {
	pub response: Option<SubmissionResponse>,
	pub transport_error: Option<String>,
	pub defaults: RawFields,
	pending: Option<u64>,
	last_ticket: u64,
}

impl ContextSnapshot {
	pub fn is_submitting(&self) -> bool {
		self.pending.is_some()
	}

	pub fn value_of(&self, field: &str) -> String {
		match self.response.as_ref().and_then(|r| r.fields.get(field)) {
			Some(echoed) => echoed.as_str().to_string(),
			None => self.defaults.value_of(field).to_string(),
		}
	}

	pub fn values_of(&self, field: &str) -> Vec<String> {
		let source = match &self.response {
			Some(response) if response.fields.contains(field) => &response.fields,
			_ => &self.defaults,
		};
		source.values_of(field).into_iter().map(str::to_string).collect()
	}

	pub fn errors_of(&self, field: &str) -> Vec<String> {
		self.response
			.as_ref()
			.map(|r| r.errors_of(field).to_vec())
			.unwrap_or_default()
	}

	pub fn form_error(&self) -> Option<String> {
		self.transport_error
			.clone()
			.or_else(|| self.response.as_ref().and_then(|r| r.form_error.clone()))
	}

	pub fn state(&self) -> SubmissionState {
		if self.pending.is_some() {
			return SubmissionState::Pending;
		}
		if self.transport_error.is_some() {
			return SubmissionState::IdleWithErrors;
		}
		match &self.response {
			None => SubmissionState::Idle,
			Some(response) if response.is_success() => SubmissionState::IdleSuccess,
			Some(_) => SubmissionState::IdleWithErrors,
		}
	}
}

/// State of one mounted form
pub struct SubmissionContext {
	metadata: Rc<FormMetadata>,
	state: Signal<ContextSnapshot>,
}

impl SubmissionContext {
	/// Mount a form described by `schema`
	///
	/// `defaults` are the per-form default values (for example the record
	/// being edited); they take precedence over the schema's own initials.
	pub fn mount(schema: &FormSchema, defaults: RawFields) -> Self {
		Self::from_metadata(schema.to_metadata(), defaults)
	}

	/// Mount from metadata received from the server
	pub fn from_metadata(metadata: FormMetadata, defaults: RawFields) -> Self {
		let mut merged = metadata.initial.clone();
		for (name, value) in defaults {
			merged.insert(name, value);
		}
		tracing::debug!(form = %metadata.name, "form mounted");
		Self {
			metadata: Rc::new(metadata),
			state: Signal::new(ContextSnapshot {
				defaults: merged,
				..ContextSnapshot::default()
			}),
		}
	}

	pub fn metadata(&self) -> &FormMetadata {
		&self.metadata
	}

	pub fn form_name(&self) -> &str {
		&self.metadata.name
	}

	/// Echoed value, else default, else `""`
	pub fn value_of(&self, field: &str) -> String {
		self.state.with(|s| s.value_of(field))
	}

	pub fn values_of(&self, field: &str) -> Vec<String> {
		self.state.with(|s| s.values_of(field))
	}

	/// Field-level messages from the latest response
	pub fn errors_of(&self, field: &str) -> Vec<String> {
		self.state.with(|s| s.errors_of(field))
	}

	/// Form-level message: a transport failure or the response's `formError`
	pub fn form_error(&self) -> Option<String> {
		self.state.with(ContextSnapshot::form_error)
	}

	pub fn is_submitting(&self) -> bool {
		self.state.with(ContextSnapshot::is_submitting)
	}

	pub fn state(&self) -> SubmissionState {
		self.state.with(ContextSnapshot::state)
	}

	pub fn response(&self) -> Option<SubmissionResponse> {
		self.state.with(|s| s.response.clone())
	}

	pub fn snapshot(&self) -> ContextSnapshot {
		self.state.get()
	}

	/// Call `callback` after every state change
	pub fn subscribe(&self, callback: impl Fn(&ContextSnapshot) + 'static) -> Subscription {
		self.state.subscribe(callback)
	}

	/// Mark a submission as started
	///
	/// Fails while another submission is in flight; submit controls are
	/// disabled in that state, so this only trips on programmatic submits.
	pub fn begin_submit(&self) -> Result<SubmissionTicket, SubmitError> {
		if self.is_submitting() {
			tracing::warn!(form = %self.form_name(), "submission rejected, one is already in flight");
			return Err(SubmitError::AlreadySubmitting(self.form_name().to_string()));
		}

		let mut id = 0;
		self.state.update(|s| {
			s.last_ticket += 1;
			id = s.last_ticket;
			s.pending = Some(id);
			s.transport_error = None;
		});
		tracing::debug!(form = %self.form_name(), ticket = id, "submission started");

		Ok(SubmissionTicket {
			id,
			form: self.form_name().to_string(),
			state: self.state.downgrade(),
			settled: false,
		})
	}

	/// Forget the last response and any in-flight submission
	pub fn reset(&self) {
		self.state.update(|s| {
			s.response = None;
			s.transport_error = None;
			s.pending = None;
		});
	}

	/// Unmount the form; outstanding tickets become no-ops
	pub fn unmount(self) {
		drop(self);
	}
}

impl Drop for SubmissionContext {
	fn drop(&mut self) {
		tracing::debug!(form = %self.metadata.name, "form unmounted");
	}
}

impl std::fmt::Debug for SubmissionContext {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SubmissionContext")
			.field("form", &self.metadata.name)
			.field("state", &self.state())
			.finish()
	}
}

/// An in-flight submission
///
/// Settle it with [`complete`](Self::complete) or [`fail`](Self::fail). A
/// ticket dropped unsettled fails the submission so the form never stays
/// pending.
#[must_use = "an unsettled ticket fails its submission when dropped"]
pub struct SubmissionTicket {
	id: u64,
	form: String,
	state: WeakSignal<ContextSnapshot>,
	settled: bool,
}

impl SubmissionTicket {
	pub fn id(&self) -> u64 {
		self.id
	}

	/// Apply the server's response
	pub fn complete(mut self, response: SubmissionResponse) -> Delivery {
		self.settle(|s| {
			s.response = Some(response);
			s.transport_error = None;
		})
	}

	/// Record a transport-level failure
	///
	/// The previous response stays in place; the error surfaces as the form
	/// error.
	pub fn fail(mut self, error: &TransportError) -> Delivery {
		tracing::warn!(form = %self.form, error = %error, "submission transport failed");
		let message = error.to_string();
		self.settle(|s| s.transport_error = Some(message))
	}

	/// Send `fields` through `transport` and settle with the outcome
	pub async fn run<T>(self, transport: &T, fields: RawFields) -> Result<Delivery, TransportError>
	where
		T: SubmissionTransport + ?Sized,
	{
		match transport.send(fields).await {
			Ok(response) => Ok(self.complete(response)),
			Err(error) => {
				self.fail(&error);
				Err(error)
			}
		}
	}

	fn settle(&mut self, apply: impl FnOnce(&mut ContextSnapshot)) -> Delivery {
		self.settled = true;
		let Some(state) = self.state.upgrade() else {
			tracing::debug!(form = %self.form, ticket = self.id, "form unmounted, response discarded");
			return Delivery::Discarded;
		};
		if state.with(|s| s.pending) != Some(self.id) {
			tracing::debug!(form = %self.form, ticket = self.id, "stale ticket, response discarded");
			return Delivery::Discarded;
		}
		state.update(|s| {
			s.pending = None;
			apply(s);
		});
		Delivery::Applied
	}
}

impl Drop for SubmissionTicket {
	fn drop(&mut self) {
		if !self.settled {
			let message = TransportError::Abandoned.to_string();
			self.settle(|s| s.transport_error = Some(message));
		}
	}
}

impl std::fmt::Debug for SubmissionTicket {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SubmissionTicket")
			.field("id", &self.id)
			.field("form", &self.form)
			.field("settled", &self.settled)
			.finish()
	}
}

/// Start a submission on `ctx` and drive it through `transport`
///
/// A transport failure is returned and also surfaced through the context's
/// form error.
pub async fn submit<T>(
	ctx: &SubmissionContext,
	transport: &T,
	fields: RawFields,
) -> Result<Delivery, SubmitError>
where
	T: SubmissionTransport + ?Sized,
{
	let ticket = ctx.begin_submit()?;
	Ok(ticket.run(transport, fields).await?)
}
