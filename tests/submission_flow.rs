//! End-to-end submission flows
//!
//! A mounted form submits through an in-process transport to the staff
//! handlers and renders whatever comes back.

use hrdesk::forms::{ErrorCode, FieldError, FieldSpec, FormSchema, RawFields};
use hrdesk::http::{
	Method, Request, Response, StatusCode, extract_query_fields, process_bad_request,
};
use hrdesk::pages::{
	Delivery, FieldBinder, LoopbackTransport, SubmissionContext, SubmissionState, SubmitError,
	TransportError, submit,
};
use hrdesk::staff::schemas::{self, NewEmployee};
use hrdesk::staff::{
	ADMIN_USERNAME, MemoryStore, RequestContext, StaffStore, User, actions, links,
};
use rstest::{fixture, rstest};
use std::cell::RefCell;
use tokio::sync::oneshot;

#[fixture]
fn department_schema() -> FormSchema {
	FormSchema::builder("department")
		.field(FieldSpec::text("name").with_min_length(3))
		.field(FieldSpec::text("managerId").with_min_length(1))
		.build()
		.unwrap()
}

fn form_request(uri: &str, fields: &RawFields) -> Request {
	let pairs: Vec<(&str, &str)> = fields.iter().map(|(k, v)| (k, v.as_str())).collect();
	Request::builder()
		.method(Method::POST)
		.uri(uri)
		.header("content-type", "application/x-www-form-urlencoded")
		.body(serde_urlencoded::to_string(pairs).unwrap())
		.build()
		.unwrap()
}

fn admin() -> RequestContext {
	RequestContext::authenticated(User {
		id: "u-1".to_string(),
		username: ADMIN_USERNAME.to_string(),
	})
}

async fn store_with_manager() -> (MemoryStore, String) {
	let store = MemoryStore::new();
	let boss = store
		.create_employee(NewEmployee {
			first_name: "Grace".to_string(),
			last_name: "Hopper".to_string(),
			phone: "5550000".to_string(),
			email: "grace@example.com".to_string(),
			manager_id: String::new(),
		})
		.await
		.unwrap();
	let manager_id = store.add_manager(&boss).await.unwrap();
	(store, manager_id)
}

#[rstest]
fn test_short_name_and_blank_manager_fail_in_order(department_schema: FormSchema) {
	// Arrange
	let raw = RawFields::from_pairs([("name", "Al"), ("managerId", "")]);

	// Act
	let result = department_schema.validate(&raw);

	// Assert
	let errors: Vec<(&str, ErrorCode)> = result
		.errors()
		.iter()
		.map(|e| (e.field.as_str(), e.code))
		.collect();
	assert_eq!(
		errors,
		vec![("name", ErrorCode::TooShort), ("managerId", ErrorCode::Required)]
	);
}

#[rstest]
fn test_valid_department_is_cleaned(department_schema: FormSchema) {
	// Arrange
	let raw = RawFields::from_pairs([("name", "Alice"), ("managerId", "42")]);

	// Act
	let result = department_schema.validate(&raw);

	// Assert
	let cleaned = result.success().unwrap();
	assert_eq!(cleaned.get_str("name"), Some("Alice"));
	assert_eq!(cleaned.get_str("managerId"), Some("42"));
	assert_eq!(cleaned.len(), 2);
}

#[rstest]
#[tokio::test]
async fn test_context_is_pending_until_the_response_arrives(department_schema: FormSchema) {
	// Arrange
	let ctx = SubmissionContext::mount(&department_schema, RawFields::from_pairs([("name", "Sales")]));
	let (tx, rx) = oneshot::channel::<Vec<FieldError>>();
	let rx = RefCell::new(Some(rx));
	let transport = LoopbackTransport::new(|fields: RawFields| {
		let rx = rx.borrow_mut().take();
		async move {
			let errors = match rx {
				Some(rx) => rx.await.unwrap_or_default(),
				None => Vec::new(),
			};
			process_bad_request(errors, fields).into_response()
		}
	});
	assert_eq!(ctx.state(), SubmissionState::Idle);
	let mut seen_pending = false;

	// Act
	let (delivery, ()) = tokio::join!(
		submit(&ctx, &transport, RawFields::from_pairs([("name", "Al"), ("managerId", "7")])),
		async {
			tokio::task::yield_now().await;
			seen_pending = ctx.is_submitting();
			let _ = tx.send(vec![FieldError::new("name", ErrorCode::TooShort, "too short")]);
		}
	);

	// Assert
	assert!(seen_pending);
	assert_eq!(delivery, Ok(Delivery::Applied));
	assert!(!ctx.is_submitting());
	assert_eq!(ctx.errors_of("name"), vec!["too short"]);
	assert_eq!(ctx.value_of("name"), "Al");
	assert_eq!(ctx.state(), SubmissionState::IdleWithErrors);
}

#[rstest]
fn test_response_after_unmount_changes_nothing(department_schema: FormSchema) {
	// Arrange
	let ctx = SubmissionContext::mount(&department_schema, RawFields::new());
	let ticket = ctx.begin_submit().unwrap();

	// Act
	ctx.unmount();
	let delivery = ticket.complete(process_bad_request(
		vec![FieldError::new("name", ErrorCode::TooShort, "too short")],
		RawFields::from_pairs([("name", "Al")]),
	));

	// Assert
	assert_eq!(delivery, Delivery::Discarded);
}

#[rstest]
fn test_query_extraction_keeps_only_expected_names() {
	// Arrange
	let uri = "/employees?status=Active&page=2".parse().unwrap();

	// Act
	let fields = extract_query_fields(&uri, &["status"]);

	// Assert
	assert_eq!(fields, RawFields::from_pairs([("status", "Active")]));
}

#[rstest]
#[tokio::test]
async fn test_department_form_against_staff_handler() {
	// Arrange
	let (store, manager_id) = store_with_manager().await;
	let request_ctx = admin();
	let transport = LoopbackTransport::new(|fields: RawFields| {
		let store = &store;
		let request_ctx = &request_ctx;
		async move {
			let request = form_request(links::CREATE_DEPARTMENT, &fields);
			match actions::create_department(request_ctx, store, &request).await {
				Ok(outcome) => outcome.into_response(),
				Err(e) => Response::from(e),
			}
		}
	});
	let ctx = SubmissionContext::mount(&schemas::DEPARTMENT_CREATE, RawFields::new());
	let binder = FieldBinder::new(&ctx);

	// Act
	let rejected = submit(
		&ctx,
		&transport,
		RawFields::from_pairs([("name", "Al"), ("managerId", manager_id.as_str())]),
	)
	.await
	.unwrap();
	let name_after_rejection = binder.bind("name");
	let accepted = submit(
		&ctx,
		&transport,
		RawFields::from_pairs([("name", "Research"), ("managerId", manager_id.as_str())]),
	)
	.await
	.unwrap();

	// Assert
	assert_eq!(rejected, Delivery::Applied);
	assert_eq!(name_after_rejection.value, "Al");
	assert_eq!(name_after_rejection.label, "Name");
	assert!(name_after_rejection.has_errors());
	assert_eq!(accepted, Delivery::Applied);
	assert_eq!(ctx.state(), SubmissionState::IdleSuccess);
	assert!(binder.bind("name").errors.is_empty());
	let departments = store.departments(&Default::default()).await.unwrap();
	assert_eq!(departments.len(), 1);
	assert_eq!(departments[0].name, "Research");
}

#[rstest]
#[tokio::test]
async fn test_server_failure_keeps_previous_response(department_schema: FormSchema) {
	// Arrange
	let ctx = SubmissionContext::mount(&department_schema, RawFields::new());
	let rejecting = LoopbackTransport::new(|fields: RawFields| async move {
		process_bad_request(
			vec![FieldError::new("name", ErrorCode::TooShort, "too short")],
			fields,
		)
		.into_response()
	});
	let broken = LoopbackTransport::new(|_: RawFields| async { Response::internal_server_error() });
	submit(&ctx, &rejecting, RawFields::from_pairs([("name", "Al")]))
		.await
		.unwrap();

	// Act
	let result = submit(&ctx, &broken, RawFields::from_pairs([("name", "Alice")])).await;

	// Assert
	assert_eq!(
		result,
		Err(SubmitError::Transport(TransportError::Status(
			StatusCode::INTERNAL_SERVER_ERROR.as_u16()
		)))
	);
	assert!(!ctx.is_submitting());
	assert_eq!(ctx.value_of("name"), "Al");
	assert_eq!(ctx.errors_of("name"), vec!["too short"]);
	assert_eq!(
		ctx.form_error().as_deref(),
		Some("Unexpected response status 500")
	);
}

#[rstest]
#[tokio::test]
async fn test_login_form_shows_form_error() {
	// Arrange
	let store = MemoryStore::new();
	store.seed_admin("TestPass1234").await.unwrap();
	let anonymous = RequestContext::anonymous();
	let transport = LoopbackTransport::new(|fields: RawFields| {
		let store = &store;
		let anonymous = &anonymous;
		async move {
			let request = form_request(links::LOGIN, &fields);
			match actions::login(anonymous, store, &request).await {
				Ok(outcome) => outcome.into_response(),
				Err(e) => Response::from(e),
			}
		}
	});
	let ctx = SubmissionContext::mount(&schemas::LOGIN, RawFields::new());

	// Act
	submit(
		&ctx,
		&transport,
		RawFields::from_pairs([("username", ADMIN_USERNAME), ("password", "wrong")]),
	)
	.await
	.unwrap();

	// Assert
	assert_eq!(ctx.form_error().as_deref(), Some(actions::INVALID_CREDENTIALS));
	assert_eq!(ctx.value_of("username"), ADMIN_USERNAME);
	assert_eq!(ctx.value_of("password"), "");
}
