//! Handler flows against the in-memory store

use hrdesk_forms::ErrorCode;
use hrdesk_http::{Method, Request, Response, StatusCode};
use hrdesk_staff::actions::{
	self, DEPARTMENT_NOT_FOUND, EMPLOYEE_NOT_FOUND, INVALID_CREDENTIALS, MANAGER_NOT_FOUND,
	NO_DEPARTMENT_RECORD, NO_EMPLOYEE_RECORD,
};
use hrdesk_staff::schemas::{EMPLOYEE_CREATE, NewDepartment, NewEmployee};
use hrdesk_staff::{
	ADMIN_USERNAME, ActionOutcome, INVALID_FILTER_MESSAGE, MemoryStore, RecordStatus,
	RequestContext, StaffError, StaffStore, User, links,
};
use rstest::{fixture, rstest};
use serde_json::Value;

const FORM: &str = "application/x-www-form-urlencoded";

fn post(uri: &str, body: &str) -> Request {
	Request::builder()
		.method(Method::POST)
		.uri(uri)
		.header("content-type", FORM)
		.body(body.to_string())
		.build()
		.unwrap()
}

fn post_with_id(uri: &str, id: &str, body: &str) -> Request {
	let mut request = post(uri, body);
	request.set_path_param("id", id);
	request
}

fn get(uri: &str) -> Request {
	Request::builder().uri(uri).build().unwrap()
}

#[fixture]
fn ctx() -> RequestContext {
	RequestContext::authenticated(User {
		id: "u-1".to_string(),
		username: ADMIN_USERNAME.to_string(),
	})
}

struct Seeded {
	store: MemoryStore,
	manager_id: String,
	employee_id: String,
}

async fn seeded() -> Seeded {
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
	let employee_id = store
		.create_employee(NewEmployee {
			first_name: "Jane".to_string(),
			last_name: "Doe".to_string(),
			phone: "5550100".to_string(),
			email: "jane@example.com".to_string(),
			manager_id: manager_id.clone(),
		})
		.await
		.unwrap();
	Seeded {
		store,
		manager_id,
		employee_id,
	}
}

fn json_of(outcome: ActionOutcome) -> Value {
	match outcome {
		ActionOutcome::Json(value) => value,
		other => panic!("expected JSON, got {:?}", other),
	}
}

#[rstest]
#[tokio::test]
async fn test_create_employee_redirects_to_listing(ctx: RequestContext) {
	// Arrange
	let seeded = seeded().await;
	let body = format!(
		"firstName=Alan&lastName=Turing&phone=5550199&email=alan%40example.com&managerId={}",
		seeded.manager_id
	);

	// Act
	let outcome = actions::create_employee(&ctx, &seeded.store, &post(links::CREATE_EMPLOYEE, &body))
		.await
		.unwrap();

	// Assert
	assert_eq!(outcome, ActionOutcome::Redirect(links::EMPLOYEES.to_string()));
	let rows = seeded.store.employees(&Default::default()).await.unwrap();
	assert!(rows.iter().any(|r| r.email == "alan@example.com" && r.manager == "Grace Hopper"));
}

#[rstest]
#[tokio::test]
async fn test_invalid_employee_echoes_fields_and_skips_store(ctx: RequestContext) {
	// Arrange
	let seeded = seeded().await;
	let before = seeded.store.employees(&Default::default()).await.unwrap().len();
	let request = post(
		links::CREATE_EMPLOYEE,
		"firstName=Al&lastName=Turing&phone=12&email=nope&managerId=&extra=kept",
	);

	// Act
	let outcome = actions::create_employee(&ctx, &seeded.store, &request)
		.await
		.unwrap();

	// Assert
	let rejection = outcome.rejection().unwrap();
	assert_eq!(rejection.fields.value_of("firstName"), "Al");
	assert_eq!(rejection.fields.value_of("extra"), "kept");
	assert!(rejection.form_error.is_none());
	let errors = rejection.field_errors.as_ref().unwrap();
	let names: Vec<&str> = errors.keys().map(String::as_str).collect();
	assert_eq!(names, vec!["email", "firstName", "managerId", "phone"]);
	assert!(names.iter().all(|n| EMPLOYEE_CREATE.contains(n)));
	let after = seeded.store.employees(&Default::default()).await.unwrap().len();
	assert_eq!(before, after);
}

#[rstest]
#[tokio::test]
async fn test_anonymous_request_is_sent_to_login() {
	// Arrange
	let seeded = seeded().await;

	// Act
	let error = actions::create_employee(
		&RequestContext::anonymous(),
		&seeded.store,
		&post(links::CREATE_EMPLOYEE, "firstName=Alan"),
	)
	.await
	.unwrap_err();

	// Assert
	let response = Response::from(error);
	assert_eq!(response.status, StatusCode::FOUND);
	assert_eq!(response.location(), Some(links::LOGIN));
}

#[rstest]
#[tokio::test]
async fn test_update_employee_is_idempotent(ctx: RequestContext) {
	// Arrange
	let seeded = seeded().await;
	let body = format!(
		"firstName=Janet&lastName=Doe&phone=5550101&email=janet%40example.com&managerId={}&status=Inactive",
		seeded.manager_id
	);
	let request = post_with_id(&links::edit_employee(&seeded.employee_id), &seeded.employee_id, &body);

	// Act
	actions::update_employee(&ctx, &seeded.store, &request)
		.await
		.unwrap();
	let once = seeded.store.employee(&seeded.employee_id).await.unwrap();
	let outcome = actions::update_employee(&ctx, &seeded.store, &request)
		.await
		.unwrap();
	let twice = seeded.store.employee(&seeded.employee_id).await.unwrap();

	// Assert
	assert_eq!(outcome, ActionOutcome::Redirect(links::EMPLOYEES.to_string()));
	assert_eq!(once, twice);
	let employee = twice.unwrap();
	assert_eq!(employee.first_name, "Janet");
	assert_eq!(employee.status, RecordStatus::Inactive);
}

#[rstest]
#[tokio::test]
async fn test_update_missing_employee_is_a_form_error(ctx: RequestContext) {
	// Arrange
	let seeded = seeded().await;
	let body = format!(
		"firstName=Janet&lastName=Doe&phone=5550101&email=janet%40example.com&managerId={}&status=Active",
		seeded.manager_id
	);

	// Act
	let outcome = actions::update_employee(&ctx, &seeded.store, &post_with_id("/employees/gone/edit", "gone", &body))
		.await
		.unwrap();

	// Assert
	let rejection = outcome.rejection().unwrap();
	assert_eq!(rejection.form_error.as_deref(), Some(NO_EMPLOYEE_RECORD));
	assert!(rejection.field_errors.is_none());
	assert_eq!(rejection.fields.value_of("firstName"), "Janet");
}

#[rstest]
#[tokio::test]
async fn test_update_with_blank_id_is_rejected(ctx: RequestContext) {
	// Arrange
	let seeded = seeded().await;

	// Act
	let error = actions::update_employee(&ctx, &seeded.store, &post_with_id("/employees//edit", " ", ""))
		.await
		.unwrap_err();

	// Assert
	assert!(matches!(error, StaffError::InvalidId));
	assert_eq!(Response::from(error).status, StatusCode::BAD_REQUEST);
}

#[rstest]
#[tokio::test]
async fn test_toggle_employee_status(ctx: RequestContext) {
	// Arrange
	let seeded = seeded().await;
	let body = format!("employeeId={}", seeded.employee_id);

	// Act
	let value = json_of(
		actions::toggle_employee_status(&ctx, &seeded.store, &post(links::EMPLOYEES, &body))
			.await
			.unwrap(),
	);

	// Assert
	assert_eq!(value["success"], true);
	assert_eq!(value["status"], "Inactive");
}

#[rstest]
#[tokio::test]
async fn test_toggle_unknown_employee_is_a_form_error(ctx: RequestContext) {
	// Arrange
	let seeded = seeded().await;

	// Act
	let outcome = actions::toggle_employee_status(&ctx, &seeded.store, &post(links::EMPLOYEES, "employeeId=gone"))
		.await
		.unwrap();

	// Assert
	let response = outcome.into_response();
	assert_eq!(response.status, StatusCode::BAD_REQUEST);
	let body: Value = response.json().unwrap();
	assert_eq!(body["formError"], EMPLOYEE_NOT_FOUND);
}

#[rstest]
#[tokio::test]
async fn test_toggle_without_id_reports_field_error(ctx: RequestContext) {
	// Arrange
	let seeded = seeded().await;

	// Act
	let outcome = actions::toggle_employee_status(&ctx, &seeded.store, &post(links::EMPLOYEES, ""))
		.await
		.unwrap();

	// Assert
	let rejection = outcome.rejection().unwrap();
	assert_eq!(rejection.errors_of("employeeId").len(), 1);
}

#[rstest]
#[tokio::test]
async fn test_list_employees_ignores_unlisted_query_params(ctx: RequestContext) {
	// Arrange
	let seeded = seeded().await;

	// Act
	let value = json_of(
		actions::list_employees(&ctx, &seeded.store, &get("/employees?status=Active&page=2"))
			.await
			.unwrap(),
	);

	// Assert
	assert_eq!(value["employees"].as_array().unwrap().len(), 2);
	assert_eq!(value["managers"][0]["name"], "Grace Hopper");
	assert!(value["departments"].as_array().unwrap().is_empty());
}

#[rstest]
#[case("/employees?status=Retired")]
#[case("/employees?status=active")]
#[tokio::test]
async fn test_list_employees_rejects_bad_filter(ctx: RequestContext, #[case] uri: &str) {
	// Arrange
	let seeded = seeded().await;

	// Act
	let error = actions::list_employees(&ctx, &seeded.store, &get(uri))
		.await
		.unwrap_err();

	// Assert
	let response = Response::from(error);
	assert_eq!(response.status, StatusCode::BAD_REQUEST);
	assert_eq!(&response.body[..], INVALID_FILTER_MESSAGE.as_bytes());
}

#[rstest]
#[tokio::test]
async fn test_load_employee_form(ctx: RequestContext) {
	// Arrange
	let seeded = seeded().await;
	let request = post_with_id("/employees/x/edit", &seeded.employee_id, "");

	// Act
	let value = json_of(
		actions::load_employee_form(&ctx, &seeded.store, &request)
			.await
			.unwrap(),
	);

	// Assert
	assert_eq!(value["fields"]["firstName"], "Jane");
	assert_eq!(value["fields"]["managerId"], seeded.manager_id.as_str());
	assert_eq!(value["fields"]["status"], "Active");
}

#[rstest]
#[tokio::test]
async fn test_load_missing_employee_is_not_found(ctx: RequestContext) {
	// Arrange
	let seeded = seeded().await;

	// Act
	let error = actions::load_employee_form(&ctx, &seeded.store, &post_with_id("/employees/gone/edit", "gone", ""))
		.await
		.unwrap_err();

	// Assert
	let response = Response::from(error);
	assert_eq!(response.status, StatusCode::NOT_FOUND);
	assert_eq!(&response.body[..], EMPLOYEE_NOT_FOUND.as_bytes());
}

#[rstest]
#[tokio::test]
async fn test_department_lifecycle(ctx: RequestContext) {
	// Arrange
	let seeded = seeded().await;
	let create = post(
		links::CREATE_DEPARTMENT,
		&format!("name=Research&managerId={}", seeded.manager_id),
	);

	// Act
	let created = actions::create_department(&ctx, &seeded.store, &create)
		.await
		.unwrap();
	let listed = json_of(
		actions::list_departments(&ctx, &seeded.store, &get("/departments?status=Active"))
			.await
			.unwrap(),
	);
	let id = listed["departments"][0]["id"].as_str().unwrap().to_string();
	let toggled = json_of(
		actions::toggle_department_status(
			&ctx,
			&seeded.store,
			&post(links::DEPARTMENTS, &format!("departmentId={}", id)),
		)
		.await
		.unwrap(),
	);
	let updated = actions::update_department(
		&ctx,
		&seeded.store,
		&post_with_id(
			&links::edit_department(&id),
			&id,
			&format!("name=R%26D&managerId={}&status=Active", seeded.manager_id),
		),
	)
	.await
	.unwrap();

	// Assert
	assert_eq!(created, ActionOutcome::Redirect(links::DEPARTMENTS.to_string()));
	assert_eq!(listed["departments"][0]["manager"], "Grace Hopper");
	assert_eq!(toggled["status"], "Inactive");
	assert_eq!(updated, ActionOutcome::Redirect(links::DEPARTMENTS.to_string()));
	let department = seeded.store.department(&id).await.unwrap().unwrap();
	assert_eq!(department.name, "R&D");
	assert_eq!(department.status, RecordStatus::Active);
}

#[rstest]
#[tokio::test]
async fn test_department_name_too_short(ctx: RequestContext) {
	// Arrange
	let seeded = seeded().await;
	let request = post(
		links::CREATE_DEPARTMENT,
		&format!("name=Al&managerId={}", seeded.manager_id),
	);

	// Act
	let outcome = actions::create_department(&ctx, &seeded.store, &request)
		.await
		.unwrap();

	// Assert
	let rejection = outcome.rejection().unwrap();
	assert_eq!(rejection.fields.value_of("name"), "Al");
	assert_eq!(rejection.errors_of("name").len(), 1);
	assert!(rejection.errors_of("managerId").is_empty());
}

#[rstest]
#[tokio::test]
async fn test_department_status_must_be_known(ctx: RequestContext) {
	// Arrange
	let seeded = seeded().await;
	let request = post_with_id(
		"/departments/x/edit",
		"x",
		&format!("name=Sales&managerId={}&status=Closed", seeded.manager_id),
	);

	// Act
	let outcome = actions::update_department(&ctx, &seeded.store, &request)
		.await
		.unwrap();

	// Assert
	let schema_errors = hrdesk_staff::schemas::DEPARTMENT_EDIT.validate(&outcome.rejection().unwrap().fields);
	assert_eq!(schema_errors.errors()[0].code, ErrorCode::InvalidChoice);
}

#[rstest]
#[tokio::test]
async fn test_missing_department_messages(ctx: RequestContext) {
	// Arrange
	let seeded = seeded().await;
	let update = post_with_id(
		"/departments/gone/edit",
		"gone",
		&format!("name=Sales&managerId={}&status=Active", seeded.manager_id),
	);

	// Act
	let updated = actions::update_department(&ctx, &seeded.store, &update)
		.await
		.unwrap();
	let toggled = actions::toggle_department_status(&ctx, &seeded.store, &post(links::DEPARTMENTS, "departmentId=gone"))
		.await
		.unwrap();
	let loaded = actions::load_department_form(&ctx, &seeded.store, &post_with_id("/departments/gone/edit", "gone", ""))
		.await
		.unwrap_err();

	// Assert
	assert_eq!(
		updated.rejection().unwrap().form_error.as_deref(),
		Some(NO_DEPARTMENT_RECORD)
	);
	assert_eq!(
		toggled.rejection().unwrap().form_error.as_deref(),
		Some(DEPARTMENT_NOT_FOUND)
	);
	assert_eq!(&Response::from(loaded).body[..], DEPARTMENT_NOT_FOUND.as_bytes());
}

#[rstest]
#[tokio::test]
async fn test_list_managers(ctx: RequestContext) {
	// Arrange
	let seeded = seeded().await;

	// Act
	let value = json_of(actions::list_managers(&ctx, &seeded.store).await.unwrap());

	// Assert
	assert_eq!(value["managers"][0]["id"], seeded.manager_id.as_str());
}

#[rstest]
#[tokio::test]
async fn test_login_flow() {
	// Arrange
	let store = MemoryStore::new();
	let admin = store.seed_admin("TestPass1234").await.unwrap();
	let ctx = RequestContext::anonymous();

	// Act
	let good = actions::login(
		&ctx,
		&store,
		&post(links::LOGIN, "username=hradmin%40test.com&password=TestPass1234"),
	)
	.await
	.unwrap();
	let bad = actions::login(
		&ctx,
		&store,
		&post(links::LOGIN, "username=hradmin%40test.com&password=wrong"),
	)
	.await
	.unwrap();

	// Assert
	assert_eq!(
		good,
		ActionOutcome::SignedIn {
			user: admin,
			redirect_to: links::EMPLOYEES.to_string(),
		}
	);
	let rejection = bad.rejection().unwrap();
	assert_eq!(rejection.form_error.as_deref(), Some(INVALID_CREDENTIALS));
	assert_eq!(rejection.fields.value_of("username"), ADMIN_USERNAME);
	assert!(!rejection.fields.contains("password"));
}

#[rstest]
#[tokio::test]
async fn test_login_requires_username() {
	// Arrange
	let store = MemoryStore::new();

	// Act
	let outcome = actions::login(
		&RequestContext::anonymous(),
		&store,
		&post(links::LOGIN, "username=&password=secret"),
	)
	.await
	.unwrap();

	// Assert
	let rejection = outcome.rejection().unwrap();
	assert_eq!(rejection.errors_of("username").len(), 1);
	assert!(rejection.errors_of("password").is_empty());
	assert!(!rejection.fields.contains("password"));
}

#[rstest]
#[tokio::test]
async fn test_unsupported_body_maps_to_415(ctx: RequestContext) {
	// Arrange
	let seeded = seeded().await;
	let request = Request::builder()
		.method(Method::POST)
		.uri(links::CREATE_DEPARTMENT)
		.header("content-type", "text/plain")
		.body("name=Sales")
		.build()
		.unwrap();

	// Act
	let error = actions::create_department(&ctx, &seeded.store, &request)
		.await
		.unwrap_err();

	// Assert
	assert_eq!(Response::from(error).status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[rstest]
#[tokio::test]
async fn test_create_with_unknown_manager_is_a_form_error(ctx: RequestContext) {
	// Arrange
	let seeded = seeded().await;
	let employee = post(
		links::CREATE_EMPLOYEE,
		"firstName=Alan&lastName=Turing&phone=5550199&email=alan%40example.com&managerId=ghost",
	);
	let department = post(links::CREATE_DEPARTMENT, "name=Research&managerId=ghost");

	// Act
	let employee_outcome = actions::create_employee(&ctx, &seeded.store, &employee)
		.await
		.unwrap();
	let department_outcome = actions::create_department(&ctx, &seeded.store, &department)
		.await
		.unwrap();

	// Assert
	for outcome in [employee_outcome, department_outcome] {
		let rejection = outcome.rejection().unwrap();
		assert_eq!(rejection.form_error.as_deref(), Some(MANAGER_NOT_FOUND));
		assert_eq!(rejection.fields.value_of("managerId"), "ghost");
		assert_eq!(outcome.into_response().status, StatusCode::BAD_REQUEST);
	}
	assert_eq!(seeded.store.employees(&Default::default()).await.unwrap().len(), 2);
	assert!(seeded.store.departments(&Default::default()).await.unwrap().is_empty());
}

#[rstest]
#[tokio::test]
async fn test_update_with_unknown_manager_is_a_form_error(ctx: RequestContext) {
	// Arrange
	let seeded = seeded().await;
	let department_id = seeded
		.store
		.create_department(NewDepartment {
			name: "Sales".to_string(),
			manager_id: seeded.manager_id.clone(),
		})
		.await
		.unwrap();
	let employee = post_with_id(
		&links::edit_employee(&seeded.employee_id),
		&seeded.employee_id,
		"firstName=Janet&lastName=Doe&phone=5550101&email=janet%40example.com&managerId=ghost&status=Active",
	);
	let department = post_with_id(
		&links::edit_department(&department_id),
		&department_id,
		"name=Marketing&managerId=ghost&status=Active",
	);

	// Act
	let employee_outcome = actions::update_employee(&ctx, &seeded.store, &employee)
		.await
		.unwrap();
	let department_outcome = actions::update_department(&ctx, &seeded.store, &department)
		.await
		.unwrap();

	// Assert
	assert_eq!(
		employee_outcome.rejection().unwrap().form_error.as_deref(),
		Some(MANAGER_NOT_FOUND)
	);
	assert_eq!(
		department_outcome.rejection().unwrap().form_error.as_deref(),
		Some(MANAGER_NOT_FOUND)
	);
	let unchanged = seeded.store.employee(&seeded.employee_id).await.unwrap().unwrap();
	assert_eq!(unchanged.first_name, "Jane");
	let department = seeded.store.department(&department_id).await.unwrap().unwrap();
	assert_eq!(department.name, "Sales");
}

#[rstest]
#[case("/employees?q=jane%20doe", vec!["Jane"])]
#[case("/employees?q=HOPPER", vec!["Grace", "Jane"])]
#[case("/employees?q=active", vec!["Grace", "Jane"])]
#[case("/employees?q=nobody", vec![])]
#[case("/employees?q=", vec!["Grace", "Jane"])]
#[tokio::test]
async fn test_list_employees_search(
	ctx: RequestContext,
	#[case] uri: &str,
	#[case] expected: Vec<&str>,
) {
	// Arrange
	let seeded = seeded().await;

	// Act
	let value = json_of(
		actions::list_employees(&ctx, &seeded.store, &get(uri))
			.await
			.unwrap(),
	);

	// Assert
	let names: Vec<&str> = value["employees"]
		.as_array()
		.unwrap()
		.iter()
		.map(|row| row["firstName"].as_str().unwrap())
		.collect();
	assert_eq!(names, expected);
}

#[rstest]
#[tokio::test]
async fn test_list_departments_search(ctx: RequestContext) {
	// Arrange
	let seeded = seeded().await;
	for name in ["Sales", "Research"] {
		seeded
			.store
			.create_department(NewDepartment {
				name: name.to_string(),
				manager_id: seeded.manager_id.clone(),
			})
			.await
			.unwrap();
	}

	// Act
	let by_name = json_of(
		actions::list_departments(&ctx, &seeded.store, &get("/departments?q=sea"))
			.await
			.unwrap(),
	);
	let by_manager = json_of(
		actions::list_departments(&ctx, &seeded.store, &get("/departments?q=grace"))
			.await
			.unwrap(),
	);

	// Assert
	let departments = by_name["departments"].as_array().unwrap();
	assert_eq!(departments.len(), 1);
	assert_eq!(departments[0]["name"], "Research");
	assert_eq!(by_manager["departments"].as_array().unwrap().len(), 2);
}
