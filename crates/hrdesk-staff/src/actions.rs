//! Request handlers for staff records
//!
//! Every handler follows the same path: check the user, extract the raw
//! fields, validate them against the form's schema and only then touch the
//! store. A failed validation never reaches the store; it comes back as a
//! [`ActionOutcome::BadRequest`] echoing what was submitted.

use crate::auth::RequestContext;
use crate::error::{StaffError, StaffResult};
use crate::links;
use crate::models::User;
use crate::password::verify_password;
use crate::schemas::{
	self, Credentials, DepartmentChanges, DepartmentFilter, EmployeeChanges, EmployeeFilter,
	NewDepartment, NewEmployee,
};
use crate::store::{Entity, StaffStore};
use hrdesk_forms::{FieldError, FormSchema, RawFields};
use hrdesk_http::{
	HttpError, Request, Response, SubmissionResponse, bad_request, extract_query_fields,
	extract_request_fields, process_bad_request,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

pub const NO_EMPLOYEE_RECORD: &str = "No employee record found";
pub const NO_DEPARTMENT_RECORD: &str = "No department record found";
pub const EMPLOYEE_NOT_FOUND: &str = "Employee record not found";
pub const DEPARTMENT_NOT_FOUND: &str = "Department record not found";
pub const MANAGER_NOT_FOUND: &str = "Manager record not found";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

const EMPLOYEE_FILTER_PARAMS: &[&str] = &["status", "departmentId", "managerId", "q"];
const DEPARTMENT_FILTER_PARAMS: &[&str] = &["status", "managerId", "q"];

/// What a handler decided
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
	/// Go to another page
	Redirect(String),
	/// Data for the page
	Json(Value),
	/// The submission was rejected
	BadRequest(SubmissionResponse),
	/// Credentials checked out; the session layer signs `user` in
	SignedIn { user: User, redirect_to: String },
}

impl ActionOutcome {
	pub fn into_response(self) -> Response {
		match self {
			Self::Redirect(location) => Response::redirect(location),
			Self::Json(value) => Response::ok()
				.with_json(&value)
				.unwrap_or_else(Response::from),
			Self::BadRequest(submission) => bad_request(&submission),
			Self::SignedIn { redirect_to, .. } => Response::redirect(redirect_to),
		}
	}

	/// The submission, if this outcome is a rejection
	pub fn rejection(&self) -> Option<&SubmissionResponse> {
		match self {
			Self::BadRequest(submission) => Some(submission),
			_ => None,
		}
	}
}

impl From<ActionOutcome> for Response {
	fn from(outcome: ActionOutcome) -> Self {
		outcome.into_response()
	}
}

/// The record id from a path parameter
///
/// # Examples
///
/// ```
/// use hrdesk_staff::actions::validated_id;
///
/// assert_eq!(validated_id(Some(" 42 ")).unwrap(), "42");
/// assert!(validated_id(Some("")).is_err());
/// assert!(validated_id(None).is_err());
/// ```
pub fn validated_id(param: Option<&str>) -> StaffResult<String> {
	match param.map(str::trim) {
		Some(id) if !id.is_empty() => Ok(id.to_string()),
		_ => Err(StaffError::InvalidId),
	}
}

fn validate_into<T: DeserializeOwned>(
	schema: &FormSchema,
	fields: &RawFields,
) -> StaffResult<Result<T, Vec<FieldError>>> {
	Ok(schema.validate(fields).deserialize::<T>()?.into_result())
}

fn rejected(schema: &FormSchema, errors: Vec<FieldError>, fields: RawFields) -> ActionOutcome {
	tracing::warn!(form = %schema.name(), error_count = errors.len(), "submission rejected");
	ActionOutcome::BadRequest(process_bad_request(errors, fields))
}

fn form_error(form: &str, message: &str, fields: RawFields) -> ActionOutcome {
	tracing::warn!(form = %form, message = %message, "submission rejected");
	ActionOutcome::BadRequest(SubmissionResponse::rejected(message, fields))
}

fn json_outcome<T: Serialize>(data: &T) -> StaffResult<ActionOutcome> {
	let value = serde_json::to_value(data).map_err(HttpError::from)?;
	Ok(ActionOutcome::Json(value))
}

async fn submitted_fields(ctx: &RequestContext, request: &Request) -> StaffResult<RawFields> {
	Ok(extract_request_fields(request, ctx.extract_options()).await?)
}

// A blank filter value means "no filter"
fn query_filter<T: DeserializeOwned>(
	schema: &FormSchema,
	request: &Request,
	params: &[&str],
) -> StaffResult<T> {
	let query: RawFields = extract_query_fields(&request.uri, params)
		.into_iter()
		.filter(|(_, value)| !value.as_str().trim().is_empty())
		.collect();
	match validate_into(schema, &query)? {
		Ok(filter) => Ok(filter),
		Err(errors) => {
			tracing::warn!(form = %schema.name(), error_count = errors.len(), "invalid list filter");
			Err(StaffError::InvalidFilter)
		}
	}
}

pub async fn create_employee<S: StaffStore + ?Sized>(
	ctx: &RequestContext,
	store: &S,
	request: &Request,
) -> StaffResult<ActionOutcome> {
	ctx.require_user()?;
	let fields = submitted_fields(ctx, request).await?;
	let employee: NewEmployee = match validate_into(&schemas::EMPLOYEE_CREATE, &fields)? {
		Ok(employee) => employee,
		Err(errors) => return Ok(rejected(&schemas::EMPLOYEE_CREATE, errors, fields)),
	};

	match store.create_employee(employee).await {
		Ok(id) => {
			tracing::debug!(employee_id = %id, "employee created");
			Ok(ActionOutcome::Redirect(links::EMPLOYEES.to_string()))
		}
		Err(e) if e.is_missing(Entity::Manager) => {
			Ok(form_error(schemas::EMPLOYEE_CREATE.name(), MANAGER_NOT_FOUND, fields))
		}
		Err(e) => Err(e.into()),
	}
}

pub async fn update_employee<S: StaffStore + ?Sized>(
	ctx: &RequestContext,
	store: &S,
	request: &Request,
) -> StaffResult<ActionOutcome> {
	ctx.require_user()?;
	let id = validated_id(request.path_param("id"))?;
	let fields = submitted_fields(ctx, request).await?;
	let changes: EmployeeChanges = match validate_into(&schemas::EMPLOYEE_EDIT, &fields)? {
		Ok(changes) => changes,
		Err(errors) => return Ok(rejected(&schemas::EMPLOYEE_EDIT, errors, fields)),
	};

	match store.update_employee(&id, changes).await {
		Ok(()) => {
			tracing::debug!(employee_id = %id, "employee updated");
			Ok(ActionOutcome::Redirect(links::EMPLOYEES.to_string()))
		}
		Err(e) if e.is_missing(Entity::Employee) => {
			Ok(form_error(schemas::EMPLOYEE_EDIT.name(), NO_EMPLOYEE_RECORD, fields))
		}
		Err(e) if e.is_missing(Entity::Manager) => {
			Ok(form_error(schemas::EMPLOYEE_EDIT.name(), MANAGER_NOT_FOUND, fields))
		}
		Err(e) => Err(e.into()),
	}
}

pub async fn toggle_employee_status<S: StaffStore + ?Sized>(
	ctx: &RequestContext,
	store: &S,
	request: &Request,
) -> StaffResult<ActionOutcome> {
	ctx.require_user()?;
	let fields = submitted_fields(ctx, request).await?;
	let cleaned = match schemas::EMPLOYEE_TOGGLE.validate(&fields).into_result() {
		Ok(cleaned) => cleaned,
		Err(errors) => return Ok(rejected(&schemas::EMPLOYEE_TOGGLE, errors, fields)),
	};
	let id = cleaned.get_str("employeeId").unwrap_or_default();

	match store.toggle_employee_status(id).await {
		Ok(status) => json_outcome(&json!({ "success": true, "status": status })),
		Err(e) if e.is_missing(Entity::Employee) => Ok(form_error(
			schemas::EMPLOYEE_TOGGLE.name(),
			EMPLOYEE_NOT_FOUND,
			fields,
		)),
		Err(e) => Err(e.into()),
	}
}

/// Employees matching the query filter, plus the data the filter inputs need
pub async fn list_employees<S: StaffStore + ?Sized>(
	ctx: &RequestContext,
	store: &S,
	request: &Request,
) -> StaffResult<ActionOutcome> {
	ctx.require_user()?;
	let filter: EmployeeFilter =
		query_filter(&schemas::EMPLOYEE_FILTER, request, EMPLOYEE_FILTER_PARAMS)?;

	let all_departments = DepartmentFilter::default();
	let (employees, departments, managers) = tokio::try_join!(
		store.employees(&filter),
		store.departments(&all_departments),
		store.managers(),
	)?;
	json_outcome(&json!({
		"employees": employees,
		"departments": departments,
		"managers": managers,
	}))
}

/// Current values of an employee for the edit form
pub async fn load_employee_form<S: StaffStore + ?Sized>(
	ctx: &RequestContext,
	store: &S,
	request: &Request,
) -> StaffResult<ActionOutcome> {
	ctx.require_user()?;
	let id = validated_id(request.path_param("id"))?;
	let (employee, managers) = tokio::try_join!(store.employee(&id), store.managers())?;
	let employee = employee.ok_or(StaffError::NotFound(EMPLOYEE_NOT_FOUND))?;

	let fields = RawFields::from_pairs([
		("firstName", employee.first_name.as_str()),
		("lastName", employee.last_name.as_str()),
		("phone", employee.phone.as_str()),
		("email", employee.email.as_str()),
		("managerId", employee.manager_id.as_deref().unwrap_or("")),
		("status", employee.status.as_str()),
	]);
	json_outcome(&json!({ "fields": fields, "managers": managers }))
}

pub async fn create_department<S: StaffStore + ?Sized>(
	ctx: &RequestContext,
	store: &S,
	request: &Request,
) -> StaffResult<ActionOutcome> {
	ctx.require_user()?;
	let fields = submitted_fields(ctx, request).await?;
	let department: NewDepartment = match validate_into(&schemas::DEPARTMENT_CREATE, &fields)? {
		Ok(department) => department,
		Err(errors) => return Ok(rejected(&schemas::DEPARTMENT_CREATE, errors, fields)),
	};

	match store.create_department(department).await {
		Ok(id) => {
			tracing::debug!(department_id = %id, "department created");
			Ok(ActionOutcome::Redirect(links::DEPARTMENTS.to_string()))
		}
		Err(e) if e.is_missing(Entity::Manager) => {
			Ok(form_error(schemas::DEPARTMENT_CREATE.name(), MANAGER_NOT_FOUND, fields))
		}
		Err(e) => Err(e.into()),
	}
}

pub async fn update_department<S: StaffStore + ?Sized>(
	ctx: &RequestContext,
	store: &S,
	request: &Request,
) -> StaffResult<ActionOutcome> {
	ctx.require_user()?;
	let id = validated_id(request.path_param("id"))?;
	let fields = submitted_fields(ctx, request).await?;
	let changes: DepartmentChanges = match validate_into(&schemas::DEPARTMENT_EDIT, &fields)? {
		Ok(changes) => changes,
		Err(errors) => return Ok(rejected(&schemas::DEPARTMENT_EDIT, errors, fields)),
	};

	match store.update_department(&id, changes).await {
		Ok(()) => {
			tracing::debug!(department_id = %id, "department updated");
			Ok(ActionOutcome::Redirect(links::DEPARTMENTS.to_string()))
		}
		Err(e) if e.is_missing(Entity::Department) => Ok(form_error(
			schemas::DEPARTMENT_EDIT.name(),
			NO_DEPARTMENT_RECORD,
			fields,
		)),
		Err(e) if e.is_missing(Entity::Manager) => {
			Ok(form_error(schemas::DEPARTMENT_EDIT.name(), MANAGER_NOT_FOUND, fields))
		}
		Err(e) => Err(e.into()),
	}
}

pub async fn toggle_department_status<S: StaffStore + ?Sized>(
	ctx: &RequestContext,
	store: &S,
	request: &Request,
) -> StaffResult<ActionOutcome> {
	ctx.require_user()?;
	let fields = submitted_fields(ctx, request).await?;
	let cleaned = match schemas::DEPARTMENT_TOGGLE.validate(&fields).into_result() {
		Ok(cleaned) => cleaned,
		Err(errors) => return Ok(rejected(&schemas::DEPARTMENT_TOGGLE, errors, fields)),
	};
	let id = cleaned.get_str("departmentId").unwrap_or_default();

	match store.toggle_department_status(id).await {
		Ok(status) => json_outcome(&json!({ "success": true, "status": status })),
		Err(e) if e.is_missing(Entity::Department) => Ok(form_error(
			schemas::DEPARTMENT_TOGGLE.name(),
			DEPARTMENT_NOT_FOUND,
			fields,
		)),
		Err(e) => Err(e.into()),
	}
}

pub async fn list_departments<S: StaffStore + ?Sized>(
	ctx: &RequestContext,
	store: &S,
	request: &Request,
) -> StaffResult<ActionOutcome> {
	ctx.require_user()?;
	let filter: DepartmentFilter =
		query_filter(&schemas::DEPARTMENT_FILTER, request, DEPARTMENT_FILTER_PARAMS)?;
	let departments = store.departments(&filter).await?;
	json_outcome(&json!({ "departments": departments }))
}

/// Current values of a department for the edit form
pub async fn load_department_form<S: StaffStore + ?Sized>(
	ctx: &RequestContext,
	store: &S,
	request: &Request,
) -> StaffResult<ActionOutcome> {
	ctx.require_user()?;
	let id = validated_id(request.path_param("id"))?;
	let (department, managers) = tokio::try_join!(store.department(&id), store.managers())?;
	let department = department.ok_or(StaffError::NotFound(DEPARTMENT_NOT_FOUND))?;

	let fields = RawFields::from_pairs([
		("name", department.name.as_str()),
		("managerId", department.manager_id.as_str()),
		("status", department.status.as_str()),
	]);
	json_outcome(&json!({ "fields": fields, "managers": managers }))
}

/// Managers to choose from on the create forms
pub async fn list_managers<S: StaffStore + ?Sized>(
	ctx: &RequestContext,
	store: &S,
) -> StaffResult<ActionOutcome> {
	ctx.require_user()?;
	let managers = store.managers().await?;
	json_outcome(&json!({ "managers": managers }))
}

/// Check credentials
///
/// The password is never echoed back, whatever the outcome.
pub async fn login<S: StaffStore + ?Sized>(
	ctx: &RequestContext,
	store: &S,
	request: &Request,
) -> StaffResult<ActionOutcome> {
	let fields = submitted_fields(ctx, request).await?;
	let mut echoed = fields.clone();
	echoed.remove("password");

	let credentials: Credentials = match validate_into(&schemas::LOGIN, &fields)? {
		Ok(credentials) => credentials,
		Err(errors) => return Ok(rejected(&schemas::LOGIN, errors, echoed)),
	};

	let Some(stored) = store.find_login(&credentials.username).await? else {
		return Ok(form_error(schemas::LOGIN.name(), INVALID_CREDENTIALS, echoed));
	};

	let hash = stored.password_hash;
	let password = credentials.password;
	let verified = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
		.await
		.map_err(|e| StaffError::PasswordHash(e.to_string()))?;
	if !verified {
		return Ok(form_error(schemas::LOGIN.name(), INVALID_CREDENTIALS, echoed));
	}

	tracing::debug!(user_id = %stored.user.id, "signed in");
	Ok(ActionOutcome::SignedIn {
		user: stored.user,
		redirect_to: links::EMPLOYEES.to_string(),
	})
}
