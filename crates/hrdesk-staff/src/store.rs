//! Storage for staff records
//!
//! Handlers only talk to [`StaffStore`], and only after validation
//! succeeded. [`MemoryStore`] backs tests and local runs.

use crate::error::{StaffError, StaffResult};
use crate::models::{
	Department, DepartmentRow, Employee, EmployeeRow, Manager, ManagerOption, RecordStatus, User,
};
use crate::password::hash_password;
use crate::schemas::{
	DepartmentChanges, DepartmentFilter, EmployeeChanges, EmployeeFilter, NewDepartment,
	NewEmployee,
};
use async_trait::async_trait;
use std::fmt;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Username of the seeded administrator account
pub const ADMIN_USERNAME: &str = "hradmin@test.com";

/// Kind of record a store operation refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
	Employee,
	Department,
	Manager,
}

impl fmt::Display for Entity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Employee => "employee",
			Self::Department => "department",
			Self::Manager => "manager",
		})
	}
}

/// Storage errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
	#[error("No {entity} with id '{id}'")]
	NotFound { entity: Entity, id: String },

	#[error("Storage error: {0}")]
	Backend(String),
}

impl StoreError {
	fn not_found(entity: Entity, id: &str) -> Self {
		Self::NotFound {
			entity,
			id: id.to_string(),
		}
	}

	/// True when `entity` itself was missing
	pub fn is_missing(&self, entity: Entity) -> bool {
		matches!(self, Self::NotFound { entity: e, .. } if *e == entity)
	}
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// A user together with their password hash
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredLogin {
	pub user: User,
	pub password_hash: String,
}

/// Persistence for staff records
#[async_trait]
pub trait StaffStore: Send + Sync {
	/// Insert an active employee, returning its id
	async fn create_employee(&self, employee: NewEmployee) -> StoreResult<String>;

	async fn employee(&self, id: &str) -> StoreResult<Option<Employee>>;

	/// Overwrite an employee's fields and manager
	async fn update_employee(&self, id: &str, changes: EmployeeChanges) -> StoreResult<()>;

	/// Flip the status, returning the new one
	async fn toggle_employee_status(&self, id: &str) -> StoreResult<RecordStatus>;

	async fn employees(&self, filter: &EmployeeFilter) -> StoreResult<Vec<EmployeeRow>>;

	/// Insert an active department, returning its id
	async fn create_department(&self, department: NewDepartment) -> StoreResult<String>;

	async fn department(&self, id: &str) -> StoreResult<Option<Department>>;

	async fn update_department(&self, id: &str, changes: DepartmentChanges) -> StoreResult<()>;

	async fn toggle_department_status(&self, id: &str) -> StoreResult<RecordStatus>;

	async fn departments(&self, filter: &DepartmentFilter) -> StoreResult<Vec<DepartmentRow>>;

	async fn managers(&self) -> StoreResult<Vec<ManagerOption>>;

	async fn find_login(&self, username: &str) -> StoreResult<Option<StoredLogin>>;
}

#[derive(Debug, Default)]
struct Tables {
	employees: Vec<Employee>,
	managers: Vec<Manager>,
	departments: Vec<Department>,
	logins: Vec<StoredLogin>,
}

impl Tables {
	fn employee_mut(&mut self, id: &str) -> StoreResult<&mut Employee> {
		self.employees
			.iter_mut()
			.find(|e| e.id == id)
			.ok_or_else(|| StoreError::not_found(Entity::Employee, id))
	}

	fn department_mut(&mut self, id: &str) -> StoreResult<&mut Department> {
		self.departments
			.iter_mut()
			.find(|d| d.id == id)
			.ok_or_else(|| StoreError::not_found(Entity::Department, id))
	}

	fn check_manager(&self, id: &str) -> StoreResult<()> {
		if self.managers.iter().any(|m| m.id == id) {
			Ok(())
		} else {
			Err(StoreError::not_found(Entity::Manager, id))
		}
	}

	fn manager_name(&self, manager_id: &str) -> String {
		self.managers
			.iter()
			.find(|m| m.id == manager_id)
			.and_then(|m| self.employees.iter().find(|e| e.id == m.employee_id))
			.map(Employee::full_name)
			.unwrap_or_default()
	}
}

/// In-memory [`StaffStore`]
///
/// Records keep insertion order.
///
/// # Examples
///
/// ```
/// use hrdesk_staff::store::{MemoryStore, StaffStore};
/// use hrdesk_staff::schemas::{EmployeeFilter, NewEmployee};
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let store = MemoryStore::new();
/// let id = store
///     .create_employee(NewEmployee {
///         first_name: "Jane".into(),
///         last_name: "Doe".into(),
///         phone: "5550100".into(),
///         email: "jane@example.com".into(),
///         manager_id: String::new(),
///     })
///     .await
///     .unwrap();
///
/// let rows = store.employees(&EmployeeFilter::default()).await.unwrap();
/// assert_eq!(rows[0].id, id);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
	tables: RwLock<Tables>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Promote an existing employee to manager, returning the manager id
	pub async fn add_manager(&self, employee_id: &str) -> StoreResult<String> {
		let mut tables = self.tables.write().await;
		tables.employee_mut(employee_id)?;
		let id = Uuid::new_v4().to_string();
		tables.managers.push(Manager {
			id: id.clone(),
			employee_id: employee_id.to_string(),
		});
		Ok(id)
	}

	/// Create a login account with a freshly hashed password
	///
	/// Hashing runs on the blocking pool, like verification at login.
	pub async fn add_user(&self, username: &str, password: &str) -> StaffResult<User> {
		let password = password.to_string();
		let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
			.await
			.map_err(|e| StaffError::PasswordHash(e.to_string()))??;
		let user = User {
			id: Uuid::new_v4().to_string(),
			username: username.to_string(),
		};
		let mut tables = self.tables.write().await;
		tables.logins.retain(|l| l.user.username != username);
		tables.logins.push(StoredLogin {
			user: user.clone(),
			password_hash,
		});
		tracing::debug!(username = %username, "user account created");
		Ok(user)
	}

	/// Create the administrator account
	pub async fn seed_admin(&self, password: &str) -> StaffResult<User> {
		self.add_user(ADMIN_USERNAME, password).await
	}
}

#[async_trait]
impl StaffStore for MemoryStore {
	async fn create_employee(&self, employee: NewEmployee) -> StoreResult<String> {
		let mut tables = self.tables.write().await;
		let manager_id = (!employee.manager_id.is_empty()).then_some(employee.manager_id);
		if let Some(manager_id) = &manager_id {
			tables.check_manager(manager_id)?;
		}
		let id = Uuid::new_v4().to_string();
		tables.employees.push(Employee {
			id: id.clone(),
			first_name: employee.first_name,
			last_name: employee.last_name,
			phone: employee.phone,
			email: employee.email,
			status: RecordStatus::Active,
			manager_id,
		});
		Ok(id)
	}

	async fn employee(&self, id: &str) -> StoreResult<Option<Employee>> {
		let tables = self.tables.read().await;
		Ok(tables.employees.iter().find(|e| e.id == id).cloned())
	}

	async fn update_employee(&self, id: &str, changes: EmployeeChanges) -> StoreResult<()> {
		let mut tables = self.tables.write().await;
		tables.employee_mut(id)?;
		tables.check_manager(&changes.manager_id)?;
		let employee = tables.employee_mut(id)?;
		employee.first_name = changes.first_name;
		employee.last_name = changes.last_name;
		employee.phone = changes.phone;
		employee.email = changes.email;
		employee.status = changes.status;
		employee.manager_id = Some(changes.manager_id);
		Ok(())
	}

	async fn toggle_employee_status(&self, id: &str) -> StoreResult<RecordStatus> {
		let mut tables = self.tables.write().await;
		let employee = tables.employee_mut(id)?;
		employee.status = employee.status.toggled();
		Ok(employee.status)
	}

	async fn employees(&self, filter: &EmployeeFilter) -> StoreResult<Vec<EmployeeRow>> {
		let tables = self.tables.read().await;
		let department_manager = match &filter.department_id {
			Some(department_id) => match tables.departments.iter().find(|d| &d.id == department_id) {
				Some(department) => Some(department.manager_id.as_str()),
				None => return Ok(Vec::new()),
			},
			None => None,
		};

		Ok(tables
			.employees
			.iter()
			.filter(|e| filter.status.is_none_or(|status| e.status == status))
			.filter(|e| {
				filter
					.manager_id
					.as_deref()
					.is_none_or(|m| e.manager_id.as_deref() == Some(m))
			})
			.filter(|e| department_manager.is_none_or(|m| e.manager_id.as_deref() == Some(m)))
			.map(|e| EmployeeRow {
				id: e.id.clone(),
				status: e.status,
				first_name: e.first_name.clone(),
				last_name: e.last_name.clone(),
				phone: e.phone.clone(),
				email: e.email.clone(),
				manager: e
					.manager_id
					.as_deref()
					.map(|m| tables.manager_name(m))
					.unwrap_or_default(),
			})
			.filter(|row| filter.search.as_deref().is_none_or(|term| row.matches_search(term)))
			.collect())
	}

	async fn create_department(&self, department: NewDepartment) -> StoreResult<String> {
		let mut tables = self.tables.write().await;
		tables.check_manager(&department.manager_id)?;
		let id = Uuid::new_v4().to_string();
		tables.departments.push(Department {
			id: id.clone(),
			name: department.name,
			status: RecordStatus::Active,
			manager_id: department.manager_id,
		});
		Ok(id)
	}

	async fn department(&self, id: &str) -> StoreResult<Option<Department>> {
		let tables = self.tables.read().await;
		Ok(tables.departments.iter().find(|d| d.id == id).cloned())
	}

	async fn update_department(&self, id: &str, changes: DepartmentChanges) -> StoreResult<()> {
		let mut tables = self.tables.write().await;
		tables.department_mut(id)?;
		tables.check_manager(&changes.manager_id)?;
		let department = tables.department_mut(id)?;
		department.name = changes.name;
		department.manager_id = changes.manager_id;
		department.status = changes.status;
		Ok(())
	}

	async fn toggle_department_status(&self, id: &str) -> StoreResult<RecordStatus> {
		let mut tables = self.tables.write().await;
		let department = tables.department_mut(id)?;
		department.status = department.status.toggled();
		Ok(department.status)
	}

	async fn departments(&self, filter: &DepartmentFilter) -> StoreResult<Vec<DepartmentRow>> {
		let tables = self.tables.read().await;
		Ok(tables
			.departments
			.iter()
			.filter(|d| filter.status.is_none_or(|status| d.status == status))
			.filter(|d| filter.manager_id.as_deref().is_none_or(|m| d.manager_id == m))
			.map(|d| DepartmentRow {
				id: d.id.clone(),
				name: d.name.clone(),
				status: d.status,
				manager: tables.manager_name(&d.manager_id),
			})
			.filter(|row| filter.search.as_deref().is_none_or(|term| row.matches_search(term)))
			.collect())
	}

	async fn managers(&self) -> StoreResult<Vec<ManagerOption>> {
		let tables = self.tables.read().await;
		Ok(tables
			.managers
			.iter()
			.map(|m| ManagerOption {
				id: m.id.clone(),
				name: tables.manager_name(&m.id),
			})
			.collect())
	}

	async fn find_login(&self, username: &str) -> StoreResult<Option<StoredLogin>> {
		let tables = self.tables.read().await;
		Ok(tables
			.logins
			.iter()
			.find(|l| l.user.username == username)
			.cloned())
	}
}
