//! Staff records for hrdesk
//!
//! Employees and departments are managed through forms. Each form has one
//! schema in [`schemas`], a layout in [`forms`] and a handler in
//! [`actions`]. Handlers take an explicit [`RequestContext`] and any
//! [`StaffStore`].
//!
//! ## Example
//!
//! ```
//! use hrdesk_http::{Method, Request};
//! use hrdesk_staff::{ActionOutcome, MemoryStore, RequestContext, actions};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let store = MemoryStore::new();
//! let request = Request::builder()
//!     .method(Method::POST)
//!     .uri("/login")
//!     .header("content-type", "application/x-www-form-urlencoded")
//!     .body("username=nobody&password=secret")
//!     .build()
//!     .unwrap();
//!
//! let outcome = actions::login(&RequestContext::anonymous(), &store, &request)
//!     .await
//!     .unwrap();
//!
//! let rejection = outcome.rejection().unwrap();
//! assert_eq!(rejection.form_error.as_deref(), Some("Invalid credentials"));
//! assert!(!rejection.fields.contains("password"));
//! # });
//! ```

pub mod actions;
pub mod auth;
pub mod error;
pub mod forms;
pub mod links;
pub mod models;
pub mod password;
pub mod schemas;
pub mod store;

pub use actions::{ActionOutcome, validated_id};
pub use auth::RequestContext;
pub use error::{INVALID_FILTER_MESSAGE, StaffError, StaffResult};
pub use models::{
	Department, DepartmentRow, Employee, EmployeeRow, Manager, ManagerOption, RecordStatus, User,
};
pub use store::{ADMIN_USERNAME, Entity, MemoryStore, StaffStore, StoreError, StoreResult};
