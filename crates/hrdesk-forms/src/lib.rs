//! Form schemas and validation for hrdesk
//!
//! This crate holds the part of form handling that both tiers share:
//! - [`RawFields`]: submitted values, with default-on-missing lookups
//! - [`FormSchema`]: one serializable declaration per form
//! - [`FormSchema::validate`]: pure validation into a [`ValidationResult`]
//! - [`FormMetadata`]: rendering metadata derived from a schema

pub mod constraint;
pub mod error;
pub mod field;
pub mod metadata;
pub mod raw;
pub mod result;
pub mod schema;

pub use constraint::{Constraint, Violation};
pub use error::{FormError, FormResult};
pub use field::{ErrorCode, FieldError, FieldKind, FieldSpec, Widget};
pub use metadata::{FieldMetadata, FormMetadata, ValidationRule};
pub use raw::{RawFields, RawValue};
pub use result::{CleanedData, ValidationResult};
pub use schema::{FormSchema, FormSchemaBuilder};
