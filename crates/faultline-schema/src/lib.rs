pub mod embedded;
pub mod validate;

pub use embedded::{plan_schema_json, PLAN_SCHEMA_V1};
pub use validate::{validate_plan_document, SchemaViolation};
