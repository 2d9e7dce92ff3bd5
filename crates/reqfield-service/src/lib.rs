//! # reqfield-service: Validator Service
//!
//! The outward-facing facade. One [`ValidatorService`] wires together:
//!
//! - a [`SchemaGenerator`](reqfield_schema::SchemaGenerator) and a
//!   [`SchemaCache`](reqfield_schema::SchemaCache),
//! - the [`RequiredFieldValidator`](reqfield_validator::RequiredFieldValidator),
//! - caller-supplied [`AuxiliaryCheck`]s,
//! - the [`RawParser`](reqfield_parser::RawParser) and a
//!   [`Render`](reqfield_parser::Render) implementation.
//!
//! ## Outcomes
//!
//! `validate` returns one of three things:
//!
//! - `Ok(None)`: nothing failed.
//! - `Ok(Some(report))`: the rendered report of failed fields.
//! - `Err(ServiceError)`: a construction, consistency, rendering or
//!   auxiliary-check fault. [`ServiceError::is_internal`] separates
//!   programmer faults from auxiliary failures.
//!
//! ## Example
//!
//! ```
//! use reqfield_core::{impl_record, Diagnostics};
//! use reqfield_parser::FlattenedRenderer;
//! use reqfield_schema::JsonGenerator;
//! use reqfield_service::ValidatorService;
//!
//! #[derive(Default)]
//! struct Login {
//!     email: String,
//!     password: String,
//! }
//!
//! impl_record!(Login {
//!     email: scalar => r#"json:"email""#,
//!     password: scalar => r#"json:"password""#,
//! });
//!
//! let service = ValidatorService::new(JsonGenerator::default(), FlattenedRenderer, Diagnostics::disabled());
//! let report = service
//!     .validate(&Login { email: "ada@example.com".into(), ..Default::default() }, &[])
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(report.get("password").unwrap(), ["password is required"]);
//! ```

pub mod auxiliary;
pub mod config;
pub mod error;
pub mod service;

pub use auxiliary::{AuxiliaryCheck, AuxiliaryError, BoxedCheck};
pub use config::{CacheMode, ConfiguredGenerator, TagFormat, ValidatorConfig};
pub use error::ServiceError;
pub use service::{PreparedValidation, ValidatorService};
