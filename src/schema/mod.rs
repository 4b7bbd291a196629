//! Schema validation subsystem
//!
//! Request schemas declare per-field constraint tables; one generic validator
//! evaluates any table against a decoded record.
//!
//! # Design Principles
//!
//! - Constraint tables are static and immutable at run time
//! - Every field is checked; failures name the field path and the rule
//! - Engine faults are distinct from validation failures
//! - Deterministic validation

mod errors;
mod requests;
mod types;
mod validator;

pub use errors::{EngineFault, EngineResult};
pub use requests::{decode_record, FavoriteNumRequest, GuessCatNameRequest, PetNameRequest, ThaiCIDRequest};
pub use types::{Constraint, FieldFailure, FieldRule, FieldValue, Schema};
pub use validator::SchemaValidator;
