//! Schema validator for decoded request records
//!
//! Validation semantics:
//! - Every field in the rule table is evaluated; one bad field never hides another
//! - Within a field, constraints run in declaration order and the first
//!   violated one is reported
//! - Failures are returned in rule table order
//! - A table the engine cannot evaluate is a fault, not a validation failure
//!
//! The validator never mutates the record and is deterministic.

use regex::Regex;
use uuid::{Uuid, Variant};

use super::errors::{EngineFault, EngineResult};
use super::types::{Constraint, FieldFailure, FieldValue, Schema};
use crate::pipeline::Outcome;

const NUMERIC_PATTERN: &str = r"^[0-9]+$";

/// Hyphenated UUID text length
const UUID_TEXT_LEN: usize = 36;

/// Evaluates schema constraint tables against decoded records.
#[derive(Debug, Clone)]
pub struct SchemaValidator {
    numeric: Regex,
}

impl SchemaValidator {
    /// Creates a new validator.
    pub fn new() -> Self {
        Self {
            numeric: Regex::new(NUMERIC_PATTERN).expect("numeric pattern is a valid regex"),
        }
    }

    /// Validates a record and classifies the result.
    ///
    /// Returns `Outcome::Ok` when every constraint holds,
    /// `Outcome::ValidationFailed` with every broken field otherwise, and
    /// `Outcome::Internal` if the rule table could not be evaluated.
    pub fn validate<S: Schema>(&self, instance: &S) -> Outcome {
        match self.check(instance) {
            Ok(failures) if failures.is_empty() => Outcome::Ok,
            Ok(failures) => Outcome::ValidationFailed(failures),
            Err(fault) => Outcome::Internal(fault.into()),
        }
    }

    /// Runs the constraint table and collects every field failure.
    ///
    /// # Errors
    ///
    /// Returns `EngineFault` if the table names an unknown field or applies a
    /// constraint to a value of the wrong type.
    pub fn check<S: Schema>(&self, instance: &S) -> EngineResult<Vec<FieldFailure>> {
        let mut failures = Vec::new();

        for rule in S::rules() {
            let value = instance
                .field_value(rule.field)
                .ok_or(EngineFault::UnknownField {
                    schema: S::NAME,
                    field: rule.field,
                })?;

            for constraint in rule.constraints {
                if !self.satisfies(*constraint, value, S::NAME, rule.field)? {
                    failures.push(FieldFailure::new(S::NAME, rule.field, *constraint));
                    break;
                }
            }
        }

        Ok(failures)
    }

    /// Evaluates one constraint against one value.
    fn satisfies(
        &self,
        constraint: Constraint,
        value: FieldValue<'_>,
        schema: &str,
        field: &str,
    ) -> EngineResult<bool> {
        let satisfied = match (constraint, value) {
            (Constraint::Required, FieldValue::Str(s)) => !s.is_empty(),
            (Constraint::Required, FieldValue::Int(n)) => n.is_some(),

            (Constraint::MinLength(min), FieldValue::Str(s)) => s.chars().count() >= min,
            (Constraint::MaxLength(max), FieldValue::Str(s)) => s.chars().count() <= max,
            (Constraint::ExactLength(len), FieldValue::Str(s)) => s.chars().count() == len,

            // Absent optional integers have nothing to bound
            (Constraint::GreaterThan(bound), FieldValue::Int(n)) => n.map_or(true, |n| n > bound),
            (Constraint::AtLeast(bound), FieldValue::Int(n)) => n.map_or(true, |n| n >= bound),
            (Constraint::AtMost(bound), FieldValue::Int(n)) => n.map_or(true, |n| n <= bound),

            (Constraint::Numeric, FieldValue::Str(s)) => self.numeric.is_match(s),
            (Constraint::UuidRfc4122, FieldValue::Str(s)) => is_uuid_rfc4122(s),

            (constraint, value) => {
                return Err(EngineFault::TypeMismatch {
                    field_path: format!("{}.{}", schema, field),
                    constraint: constraint.tag(),
                    actual: value.type_name(),
                })
            }
        };

        Ok(satisfied)
    }
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Checks for the hyphenated form with the RFC-4122 variant bits.
fn is_uuid_rfc4122(s: &str) -> bool {
    s.len() == UUID_TEXT_LEN
        && Uuid::try_parse(s)
            .map(|uuid| uuid.get_variant() == Variant::RFC4122)
            .unwrap_or(false)
}
