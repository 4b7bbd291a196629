//! Validation engine faults
//!
//! A fault means the engine could not evaluate a constraint table, not that
//! the input broke a rule. Faults surface as internal failures and are never
//! reported as validation failures.

use thiserror::Error;

/// Result type for constraint evaluation
pub type EngineResult<T> = Result<T, EngineFault>;

/// Internal validation engine faults
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineFault {
    /// Rule table names a field the schema does not expose
    #[error("schema '{schema}' has no field '{field}'")]
    UnknownField {
        schema: &'static str,
        field: &'static str,
    },

    /// Constraint cannot be evaluated against the field's value type
    #[error("constraint '{constraint}' cannot apply to {actual} field '{field_path}'")]
    TypeMismatch {
        field_path: String,
        constraint: &'static str,
        actual: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_field_display() {
        let fault = EngineFault::UnknownField {
            schema: "PetNameRequest",
            field: "Color",
        };
        let display = fault.to_string();
        assert!(display.contains("PetNameRequest"));
        assert!(display.contains("Color"));
    }

    #[test]
    fn test_type_mismatch_display() {
        let fault = EngineFault::TypeMismatch {
            field_path: "ThaiCIDRequest.CitizenID".into(),
            constraint: "gt",
            actual: "string",
        };
        assert_eq!(
            fault.to_string(),
            "constraint 'gt' cannot apply to string field 'ThaiCIDRequest.CitizenID'"
        );
    }
}
