//! Constraint and schema type definitions
//!
//! A schema is a plain struct decoded from JSON plus a static table of field
//! rules. The table maps each field to an ordered list of constraints, and the
//! validator walks every table the same way regardless of which schema owns it.
//!
//! Supported constraints:
//! - required: non-empty string, present integer
//! - min / max / len: string length in characters
//! - gt / gte / lte: integer bounds
//! - numeric: ASCII digits only
//! - uuid_rfc4122: hyphenated RFC-4122 UUID

use std::fmt;

/// A single declarative rule attached to one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constraint {
    /// String must be non-empty, integer must be present
    Required,
    /// String length must be at least this many characters
    MinLength(usize),
    /// String length must be at most this many characters
    MaxLength(usize),
    /// String length must be exactly this many characters
    ExactLength(usize),
    /// Integer must be strictly greater than the bound
    GreaterThan(i64),
    /// Integer must be greater than or equal to the bound
    AtLeast(i64),
    /// Integer must be less than or equal to the bound
    AtMost(i64),
    /// String must consist of ASCII digits only
    Numeric,
    /// String must be a hyphenated RFC-4122 UUID
    UuidRfc4122,
}

impl Constraint {
    /// Returns the stable tag written to the audit store
    pub fn tag(&self) -> &'static str {
        match self {
            Constraint::Required => "required",
            Constraint::MinLength(_) => "min",
            Constraint::MaxLength(_) => "max",
            Constraint::ExactLength(_) => "len",
            Constraint::GreaterThan(_) => "gt",
            Constraint::AtLeast(_) => "gte",
            Constraint::AtMost(_) => "lte",
            Constraint::Numeric => "numeric",
            Constraint::UuidRfc4122 => "uuid_rfc4122",
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::MinLength(n) | Constraint::MaxLength(n) | Constraint::ExactLength(n) => {
                write!(f, "{}={}", self.tag(), n)
            }
            Constraint::GreaterThan(n) | Constraint::AtLeast(n) | Constraint::AtMost(n) => {
                write!(f, "{}={}", self.tag(), n)
            }
            _ => write!(f, "{}", self.tag()),
        }
    }
}

/// Borrowed view of one decoded attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// Text attribute; missing or null decodes as ""
    Str(&'a str),
    /// Integer attribute; missing or null decodes as None
    Int(Option<i64>),
}

impl FieldValue<'_> {
    /// Returns the type name for fault messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Str(_) => "string",
            FieldValue::Int(_) => "int",
        }
    }
}

/// Ordered constraints for one named field of a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    /// Field name as it appears in audit paths (e.g. "UserID")
    pub field: &'static str,
    /// Constraints, evaluated in declaration order
    pub constraints: &'static [Constraint],
}

impl FieldRule {
    pub const fn new(field: &'static str, constraints: &'static [Constraint]) -> Self {
        Self { field, constraints }
    }
}

/// A request shape with a declared constraint table.
pub trait Schema {
    /// Struct name; first segment of every field path
    const NAME: &'static str;

    /// Constraint table, one entry per validated field
    fn rules() -> &'static [FieldRule];

    /// Looks up the decoded value of a field named in the rule table
    fn field_value(&self, field: &str) -> Option<FieldValue<'_>>;

    /// Identifying attributes for operator diagnostics
    fn describe(&self) -> String;
}

/// One field that broke one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFailure {
    /// "<StructName>.<FieldName>"
    pub field_path: String,
    /// The violated constraint
    pub constraint: Constraint,
}

impl FieldFailure {
    pub fn new(schema: &str, field: &str, constraint: Constraint) -> Self {
        Self {
            field_path: format!("{}.{}", schema, field),
            constraint,
        }
    }

    /// Returns the violated rule's tag
    pub fn tag(&self) -> &'static str {
        self.constraint.tag()
    }
}

impl fmt::Display for FieldFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed '{}'", self.field_path, self.constraint)
    }
}
