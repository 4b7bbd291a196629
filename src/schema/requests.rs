//! Request schemas served by the API
//!
//! Each request is a plain serde struct plus one constraint table. String
//! fields that are missing or null decode as empty; integer fields decode as
//! absent so that an explicit 0 still reaches its bound rule.

use serde::de::{self, DeserializeOwned, Unexpected};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::{Constraint, FieldRule, FieldValue, Schema};

/// Decodes a request body into `S`.
///
/// Only a JSON object is a request. Derived struct decoding would also
/// accept an array and bind its elements by position, so anything that is
/// not an object is rejected here before serde sees it.
pub fn decode_record<S: DeserializeOwned>(body: Value) -> serde_json::Result<S> {
    match body {
        Value::Object(_) => serde_json::from_value(body),
        other => Err(de::Error::invalid_type(unexpected(&other), &"a JSON object")),
    }
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}

fn text(value: &Option<String>) -> FieldValue<'_> {
    FieldValue::Str(value.as_deref().unwrap_or_default())
}

/// Favorite number submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteNumRequest {
    pub user_id: Option<String>,
    pub fav_num: Option<i64>,
}

const FAVORITE_NUM_RULES: &[FieldRule] = &[
    FieldRule::new("UserID", &[Constraint::Required, Constraint::UuidRfc4122]),
    FieldRule::new("FavNum", &[Constraint::Required, Constraint::GreaterThan(0)]),
];

impl Schema for FavoriteNumRequest {
    const NAME: &'static str = "FavoriteNumRequest";

    fn rules() -> &'static [FieldRule] {
        FAVORITE_NUM_RULES
    }

    fn field_value(&self, field: &str) -> Option<FieldValue<'_>> {
        match field {
            "UserID" => Some(text(&self.user_id)),
            "FavNum" => Some(FieldValue::Int(self.fav_num)),
            _ => None,
        }
    }

    fn describe(&self) -> String {
        format!(
            "User ID: {}, Favorite Number: {}",
            self.user_id.as_deref().unwrap_or_default(),
            self.fav_num.unwrap_or_default()
        )
    }
}

/// Pet name registration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetNameRequest {
    pub pet_name: Option<String>,
    pub owner_id: Option<String>,
}

const PET_NAME_RULES: &[FieldRule] = &[
    FieldRule::new(
        "PetName",
        &[Constraint::Required, Constraint::MinLength(2), Constraint::MaxLength(50)],
    ),
    FieldRule::new("OwnerID", &[Constraint::Required, Constraint::UuidRfc4122]),
];

impl Schema for PetNameRequest {
    const NAME: &'static str = "PetNameRequest";

    fn rules() -> &'static [FieldRule] {
        PET_NAME_RULES
    }

    fn field_value(&self, field: &str) -> Option<FieldValue<'_>> {
        match field {
            "PetName" => Some(text(&self.pet_name)),
            "OwnerID" => Some(text(&self.owner_id)),
            _ => None,
        }
    }

    fn describe(&self) -> String {
        format!(
            "Pet Name: {}, Owner ID: {}",
            self.pet_name.as_deref().unwrap_or_default(),
            self.owner_id.as_deref().unwrap_or_default()
        )
    }
}

/// Thai citizen ID check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThaiCIDRequest {
    pub citizen_id: Option<String>,
    pub full_name: Option<String>,
}

const THAI_CID_RULES: &[FieldRule] = &[
    FieldRule::new(
        "CitizenID",
        &[Constraint::Required, Constraint::ExactLength(13), Constraint::Numeric],
    ),
    FieldRule::new("FullName", &[Constraint::Required, Constraint::MinLength(3)]),
];

impl Schema for ThaiCIDRequest {
    const NAME: &'static str = "ThaiCIDRequest";

    fn rules() -> &'static [FieldRule] {
        THAI_CID_RULES
    }

    fn field_value(&self, field: &str) -> Option<FieldValue<'_>> {
        match field {
            "CitizenID" => Some(text(&self.citizen_id)),
            "FullName" => Some(text(&self.full_name)),
            _ => None,
        }
    }

    fn describe(&self) -> String {
        format!(
            "Citizen ID: {}, Full Name: {}",
            self.citizen_id.as_deref().unwrap_or_default(),
            self.full_name.as_deref().unwrap_or_default()
        )
    }
}

/// Guess of the cat's name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessCatNameRequest {
    pub guess_name: Option<String>,
    pub user_id: Option<String>,
    pub attempts: Option<i64>,
}

const GUESS_CAT_NAME_RULES: &[FieldRule] = &[
    FieldRule::new(
        "GuessName",
        &[Constraint::Required, Constraint::MinLength(1), Constraint::MaxLength(30)],
    ),
    FieldRule::new("UserID", &[Constraint::Required, Constraint::UuidRfc4122]),
    FieldRule::new(
        "Attempts",
        &[Constraint::Required, Constraint::AtLeast(1), Constraint::AtMost(3)],
    ),
];

impl Schema for GuessCatNameRequest {
    const NAME: &'static str = "GuessCatNameRequest";

    fn rules() -> &'static [FieldRule] {
        GUESS_CAT_NAME_RULES
    }

    fn field_value(&self, field: &str) -> Option<FieldValue<'_>> {
        match field {
            "GuessName" => Some(text(&self.guess_name)),
            "UserID" => Some(text(&self.user_id)),
            "Attempts" => Some(FieldValue::Int(self.attempts)),
            _ => None,
        }
    }

    fn describe(&self) -> String {
        format!(
            "Guess Name: {}, User ID: {}, Attempts: {}",
            self.guess_name.as_deref().unwrap_or_default(),
            self.user_id.as_deref().unwrap_or_default(),
            self.attempts.unwrap_or_default()
        )
    }
}
