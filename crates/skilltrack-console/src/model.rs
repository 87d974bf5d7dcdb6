//! Request bodies and the tolerant view of skill records.

use oidkit::normalize_opt;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `register` and `update-user` requests.
#[derive(Debug, Clone, Serialize)]
pub struct UserForm {
    pub username: String,
    pub password: String,
}

impl UserForm {
    /// Trims the username; the password is sent verbatim.
    #[must_use]
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.trim().to_owned(),
            password: password.to_owned(),
        }
    }
}

/// Body of `add-skill` and `update-skill` requests.
#[derive(Debug, Clone, Serialize)]
pub struct SkillForm {
    pub name: String,
    pub proficiency: String,
}

impl SkillForm {
    #[must_use]
    pub fn new(name: &str, proficiency: &str) -> Self {
        Self {
            name: name.trim().to_owned(),
            proficiency: proficiency.trim().to_owned(),
        }
    }
}

/// A skill record as returned by the listing endpoint.
///
/// Every field is optional and loosely typed: the service has shipped the
/// identifier as a hex string, as `{"$oid": ...}`, and as a raw field dump,
/// and under both `id` and `_id`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Skill {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default, rename = "_id")]
    pub legacy_id: Option<Value>,
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub proficiency: Option<Value>,
}

impl Skill {
    /// Reads a record, treating anything that is not an object as empty.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        Self::deserialize(value).unwrap_or_default()
    }

    /// The normalized identifier, taken from `id` and falling back to `_id`
    /// only when `id` is null or missing. Empty when unavailable.
    #[must_use]
    pub fn skill_id(&self) -> String {
        normalize_opt(self.id.as_ref().or(self.legacy_id.as_ref()))
    }

    #[must_use]
    pub fn name(&self) -> Option<String> {
        self.name.as_ref().and_then(display_text)
    }

    #[must_use]
    pub fn proficiency(&self) -> Option<String> {
        self.proficiency.as_ref().and_then(display_text)
    }
}

/// Strings are shown raw, other scalars through their JSON text.
fn display_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
