//! Lenient recovery of the canonical ObjectId string from loosely shaped
//! payloads.
//!
//! Upstream services and serializers disagree on how an ObjectId travels
//! over JSON: a bare hex string, an Extended JSON `{"$oid": ...}` wrapper, or
//! the raw `{timestamp, machineIdentifier, processIdentifier, counter}`
//! fields a driver dumps when no custom serializer is registered. Every shape
//! is classified once by [`ObjectIdLike::from_value`] and then resolved in a
//! fixed priority order:
//!
//! 1. absent (null, missing, `""`) resolves to nothing
//! 2. strings pass through unchanged
//! 3. objects are searched for a wrapped string ([`WRAPPED_KEYS`]), then
//!    rebuilt from their four [`Component`]s
//! 4. anything else resolves to nothing
//!
//! [`normalize`] collapses "nothing" to an empty string. Callers must treat
//! `""` as "identifier unavailable" and never use it as an identifier.

mod like;
mod keys;
#[cfg(test)]
mod tests;

pub use like::*;
pub use keys::{Component, WRAPPED_KEYS, find_wrapped};

use serde_json::Value;

/// Returns the canonical identifier string for `value`, or `""` when none can
/// be determined.
///
/// ```
/// use oidkit::normalize;
/// use serde_json::json;
///
/// assert_eq!(normalize(&json!({ "$oid": "507f1f77bcf86cd799439011" })), "507f1f77bcf86cd799439011");
/// assert_eq!(
///     normalize(&json!({ "timestamp": 1, "machineIdentifier": 2, "processIdentifier": 3, "counter": 4 })),
///     "000000010000020003000004"
/// );
/// assert_eq!(normalize(&json!(null)), "");
/// ```
#[must_use]
pub fn normalize(value: &Value) -> String {
    ObjectIdLike::from_value(value).normalize()
}

/// [`normalize`] for a field that may be missing altogether.
#[must_use]
pub fn normalize_opt(value: Option<&Value>) -> String {
    ObjectIdLike::from_option(value).normalize()
}
