//! Serde support.
//!
//! [`ObjectId`] serializes as its canonical hex string and deserializes from
//! a hex string of either letter case, so `Option<ObjectId>` writes `null`
//! for `None`. [`lenient`] accepts any identifier shape the normalizer
//! understands.

use crate::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

impl Serialize for ObjectId {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(self.encode().as_str())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct HexVisitor;

        impl serde::de::Visitor<'_> for HexVisitor {
            type Value = ObjectId;

            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                formatter.write_str("a 24 digit hex ObjectId string")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                ObjectId::decode(v).map_err(serde::de::Error::custom)
            }
        }

        d.deserialize_str(HexVisitor)
    }
}

/// Deserializes any identifier shape into its normalized string, `""` when
/// unavailable.
///
/// ```
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Row {
///     #[serde(default, with = "oidkit::serde::lenient")]
///     id: String,
/// }
///
/// let row: Row = serde_json::from_str(r#"{"id":{"$oid":"507f1f77bcf86cd799439011"}}"#).unwrap();
/// assert_eq!(row.id, "507f1f77bcf86cd799439011");
/// ```
pub mod lenient {
    use super::*;
    use serde_json::Value;

    pub fn serialize<S>(id: &str, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if id.is_empty() {
            s.serialize_none()
        } else {
            s.serialize_str(id)
        }
    }

    pub fn deserialize<'de, D>(d: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(d)?;
        Ok(crate::normalize(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(PartialEq, Eq, Debug, Serialize, Deserialize)]
    struct Row {
        id: Option<ObjectId>,
    }

    #[test]
    fn hex_roundtrip() {
        let row = Row {
            id: Some(ObjectId::from(1, 2, 3, 4)),
        };
        let json = serde_json::to_string(&row).expect("serialize");
        assert_eq!(json, r#"{"id":"000000010000020003000004"}"#);
        let back: Row = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, row);
    }

    #[test]
    fn none_serializes_as_null() {
        let json = serde_json::to_value(Row { id: None }).expect("serialize");
        assert_eq!(json, json!({ "id": null }));
    }

    #[test]
    fn rejects_malformed_hex() {
        let err = serde_json::from_str::<Row>(r#"{"id":"abc"}"#).unwrap_err();
        assert!(err.to_string().contains("invalid length: 3"));
    }

    #[test]
    fn lenient_accepts_every_shape() {
        #[derive(Debug, Serialize, Deserialize)]
        struct Loose {
            #[serde(default, with = "lenient")]
            id: String,
        }

        let parse = |v: serde_json::Value| serde_json::from_value::<Loose>(v).expect("loose").id;
        assert_eq!(parse(json!({ "id": "abc" })), "abc");
        assert_eq!(parse(json!({ "id": { "$oid": "507f1f77bcf86cd799439011" } })), "507f1f77bcf86cd799439011");
        assert_eq!(
            parse(json!({ "id": { "timestamp": 1, "machine": 2, "process": 3, "counter": 4 } })),
            "000000010000020003000004"
        );
        assert_eq!(parse(json!({ "id": null })), "");
        assert_eq!(parse(json!({ "id": [1, 2] })), "");
        assert_eq!(parse(json!({})), "");

        let out = serde_json::to_value(Loose { id: String::new() }).expect("serialize");
        assert_eq!(out, json!({ "id": null }));
    }
}
