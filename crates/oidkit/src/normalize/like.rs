use super::keys::{Component, find_wrapped};
use crate::ObjectId;
use core::fmt;
use serde_json::{Map, Value};
use std::borrow::Cow;
#[cfg(feature = "tracing")]
use tracing::instrument;

/// A value exposing a zero-argument "to hex string" accessor.
///
/// JSON payloads never carry one; this is how typed Rust values (such as an
/// already-decoded [`ObjectId`]) enter the normalizer.
pub trait HexAccessor: fmt::Debug {
    fn to_hex_string(&self) -> String;
}

impl HexAccessor for ObjectId {
    fn to_hex_string(&self) -> String {
        self.encode().as_string()
    }
}

/// Why an identifier could not be determined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ResolveError {
    /// Null, missing, or empty string.
    Absent,
    /// A number, boolean, or array.
    Unsupported,
    /// Field reconstruction failed on this component.
    MissingComponent(Component),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("no identifier present"),
            Self::Unsupported => f.write_str("unsupported identifier shape"),
            Self::MissingComponent(c) => write!(f, "{c} could not be resolved"),
        }
    }
}

impl core::error::Error for ResolveError {}

/// Where a wrapped hex string came from.
#[derive(Clone, Copy, Debug)]
pub enum Wrapped<'a> {
    /// Found under one of [`super::WRAPPED_KEYS`].
    Field { key: &'static str, hex: &'a str },
    /// Produced by a [`HexAccessor`].
    Accessor(&'a dyn HexAccessor),
}

/// The four resolved (unmasked) components of a structured identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Components {
    pub timestamp: u64,
    pub machine_id: u64,
    pub process_id: u64,
    pub counter: u64,
}

impl From<Components> for ObjectId {
    fn from(c: Components) -> Self {
        ObjectId::from(c.timestamp, c.machine_id, c.process_id, c.counter)
    }
}

/// An object without a wrapped hex string, to be rebuilt from its fields.
#[derive(Clone, Copy, Debug)]
pub struct StructuredFields<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> StructuredFields<'a> {
    #[must_use]
    pub fn new(fields: &'a Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Resolves a single component through its alias list.
    pub fn component(&self, component: Component) -> Result<u64, ResolveError> {
        component
            .find(self.fields)
            .ok_or(ResolveError::MissingComponent(component))
    }

    /// Resolves all four components, failing on the first one (in layout
    /// order) that cannot be resolved.
    pub fn components(&self) -> Result<Components, ResolveError> {
        Ok(Components {
            timestamp: self.component(Component::Timestamp)?,
            machine_id: self.component(Component::MachineIdentifier)?,
            process_id: self.component(Component::ProcessIdentifier)?,
            counter: self.component(Component::Counter)?,
        })
    }

    pub fn reconstruct(&self) -> Result<ObjectId, ResolveError> {
        self.components().map(Into::into)
    }
}

/// The shapes an identifier may arrive in, classified once at the boundary.
#[derive(Clone, Copy, Debug)]
pub enum ObjectIdLike<'a> {
    /// Null, missing, or empty string.
    Absent,
    /// A plain string, passed through unchanged.
    HexString(&'a str),
    /// An object carrying a precomputed hex string, or an accessor.
    Wrapped(Wrapped<'a>),
    /// An object to be reconstructed from its four components.
    Structured(StructuredFields<'a>),
    /// Any other JSON shape.
    Unsupported,
}

impl<'a> ObjectIdLike<'a> {
    /// Classifies a decoded JSON value.
    ///
    /// Wrapped keys are checked before an object is treated as structured, so
    /// a payload carrying both `$oid` and component fields is read as wrapped.
    #[must_use]
    pub fn from_value(value: &'a Value) -> Self {
        match value {
            Value::Null => Self::Absent,
            Value::String(s) if s.is_empty() => Self::Absent,
            Value::String(s) => Self::HexString(s.as_str()),
            Value::Object(fields) => match find_wrapped(fields) {
                Some((key, hex)) => Self::Wrapped(Wrapped::Field { key, hex }),
                None => Self::Structured(StructuredFields::new(fields)),
            },
            Value::Bool(_) | Value::Number(_) | Value::Array(_) => Self::Unsupported,
        }
    }

    /// Like [`ObjectIdLike::from_value`], treating a missing field as absent.
    #[must_use]
    pub fn from_option(value: Option<&'a Value>) -> Self {
        value.map_or(Self::Absent, Self::from_value)
    }

    /// Resolves the identifier string, reporting why it is unavailable.
    ///
    /// Plain and wrapped strings are returned as-is, without hex validation.
    /// Reconstructed identifiers are always canonical.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] when no identifier can be determined.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self), err))]
    pub fn resolve(&self) -> Result<Cow<'a, str>, ResolveError> {
        match *self {
            Self::Absent => Err(ResolveError::Absent),
            Self::HexString(s) => Ok(Cow::Borrowed(s)),
            Self::Wrapped(Wrapped::Field { hex, .. }) => Ok(Cow::Borrowed(hex)),
            Self::Wrapped(Wrapped::Accessor(accessor)) => Ok(Cow::Owned(accessor.to_hex_string())),
            Self::Structured(fields) => fields
                .reconstruct()
                .map(|id| Cow::Owned(id.encode().as_string())),
            Self::Unsupported => Err(ResolveError::Unsupported),
        }
    }

    /// Resolves and strictly decodes into an [`ObjectId`].
    ///
    /// # Errors
    ///
    /// Fails if the identifier cannot be resolved or is not valid hex.
    pub fn to_object_id(&self) -> crate::Result<ObjectId> {
        match *self {
            Self::Structured(fields) => Ok(fields.reconstruct()?),
            _ => Ok(ObjectId::decode(self.resolve()?.as_bytes())?),
        }
    }

    /// Resolves the identifier, collapsing every failure to `""`.
    #[must_use]
    pub fn normalize(&self) -> String {
        self.resolve().map(Cow::into_owned).unwrap_or_default()
    }
}

impl<'a> From<&'a Value> for ObjectIdLike<'a> {
    fn from(value: &'a Value) -> Self {
        Self::from_value(value)
    }
}

impl<'a> From<&'a ObjectId> for ObjectIdLike<'a> {
    fn from(id: &'a ObjectId) -> Self {
        Self::Wrapped(Wrapped::Accessor(id))
    }
}
