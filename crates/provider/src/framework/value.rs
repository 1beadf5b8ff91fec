//! Attribute values as the host exchanges them
//!
//! Every attribute in a plan, state or config is null, unknown (to be
//! computed during apply) or a known value. On the wire unknown is a
//! reserved sentinel string.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Wire representation of an unknown value
pub const UNKNOWN: &str = "74D93920-ED26-11E3-AC10-0800200C9A66";

/// A three-state attribute value
#[derive(Debug, Clone, PartialEq)]
pub enum Attr<T> {
    /// Not set
    Null,
    /// Not known until apply
    Unknown,
    /// Known value
    Value(T),
}

impl<T> Default for Attr<T> {
    fn default() -> Self {
        Attr::Null
    }
}

impl<T> Attr<T> {
    /// True for [`Attr::Null`]
    pub fn is_null(&self) -> bool {
        matches!(self, Attr::Null)
    }

    /// True for [`Attr::Unknown`]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Attr::Unknown)
    }

    /// True when a value is known
    pub fn is_known(&self) -> bool {
        matches!(self, Attr::Value(_))
    }

    /// True when configured, known or not
    pub fn is_set(&self) -> bool {
        !self.is_null()
    }

    /// The known value, if any
    pub fn value(&self) -> Option<&T> {
        match self {
            Attr::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Consume into the known value, if any
    pub fn into_value(self) -> Option<T> {
        match self {
            Attr::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Map the known value
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Attr<U> {
        match self {
            Attr::Null => Attr::Null,
            Attr::Unknown => Attr::Unknown,
            Attr::Value(v) => Attr::Value(f(v)),
        }
    }

    /// Replace unknown with null; used once apply has finished
    pub fn known_or_null(self) -> Self {
        match self {
            Attr::Unknown => Attr::Null,
            other => other,
        }
    }
}

impl Attr<String> {
    /// The known value as `&str`
    pub fn as_str(&self) -> Option<&str> {
        self.value().map(String::as_str)
    }
}

impl<T> From<Option<T>> for Attr<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Attr::Null, Attr::Value)
    }
}

impl<T: Serialize> Serialize for Attr<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Attr::Null => serializer.serialize_none(),
            Attr::Unknown => serializer.serialize_str(UNKNOWN),
            Attr::Value(v) => v.serialize(serializer),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Attr<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Attr::Null),
            Value::String(s) if s == UNKNOWN => Ok(Attr::Unknown),
            other => serde_json::from_value(other)
                .map(Attr::Value)
                .map_err(D::Error::custom),
        }
    }
}

/// True when a raw JSON value is the unknown sentinel
pub fn is_unknown_value(value: &Value) -> bool {
    value.as_str() == Some(UNKNOWN)
}
