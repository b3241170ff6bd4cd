use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{borrow::Borrow, fmt, str::FromStr};
use thiserror::Error;
use uuid::Uuid;

/// Error raised when parsing an identifier from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    /// Identifiers must contain at least one non-whitespace character.
    #[error("identifier must not be blank")]
    Blank,
    /// Identifiers are space-joined in list attributes and cannot contain whitespace.
    #[error("identifier must not contain whitespace: {0:?}")]
    Whitespace(String),
}

fn validate(s: &str) -> Result<(), IdError> {
    if s.trim().is_empty() {
        return Err(IdError::Blank);
    }
    if s.chars().any(char::is_whitespace) {
        return Err(IdError::Whitespace(s.to_owned()));
    }
    Ok(())
}

/// Stable identifier of a domain object (task, category, note, effort, attachment).
///
/// Identifiers are assigned by the caller and compared as plain strings; sibling
/// order in written documents is the ascending order of this type.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct ObjectId(String);

impl ObjectId {
    /// Wrap an externally assigned identifier without validation.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh identifier.
    #[must_use]
    pub fn generate() -> Self {
        // UUID version 7 keeps freshly generated ids in creation order.
        Self(Uuid::now_v7().to_string())
    }

    /// Borrow the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ObjectId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate(s)?;
        Ok(Self(s.to_owned()))
    }
}

impl From<&str> for ObjectId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ObjectId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for ObjectId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Serialize for ObjectId {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Identifier of a task file instance or a synchronizing device.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Guid(String);

impl Guid {
    /// Wrap an existing guid string without validation.
    #[must_use]
    pub fn new(guid: impl Into<String>) -> Self {
        Self(guid.into())
    }

    /// Generate a fresh guid.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Borrow the guid text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Guid {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate(s)?;
        Ok(Self(s.to_owned()))
    }
}

impl From<&str> for Guid {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Guid {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Serialize for Guid {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Guid {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;

    #[test]
    fn generated_ids_use_uuid_v7() {
        let id = ObjectId::generate();
        let uuid = Uuid::parse_str(id.as_str()).expect("generated id must be a uuid");
        assert_eq!(uuid.get_version_num(), 7);
    }

    #[test]
    fn object_ids_order_as_strings() {
        let mut ids = vec![ObjectId::new("b"), ObjectId::new("a10"), ObjectId::new("a2")];
        ids.sort();
        let ordered: Vec<&str> = ids.iter().map(ObjectId::as_str).collect();
        assert_eq!(ordered, ["a10", "a2", "b"]);
    }

    #[test]
    fn parse_rejects_blank_and_whitespace() {
        assert_eq!("".parse::<ObjectId>(), Err(IdError::Blank));
        assert_eq!(" ".parse::<Guid>(), Err(IdError::Blank));
        assert!(matches!("a b".parse::<ObjectId>(), Err(IdError::Whitespace(_))));
    }

    #[test]
    fn guid_roundtrip_through_serde() {
        let guid = Guid::generate();
        let json = serde_json::to_string(&guid).expect("serialize guid");
        let parsed: Guid = serde_json::from_str(&json).expect("deserialize guid");
        assert_eq!(parsed, guid);
    }
}
