//! Domain identifiers.
//!
//! Fact の ID は呼び出し側（transport 層やアプリケーション）が割り当てます。
//! ストアは ID を生成しません。UUID でも ULID でも任意の文字列でもよく、
//! 空文字かどうかの検証は `Fact::new` が行います。

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Identifier of a Fact (document key in the store).
#[repr(transparent)]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactId(String);

impl FactId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for FactId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for FactId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<Ulid> for FactId {
    fn from(ulid: Ulid) -> Self {
        Self(ulid.to_string())
    }
}

impl AsRef<str> for FactId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fact_id_displays_its_raw_value() {
        let id = FactId::from("f1");
        assert_eq!(id.to_string(), "f1");
        assert_eq!(id.as_str(), "f1");
        assert!(!id.is_empty());
        assert!(FactId::from("").is_empty());
    }

    #[test]
    fn fact_id_serializes_as_plain_string() {
        let id = FactId::from("cat-42");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"cat-42\"");

        let back: FactId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn fact_id_from_ulid_uses_canonical_encoding() {
        let ulid = Ulid::new();
        let id = FactId::from(ulid);
        assert_eq!(id.as_str(), ulid.to_string());
        assert_eq!(id.as_str().len(), 26);
    }
}
