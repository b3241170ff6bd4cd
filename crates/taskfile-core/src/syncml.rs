use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One level of the synchronization configuration tree.
///
/// The tree is opaque to the task file format: every level is written as an
/// element named after the level, holding its properties followed by its
/// named children.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncMlConfig {
    /// Element name of this level.
    pub name: String,
    /// Scalar properties.
    pub properties: BTreeMap<String, String>,
    /// Nested levels keyed by their name.
    pub children: BTreeMap<String, SyncMlConfig>,
}

impl SyncMlConfig {
    /// Empty level with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set a scalar property, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Child level with the given name, created when missing.
    pub fn child_mut(&mut self, name: &str) -> &mut Self {
        self.children
            .entry(name.to_owned())
            .or_insert_with(|| Self::new(name))
    }

    /// Child level with the given name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children.get(name)
    }

    /// Properties in ascending key order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Child levels in ascending name order.
    pub fn children(&self) -> impl Iterator<Item = &Self> {
        self.children.values()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;

    #[test]
    fn child_mut_creates_named_levels_once() {
        let mut root = SyncMlConfig::new("root");
        root.child_mut("TaskCoach").set("username", "frank");
        root.child_mut("TaskCoach").set("password", "");
        assert_eq!(root.children.len(), 1);
        let level = root.child("TaskCoach").expect("child level exists");
        assert_eq!(level.name, "TaskCoach");
        let keys: Vec<&str> = level.properties().map(|(k, _)| k).collect();
        assert_eq!(keys, ["password", "username"]);
    }
}
