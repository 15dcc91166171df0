//! Hierarchical entity keys: ordered kind/name pairs addressing documents.

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

use crate::error::{Error, Result};

/// One level of a key path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyPair {
    kind: String,
    name: String,
}

impl KeyPair {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Immutable hierarchical identifier.
///
/// An empty pair list is the root sentinel (`EntityKey::ROOT`): its own
/// parent, kind `Root`, name `root`. Every other key has at least one pair;
/// the last pair is the key's own kind/name and dropping it yields the
/// parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityKey {
    pairs: Vec<KeyPair>,
}

impl EntityKey {
    /// Root sentinel. A plain constant, so parent lookups at the top need no
    /// lazy global state.
    pub const ROOT: EntityKey = EntityKey { pairs: Vec::new() };

    pub fn is_root(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Kind of the last pair (`Root` for the sentinel).
    pub fn kind(&self) -> &str {
        self.pairs.last().map(|p| p.kind.as_str()).unwrap_or("Root")
    }

    /// Name of the last pair (`root` for the sentinel).
    pub fn name(&self) -> &str {
        self.pairs.last().map(|p| p.name.as_str()).unwrap_or("root")
    }

    /// Key with the last pair dropped. The root is its own parent.
    pub fn parent(&self) -> EntityKey {
        if self.pairs.len() <= 1 {
            return EntityKey::ROOT;
        }
        EntityKey {
            pairs: self.pairs[..self.pairs.len() - 1].to_vec(),
        }
    }

    pub fn pairs(&self) -> &[KeyPair] {
        &self.pairs
    }

    /// Interleaved `[kind1, name1, kind2, name2, ...]` sequence, the shape
    /// store clients address ancestor paths with.
    pub fn flat_pairs(&self) -> Vec<String> {
        let mut flat = Vec::with_capacity(self.pairs.len() * 2);
        for pair in &self.pairs {
            flat.push(pair.kind.clone());
            flat.push(pair.name.clone());
        }
        flat
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return write!(f, "Root:root");
        }
        let path: Vec<String> = self
            .pairs
            .iter()
            .map(|p| format!("{}:{}", p.kind, p.name))
            .collect();
        write!(f, "{}", path.join("/"))
    }
}

/// Builds entity keys from the shapes callers actually hold.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityKeyFactory;

impl EntityKeyFactory {
    pub fn new() -> Self {
        Self
    }

    /// Build from ordered (kind, name) pairs. Non-root keys require at
    /// least one pair.
    pub fn build_from_pairs<K, N>(&self, pairs: impl IntoIterator<Item = (K, N)>) -> Result<EntityKey>
    where
        K: Into<String>,
        N: Into<String>,
    {
        let pairs: Vec<KeyPair> = pairs
            .into_iter()
            .map(|(kind, name)| KeyPair::new(kind, name))
            .collect();
        if pairs.is_empty() {
            return Err(Error::InvalidKey(
                "entity key must have at least one pair".into(),
            ));
        }
        Ok(EntityKey { pairs })
    }

    /// Build from an interleaved `[kind1, name1, ...]` sequence, the inverse
    /// of [`EntityKey::flat_pairs`].
    pub fn build_from_flat_pairs<S: AsRef<str>>(&self, flat: &[S]) -> Result<EntityKey> {
        if flat.len() % 2 != 0 {
            return Err(Error::InvalidKey(format!(
                "flat pairs must have even length, got {}",
                flat.len()
            )));
        }
        self.build_from_pairs(
            flat.chunks_exact(2)
                .map(|chunk| (chunk[0].as_ref().to_string(), chunk[1].as_ref().to_string())),
        )
    }

    /// Mint a fresh top-level key of the given kind with a ULID name.
    pub fn build_for_new(&self, kind: impl Into<String>) -> EntityKey {
        EntityKey {
            pairs: vec![KeyPair::new(kind, Ulid::new().to_string())],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn factory() -> EntityKeyFactory {
        EntityKeyFactory::new()
    }

    #[rstest]
    #[case(vec![("Task", "abc")])]
    #[case(vec![("Project", "p1"), ("Task", "t1")])]
    #[case(vec![("A", "1"), ("B", "2"), ("C", "3")])]
    fn flat_pairs_round_trip(#[case] pairs: Vec<(&str, &str)>) {
        let key = factory().build_from_pairs(pairs).unwrap();
        let rebuilt = factory().build_from_flat_pairs(&key.flat_pairs()).unwrap();
        assert_eq!(key, rebuilt);
    }

    #[test]
    fn kind_and_name_come_from_last_pair() {
        let key = factory()
            .build_from_pairs([("Project", "p1"), ("Task", "t1")])
            .unwrap();
        assert_eq!(key.kind(), "Task");
        assert_eq!(key.name(), "t1");
    }

    #[test]
    fn parent_chain_reaches_root_in_depth_steps() {
        let key = factory()
            .build_from_pairs([("A", "1"), ("B", "2"), ("C", "3")])
            .unwrap();

        let mut current = key;
        for _ in 0..3 {
            assert!(!current.is_root());
            current = current.parent();
        }
        assert!(current.is_root());
    }

    #[test]
    fn root_is_its_own_parent() {
        assert_eq!(EntityKey::ROOT.parent(), EntityKey::ROOT);
        assert_eq!(EntityKey::ROOT.kind(), "Root");
        assert_eq!(EntityKey::ROOT.name(), "root");
        assert!(EntityKey::ROOT.flat_pairs().is_empty());
    }

    #[test]
    fn empty_pairs_rejected() {
        let result = factory().build_from_pairs(Vec::<(String, String)>::new());
        assert!(matches!(result, Err(Error::InvalidKey(_))));
    }

    #[test]
    fn odd_flat_pairs_rejected() {
        let result = factory().build_from_flat_pairs(&["Task", "abc", "orphan"]);
        assert!(matches!(result, Err(Error::InvalidKey(_))));
    }

    #[test]
    fn minted_keys_are_unique_top_level() {
        let a = factory().build_for_new("Task");
        let b = factory().build_for_new("Task");
        assert_eq!(a.kind(), "Task");
        assert_eq!(a.parent(), EntityKey::ROOT);
        assert_ne!(a, b);
    }

    #[test]
    fn display_joins_path() {
        let key = factory()
            .build_from_pairs([("Project", "p1"), ("Task", "t1")])
            .unwrap();
        assert_eq!(key.to_string(), "Project:p1/Task:t1");
    }
}
