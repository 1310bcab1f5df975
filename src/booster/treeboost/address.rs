//! Addresses of categories inside a [`TreeBoostClassifier`](super::TreeBoostClassifier).
use serde::{Serialize, Deserialize};

use std::fmt;


/// A node of the category tree that owns a level classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    /// The synthetic root, whose children are the root categories.
    Root,
    /// An internal category.
    Category(usize),
}


impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => write!(f, "root"),
            Self::Category(c) => write!(f, "category {c}"),
        }
    }
}


/// Where a global category is scored:
/// the `local`-th category of the classifier of `level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    /// The parent node.
    pub level: Level,
    /// Position among the children of `level`.
    pub local: usize,
}


/// Serializes a map keyed by [`Level`] as a sequence of pairs,
/// since JSON objects only take string keys.
pub(crate) mod level_map {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::ser::SerializeSeq;
    use super::Level;
    use std::collections::BTreeMap;

    pub(crate) fn serialize<V, S>(
        map: &BTreeMap<Level, V>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
        where V: Serialize,
              S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(map.len()))?;
        for pair in map.iter() {
            seq.serialize_element(&pair)?;
        }
        seq.end()
    }


    pub(crate) fn deserialize<'de, V, D>(deserializer: D)
        -> Result<BTreeMap<Level, V>, D::Error>
        where V: Deserialize<'de>,
              D: Deserializer<'de>,
    {
        let pairs = Vec::<(Level, V)>::deserialize(deserializer)?;
        Ok(pairs.into_iter().collect())
    }
}
