//! Opaque node labels.

use core::fmt;

use serde::{Deserialize, Serialize};

/// An immutable node label.
///
/// Nodes carry no structure beyond equality and ordering; they are used as
/// map keys throughout the graph. Ordering is lexicographic on the label and
/// exists so that traversal consumers can produce deterministic output.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Node(String);

impl Node {
    /// Returns the label.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Node {
    fn from(label: &str) -> Self {
        Self(label.to_owned())
    }
}

impl From<String> for Node {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl From<usize> for Node {
    fn from(index: usize) -> Self {
        Self(index.to_string())
    }
}

impl AsRef<str> for Node {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_display() {
        assert_eq!(Node::from("A").to_string(), "A");
        assert_eq!(Node::from(17usize).as_str(), "17");
    }

    #[test]
    fn ordering_is_lexicographic() {
        assert!(Node::from("10") < Node::from("9"));
        assert!(Node::from("A") < Node::from("B"));
    }
}
