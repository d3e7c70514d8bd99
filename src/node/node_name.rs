use derive_more::Display;
use thiserror::Error;

/// A hierarchy node name.
///
/// The relative name of a group, variable, or dimension.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Display)]
#[display("{}", _0)]
pub struct NodeName(String);

/// An invalid node name.
#[derive(Debug, Error)]
#[error("invalid node name {0}")]
pub struct NodeNameError(String);

impl NodeName {
    /// Create a new node name from `name`.
    ///
    /// # Errors
    ///
    /// Returns [`NodeNameError`] if `name` is not valid according to [`NodeName::validate`()].
    pub fn new(name: &str) -> Result<Self, NodeNameError> {
        if Self::validate(name) {
            Ok(Self(name.to_string()))
        } else {
            Err(NodeNameError(name.to_string()))
        }
    }

    /// The root node.
    #[must_use]
    pub const fn root() -> Self {
        Self(String::new())
    }

    /// Extracts a string slice containing the node name `String`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validates a node name:
    /// - the root node does not have a name and is the empty string "". Otherwise,
    /// - must not be the empty string (""), and
    /// - must not include the character "/".
    #[must_use]
    pub fn validate(node_name: &str) -> bool {
        node_name.is_empty() || !node_name.contains('/')
    }

    /// Indicates if a node has the root node name ("").
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}
