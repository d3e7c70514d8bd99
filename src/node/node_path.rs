use derive_more::Display;
use thiserror::Error;

use super::{NodeName, PATH_SEPARATOR};

/// A hierarchy node path.
///
/// A node path is an absolute, slash-delimited path to a group, variable, or dimension.
/// The root group has the path `/`.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display)]
#[display("{}", _0)]
pub struct NodePath(String);

/// An invalid node path.
#[derive(Debug, Error)]
#[error("invalid node path {0}")]
pub struct NodePathError(String);

impl NodePath {
    /// Create a new node path from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`NodePathError`] if `path` is not valid according to [`NodePath::validate`()].
    pub fn new(path: &str) -> Result<Self, NodePathError> {
        if Self::validate(path) {
            Ok(Self(path.to_string()))
        } else {
            Err(NodePathError(path.to_string()))
        }
    }

    /// The root node.
    #[must_use]
    pub fn root() -> Self {
        Self(PATH_SEPARATOR.to_string())
    }

    /// Extracts a string slice containing the node path `String`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Indicates if this is the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Returns the path of the child `name` of this node.
    ///
    /// The root case does not duplicate the separator, so the child `a` of `/` is `/a` and the child `b` of `/a` is `/a/b`.
    #[must_use]
    pub fn child(&self, name: &NodeName) -> Self {
        if self.is_root() {
            Self(format!("/{}", name.as_str()))
        } else {
            Self(format!("{}/{}", self.0, name.as_str()))
        }
    }

    /// Returns the last component of the path, or the empty string for the root.
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.rsplit(PATH_SEPARATOR).next().unwrap_or_default()
    }

    /// Returns the parent path, or [`None`] for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        match self.0.rfind(PATH_SEPARATOR) {
            Some(0) => Some(Self::root()),
            Some(index) => Some(Self(self.0[..index].to_string())),
            None => None,
        }
    }

    /// The depth of the path, where the root is at depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        if self.is_root() {
            0
        } else {
            self.0.matches(PATH_SEPARATOR).count()
        }
    }

    /// Returns the ancestors of this path, nearest first, ending with the root.
    #[must_use]
    pub fn ancestors(&self) -> Vec<NodePath> {
        let mut ancestors = Vec::with_capacity(self.depth());
        let mut current = self.parent();
        while let Some(path) = current {
            current = path.parent();
            ancestors.push(path);
        }
        ancestors
    }

    /// Indicates if this path is a strict ancestor of `other` on a component boundary.
    #[must_use]
    pub fn is_ancestor_of(&self, other: &NodePath) -> bool {
        if self.is_root() {
            !other.is_root()
        } else {
            other
                .0
                .strip_prefix(self.0.as_str())
                .is_some_and(|rest| rest.starts_with(PATH_SEPARATOR))
        }
    }

    /// Validates a path:
    /// - a path always starts with `/`, and
    /// - a non-root path cannot end with `/`.
    ///
    /// Additionally, it checks that there are no empty components (i.e. a `//` substring).
    #[must_use]
    pub fn validate(path: &str) -> bool {
        path.eq("/") || (path.starts_with('/') && !path.ends_with('/') && !path.contains("//"))
    }
}

impl TryFrom<&str> for NodePath {
    type Error = NodePathError;

    fn try_from(path: &str) -> Result<Self, Self::Error> {
        Self::new(path)
    }
}

impl AsRef<str> for NodePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_path() {
        assert!(NodePath::new("/").is_ok());
        assert!(NodePath::new("/a/b").is_ok());
        assert_eq!(NodePath::new("/a/b").unwrap().to_string(), "/a/b");
        assert!(NodePath::new("/a/b/").is_err());
        assert_eq!(
            NodePath::new("/a/b/").unwrap_err().to_string(),
            "invalid node path /a/b/"
        );
        assert!(NodePath::new("/a//b").is_err());
        assert!(NodePath::new("a/b").is_err());
    }

    #[test]
    fn node_path_child() {
        let a = NodeName::new("a").unwrap();
        let b = NodeName::new("b").unwrap();
        let path = NodePath::root().child(&a);
        assert_eq!(path.as_str(), "/a");
        assert_eq!(path.child(&b).as_str(), "/a/b");
    }

    #[test]
    fn node_path_depth_parent() {
        let path = NodePath::new("/g5/g5g1/rz").unwrap();
        assert_eq!(NodePath::root().depth(), 0);
        assert_eq!(NodePath::new("/g5").unwrap().depth(), 1);
        assert_eq!(path.depth(), 3);
        assert_eq!(path.name(), "rz");
        assert_eq!(path.parent().unwrap().as_str(), "/g5/g5g1");
        assert_eq!(NodePath::new("/g5").unwrap().parent(), Some(NodePath::root()));
        assert_eq!(NodePath::root().parent(), None);
        assert_eq!(
            path.ancestors()
                .iter()
                .map(NodePath::as_str)
                .collect::<Vec<_>>(),
            vec!["/g5/g5g1", "/g5", "/"]
        );
    }

    #[test]
    fn node_path_ancestor() {
        let g1 = NodePath::new("/g1").unwrap();
        assert!(g1.is_ancestor_of(&NodePath::new("/g1/v1").unwrap()));
        assert!(!g1.is_ancestor_of(&NodePath::new("/g10/v1").unwrap()));
        assert!(!g1.is_ancestor_of(&g1));
        assert!(NodePath::root().is_ancestor_of(&g1));
        assert!(!NodePath::root().is_ancestor_of(&NodePath::root()));
    }
}
