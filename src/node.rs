//! Hierarchy nodes.
//!
//! Every group, variable, and dimension in a hierarchical dataset is addressed by an absolute [`NodePath`] built from [`NodeName`] components.
//!
//! This module also provides [`component_matches`], the component-bounded substring search shared by coordinate scoping and selector matching.

mod component_match;
mod node_name;
mod node_path;

pub use component_match::{component_matches, ComponentMatch};
pub use node_name::{NodeName, NodeNameError};
pub use node_path::{NodePath, NodePathError};

/// The hierarchy path separator.
pub const PATH_SEPARATOR: char = '/';
